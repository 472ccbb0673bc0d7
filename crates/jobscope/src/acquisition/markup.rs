//! Structural HTML extraction of job cards.
//!
//! Both the container lookup and the per-field lookup are driven by ordered
//! selector tables: the first container selector that matches anything
//! wins, and each field takes the text of the first sub-selector that
//! matches inside a container. Fields without a match keep their sentinel
//! default. Selectors are compiled per page because `scraper` documents are
//! `!Send` and never outlive a synchronous call anyway.

use super::strategy::PageContext;
use crate::types::{Field, JobPosting};
use scraper::{ElementRef, Html, Selector};

/// Job-card container selectors, tried in order.
pub const CONTAINER_SELECTORS: &[&str] = &[
    "div.job-primary",
    "li.job-card-wrapper",
    "div.job-card",
    "li.job-item",
];

/// Per-field sub-selectors, tried in order inside each container.
pub const FIELD_SELECTORS: &[(Field, &[&str])] = &[
    (Field::Title, &["a.job-title", "span.job-name", "div.job-name", "h3"]),
    (
        Field::Company,
        &["a.company-name", "div.company-text", "div.company-name"],
    ),
    (Field::Salary, &["span.salary", "span.red", "div.salary"]),
    (Field::Area, &["span.job-area", "span.area", "div.job-area"]),
    (Field::Experience, &["span.job-limit", "span.exp"]),
    (Field::Education, &["span.job-limit", "span.edu"]),
    (
        Field::Description,
        &["div.job-info", "div.info-desc", "p.job-desc"],
    ),
];

/// A field with its compiled sub-selectors.
pub type FieldRule = (Field, Vec<Selector>);

/// Extract postings from job-card containers.
pub fn extract(document: &Html, ctx: &PageContext<'_>) -> Vec<JobPosting> {
    let containers = find_containers(document, CONTAINER_SELECTORS, ctx.max_items);
    if containers.is_empty() {
        return Vec::new();
    }

    let rules = compile_rules(FIELD_SELECTORS);
    containers
        .into_iter()
        .map(|item| extract_item(item, &rules, ctx))
        .collect()
}

/// Containers matched by the first selector that matches anything, capped
/// at `max`.
pub fn find_containers<'a>(document: &'a Html, selectors: &[&str], max: usize) -> Vec<ElementRef<'a>> {
    for raw in selectors {
        let Some(sel) = compile(raw) else {
            continue;
        };
        let found: Vec<ElementRef<'a>> = document.select(&sel).take(max).collect();
        if !found.is_empty() {
            tracing::debug!("container selector {raw:?} matched {} item(s)", found.len());
            return found;
        }
    }
    Vec::new()
}

/// Compile a selector table, dropping selectors that fail to parse.
pub fn compile_rules(table: &[(Field, &[&str])]) -> Vec<FieldRule> {
    table
        .iter()
        .map(|(field, raws)| (*field, raws.iter().filter_map(|raw| compile(raw)).collect()))
        .collect()
}

fn compile(raw: &str) -> Option<Selector> {
    match Selector::parse(raw) {
        Ok(sel) => Some(sel),
        Err(e) => {
            tracing::warn!("ignoring invalid selector {raw:?}: {e:?}");
            None
        }
    }
}

/// Extract one posting from a container.
///
/// Each field is looked up independently; a field whose selectors match
/// nothing (or only empty elements) keeps its default, so an empty card
/// still yields a placeholder posting.
pub fn extract_item(item: ElementRef<'_>, rules: &[FieldRule], ctx: &PageContext<'_>) -> JobPosting {
    let mut job = JobPosting::placeholder(ctx.keyword, ctx.crawl_time);
    for (field, selectors) in rules {
        let text = selectors
            .iter()
            .find_map(|sel| item.select(sel).next())
            .map(element_text);
        if let Some(text) = text.filter(|t| !t.is_empty()) {
            job.set(*field, text);
        }
    }
    job
}

/// Concatenate an element's text nodes, each trimmed, with no separator.
pub fn element_text(el: ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AREA_UNKNOWN, COMPANY_UNKNOWN, SALARY_NEGOTIABLE, UNLIMITED};

    fn ctx() -> PageContext<'static> {
        PageContext {
            keyword: "Java",
            crawl_time: "2026-03-01 12:00:00",
            max_items: 30,
        }
    }

    #[test]
    fn test_job_card_wrapper_layout() {
        let html = r#"
        <ul>
          <li class="job-card-wrapper">
            <span class="job-name"> Java开发工程师 </span>
            <span class="salary">15K-25K</span>
            <span class="job-area">上海·浦东</span>
            <a class="company-name">携程</a>
            <span class="exp">3-5年</span>
            <span class="edu">本科</span>
            <p class="job-desc">Spring <b>MySQL</b></p>
          </li>
        </ul>
        "#;
        let doc = Html::parse_document(html);
        let jobs = extract(&doc, &ctx());
        assert_eq!(jobs.len(), 1);
        let j = &jobs[0];
        assert_eq!(j.title, "Java开发工程师");
        assert_eq!(j.salary, "15K-25K");
        assert_eq!(j.area, "上海·浦东");
        assert_eq!(j.company, "携程");
        assert_eq!(j.experience, "3-5年");
        assert_eq!(j.education, "本科");
        assert_eq!(j.description, "SpringMySQL");
    }

    #[test]
    fn test_first_matching_container_strategy_wins() {
        let html = r#"
        <div class="job-primary"><h3>Primary</h3></div>
        <div class="job-card"><h3>Card</h3></div>
        "#;
        let doc = Html::parse_document(html);
        let jobs = extract(&doc, &ctx());
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "Primary");
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        let html = r#"<div class="job-card"><div class="company-name">小米</div></div>"#;
        let doc = Html::parse_document(html);
        let jobs = extract(&doc, &ctx());
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "Java相关岗位");
        assert_eq!(jobs[0].company, "小米");
        assert_eq!(jobs[0].salary, SALARY_NEGOTIABLE);
        assert_eq!(jobs[0].area, AREA_UNKNOWN);
    }

    #[test]
    fn test_empty_container_keeps_its_slot() {
        let html = r#"
        <li class="job-item"><h3>第一</h3></li>
        <li class="job-item">   </li>
        <li class="job-item"><h3>第三</h3></li>
        "#;
        let doc = Html::parse_document(html);
        let jobs = extract(&doc, &ctx());
        let titles: Vec<_> = jobs.iter().map(|j| j.title.as_str()).collect();
        assert_eq!(titles, vec!["第一", "Java相关岗位", "第三"]);
    }

    #[test]
    fn test_empty_card_yields_default_posting() {
        let doc = Html::parse_document(r#"<li class="job-item"><span class="salary"></span></li>"#);
        let jobs = extract(&doc, &ctx());
        assert_eq!(jobs.len(), 1);
        let j = &jobs[0];
        assert_eq!(j.title, "Java相关岗位");
        assert_eq!(j.company, COMPANY_UNKNOWN);
        assert_eq!(j.salary, SALARY_NEGOTIABLE);
        assert_eq!(j.area, AREA_UNKNOWN);
        assert_eq!(j.experience, UNLIMITED);
        assert_eq!(j.education, UNLIMITED);
        assert_eq!(j.description, "");
        assert_eq!(j.keyword, "Java");
        assert_eq!(j.crawl_time, "2026-03-01 12:00:00");
    }

    #[test]
    fn test_container_cap() {
        let items: String = (0..45)
            .map(|i| format!(r#"<div class="job-primary"><h3>job {i}</h3></div>"#))
            .collect();
        let doc = Html::parse_document(&items);
        let jobs = extract(&doc, &ctx());
        assert_eq!(jobs.len(), 30);
        assert_eq!(jobs[29].title, "job 29");
    }

    #[test]
    fn test_shared_job_limit_selector() {
        let html = r#"<div class="job-primary"><span class="job-limit">1-3年本科</span></div>"#;
        let doc = Html::parse_document(html);
        let jobs = extract(&doc, &ctx());
        assert_eq!(jobs[0].experience, "1-3年本科");
        assert_eq!(jobs[0].education, "1-3年本科");
    }

    #[test]
    fn test_invalid_selector_is_ignored() {
        let rules = compile_rules(&[(Field::Title, &["h3[", "h3"])]);
        assert_eq!(rules[0].1.len(), 1);
    }

    #[test]
    fn test_no_containers() {
        let doc = Html::parse_document("<html><body><p>nothing here</p></body></html>");
        assert!(extract(&doc, &ctx()).is_empty());
    }
}
