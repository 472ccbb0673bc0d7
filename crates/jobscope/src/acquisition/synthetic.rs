//! Deterministic synthetic postings for when the source is unusable.
//!
//! Records are built by index-modulo selection over fixed pools, so the
//! same keyword, page count and crawl time always produce the same set.

use super::SYNTHETIC_PER_PAGE;
use crate::types::JobPosting;
use std::num::NonZeroU32;

const COMPANIES: &[&str] = &[
    "阿里巴巴", "腾讯", "百度", "字节跳动", "美团", "滴滴", "京东", "网易", "小米", "华为",
    "蚂蚁集团", "快手", "拼多多", "小红书", "B站", "携程", "58同城", "新浪",
];

const AREAS: &[&str] = &["北京", "上海", "深圳", "杭州", "广州", "成都", "南京", "武汉"];

const SALARIES: &[&str] = &[
    "15K-25K", "20K-30K", "25K-40K", "30K-50K", "40K-60K", "50K-80K",
];

const EXPERIENCES: &[&str] = &["1-3年", "3-5年", "5-10年", "不限"];

const EDUCATIONS: &[&str] = &["本科", "硕士", "不限"];

fn descriptions(keyword: &str) -> [String; 5] {
    [
        format!("负责{keyword}相关系统的设计与开发，参与核心业务模块的实现"),
        format!("参与{keyword}项目的需求分析、系统设计和技术方案制定"),
        format!("负责{keyword}平台的架构设计，优化系统性能和用户体验"),
        format!("参与{keyword}产品的研发工作，负责关键技术难点攻关"),
        format!("负责{keyword}系统的维护和优化，保障系统稳定运行"),
    ]
}

/// Number of records synthesized for `max_pages`.
pub fn synthetic_count(max_pages: NonZeroU32) -> usize {
    max_pages.get() as usize * SYNTHETIC_PER_PAGE
}

/// Synthesize `max_pages × 10` postings stamped with `crawl_time`.
pub fn generate(keyword: &str, max_pages: NonZeroU32, crawl_time: &str) -> Vec<JobPosting> {
    let descriptions = descriptions(keyword);
    let title = format!("{keyword}开发工程师");

    (0..synthetic_count(max_pages))
        .map(|i| JobPosting {
            title: title.clone(),
            company: COMPANIES[i % COMPANIES.len()].to_string(),
            salary: SALARIES[i % SALARIES.len()].to_string(),
            area: AREAS[i % AREAS.len()].to_string(),
            experience: EXPERIENCES[i % EXPERIENCES.len()].to_string(),
            education: EDUCATIONS[i % EDUCATIONS.len()].to_string(),
            description: descriptions[i % descriptions.len()].clone(),
            keyword: keyword.to_string(),
            crawl_time: crawl_time.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TS: &str = "2026-03-01 12:00:00";

    fn pages(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn test_count_is_ten_per_page() {
        assert_eq!(generate("Rust", pages(1), TS).len(), 10);
        assert_eq!(generate("Rust", pages(3), TS).len(), 30);
    }

    #[test]
    fn test_deterministic() {
        let a = serde_json::to_string(&generate("数据分析", pages(4), TS)).unwrap();
        let b = serde_json::to_string(&generate("数据分析", pages(4), TS)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_index_modulo_cycling() {
        let jobs = generate("Go", pages(2), TS);
        assert_eq!(jobs[0].company, "阿里巴巴");
        assert_eq!(jobs[18].company, "阿里巴巴");
        assert_eq!(jobs[6].salary, "15K-25K");
        assert_eq!(jobs[8].area, "北京");
        assert_eq!(jobs[3].experience, "不限");
        assert_eq!(jobs[5].education, "不限");
        assert_eq!(jobs[0].title, "Go开发工程师");
        assert!(jobs[1].description.contains("Go项目"));
    }

    #[test]
    fn test_empty_keyword() {
        let jobs = generate("", pages(1), TS);
        assert_eq!(jobs[0].title, "开发工程师");
        assert!(jobs.iter().all(|j| j.keyword.is_empty()));
    }
}
