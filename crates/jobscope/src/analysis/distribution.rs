//! Categorical distributions over a corpus.

use crate::types::JobPosting;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Areas reported in an area distribution.
pub const TOP_AREAS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaCount {
    pub area: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceCount {
    pub experience: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationCount {
    pub education: String,
    pub count: usize,
}

/// Count occurrences, most frequent first. Ties keep first-seen order.
pub fn ranked<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<(&'a str, usize)> {
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut counts: Vec<(&'a str, usize)> = Vec::new();
    for value in values {
        match index.get(value) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(value, counts.len());
                counts.push((value, 1));
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Top areas, ignoring postings with an empty area.
pub fn area_distribution(jobs: &[JobPosting]) -> Vec<AreaCount> {
    ranked(jobs.iter().map(|j| j.area.as_str()).filter(|a| !a.is_empty()))
        .into_iter()
        .take(TOP_AREAS)
        .map(|(area, count)| AreaCount {
            area: area.to_string(),
            count,
        })
        .collect()
}

/// Every experience requirement with its count.
pub fn experience_distribution(jobs: &[JobPosting]) -> Vec<ExperienceCount> {
    ranked(jobs.iter().map(|j| j.experience.as_str()))
        .into_iter()
        .map(|(experience, count)| ExperienceCount {
            experience: experience.to_string(),
            count,
        })
        .collect()
}

/// Every education requirement with its count.
pub fn education_distribution(jobs: &[JobPosting]) -> Vec<EducationCount> {
    ranked(jobs.iter().map(|j| j.education.as_str()))
        .into_iter()
        .map(|(education, count)| EducationCount {
            education: education.to_string(),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(area: &str, experience: &str, education: &str) -> JobPosting {
        JobPosting {
            area: area.to_string(),
            experience: experience.to_string(),
            education: education.to_string(),
            ..JobPosting::placeholder("Go", "2026-03-01 12:00:00")
        }
    }

    #[test]
    fn test_ranked_ties_keep_first_seen_order() {
        let r = ranked(["b", "a", "c", "a", "b", "d"]);
        assert_eq!(r, vec![("b", 2), ("a", 2), ("c", 1), ("d", 1)]);
    }

    #[test]
    fn test_area_top_ten_skips_empty() {
        let mut jobs: Vec<JobPosting> = (0..12)
            .map(|i| job(&format!("城市{i}"), "不限", "本科"))
            .collect();
        jobs.push(job("城市11", "不限", "本科"));
        jobs.push(job("", "不限", "本科"));
        jobs.push(job("", "不限", "本科"));

        let areas = area_distribution(&jobs);
        assert_eq!(areas.len(), 10);
        assert_eq!(areas[0].area, "城市11");
        assert_eq!(areas[0].count, 2);
        assert!(areas.iter().all(|a| !a.area.is_empty()));
    }

    #[test]
    fn test_categorical_counts_cover_corpus() {
        let jobs = vec![
            job("北京", "3-5年", "本科"),
            job("上海", "1-3年", "硕士"),
            job("北京", "3-5年", "本科"),
            job("深圳", "不限", "本科"),
        ];
        let exp = experience_distribution(&jobs);
        let edu = education_distribution(&jobs);
        assert_eq!(exp.iter().map(|e| e.count).sum::<usize>(), jobs.len());
        assert_eq!(edu.iter().map(|e| e.count).sum::<usize>(), jobs.len());
        assert_eq!(exp[0].experience, "3-5年");
        assert_eq!(edu[0], EducationCount { education: "本科".into(), count: 3 });
    }
}
