//! Report shapes returned by the analysis entry points.

use super::distribution::{
    area_distribution, education_distribution, experience_distribution, AreaCount,
    EducationCount, ExperienceCount,
};
use super::salary::SalaryStatistics;
use super::text::{analysis_text, skill_demand, KeywordWeight, Segmenter, SkillDemand, TOP_KEYWORDS};
use crate::types::{JobPosting, NO_DATA_MESSAGE};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Body of a report over an empty corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoData {
    pub total_jobs: usize,
    pub message: String,
}

impl Default for NoData {
    fn default() -> Self {
        Self {
            total_jobs: 0,
            message: NO_DATA_MESSAGE.to_string(),
        }
    }
}

/// A report, or the "no data" shape when the corpus is empty.
///
/// Serialized untagged, so callers see either the report fields or
/// `{"total_jobs": 0, "message": "暂无数据"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Report<T> {
    Data(T),
    NoData(NoData),
}

impl<T> Report<T> {
    pub fn no_data() -> Self {
        Self::NoData(NoData::default())
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Data(d) => Some(d),
            Self::NoData(_) => None,
        }
    }
}

/// Basic statistics for one keyword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
    pub total_jobs: usize,
    /// Distinct non-empty company names.
    pub company_count: usize,
    pub salary_statistics: SalaryStatistics,
    pub area_distribution: Vec<AreaCount>,
    pub experience_distribution: Vec<ExperienceCount>,
    pub education_distribution: Vec<EducationCount>,
}

impl StatsReport {
    pub fn from_jobs(jobs: &[JobPosting]) -> Report<Self> {
        if jobs.is_empty() {
            return Report::no_data();
        }
        let companies: HashSet<&str> = jobs
            .iter()
            .map(|j| j.company.as_str())
            .filter(|c| !c.is_empty())
            .collect();

        Report::Data(Self {
            total_jobs: jobs.len(),
            company_count: companies.len(),
            salary_statistics: SalaryStatistics::from_raw(jobs.iter().map(|j| j.salary.as_str())),
            area_distribution: area_distribution(jobs),
            experience_distribution: experience_distribution(jobs),
            education_distribution: education_distribution(jobs),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateCount {
    /// `YYYY-MM-DD`.
    pub date: String,
    pub count: usize,
}

/// Crawl-time trends of a corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trends {
    /// Crawl time of the most recent posting.
    pub latest_crawl: String,
    /// Postings per crawl date, oldest first.
    pub job_count_by_date: Vec<DateCount>,
}

impl Trends {
    /// Trends over postings ordered most recent first.
    pub fn from_jobs(jobs: &[JobPosting]) -> Self {
        let mut by_date: BTreeMap<&str, usize> = BTreeMap::new();
        for job in jobs {
            let date = job.crawl_time.split_whitespace().next().unwrap_or("");
            *by_date.entry(date).or_default() += 1;
        }
        Self {
            latest_crawl: jobs.first().map(|j| j.crawl_time.clone()).unwrap_or_default(),
            job_count_by_date: by_date
                .into_iter()
                .map(|(date, count)| DateCount {
                    date: date.to_string(),
                    count,
                })
                .collect(),
        }
    }
}

/// Detailed analysis for one keyword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub keyword: String,
    pub total_jobs: usize,
    pub top_keywords: Vec<KeywordWeight>,
    pub required_skills: Vec<SkillDemand>,
    pub salary_range_analysis: SalaryStatistics,
    pub trends: Trends,
    /// Crawl time of the most recent posting.
    pub analysis_time: String,
}

impl AnalysisReport {
    /// Build from postings ordered most recent first.
    pub fn from_jobs(keyword: &str, jobs: &[JobPosting], segmenter: &Segmenter) -> Report<Self> {
        if jobs.is_empty() {
            return Report::no_data();
        }
        let text = analysis_text(jobs);
        let trends = Trends::from_jobs(jobs);

        Report::Data(Self {
            keyword: keyword.to_string(),
            total_jobs: jobs.len(),
            top_keywords: segmenter.keywords(&text, TOP_KEYWORDS),
            required_skills: skill_demand(&text),
            salary_range_analysis: SalaryStatistics::from_raw(jobs.iter().map(|j| j.salary.as_str())),
            analysis_time: trends.latest_crawl.clone(),
            trends,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_json_diff::assert_json_eq;
    use serde_json::json;

    fn job(company: &str, salary: &str, crawl_time: &str) -> JobPosting {
        JobPosting {
            company: company.to_string(),
            salary: salary.to_string(),
            ..JobPosting::placeholder("Go", crawl_time)
        }
    }

    #[test]
    fn test_no_data_shape() {
        let report = StatsReport::from_jobs(&[]);
        assert!(report.is_no_data());
        assert_json_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({"total_jobs": 0, "message": "暂无数据"})
        );
    }

    #[test]
    fn test_stats_report_shape() {
        let jobs = vec![
            job("腾讯", "15K-25K", "2026-03-02 10:00:00"),
            job("腾讯", "30K-50K", "2026-03-02 09:00:00"),
            job("", "", "2026-03-01 09:00:00"),
        ];
        let report = StatsReport::from_jobs(&jobs);
        assert_json_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({
                "total_jobs": 3,
                "company_count": 1,
                "salary_statistics": {
                    "avg": 30.0, "min": 20, "max": 40, "median": 30,
                    "distribution": [
                        {"range": "20-25K", "count": 1, "percentage": 50.0},
                        {"range": "40-50K", "count": 1, "percentage": 50.0}
                    ]
                },
                "area_distribution": [{"area": "未知地区", "count": 3}],
                "experience_distribution": [{"experience": "不限", "count": 3}],
                "education_distribution": [{"education": "不限", "count": 3}]
            })
        );
    }

    #[test]
    fn test_trends_group_by_date_ascending() {
        let jobs = vec![
            job("a", "", "2026-03-02 10:00:00"),
            job("b", "", "2026-03-02 09:00:00"),
            job("c", "", "2026-03-01 09:00:00"),
        ];
        let trends = Trends::from_jobs(&jobs);
        assert_eq!(trends.latest_crawl, "2026-03-02 10:00:00");
        assert_eq!(
            trends.job_count_by_date,
            vec![
                DateCount { date: "2026-03-01".into(), count: 1 },
                DateCount { date: "2026-03-02".into(), count: 2 },
            ]
        );
    }

    #[test]
    fn test_untagged_round_trip_distinguishes_no_data() {
        let v = json!({"total_jobs": 0, "message": "暂无数据"});
        let parsed: Report<StatsReport> = serde_json::from_value(v).unwrap();
        assert!(parsed.is_no_data());
        assert!(parsed.data().is_none());
    }
}
