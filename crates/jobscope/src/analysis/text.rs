//! Text analysis: segmentation, keyword ranking, skill demand and the
//! word-cloud term feed.

use super::round_to;
use crate::types::JobPosting;
use jieba_rs::{Jieba, KeywordExtract, TfIdf};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Terms registered with the segmenter so they are never split.
pub const TECH_VOCABULARY: &[&str] = &[
    "Python", "Java", "JavaScript", "React", "Vue", "Angular", "Spring", "Django", "Flask",
    "FastAPI", "MySQL", "Redis", "Docker", "K8s", "Kubernetes", "AWS", "阿里云", "腾讯云",
    "机器学习", "深度学习", "神经网络", "AI", "人工智能", "数据分析", "数据挖掘", "大数据",
    "Hadoop", "Spark", "前端开发", "后端开发", "全栈开发", "算法工程师", "数据工程师",
];

/// Skills scanned for in the skill-demand report, in tie-break order.
pub const SKILLS: &[&str] = &[
    "Python", "Java", "JavaScript", "TypeScript", "Go", "C++", "C#", "React", "Vue", "Angular",
    "Node.js", "Spring", "Django", "Flask", "MySQL", "PostgreSQL", "MongoDB", "Redis",
    "Elasticsearch", "Docker", "Kubernetes", "AWS", "Azure", "Linux", "TensorFlow", "PyTorch",
    "机器学习", "深度学习", "数据分析",
];

/// Tokens dropped from the word-cloud feed.
pub const STOP_WORDS: &[&str] = &[
    "的", "了", "和", "是", "就", "都", "而", "及", "与", "或", "等", "在", "有", "为", "可", "能",
    "要", "会", "可以", "这个", "那个", "一个",
];

pub const TOP_KEYWORDS: usize = 20;
pub const TOP_SKILLS: usize = 15;

/// Default cap on distinct terms handed to a word-cloud renderer.
pub const DEFAULT_MAX_WORDS: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordWeight {
    pub word: String,
    /// TF-IDF weight, 4 decimals.
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillDemand {
    pub skill: String,
    pub count: usize,
    /// Occurrences per hundred characters of the scanned text, 2 decimals.
    pub demand_rate: f64,
}

/// Chinese word segmenter with the tech vocabulary registered.
pub struct Segmenter {
    jieba: Jieba,
    tfidf: TfIdf,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Segmenter {
    /// Load the default dictionary and register [`TECH_VOCABULARY`].
    pub fn new() -> Self {
        let mut jieba = Jieba::new();
        for word in TECH_VOCABULARY {
            jieba.add_word(word, None, None);
        }
        Self {
            jieba,
            tfidf: TfIdf::default(),
        }
    }

    /// Segment `text` into tokens, including whitespace and punctuation.
    pub fn cut<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.jieba.cut(text, true)
    }

    /// Top `top_k` TF-IDF keywords.
    pub fn keywords(&self, text: &str, top_k: usize) -> Vec<KeywordWeight> {
        self.tfidf
            .extract_keywords(&self.jieba, text, top_k, Vec::new())
            .into_iter()
            .map(|k| KeywordWeight {
                word: k.keyword,
                weight: round_to(k.weight, 4),
            })
            .collect()
    }

    /// Word-cloud feed: segmented tokens with noise removed.
    pub fn cloud_terms(&self, text: &str) -> TermStream {
        let kept: Vec<&str> = self
            .cut(text)
            .into_iter()
            .filter(|token| is_cloud_term(token))
            .collect();
        TermStream(kept.join(" "))
    }
}

fn is_cloud_term(token: &str) -> bool {
    token.chars().count() > 1
        && !token.trim().is_empty()
        && !token.chars().all(char::is_numeric)
        && !STOP_WORDS.contains(&token)
}

/// `"{title} {description} {company}"` per posting, joined by a space.
pub fn analysis_text(jobs: &[JobPosting]) -> String {
    jobs.iter()
        .map(|j| format!("{} {} {}", j.title, j.description, j.company))
        .collect::<Vec<_>>()
        .join(" ")
}

/// `"{title} {description}"` per posting, joined by a space.
pub fn cloud_text(jobs: &[JobPosting]) -> String {
    jobs.iter()
        .map(|j| format!("{} {}", j.title, j.description))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Case-insensitive counts of [`SKILLS`] in `text`, most demanded first.
pub fn skill_demand(text: &str) -> Vec<SkillDemand> {
    let haystack = text.to_lowercase();
    let chars = text.chars().count();
    if chars == 0 {
        return Vec::new();
    }

    let mut found: Vec<(&str, usize)> = SKILLS
        .iter()
        .map(|skill| (*skill, haystack.matches(&skill.to_lowercase()).count()))
        .filter(|(_, count)| *count > 0)
        .collect();
    found.sort_by(|a, b| b.1.cmp(&a.1));

    found
        .into_iter()
        .take(TOP_SKILLS)
        .map(|(skill, count)| SkillDemand {
            skill: skill.to_string(),
            count,
            demand_rate: round_to(count as f64 / chars as f64 * 100.0, 2),
        })
        .collect()
}

/// Space-separated tokens ready for a word-cloud renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TermStream(String);

/// A term with its number of occurrences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermFrequency {
    pub term: String,
    pub count: usize,
}

impl TermStream {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.0.split_whitespace()
    }

    /// Term counts, most frequent first, ties in first-seen order, capped
    /// at `max_words` distinct terms.
    pub fn frequencies(&self, max_words: usize) -> Vec<TermFrequency> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut counts: Vec<TermFrequency> = Vec::new();
        for term in self.terms() {
            match index.get(term) {
                Some(&i) => counts[i].count += 1,
                None => {
                    index.insert(term, counts.len());
                    counts.push(TermFrequency {
                        term: term.to_string(),
                        count: 1,
                    });
                }
            }
        }
        counts.sort_by(|a, b| b.count.cmp(&a.count));
        counts.truncate(max_words);
        counts
    }
}
