use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Selects which normalization ruleset applies to an uploaded file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ImportType {
    Posts,
    Analytics,
}

impl ImportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportType::Posts => "posts",
            ImportType::Analytics => "analytics",
        }
    }
}

impl fmt::Display for ImportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImportType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "posts" => Ok(ImportType::Posts),
            "analytics" => Ok(ImportType::Analytics),
            other => Err(format!("unknown import type '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    Draft,
    Scheduled,
    Posted,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Scheduled => "scheduled",
            PostStatus::Posted => "posted",
        }
    }
}

/// An imported post. All counters are non-negative.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PostRecord {
    pub content: String,
    pub posted_at: Option<DateTime<Utc>>,
    pub impressions: i32,
    pub likes: i32,
    pub replies: i32,
    pub retweets: i32,
    pub status: PostStatus,
    pub word_count: i32,
}

/// One day of account-level analytics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyMetricRecord {
    pub date: DateTime<Utc>,
    pub posts_count: i32,
    pub followers: i32,
    pub impressions: i32,
    pub engagements: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImportRecord {
    Post(PostRecord),
    DailyMetric(DailyMetricRecord),
}

impl ImportRecord {
    pub fn kind_str(&self) -> &'static str {
        match self {
            ImportRecord::Post(_) => "post",
            ImportRecord::DailyMetric(_) => "daily_metric",
        }
    }
}
