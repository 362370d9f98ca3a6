use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use strum_macros::{Display, EnumString};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Username is required")]
    MissingInput,
    #[error("API token not configured")]
    Unauthenticated,
    #[error("User not found")]
    NotFound,
    #[error("Upstream error: {0}")]
    Upstream(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Contributions made on a single calendar day.
///
/// Dates are unique within one calendar but the sequence may arrive unsorted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ActivityDay {
    pub date: NaiveDate,
    pub count: u32,
}

impl ActivityDay {
    pub fn new(date: NaiveDate, count: u32) -> Self {
        ActivityDay { date, count }
    }
}

/// One week column of the contribution calendar, as delivered upstream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivityWeek {
    pub days: Vec<ActivityDay>,
}

/// One language slice of a repository, keyed by language name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguageEdge {
    pub name: String,
    pub color: Option<String>,
    pub size: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Repository {
    pub name: String,
    pub stars: u32,
    pub updated_at: DateTime<Utc>,
    pub languages: Vec<LanguageEdge>,
}

/// The four per-type contribution subtotals reported for the year.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ContributionTotals {
    pub commits: u32,
    pub issues: u32,
    pub pull_requests: u32,
    pub reviews: u32,
}

impl ContributionTotals {
    pub fn total(&self) -> u32 {
        self.commits + self.issues + self.pull_requests + self.reviews
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub login: String,
    pub name: String,
    pub avatar_url: String,
}

/// One year of a user's raw activity as fetched from the data source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserActivity {
    pub user: UserProfile,
    pub totals: ContributionTotals,
    pub calendar_total: u32,
    pub weeks: Vec<ActivityWeek>,
    pub repositories: Vec<Repository>,
}

/// Scalar fed into the percentile ranking model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum RankMetric {
    /// Sum of commit, issue, pull request and review contributions.
    Contributions,
    /// Commit contributions alone.
    Commits,
}

#[async_trait]
pub trait ActivityClient: Send + Sync {
    /// Fetches `username`'s activity for `year`, spanning January 1 through
    /// December 31 in UTC.
    async fn yearly_activity(&self, username: &str, year: i32) -> Result<UserActivity>;
}
