use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use wrapped::api;

#[derive(Deserialize, Debug)]
pub struct GraphQlResponse {
    pub data: Option<Data>,
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Deserialize, Debug)]
pub struct GraphQlError {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct Data {
    pub user: Option<User>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: String,
    pub contributions_collection: ContributionsCollection,
    pub repositories: RepositoryConnection,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ContributionsCollection {
    pub total_commit_contributions: u32,
    pub total_issue_contributions: u32,
    pub total_pull_request_contributions: u32,
    pub total_pull_request_review_contributions: u32,
    pub contribution_calendar: ContributionCalendar,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ContributionCalendar {
    pub total_contributions: u32,
    pub weeks: Vec<Week>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Week {
    pub contribution_days: Vec<ContributionDay>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ContributionDay {
    pub date: NaiveDate,
    pub contribution_count: u32,
}

#[derive(Deserialize, Debug)]
pub struct RepositoryConnection {
    pub nodes: Vec<Repository>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub name: String,
    pub stargazer_count: u32,
    pub updated_at: DateTime<Utc>,
    pub languages: LanguageConnection,
}

#[derive(Deserialize, Debug)]
pub struct LanguageConnection {
    pub edges: Vec<LanguageEdge>,
}

#[derive(Deserialize, Debug)]
pub struct LanguageEdge {
    pub size: u64,
    pub node: LanguageNode,
}

#[derive(Deserialize, Debug)]
pub struct LanguageNode {
    pub name: String,
    pub color: Option<String>,
}

impl From<User> for api::UserActivity {
    fn from(user: User) -> Self {
        let name = user.name.unwrap_or_else(|| user.login.clone());
        let contributions = user.contributions_collection;
        api::UserActivity {
            user: api::UserProfile {
                login: user.login,
                name,
                avatar_url: user.avatar_url,
            },
            totals: api::ContributionTotals {
                commits: contributions.total_commit_contributions,
                issues: contributions.total_issue_contributions,
                pull_requests: contributions.total_pull_request_contributions,
                reviews: contributions.total_pull_request_review_contributions,
            },
            calendar_total: contributions.contribution_calendar.total_contributions,
            weeks: contributions
                .contribution_calendar
                .weeks
                .into_iter()
                .map(api::ActivityWeek::from)
                .collect(),
            repositories: user
                .repositories
                .nodes
                .into_iter()
                .map(api::Repository::from)
                .collect(),
        }
    }
}

impl From<Week> for api::ActivityWeek {
    fn from(week: Week) -> Self {
        api::ActivityWeek {
            days: week
                .contribution_days
                .into_iter()
                .map(|day| api::ActivityDay::new(day.date, day.contribution_count))
                .collect(),
        }
    }
}

impl From<Repository> for api::Repository {
    fn from(repo: Repository) -> Self {
        api::Repository {
            name: repo.name,
            stars: repo.stargazer_count,
            updated_at: repo.updated_at,
            languages: repo
                .languages
                .edges
                .into_iter()
                .map(api::LanguageEdge::from)
                .collect(),
        }
    }
}

impl From<LanguageEdge> for api::LanguageEdge {
    fn from(edge: LanguageEdge) -> Self {
        api::LanguageEdge {
            name: edge.node.name,
            color: edge.node.color,
            size: edge.size,
        }
    }
}
