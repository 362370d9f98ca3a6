use crate::api::{ActivityClient, ActivityDay, RankMetric, Result, UserActivity, UserProfile};
use crate::languages::{aggregate_languages, LanguageShare};
use crate::rank::{estimate_ranking, Rankings};
use crate::streak::{compute_streaks_with, GapRule};
use chrono::{Datelike, NaiveDate};
use log::debug;
use serde::Serialize;
use std::sync::Arc;

/// Combined year-in-review record returned to the presentation layer.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WrappedSummary {
    pub user: UserProfile,
    pub summary: SummaryTotals,
    pub rankings: Rankings,
    pub calendar: Vec<ActivityDay>,
    pub languages: Vec<LanguageShare>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryTotals {
    pub total_contributions: u32,
    pub total_commits: u32,
    pub total_issues: u32,
    pub total_pull_requests: u32,
    pub total_reviews: u32,
    pub longest_streak: u32,
    pub current_streak: u32,
    pub total_stars: u32,
    pub repos_updated: u32,
}

pub struct WrappedCalculator<CLIENT>
where
    CLIENT: 'static + ActivityClient,
{
    client: Arc<CLIENT>,
    rank_metric: RankMetric,
    gap_rule: GapRule,
}

impl<CLIENT> WrappedCalculator<CLIENT>
where
    CLIENT: 'static + ActivityClient,
{
    pub fn new(client: CLIENT, rank_metric: RankMetric) -> Self {
        WrappedCalculator {
            client: Arc::new(client),
            rank_metric,
            gap_rule: GapRule::Lenient,
        }
    }

    pub fn with_gap_rule(mut self, gap_rule: GapRule) -> Self {
        self.gap_rule = gap_rule;
        self
    }

    /// Fetches one year of activity ending at `reference` and derives the
    /// summary metrics. `region` feeds the optional regional ranking.
    pub async fn summarize(
        &self,
        username: &str,
        reference: NaiveDate,
        region: Option<&str>,
    ) -> Result<WrappedSummary> {
        let year = reference.year();
        let activity = self.client.yearly_activity(username, year).await?;
        debug!(
            "Fetched {} calendar weeks and {} repositories for {}",
            activity.weeks.len(),
            activity.repositories.len(),
            username
        );
        Ok(self.assemble(activity, reference, region))
    }

    fn assemble(
        &self,
        activity: UserActivity,
        reference: NaiveDate,
        region: Option<&str>,
    ) -> WrappedSummary {
        let year = reference.year();
        let calendar: Vec<ActivityDay> = activity
            .weeks
            .into_iter()
            .flat_map(|week| week.days)
            .collect();

        let streaks = compute_streaks_with(&calendar, reference, self.gap_rule);
        let languages = aggregate_languages(&activity.repositories, year);

        let totals = activity.totals;
        let metric_value = match self.rank_metric {
            RankMetric::Contributions => totals.total(),
            RankMetric::Commits => totals.commits,
        };
        let rankings = estimate_ranking(metric_value as u64, region);

        let repos_this_year = activity
            .repositories
            .iter()
            .filter(|repo| repo.updated_at.year() == year);
        let mut total_stars = 0;
        let mut repos_updated = 0;
        for repo in repos_this_year {
            total_stars += repo.stars;
            repos_updated += 1;
        }

        WrappedSummary {
            user: activity.user,
            summary: SummaryTotals {
                total_contributions: totals.total(),
                total_commits: totals.commits,
                total_issues: totals.issues,
                total_pull_requests: totals.pull_requests,
                total_reviews: totals.reviews,
                longest_streak: streaks.longest,
                current_streak: streaks.current,
                total_stars,
                repos_updated,
            },
            rankings,
            calendar,
            languages,
        }
    }
}

/// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{
        ActivityWeek, ContributionTotals, Error, LanguageEdge, Repository, UserActivity,
    };
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};

    struct FakeClient {
        activity: Option<UserActivity>,
    }

    #[async_trait]
    impl ActivityClient for FakeClient {
        async fn yearly_activity(&self, _username: &str, _year: i32) -> Result<UserActivity> {
            self.activity.clone().ok_or(Error::NotFound)
        }
    }

    fn sample_activity() -> UserActivity {
        let days = |dates: &[(u32, u32)]| ActivityWeek {
            days: dates
                .iter()
                .map(|&(day, count)| {
                    ActivityDay::new(NaiveDate::from_ymd_opt(2022, 6, day).unwrap(), count)
                })
                .collect(),
        };
        UserActivity {
            user: UserProfile {
                login: "octocat".to_string(),
                name: "The Octocat".to_string(),
                avatar_url: "https://example.test/a.png".to_string(),
            },
            totals: ContributionTotals {
                commits: 400,
                issues: 30,
                pull_requests: 50,
                reviews: 20,
            },
            calendar_total: 500,
            weeks: vec![days(&[(1, 0), (2, 2)]), days(&[(3, 1), (4, 5)])],
            repositories: vec![
                Repository {
                    name: "hello".to_string(),
                    stars: 7,
                    updated_at: Utc.with_ymd_and_hms(2022, 5, 1, 0, 0, 0).unwrap(),
                    languages: vec![LanguageEdge {
                        name: "Rust".to_string(),
                        color: Some("#dea584".to_string()),
                        size: 900,
                    }],
                },
                Repository {
                    name: "old".to_string(),
                    stars: 100,
                    updated_at: Utc.with_ymd_and_hms(2020, 5, 1, 0, 0, 0).unwrap(),
                    languages: vec![LanguageEdge {
                        name: "C".to_string(),
                        color: None,
                        size: 100,
                    }],
                },
            ],
        }
    }

    fn calculator(activity: Option<UserActivity>) -> WrappedCalculator<FakeClient> {
        WrappedCalculator::new(FakeClient { activity }, RankMetric::Contributions)
    }

    #[tokio::test]
    async fn assembles_summary_from_fetched_activity() {
        let calculator = calculator(Some(sample_activity()));
        let reference = NaiveDate::from_ymd_opt(2022, 6, 4).unwrap();
        let summary = calculator
            .summarize("octocat", reference, Some("Finland"))
            .await
            .unwrap();

        assert_eq!(summary.user.login, "octocat");
        assert_eq!(summary.summary.total_contributions, 500);
        assert_eq!(summary.summary.total_commits, 400);
        assert_eq!(summary.summary.longest_streak, 3);
        assert_eq!(summary.summary.current_streak, 3);
        assert_eq!(summary.summary.total_stars, 7);
        assert_eq!(summary.summary.repos_updated, 1);
        assert_eq!(summary.calendar.len(), 4);
        assert_eq!(summary.languages.len(), 1);
        assert_eq!(summary.languages[0].name, "Rust");
        assert_eq!(summary.languages[0].percentage, 100);
        assert_eq!(summary.rankings.region.as_ref().unwrap().name, "Finland");
    }

    #[tokio::test]
    async fn commit_metric_feeds_commit_count_to_ranking() {
        let contributions = calculator(Some(sample_activity()))
            .summarize("octocat", NaiveDate::from_ymd_opt(2022, 6, 4).unwrap(), None)
            .await
            .unwrap();
        let commits_only =
            WrappedCalculator::new(FakeClient { activity: Some(sample_activity()) }, RankMetric::Commits)
                .summarize("octocat", NaiveDate::from_ymd_opt(2022, 6, 4).unwrap(), None)
                .await
                .unwrap();
        // 400 commits rank below the 500 total contributions.
        assert!(commits_only.rankings.world.percentile < contributions.rankings.world.percentile);
    }

    #[tokio::test]
    async fn upstream_not_found_propagates() {
        let calculator = calculator(None);
        let reference = NaiveDate::from_ymd_opt(2022, 6, 4).unwrap();
        let err = calculator.summarize("ghost", reference, None).await.unwrap_err();
        assert!(matches!(err, Error::NotFound));
    }

    #[test]
    fn summary_serializes_with_camel_case_fields() {
        let calculator = calculator(Some(sample_activity()));
        let reference = NaiveDate::from_ymd_opt(2022, 6, 4).unwrap();
        let summary = calculator.assemble(sample_activity(), reference, None);
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json["user"]["avatarUrl"].is_string());
        assert!(json["summary"]["totalPullRequests"].is_u64());
        assert!(json["rankings"]["world"]["topPercent"].is_number());
        assert!(json["rankings"].get("region").is_none());
        assert_eq!(json["calendar"][1]["count"], 2);
    }
}
