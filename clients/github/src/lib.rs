mod builder;
mod payload;

pub use builder::GithubClientBuilder;

use async_trait::async_trait;
use log::debug;
use payload::GraphQlResponse;
use reqwest::{Client, StatusCode};
use serde_json::json;
use wrapped::api::{ActivityClient, Error, Result, UserActivity};

const ACTIVITY_QUERY: &str = r#"
query($username: String!, $from: DateTime!, $to: DateTime!) {
  user(login: $username) {
    login
    name
    avatarUrl
    contributionsCollection(from: $from, to: $to) {
      totalCommitContributions
      totalIssueContributions
      totalPullRequestContributions
      totalPullRequestReviewContributions
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays {
            date
            contributionCount
          }
        }
      }
    }
    repositories(
      first: 100
      orderBy: { field: UPDATED_AT, direction: DESC }
      ownerAffiliations: OWNER
    ) {
      nodes {
        name
        stargazerCount
        updatedAt
        languages(first: 10, orderBy: { field: SIZE, direction: DESC }) {
          edges {
            size
            node {
              name
              color
            }
          }
        }
      }
    }
  }
}
"#;

pub struct GithubClient {
    client: Client,
    api_url: String,
}

#[async_trait]
impl ActivityClient for GithubClient {
    async fn yearly_activity(&self, username: &str, year: i32) -> Result<UserActivity> {
        let request_url = format!("{}/graphql", self.api_url);
        let body = json!({
            "query": ACTIVITY_QUERY,
            "variables": {
                "username": username,
                "from": format!("{}-01-01T00:00:00Z", year),
                "to": format!("{}-12-31T23:59:59Z", year),
            },
        });
        debug!("Querying {} for activity of {} in {}", request_url, username, year);
        let response = self
            .client
            .post(request_url)
            .json(&body)
            .send()
            .await
            .map_err(upstream)?;
        let response = check_status(response)?;
        let response = response.json::<GraphQlResponse>().await.map_err(upstream)?;
        into_activity(response)
    }
}

fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    match response.status() {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(Error::Unauthenticated),
        status if !status.is_success() => {
            Err(Error::Upstream(format!("GitHub API error: {}", status)))
        }
        _ => Ok(response),
    }
}

fn into_activity(response: GraphQlResponse) -> Result<UserActivity> {
    if let Some(errors) = response.errors {
        if errors.iter().any(|err| err.kind.as_deref() == Some("NOT_FOUND")) {
            return Err(Error::NotFound);
        }
        let message = errors
            .into_iter()
            .next()
            .map(|err| err.message)
            .unwrap_or_else(|| "GitHub API error".to_string());
        return Err(Error::Upstream(message));
    }
    response
        .data
        .and_then(|data| data.user)
        .map(UserActivity::from)
        .ok_or(Error::NotFound)
}

fn upstream(err: reqwest::Error) -> Error {
    Error::Upstream(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::GraphQlError;

    fn sample_response() -> &'static str {
        r##"{
            "data": {
                "user": {
                    "login": "octocat",
                    "name": null,
                    "avatarUrl": "https://example.test/a.png",
                    "contributionsCollection": {
                        "totalCommitContributions": 12,
                        "totalIssueContributions": 3,
                        "totalPullRequestContributions": 4,
                        "totalPullRequestReviewContributions": 1,
                        "contributionCalendar": {
                            "totalContributions": 20,
                            "weeks": [
                                { "contributionDays": [
                                    { "date": "2022-01-01", "contributionCount": 2 },
                                    { "date": "2022-01-02", "contributionCount": 0 }
                                ] }
                            ]
                        }
                    },
                    "repositories": {
                        "nodes": [
                            {
                                "name": "hello",
                                "stargazerCount": 5,
                                "updatedAt": "2022-03-01T10:00:00Z",
                                "languages": {
                                    "edges": [
                                        { "size": 900, "node": { "name": "Rust", "color": "#dea584" } }
                                    ]
                                }
                            }
                        ]
                    }
                }
            }
        }"##
    }

    #[test]
    fn payload_maps_into_activity() {
        let response: GraphQlResponse = serde_json::from_str(sample_response()).unwrap();
        let activity = into_activity(response).unwrap();
        assert_eq!(activity.user.login, "octocat");
        assert_eq!(activity.user.name, "octocat");
        assert_eq!(activity.totals.commits, 12);
        assert_eq!(activity.totals.total(), 20);
        assert_eq!(activity.weeks[0].days[0].count, 2);
        assert_eq!(activity.repositories[0].languages[0].name, "Rust");
    }

    #[test]
    fn missing_user_maps_to_not_found() {
        let response: GraphQlResponse = serde_json::from_str(r#"{ "data": { "user": null } }"#).unwrap();
        assert!(matches!(into_activity(response), Err(Error::NotFound)));
    }

    #[test]
    fn not_found_error_kind_wins_over_message() {
        let response = GraphQlResponse {
            data: None,
            errors: Some(vec![GraphQlError {
                message: "Could not resolve to a User".to_string(),
                kind: Some("NOT_FOUND".to_string()),
            }]),
        };
        assert!(matches!(into_activity(response), Err(Error::NotFound)));
    }

    #[test]
    fn other_graphql_errors_map_to_upstream() {
        let response = GraphQlResponse {
            data: None,
            errors: Some(vec![GraphQlError {
                message: "Something went wrong".to_string(),
                kind: None,
            }]),
        };
        match into_activity(response) {
            Err(Error::Upstream(message)) => assert_eq!(message, "Something went wrong"),
            other => panic!("Unexpected result: {:?}", other.map(|_| ())),
        }
    }
}
