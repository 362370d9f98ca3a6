use chrono::Utc;
use github_client::GithubClientBuilder;
use log::info;
use wrapped::api::{Error, Result};
use wrapped::{GapRule, WrappedCalculator, WrappedSummary};

pub mod args;
pub mod counter;

pub use args::Args;

/// Runs one year-in-review summarization for the user named in `args`.
pub async fn wrap_year(args: Args) -> Result<WrappedSummary> {
    if args.username.trim().is_empty() {
        return Err(Error::MissingInput);
    }
    let token = args.api_token.ok_or(Error::Unauthenticated)?;

    let client = GithubClientBuilder::default()
        .with_api_url(args.api_url)
        .try_with_token(token)?
        .build()?;

    let gap_rule = if args.strict_streaks {
        GapRule::Strict
    } else {
        GapRule::Lenient
    };
    let calculator = WrappedCalculator::new(client, args.rank_metric).with_gap_rule(gap_rule);

    info!("Serving summary request #{}", counter::SEARCHES.record());

    let today = Utc::now().date_naive();
    calculator
        .summarize(&args.username, today, args.country.as_deref())
        .await
}
