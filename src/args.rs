use clap::Parser;
use secrecy::SecretString;
use wrapped::api::RankMetric;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// GitHub login to summarize
    #[clap(short, long, env)]
    pub username: String,

    /// Region the user belongs to, enables the regional ranking
    #[clap(short, long, env)]
    pub country: Option<String>,

    /// Activity scalar fed into the percentile ranking
    #[clap(short, long, env, default_value = "contributions")]
    pub rank_metric: RankMetric,

    /// Break the longest streak on missing calendar records
    #[clap(long, env)]
    pub strict_streaks: bool,

    /// API OAuth access token
    #[clap(short, long, env = "GITHUB_TOKEN")]
    pub api_token: Option<SecretString>,

    /// Repository API URL
    #[clap(long, env, default_value = "https://api.github.com")]
    pub api_url: String,
}
