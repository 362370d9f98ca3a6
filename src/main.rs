use clap::Parser;
use gh_wrapped_app::Args;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();
    let args = Args::parse();

    let summary = gh_wrapped_app::wrap_year(args).await?;
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
