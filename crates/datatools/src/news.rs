use crate::client::Fetcher;
use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use datatools_core::envelope::{error_envelope, is_error_envelope, NEWS_ERROR_LABEL};
use datatools_core::news::{extract_headlines, headlines_request};
use serde_json::Value;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct NewsOptions {
    /// Search query for the headlines (e.g., "AI advancements")
    pub query: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: NewsOptions, ctx: &crate::Context) -> Result<()> {
    if ctx.verbose {
        eprintln!("GNews API Base: {}", ctx.fetcher.endpoints().gnews);
    }

    let api_key = ctx.require_gnews_api_key()?;
    let response = news_headlines_or_error(&ctx.fetcher, &options.query, api_key).await;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    if is_error_envelope(&response) {
        println!("{}", response["error"].as_str().unwrap_or_default().red());
        return Ok(());
    }

    let headlines = extract_headlines(&response);
    if headlines.is_empty() {
        println!("{}", "No articles found.".yellow());
    }
    for (idx, headline) in headlines.iter().enumerate() {
        println!(
            "\n{} {}",
            format!("[{}]", idx + 1).yellow().bold(),
            headline.title.as_deref().unwrap_or("(No title)").white().bold()
        );
        println!(
            "    {}: {} | {}: {}",
            "Source".green(),
            headline.source.as_deref().unwrap_or("unknown"),
            "Published".green(),
            headline.published_at.as_deref().unwrap_or("unknown").bright_black()
        );
        if let Some(url) = &headline.url {
            println!("    {}: {}", "URL".green(), url.cyan().underline());
        }
    }

    Ok(())
}

/// Search English US headlines for `query` with a caller-supplied GNews key
pub async fn news_headlines_data(
    fetcher: &Fetcher,
    query: &str,
    api_key: &str,
) -> Result<Value, FetchError> {
    let spec = headlines_request(&fetcher.endpoints().gnews, query, api_key);
    fetcher.get_json(&spec).await
}

/// [`news_headlines_data`] that never fails: errors become `{"error": "Error fetching news headlines: ..."}`
pub async fn news_headlines_or_error(fetcher: &Fetcher, query: &str, api_key: &str) -> Value {
    news_headlines_data(fetcher, query, api_key)
        .await
        .unwrap_or_else(|e| error_envelope(NEWS_ERROR_LABEL, e))
}
