use crate::client::Fetcher;
use crate::credentials::{resolve_blocking, CredentialProvider};
use std::sync::Arc;
use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use datatools_core::search::{extract_answer, extract_hits, search_request};
use serde_json::Value;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct SearchOptions {
    /// Free-text search query
    pub query: String,

    /// Output the raw provider response as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: SearchOptions, ctx: &crate::Context) -> Result<()> {
    if ctx.verbose {
        eprintln!("Tavily API Base: {}", ctx.fetcher.endpoints().tavily);
    }

    let response =
        search_data(&ctx.fetcher, &ctx.search_credential, &options.query).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("{}", format_search_text(&options.query, &response));
    }

    Ok(())
}

/// Run a web search and return the provider's response unmodified
///
/// The credential is resolved before any request is sent; a prompt, if one is
/// needed, happens here on the blocking pool.
pub async fn search_data(
    fetcher: &Fetcher,
    credential: &Arc<dyn CredentialProvider>,
    query: &str,
) -> Result<Value, FetchError> {
    let api_key = resolve_blocking(credential).await?;
    let spec = search_request(&fetcher.endpoints().tavily, query);

    fetcher.json(&spec, Some(&api_key)).await
}

fn format_search_text(query: &str, response: &Value) -> String {
    let mut result = String::new();

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!(
        "{}\n",
        format!("SEARCH: {query}").bright_cyan().bold()
    ));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_cyan()));

    if let Some(answer) = extract_answer(response) {
        result.push_str(&format!("\n{}\n{}\n", "Answer".green().bold(), answer));
    }

    let hits = extract_hits(response);
    if hits.is_empty() {
        result.push_str(&format!("\n{}\n", "No results.".yellow()));
        return result;
    }

    for (idx, hit) in hits.iter().enumerate() {
        result.push_str(&format!(
            "\n{} {}\n",
            format!("[{}]", idx + 1).yellow().bold(),
            hit.title.as_deref().unwrap_or("(No title)").white().bold()
        ));
        if let Some(url) = &hit.url {
            result.push_str(&format!("    {}: {}\n", "URL".green(), url.cyan().underline()));
        }
        if let Some(content) = &hit.content {
            result.push_str(&format!("    {}\n", truncate_text(content, 300)));
        }
    }

    result
}

fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}
