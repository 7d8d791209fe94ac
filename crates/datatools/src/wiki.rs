use crate::client::Fetcher;
use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use datatools_core::wiki::{summary_request, transform_summary, WikiSummary, DEFAULT_SENTENCES};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct WikiOptions {
    /// Exact article title (e.g., "Rust (programming language)")
    pub title: String,

    /// Maximum number of sentences in the extract
    #[arg(short, long, default_value_t = DEFAULT_SENTENCES)]
    pub sentences: u32,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: WikiOptions, ctx: &crate::Context) -> Result<()> {
    if ctx.verbose {
        eprintln!("Wikipedia API Base: {}", ctx.fetcher.endpoints().wikipedia);
    }

    let summary = wiki_summary_data(&ctx.fetcher, &options.title, options.sentences).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", format_summary_text(&summary));
    }

    Ok(())
}

/// Fetch the plain-text summary of an article
///
/// A title that does not resolve is not an error; see [`WikiSummary::is_missing`].
pub async fn wiki_summary_data(
    fetcher: &Fetcher,
    title: &str,
    sentences: u32,
) -> Result<WikiSummary, FetchError> {
    let spec = summary_request(&fetcher.endpoints().wikipedia, title, sentences);
    let response: serde_json::Value = fetcher.get_json(&spec).await?;

    transform_summary(&response).map_err(FetchError::Decode)
}

fn format_summary_text(summary: &WikiSummary) -> String {
    let title = summary.title.as_deref().unwrap_or("(No title)");
    let mut result = String::new();

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!("{}\n", title.bright_cyan().bold()));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_cyan()));

    if summary.is_missing() {
        result.push_str(&format!("\n{}\n", "No article with this exact title.".yellow()));
        return result;
    }

    if let Some(pageid) = summary.pageid {
        result.push_str(&format!("{}: {}\n", "Page ID".green(), pageid));
    }
    result.push_str(&format!(
        "\n{}\n",
        summary.extract.as_deref().unwrap_or("(No extract)")
    ));

    result
}
