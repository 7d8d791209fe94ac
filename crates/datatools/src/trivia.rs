use crate::client::Fetcher;
use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use datatools_core::envelope::{error_envelope, is_error_envelope, ACTIVITY_ERROR_LABEL};
use datatools_core::trivia::{
    activity_request, is_known_fact_kind, number_fact_request, DEFAULT_FACT_KIND, FACT_KINDS,
};
use serde_json::Value;

#[derive(Debug, clap::Parser)]
#[command(name = "trivia")]
#[command(about = "Number facts and random activities")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Fact about a number or a month/day date
    #[clap(name = "number")]
    Number(NumberOptions),

    /// Suggestion for something to do
    #[clap(name = "activity")]
    Activity(ActivityOptions),
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct NumberOptions {
    /// Number, or month/day for date facts (e.g., "42", "2/14")
    pub number: String,

    /// Fact kind: trivia, math, date or year
    #[arg(short, long, default_value = DEFAULT_FACT_KIND)]
    pub kind: String,
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ActivityOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(app: App, ctx: &crate::Context) -> Result<()> {
    match app.command {
        Commands::Number(options) => number(options, ctx).await,
        Commands::Activity(options) => activity(options, ctx).await,
    }
}

/// Fetch a plain-text fact for `number`
///
/// `kind` is not validated; it is sent in the path as given.
pub async fn number_fact_data(
    fetcher: &Fetcher,
    number: &str,
    kind: &str,
) -> Result<String, FetchError> {
    let spec = number_fact_request(&fetcher.endpoints().numbers, number, kind);
    fetcher.text(&spec).await
}

/// Fetch one suggested activity, unmodified
pub async fn random_activity_data(fetcher: &Fetcher) -> Result<Value, FetchError> {
    let spec = activity_request(&fetcher.endpoints().bored);
    fetcher.get_json(&spec).await
}

/// [`random_activity_data`] that never fails: errors become `{"error": "Error fetching random activity: ..."}`
pub async fn random_activity_or_error(fetcher: &Fetcher) -> Value {
    random_activity_data(fetcher)
        .await
        .unwrap_or_else(|e| error_envelope(ACTIVITY_ERROR_LABEL, e))
}

async fn number(options: NumberOptions, ctx: &crate::Context) -> Result<()> {
    if ctx.verbose {
        eprintln!("Numbers API Base: {}", ctx.fetcher.endpoints().numbers);
        if !is_known_fact_kind(&options.kind) {
            eprintln!(
                "Warning: '{}' is not one of {}",
                options.kind,
                FACT_KINDS.join(", ")
            );
        }
    }

    let fact = number_fact_data(&ctx.fetcher, &options.number, &options.kind).await?;
    println!("{fact}");

    Ok(())
}

async fn activity(options: ActivityOptions, ctx: &crate::Context) -> Result<()> {
    if ctx.verbose {
        eprintln!("Bored API Base: {}", ctx.fetcher.endpoints().bored);
    }

    let activity = random_activity_or_error(&ctx.fetcher).await;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&activity)?);
    } else if is_error_envelope(&activity) {
        println!("{}", activity["error"].as_str().unwrap_or_default().red());
    } else {
        println!(
            "{}",
            activity["activity"]
                .as_str()
                .unwrap_or("(No activity)")
                .white()
                .bold()
        );
        println!(
            "    {}: {} | {}: {} | {}: {}",
            "Type".green(),
            activity["type"].as_str().unwrap_or("-"),
            "Participants".green(),
            activity["participants"],
            "Price".green(),
            activity["price"]
        );
    }

    Ok(())
}
