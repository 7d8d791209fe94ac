use crate::prelude::*;
use clap::Parser;

mod client;
mod context;
mod countries;
mod credentials;
mod error;
mod finance;
mod mcp;
mod news;
mod prelude;
mod search;
mod trivia;
mod weather;
mod wiki;

pub use context::Context;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Public data lookups: web search, Wikipedia, weather, countries, finance, trivia and news"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "DATATOOLS_VERBOSE", global = true, default_value = "false")]
    verbose: bool,

    /// HTTP request timeout in seconds
    #[clap(long, env = "DATATOOLS_TIMEOUT", global = true, default_value_t = client::DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Tavily API key for web search (prompted for when missing)
    #[clap(long, env = "TAVILY_API_KEY", global = true, hide_env_values = true)]
    tavily_api_key: Option<String>,

    /// GNews API key for news headlines
    #[clap(long, env = "GNEWS_API_KEY", global = true, hide_env_values = true)]
    gnews_api_key: Option<String>,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Web search through Tavily
    Search(crate::search::SearchOptions),

    /// Wikipedia article summaries
    Wiki(crate::wiki::WikiOptions),

    /// Open-Meteo weather forecasts
    Weather(crate::weather::WeatherOptions),

    /// REST Countries catalogue
    Countries(crate::countries::CountriesOptions),

    /// Exchange rates and the Bitcoin price index
    Finance(crate::finance::App),

    /// Number facts and random activities
    Trivia(crate::trivia::App),

    /// GNews headlines
    News(crate::news::NewsOptions),

    /// Model Context Protocol server
    MCP(crate::mcp::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Before parsing, so `.env` values back the clap `env` fallbacks.
    let dotenv_path = dotenvy::dotenv().ok();

    env_logger::init();
    color_eyre::install()?;

    if let Some(path) = dotenv_path {
        log::debug!("Loaded environment from {}", path.display());
    }

    let app = App::parse();
    let ctx = Context::from_global(&app.global)?;

    match app.command {
        SubCommands::Search(options) => crate::search::run(options, &ctx).await,
        SubCommands::Wiki(options) => crate::wiki::run(options, &ctx).await,
        SubCommands::Weather(options) => crate::weather::run(options, &ctx).await,
        SubCommands::Countries(options) => crate::countries::run(options, &ctx).await,
        SubCommands::Finance(sub_app) => crate::finance::run(sub_app, &ctx).await,
        SubCommands::Trivia(sub_app) => crate::trivia::run(sub_app, &ctx).await,
        SubCommands::News(options) => crate::news::run(options, &ctx).await,
        SubCommands::MCP(sub_app) => crate::mcp::run(sub_app, ctx).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
