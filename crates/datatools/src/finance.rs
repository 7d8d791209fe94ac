use crate::client::Fetcher;
use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use datatools_core::envelope::{error_envelope, is_error_envelope, BITCOIN_ERROR_LABEL};
use datatools_core::finance::{
    bitcoin_request, bpi_rates, extract_bpi, rates_request, sorted_rates, DEFAULT_BASE_CURRENCY,
};
use prettytable::{Cell, Row};
use serde_json::Value;

#[derive(Debug, clap::Parser)]
#[command(name = "finance")]
#[command(about = "Exchange rates and the Bitcoin price index")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Latest exchange rates against a base currency
    #[clap(name = "rates")]
    Rates(RatesOptions),

    /// Current Bitcoin price index
    #[clap(name = "bitcoin")]
    Bitcoin(BitcoinOptions),
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct RatesOptions {
    /// ISO currency code used as the reference
    #[arg(short, long, default_value = DEFAULT_BASE_CURRENCY)]
    pub base: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct BitcoinOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(app: App, ctx: &crate::Context) -> Result<()> {
    match app.command {
        Commands::Rates(options) => rates(options, ctx).await,
        Commands::Bitcoin(options) => bitcoin(options, ctx).await,
    }
}

/// Fetch the latest rates relative to `base` and return the payload unmodified
pub async fn exchange_rates_data(fetcher: &Fetcher, base: &str) -> Result<Value, FetchError> {
    let spec = rates_request(&fetcher.endpoints().exchange_rate, base);
    fetcher.get_json(&spec).await
}

/// Fetch the Bitcoin price index and keep only its `bpi` object
pub async fn bitcoin_price_data(fetcher: &Fetcher) -> Result<Value, FetchError> {
    let spec = bitcoin_request(&fetcher.endpoints().coindesk);
    let response: Value = fetcher.get_json(&spec).await?;

    Ok(extract_bpi(response))
}

/// [`bitcoin_price_data`] that never fails: errors become `{"error": "Error fetching Bitcoin price: ..."}`
pub async fn bitcoin_price_or_error(fetcher: &Fetcher) -> Value {
    bitcoin_price_data(fetcher)
        .await
        .unwrap_or_else(|e| error_envelope(BITCOIN_ERROR_LABEL, e))
}

async fn rates(options: RatesOptions, ctx: &crate::Context) -> Result<()> {
    if ctx.verbose {
        eprintln!(
            "ExchangeRate API Base: {}",
            ctx.fetcher.endpoints().exchange_rate
        );
    }

    let response = exchange_rates_data(&ctx.fetcher, &options.base).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!(
        "{} {} ({})",
        "Base".green(),
        response["base"].as_str().unwrap_or(&options.base).bold(),
        response["date"].as_str().unwrap_or("unknown date")
    );

    let rates = sorted_rates(&response);
    if rates.is_empty() {
        println!("{}", "No rates in response.".yellow());
        return Ok(());
    }

    let mut table = new_table();
    table.set_titles(Row::new(vec![Cell::new("Currency"), Cell::new("Rate")]));
    for (code, rate) in rates {
        table.add_row(Row::new(vec![Cell::new(&code), Cell::new(&rate.to_string())]));
    }
    table.printstd();

    Ok(())
}

async fn bitcoin(options: BitcoinOptions, ctx: &crate::Context) -> Result<()> {
    if ctx.verbose {
        eprintln!("CoinDesk API Base: {}", ctx.fetcher.endpoints().coindesk);
    }

    let bpi = bitcoin_price_or_error(&ctx.fetcher).await;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&bpi)?);
        return Ok(());
    }

    if is_error_envelope(&bpi) {
        println!("{}", bpi["error"].as_str().unwrap_or_default().red());
        return Ok(());
    }

    let mut table = new_table();
    table.set_titles(Row::new(vec![
        Cell::new("Currency"),
        Cell::new("Rate"),
        Cell::new("Description"),
    ]));
    for rate in bpi_rates(&bpi) {
        table.add_row(Row::new(vec![
            Cell::new(&rate.code),
            Cell::new(&rate.rate.map(|r| f!("{r:.2}")).unwrap_or_else(|| "-".into())),
            Cell::new(rate.description.as_deref().unwrap_or("")),
        ]));
    }
    table.printstd();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{test_fetcher, UNREACHABLE_BASE};
    use mockito::{Matcher, Server};
    use serde_json::json;

    #[tokio::test]
    async fn test_exchange_rates_default_base() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/latest")
            .match_query(Matcher::UrlEncoded("base".into(), "EUR".into()))
            .with_status(200)
            .with_body(r#"{"base": "EUR", "date": "2024-01-01", "rates": {"USD": 1.1}}"#)
            .create_async()
            .await;

        let fetcher = test_fetcher(&server.url());
        let response = exchange_rates_data(&fetcher, DEFAULT_BASE_CURRENCY)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response["base"], "EUR");
        assert_eq!(response["rates"]["USD"], 1.1);
    }

    #[tokio::test]
    async fn test_exchange_rates_requested_base() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/latest")
            .match_query(Matcher::UrlEncoded("base".into(), "USD".into()))
            .with_status(200)
            .with_body(r#"{"base": "USD", "date": "2024-01-01", "rates": {"EUR": 0.91}}"#)
            .create_async()
            .await;

        let fetcher = test_fetcher(&server.url());
        let response = exchange_rates_data(&fetcher, "USD").await.unwrap();

        mock.assert_async().await;
        assert_eq!(response["base"], "USD");
    }

    #[tokio::test]
    async fn test_exchange_rates_propagates_status_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/latest")
            .match_query(Matcher::Any)
            .with_status(429)
            .create_async()
            .await;

        let fetcher = test_fetcher(&server.url());
        let err = exchange_rates_data(&fetcher, "EUR").await.unwrap_err();

        assert_eq!(err.status(), Some(429));
    }

    #[tokio::test]
    async fn test_bitcoin_price_keeps_only_bpi() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/bpi/currentprice.json")
            .with_status(200)
            .with_body(
                r#"{"time": {"updated": "now"}, "chartName": "Bitcoin", "bpi": {"USD": {"code": "USD", "rate_float": 42000.5}}}"#,
            )
            .create_async()
            .await;

        let fetcher = test_fetcher(&server.url());
        let bpi = bitcoin_price_or_error(&fetcher).await;

        assert_eq!(bpi, json!({"USD": {"code": "USD", "rate_float": 42000.5}}));
    }

    #[tokio::test]
    async fn test_bitcoin_price_without_bpi_is_empty() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/bpi/currentprice.json")
            .with_status(200)
            .with_body(r#"{"time": {}}"#)
            .create_async()
            .await;

        let fetcher = test_fetcher(&server.url());
        assert_eq!(bitcoin_price_or_error(&fetcher).await, json!({}));
    }

    #[tokio::test]
    async fn test_bitcoin_price_transport_failure_is_wrapped() {
        let fetcher = test_fetcher(UNREACHABLE_BASE);
        let result = bitcoin_price_or_error(&fetcher).await;

        assert!(is_error_envelope(&result));
        let message = result["error"].as_str().unwrap();
        assert!(message.starts_with("Error fetching Bitcoin price: Network error: "));
    }

    #[tokio::test]
    async fn test_bitcoin_price_status_failure_is_wrapped() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/bpi/currentprice.json")
            .with_status(503)
            .create_async()
            .await;

        let fetcher = test_fetcher(&server.url());
        let result = bitcoin_price_or_error(&fetcher).await;

        assert!(is_error_envelope(&result));
        assert!(result["error"]
            .as_str()
            .unwrap()
            .starts_with("Error fetching Bitcoin price: HTTP 503"));
    }

    #[tokio::test]
    async fn test_bitcoin_price_decode_failure_is_wrapped() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/bpi/currentprice.json")
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let fetcher = test_fetcher(&server.url());
        let result = bitcoin_price_or_error(&fetcher).await;

        assert!(is_error_envelope(&result));
    }
}
