use crate::client::Fetcher;
use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use datatools_core::countries::{countries_request, summarize_countries, CountrySummary};
use prettytable::{Cell, Row};
use serde_json::Value;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct CountriesOptions {
    /// Only show countries in this region (e.g., Europe, Americas)
    #[arg(short, long)]
    pub region: Option<String>,

    /// Output the raw catalogue as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: CountriesOptions, ctx: &crate::Context) -> Result<()> {
    if ctx.verbose {
        eprintln!(
            "REST Countries API Base: {}",
            ctx.fetcher.endpoints().rest_countries
        );
    }

    let countries = countries_data(&ctx.fetcher).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&countries)?);
    } else {
        let summaries = summarize_countries(&countries, options.region.as_deref());
        output_formatted(&summaries, countries.len());
    }

    Ok(())
}

/// Fetch the full country catalogue, unmodified
pub async fn countries_data(fetcher: &Fetcher) -> Result<Vec<Value>, FetchError> {
    let spec = countries_request(&fetcher.endpoints().rest_countries);
    fetcher.get_json(&spec).await
}

fn output_formatted(summaries: &[CountrySummary], total: usize) {
    let mut table = new_table();
    table.set_titles(Row::new(vec![
        Cell::new("Country"),
        Cell::new("Capital"),
        Cell::new("Region"),
        Cell::new("Population"),
    ]));

    for country in summaries {
        table.add_row(Row::new(vec![
            Cell::new(&country.name),
            Cell::new(country.capital.as_deref().unwrap_or("-")),
            Cell::new(country.region.as_deref().unwrap_or("-")),
            Cell::new(
                &country
                    .population
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ]));
    }

    table.printstd();
    println!(
        "\n{}",
        format!("Showing {} of {} countries", summaries.len(), total).bright_black()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_fetcher;
    use mockito::Server;

    #[tokio::test]
    async fn test_countries_data_returns_array_unmodified() {
        let body = r#"[
            {"name": {"common": "Uruguay"}, "capital": ["Montevideo"], "region": "Americas", "cca2": "UY"},
            {"name": {"common": "Japan"}, "capital": ["Tokyo"], "region": "Asia", "cca2": "JP"}
        ]"#;
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v3.1/all")
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let fetcher = test_fetcher(&server.url());
        let countries = countries_data(&fetcher).await.unwrap();

        mock.assert_async().await;
        assert_eq!(countries, serde_json::from_str::<Vec<Value>>(body).unwrap());
    }

    #[tokio::test]
    async fn test_countries_data_propagates_status_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/v3.1/all")
            .with_status(502)
            .create_async()
            .await;

        let fetcher = test_fetcher(&server.url());
        let err = countries_data(&fetcher).await.unwrap_err();

        assert_eq!(err.status(), Some(502));
    }

    #[tokio::test]
    async fn test_countries_data_rejects_non_array() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/v3.1/all")
            .with_status(200)
            .with_body(r#"{"status": 404, "message": "Not Found"}"#)
            .create_async()
            .await;

        let fetcher = test_fetcher(&server.url());
        let err = countries_data(&fetcher).await.unwrap_err();

        assert!(matches!(err, FetchError::Decode(_)));
    }
}
