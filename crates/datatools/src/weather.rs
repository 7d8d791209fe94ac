use crate::client::Fetcher;
use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use datatools_core::weather::{forecast_request, hourly_rows};
use prettytable::{Cell, Row};
use serde_json::Value;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct WeatherOptions {
    /// Latitude of the location
    #[arg(allow_negative_numbers = true)]
    pub latitude: f64,

    /// Longitude of the location
    #[arg(allow_negative_numbers = true)]
    pub longitude: f64,

    /// Hourly variable to include (repeatable, e.g. --hourly temperature_2m --hourly windspeed_10m)
    #[arg(long, value_delimiter = ',')]
    pub hourly: Vec<String>,

    /// Number of hourly rows to print
    #[arg(short, long, default_value = "24")]
    pub rows: usize,

    /// Output the full forecast as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: WeatherOptions, ctx: &crate::Context) -> Result<()> {
    if ctx.verbose {
        eprintln!("Open-Meteo API Base: {}", ctx.fetcher.endpoints().open_meteo);
    }

    let forecast = weather_data(
        &ctx.fetcher,
        options.latitude,
        options.longitude,
        &options.hourly,
    )
    .await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&forecast)?);
    } else {
        output_formatted(&forecast, &options);
    }

    Ok(())
}

/// Fetch the forecast for a coordinate and return the payload unmodified
pub async fn weather_data(
    fetcher: &Fetcher,
    latitude: f64,
    longitude: f64,
    hourly: &[String],
) -> Result<Value, FetchError> {
    let spec = forecast_request(&fetcher.endpoints().open_meteo, latitude, longitude, hourly);
    fetcher.get_json(&spec).await
}

fn output_formatted(forecast: &Value, options: &WeatherOptions) {
    println!("\n{}", "=".repeat(80).bright_cyan());
    println!(
        "{}",
        format!(
            "FORECAST ({}, {})",
            forecast["latitude"], forecast["longitude"]
        )
        .bright_cyan()
        .bold()
    );
    println!("{}", "=".repeat(80).bright_cyan());

    if let Some(timezone) = forecast.get("timezone").and_then(Value::as_str) {
        println!("{}: {}", "Timezone".green(), timezone);
    }
    if let Some(elevation) = forecast.get("elevation") {
        println!("{}: {} m", "Elevation".green(), elevation);
    }

    if options.hourly.is_empty() {
        println!(
            "\n{}",
            "No hourly variables requested. Use --hourly temperature_2m,windspeed_10m".yellow()
        );
        return;
    }

    let rows = hourly_rows(forecast, &options.hourly, options.rows);
    if rows.is_empty() {
        println!("\n{}", "No hourly data in response.".yellow());
        return;
    }

    let mut table = new_table();
    let mut header = vec![Cell::new("time")];
    header.extend(options.hourly.iter().map(|name| Cell::new(name)));
    table.set_titles(Row::new(header));

    for row in rows {
        let mut cells = vec![Cell::new(&row.time)];
        cells.extend(row.values.iter().map(|(_, value)| Cell::new(value)));
        table.add_row(Row::new(cells));
    }

    println!();
    table.printstd();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_fetcher;
    use mockito::{Matcher, Server};

    const FORECAST_BODY: &str = r#"{
        "latitude": 52.52,
        "longitude": 13.419998,
        "timezone": "Europe/Berlin",
        "hourly_units": {"time": "iso8601", "temperature_2m": "°C"},
        "hourly": {"time": ["2024-01-01T00:00"], "temperature_2m": [1.2]}
    }"#;

    #[tokio::test]
    async fn test_weather_data_omits_hourly_when_empty() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/forecast")
            .match_query(Matcher::Exact(
                "latitude=52.52&longitude=13.41&timezone=auto".into(),
            ))
            .with_status(200)
            .with_body(FORECAST_BODY)
            .create_async()
            .await;

        let fetcher = test_fetcher(&server.url());
        let forecast = weather_data(&fetcher, 52.52, 13.41, &[]).await.unwrap();

        mock.assert_async().await;
        assert_eq!(forecast, serde_json::from_str::<Value>(FORECAST_BODY).unwrap());
    }

    #[tokio::test]
    async fn test_weather_data_joins_hourly_variables() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/forecast")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("latitude".into(), "52.52".into()),
                Matcher::UrlEncoded("longitude".into(), "13.41".into()),
                Matcher::UrlEncoded("timezone".into(), "auto".into()),
                Matcher::UrlEncoded("hourly".into(), "temperature_2m,windspeed_10m".into()),
            ]))
            .with_status(200)
            .with_body(FORECAST_BODY)
            .create_async()
            .await;

        let fetcher = test_fetcher(&server.url());
        let hourly = vec!["temperature_2m".to_string(), "windspeed_10m".to_string()];
        weather_data(&fetcher, 52.52, 13.41, &hourly).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_weather_data_propagates_status_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/forecast")
            .match_query(Matcher::Any)
            .with_status(400)
            .with_body(r#"{"error": true, "reason": "Latitude must be in range of -90 to 90°."}"#)
            .create_async()
            .await;

        let fetcher = test_fetcher(&server.url());
        let err = weather_data(&fetcher, 123.0, 0.0, &[]).await.unwrap_err();

        assert_eq!(err.status(), Some(400));
    }
}
