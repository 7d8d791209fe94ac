use crate::prelude::eprintln;
use serde::Deserialize;

use super::{execution_error, json_result, parse_arguments, JsonRpcError};

pub async fn handle_weather_forecast(
    arguments: Option<serde_json::Value>,
    ctx: &crate::Context,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct WeatherForecastArgs {
        latitude: f64,
        longitude: f64,
        #[serde(default)]
        hourly: Vec<String>,
    }

    let args: WeatherForecastArgs = parse_arguments(arguments)?;

    if ctx.verbose {
        eprintln!(
            "Calling weather_forecast: latitude={}, longitude={}, hourly={:?}",
            args.latitude, args.longitude, args.hourly
        );
    }

    let forecast =
        crate::weather::weather_data(&ctx.fetcher, args.latitude, args.longitude, &args.hourly)
            .await
            .map_err(execution_error)?;

    json_result(&forecast)
}
