use crate::prelude::eprintln;
use datatools_core::finance::DEFAULT_BASE_CURRENCY;
use serde::Deserialize;

use super::{execution_error, json_result, parse_arguments, JsonRpcError};

pub async fn handle_exchange_rates(
    arguments: Option<serde_json::Value>,
    ctx: &crate::Context,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct ExchangeRatesArgs {
        base: Option<String>,
    }

    let args: ExchangeRatesArgs = parse_arguments(arguments)?;
    let base = args
        .base
        .unwrap_or_else(|| DEFAULT_BASE_CURRENCY.to_string());

    if ctx.verbose {
        eprintln!("Calling exchange_rates: base={base}");
    }

    let rates = crate::finance::exchange_rates_data(&ctx.fetcher, &base)
        .await
        .map_err(execution_error)?;

    json_result(&rates)
}

pub async fn handle_bitcoin_price(ctx: &crate::Context) -> Result<serde_json::Value, JsonRpcError> {
    if ctx.verbose {
        eprintln!("Calling bitcoin_price");
    }

    // Failures come back as an error envelope, not a JSON-RPC error
    let bpi = crate::finance::bitcoin_price_or_error(&ctx.fetcher).await;

    json_result(&bpi)
}
