use crate::endpoints::join_url;
use crate::request::RequestSpec;
use serde::Serialize;
use serde_json::{Map, Value};

pub const DEFAULT_BASE_CURRENCY: &str = "EUR";

/// One currency of the Bitcoin price index
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct BpiRate {
    pub code: String,
    pub rate: Option<f64>,
    pub description: Option<String>,
}

pub fn rates_request(base_url: &str, base_currency: &str) -> RequestSpec {
    RequestSpec::get(join_url(base_url, "/latest")).param("base", base_currency)
}

pub fn bitcoin_request(base_url: &str) -> RequestSpec {
    RequestSpec::get(join_url(base_url, "/v1/bpi/currentprice.json"))
}

/// Keep only the `bpi` sub-object, an empty object when it is absent
pub fn extract_bpi(response: Value) -> Value {
    match response {
        Value::Object(mut map) => map
            .remove("bpi")
            .unwrap_or_else(|| Value::Object(Map::new())),
        _ => Value::Object(Map::new()),
    }
}

/// `rates` mapping as (code, rate) pairs sorted by currency code
pub fn sorted_rates(response: &Value) -> Vec<(String, f64)> {
    let mut rates: Vec<(String, f64)> = response
        .get("rates")
        .and_then(Value::as_object)
        .map(|rates| {
            rates
                .iter()
                .filter_map(|(code, rate)| Some((code.clone(), rate.as_f64()?)))
                .collect()
        })
        .unwrap_or_default();

    rates.sort_by(|a, b| a.0.cmp(&b.0));
    rates
}

/// Flatten a `bpi` object into rows
pub fn bpi_rates(bpi: &Value) -> Vec<BpiRate> {
    bpi.as_object()
        .map(|currencies| {
            currencies
                .iter()
                .map(|(code, entry)| BpiRate {
                    code: code.clone(),
                    rate: entry.get("rate_float").and_then(Value::as_f64),
                    description: entry
                        .get("description")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                })
                .collect()
        })
        .unwrap_or_default()
}
