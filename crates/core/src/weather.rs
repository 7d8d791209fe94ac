use crate::endpoints::join_url;
use crate::request::RequestSpec;
use serde::Serialize;
use serde_json::Value;

/// One row of the hourly forecast table
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct HourlyRow {
    pub time: String,
    /// (variable, value with unit) in the order the variables were requested
    pub values: Vec<(String, String)>,
}

/// Comma-join the hourly variables, `None` when there are none
pub fn hourly_param(hourly: &[String]) -> Option<String> {
    if hourly.is_empty() {
        None
    } else {
        Some(hourly.join(","))
    }
}

/// Build the Open-Meteo forecast request
///
/// The timezone is always resolved by the service from the coordinates.
pub fn forecast_request(base: &str, latitude: f64, longitude: f64, hourly: &[String]) -> RequestSpec {
    RequestSpec::get(join_url(base, "/v1/forecast"))
        .param("latitude", latitude)
        .param("longitude", longitude)
        .param("timezone", "auto")
        .param_opt("hourly", hourly_param(hourly))
}

/// Zip the columnar `hourly` block of a forecast into rows
///
/// Returns at most `limit` rows. Variables missing from the response are skipped.
pub fn hourly_rows(forecast: &Value, variables: &[String], limit: usize) -> Vec<HourlyRow> {
    let Some(hourly) = forecast.get("hourly") else {
        return Vec::new();
    };
    let Some(times) = hourly.get("time").and_then(Value::as_array) else {
        return Vec::new();
    };
    let units = forecast.get("hourly_units");

    times
        .iter()
        .take(limit)
        .enumerate()
        .map(|(idx, time)| {
            let values = variables
                .iter()
                .filter_map(|name| {
                    let value = hourly.get(name)?.as_array()?.get(idx)?;
                    let unit = units
                        .and_then(|u| u.get(name))
                        .and_then(Value::as_str)
                        .unwrap_or_default();
                    Some((name.clone(), format_value(value, unit)))
                })
                .collect();

            HourlyRow {
                time: time.as_str().unwrap_or_default().to_string(),
                values,
            }
        })
        .collect()
}

fn format_value(value: &Value, unit: &str) -> String {
    let value = match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    if unit.is_empty() {
        value
    } else {
        format!("{value} {unit}")
    }
}
