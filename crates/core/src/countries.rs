use crate::endpoints::join_url;
use crate::request::RequestSpec;
use serde::Serialize;
use serde_json::Value;

/// Condensed view of a REST Countries entry
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CountrySummary {
    pub name: String,
    pub capital: Option<String>,
    pub region: Option<String>,
    pub population: Option<u64>,
}

pub fn countries_request(base: &str) -> RequestSpec {
    RequestSpec::get(join_url(base, "/v3.1/all"))
}

/// Reduce the raw catalogue to sortable summaries
///
/// `region` is matched case-insensitively. Entries without a common name are dropped.
pub fn summarize_countries(countries: &[Value], region: Option<&str>) -> Vec<CountrySummary> {
    let mut summaries: Vec<CountrySummary> = countries
        .iter()
        .filter_map(|country| {
            let name = country
                .get("name")
                .and_then(|n| n.get("common"))
                .and_then(Value::as_str)?
                .to_string();

            Some(CountrySummary {
                name,
                capital: country
                    .get("capital")
                    .and_then(Value::as_array)
                    .and_then(|c| c.first())
                    .and_then(Value::as_str)
                    .map(str::to_string),
                region: country
                    .get("region")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                population: country.get("population").and_then(Value::as_u64),
            })
        })
        .filter(|summary| match region {
            Some(wanted) => summary
                .region
                .as_deref()
                .is_some_and(|r| r.eq_ignore_ascii_case(wanted)),
            None => true,
        })
        .collect();

    summaries.sort_by(|a, b| a.name.cmp(&b.name));
    summaries
}
