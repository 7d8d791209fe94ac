use crate::prelude::eprintln;
use datatools_core::countries::summarize_countries;
use serde::Deserialize;
use serde_json::Value;

use super::{execution_error, json_result, parse_arguments, JsonRpcError};

pub async fn handle_list_countries(
    arguments: Option<serde_json::Value>,
    ctx: &crate::Context,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct ListCountriesArgs {
        region: Option<String>,
        #[serde(default = "full_by_default")]
        full: bool,
    }

    fn full_by_default() -> bool {
        true
    }

    let args: ListCountriesArgs = parse_arguments(arguments)?;

    if ctx.verbose {
        eprintln!(
            "Calling list_countries: region={:?}, full={}",
            args.region, args.full
        );
    }

    let countries = crate::countries::countries_data(&ctx.fetcher)
        .await
        .map_err(execution_error)?;

    if !args.full {
        return json_result(&summarize_countries(&countries, args.region.as_deref()));
    }

    let countries: Vec<Value> = match args.region.as_deref() {
        Some(region) => countries
            .into_iter()
            .filter(|country| {
                country
                    .get("region")
                    .and_then(Value::as_str)
                    .is_some_and(|r| r.eq_ignore_ascii_case(region))
            })
            .collect(),
        None => countries,
    };

    json_result(&countries)
}
