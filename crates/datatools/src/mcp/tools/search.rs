use crate::prelude::eprintln;
use serde::Deserialize;

use super::{execution_error, json_result, parse_arguments, JsonRpcError};

pub async fn handle_web_search(
    arguments: Option<serde_json::Value>,
    ctx: &crate::Context,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct WebSearchArgs {
        query: String,
    }

    let args: WebSearchArgs = parse_arguments(arguments)?;

    if ctx.verbose {
        eprintln!("Calling web_search: query={}", args.query);
    }

    let response = crate::search::search_data(
        &ctx.fetcher,
        &ctx.search_credential,
        &args.query,
    )
    .await
    .map_err(execution_error)?;

    json_result(&response)
}
