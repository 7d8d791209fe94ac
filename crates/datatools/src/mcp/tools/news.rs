use crate::prelude::eprintln;
use serde::Deserialize;

use super::{json_result, parse_arguments, JsonRpcError};

pub async fn handle_news_headlines(
    arguments: Option<serde_json::Value>,
    ctx: &crate::Context,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct NewsHeadlinesArgs {
        query: String,
        api_key: Option<String>,
    }

    let args: NewsHeadlinesArgs = parse_arguments(arguments)?;
    let api_key = args
        .api_key
        .filter(|k| !k.trim().is_empty())
        .or_else(|| ctx.gnews_api_key.clone())
        .ok_or_else(|| JsonRpcError {
            code: -32602,
            message: "Invalid arguments: api_key is required when GNEWS_API_KEY is not set"
                .to_string(),
            data: None,
        })?;

    if ctx.verbose {
        eprintln!("Calling news_headlines: query={}", args.query);
    }

    let response =
        crate::news::news_headlines_or_error(&ctx.fetcher, &args.query, &api_key).await;

    json_result(&response)
}
