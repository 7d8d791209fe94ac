use crate::prelude::eprintln;
use datatools_core::trivia::DEFAULT_FACT_KIND;
use serde::Deserialize;
use serde_json::Value;

use super::{execution_error, json_result, parse_arguments, text_result, JsonRpcError};

pub async fn handle_number_fact(
    arguments: Option<serde_json::Value>,
    ctx: &crate::Context,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct NumberFactArgs {
        number: Value,
        kind: Option<String>,
    }

    let args: NumberFactArgs = parse_arguments(arguments)?;
    let number = match &args.number {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        other => {
            return Err(JsonRpcError {
                code: -32602,
                message: format!("Invalid arguments: number must be a number or string, got {other}"),
                data: None,
            })
        }
    };
    let kind = args.kind.unwrap_or_else(|| DEFAULT_FACT_KIND.to_string());

    if ctx.verbose {
        eprintln!("Calling number_fact: number={number}, kind={kind}");
    }

    let fact = crate::trivia::number_fact_data(&ctx.fetcher, &number, &kind)
        .await
        .map_err(execution_error)?;

    text_result(fact)
}

pub async fn handle_random_activity(
    ctx: &crate::Context,
) -> Result<serde_json::Value, JsonRpcError> {
    if ctx.verbose {
        eprintln!("Calling random_activity");
    }

    let activity = crate::trivia::random_activity_or_error(&ctx.fetcher).await;

    json_result(&activity)
}
