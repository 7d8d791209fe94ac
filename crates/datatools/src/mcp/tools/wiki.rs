use crate::prelude::eprintln;
use datatools_core::wiki::DEFAULT_SENTENCES;
use serde::Deserialize;

use super::{execution_error, json_result, parse_arguments, JsonRpcError};

pub async fn handle_wikipedia_summary(
    arguments: Option<serde_json::Value>,
    ctx: &crate::Context,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct WikipediaSummaryArgs {
        title: String,
        sentences: Option<u32>,
    }

    let args: WikipediaSummaryArgs = parse_arguments(arguments)?;

    if ctx.verbose {
        eprintln!(
            "Calling wikipedia_summary: title={}, sentences={:?}",
            args.title, args.sentences
        );
    }

    let summary = crate::wiki::wiki_summary_data(
        &ctx.fetcher,
        &args.title,
        args.sentences.unwrap_or(DEFAULT_SENTENCES),
    )
    .await
    .map_err(execution_error)?;

    json_result(&summary)
}
