mod cli;
mod sse;
mod stdio;
mod tools;

pub use cli::App;

use crate::prelude::*;
use serde::{Deserialize, Serialize};

// JSON-RPC 2.0 types
#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    #[allow(dead_code)]
    jsonrpc: String,
    id: Option<serde_json::Value>,
    method: String,
    params: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    jsonrpc: String,
    id: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

// MCP Protocol types
#[derive(Debug, Serialize)]
pub struct Tool {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

pub async fn run(app: App, ctx: crate::Context) -> Result<()> {
    match app.command {
        cli::Commands::Stdio => stdio::run_stdio(ctx).await,
        cli::Commands::Sse(options) => sse::run_sse(options, ctx).await,
    }
}

/// Dispatch one JSON-RPC message
///
/// Returns `None` for notifications (`notifications/*` without an id), which
/// must not be answered.
pub async fn handle_request(request_str: &str, ctx: &crate::Context) -> Option<JsonRpcResponse> {
    let request: JsonRpcRequest = match serde_json::from_str(request_str) {
        Ok(req) => req,
        Err(e) => {
            return Some(JsonRpcResponse {
                jsonrpc: "2.0".to_string(),
                id: None,
                result: None,
                error: Some(JsonRpcError {
                    code: -32700,
                    message: format!("Parse error: {e}"),
                    data: None,
                }),
            });
        }
    };

    if request.id.is_none() && request.method.starts_with("notifications/") {
        log::debug!("Ignoring notification {}", request.method);
        return None;
    }

    let result = match request.method.as_str() {
        "initialize" => tools::handle_initialize(),
        "ping" => Ok(serde_json::json!({})),
        "tools/list" => tools::handle_tools_list(),
        "tools/call" => tools::handle_tools_call(request.params, ctx).await,
        method => Err(JsonRpcError {
            code: -32601,
            message: format!("Method not found: {method}"),
            data: None,
        }),
    };

    Some(match result {
        Ok(value) => JsonRpcResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id,
            result: Some(value),
            error: None,
        },
        Err(error) => JsonRpcResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id,
            result: None,
            error: Some(error),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{test_fetcher, UNREACHABLE_BASE};
    use crate::credentials::tests::CountingPrompter;
    use crate::credentials::PromptingCredential;
    use mockito::Server;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn test_context(base: &str) -> crate::Context {
        crate::Context::new(
            false,
            test_fetcher(base),
            Arc::new(PromptingCredential::new(
                "TAVILY_API_KEY",
                Some("tvly-test".into()),
                CountingPrompter::answering("unused"),
            )),
            None,
        )
    }

    async fn call(ctx: &crate::Context, request: Value) -> Value {
        let response = handle_request(&request.to_string(), ctx)
            .await
            .expect("request has an id");
        serde_json::to_value(response).unwrap()
    }

    fn tool_text(response: &Value) -> &str {
        response["result"]["content"][0]["text"].as_str().unwrap()
    }

    #[tokio::test]
    async fn test_initialize() {
        let ctx = test_context(UNREACHABLE_BASE);
        let response = call(&ctx, json!({"jsonrpc": "2.0", "id": 1, "method": "initialize"})).await;

        assert_eq!(response["id"], 1);
        assert_eq!(response["result"]["protocolVersion"], "2024-11-05");
        assert_eq!(response["result"]["serverInfo"]["name"], "datatools");
    }

    #[tokio::test]
    async fn test_tools_list_names_every_lookup() {
        let ctx = test_context(UNREACHABLE_BASE);
        let response = call(&ctx, json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"})).await;

        let names: Vec<&str> = response["result"]["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|tool| tool["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            vec![
                "web_search",
                "wikipedia_summary",
                "weather_forecast",
                "list_countries",
                "exchange_rates",
                "number_fact",
                "bitcoin_price",
                "random_activity",
                "news_headlines",
            ]
        );
    }

    #[tokio::test]
    async fn test_parse_error() {
        let ctx = test_context(UNREACHABLE_BASE);
        let response = handle_request("{not json", &ctx).await.unwrap();
        let response = serde_json::to_value(response).unwrap();

        assert_eq!(response["error"]["code"], -32700);
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let ctx = test_context(UNREACHABLE_BASE);
        let response = call(&ctx, json!({"jsonrpc": "2.0", "id": 3, "method": "resources/list"})).await;

        assert_eq!(response["error"]["code"], -32601);
    }

    #[tokio::test]
    async fn test_notification_gets_no_response() {
        let ctx = test_context(UNREACHABLE_BASE);
        let request = json!({"jsonrpc": "2.0", "method": "notifications/initialized"});

        assert!(handle_request(&request.to_string(), &ctx).await.is_none());
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let ctx = test_context(UNREACHABLE_BASE);
        let response = call(
            &ctx,
            json!({"jsonrpc": "2.0", "id": 4, "method": "tools/call", "params": {"name": "stock_quote"}}),
        )
        .await;

        assert_eq!(response["error"]["code"], -32602);
    }

    #[tokio::test]
    async fn test_bitcoin_failure_is_content_not_error() {
        let ctx = test_context(UNREACHABLE_BASE);
        let response = call(
            &ctx,
            json!({"jsonrpc": "2.0", "id": 5, "method": "tools/call", "params": {"name": "bitcoin_price"}}),
        )
        .await;

        assert!(response.get("error").is_none());
        let envelope: Value = serde_json::from_str(tool_text(&response)).unwrap();
        assert!(envelope["error"]
            .as_str()
            .unwrap()
            .starts_with("Error fetching Bitcoin price: "));
    }

    #[tokio::test]
    async fn test_wikipedia_failure_is_execution_error() {
        let ctx = test_context(UNREACHABLE_BASE);
        let response = call(
            &ctx,
            json!({
                "jsonrpc": "2.0",
                "id": 6,
                "method": "tools/call",
                "params": {"name": "wikipedia_summary", "arguments": {"title": "Rust"}}
            }),
        )
        .await;

        assert_eq!(response["error"]["code"], -32603);
    }

    #[tokio::test]
    async fn test_number_fact_returns_plain_text() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/7/math")
            .with_status(200)
            .with_body("7 is the smallest number of sides of a regular polygon that is not constructible.")
            .create_async()
            .await;

        let ctx = test_context(&server.url());
        let response = call(
            &ctx,
            json!({
                "jsonrpc": "2.0",
                "id": 7,
                "method": "tools/call",
                "params": {"name": "number_fact", "arguments": {"number": 7, "kind": "math"}}
            }),
        )
        .await;

        assert!(tool_text(&response).starts_with("7 is the smallest"));
    }

    #[tokio::test]
    async fn test_news_without_key_is_invalid_params() {
        let ctx = test_context(UNREACHABLE_BASE);
        let response = call(
            &ctx,
            json!({
                "jsonrpc": "2.0",
                "id": 8,
                "method": "tools/call",
                "params": {"name": "news_headlines", "arguments": {"query": "rust"}}
            }),
        )
        .await;

        assert_eq!(response["error"]["code"], -32602);
    }

    const COUNTRIES_BODY: &str = r#"[{"name":{"common":"Uruguay","official":"Oriental Republic of Uruguay"},"capital":["Montevideo"],"region":"Americas","cca2":"UY","currencies":{"UYU":{"name":"Uruguayan peso","symbol":"$"}}}]"#;

    #[tokio::test]
    async fn test_list_countries_returns_catalogue_unmodified() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/v3.1/all")
            .with_status(200)
            .with_body(COUNTRIES_BODY)
            .create_async()
            .await;

        let ctx = test_context(&server.url());
        let response = call(
            &ctx,
            json!({"jsonrpc": "2.0", "id": 9, "method": "tools/call", "params": {"name": "list_countries"}}),
        )
        .await;

        let countries: Value = serde_json::from_str(tool_text(&response)).unwrap();
        assert_eq!(countries, serde_json::from_str::<Value>(COUNTRIES_BODY).unwrap());
    }

    #[tokio::test]
    async fn test_list_countries_compact_view_on_request() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/v3.1/all")
            .with_status(200)
            .with_body(COUNTRIES_BODY)
            .create_async()
            .await;

        let ctx = test_context(&server.url());
        let response = call(
            &ctx,
            json!({
                "jsonrpc": "2.0",
                "id": 10,
                "method": "tools/call",
                "params": {"name": "list_countries", "arguments": {"full": false}}
            }),
        )
        .await;

        let countries: Value = serde_json::from_str(tool_text(&response)).unwrap();
        assert_eq!(countries[0]["name"], "Uruguay");
        assert_eq!(countries[0]["capital"], "Montevideo");
        assert!(countries[0].get("cca2").is_none());
    }
}
