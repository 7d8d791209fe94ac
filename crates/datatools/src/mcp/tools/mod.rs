mod countries;
mod finance;
mod news;
mod search;
mod trivia;
mod weather;
mod wiki;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

// Re-export types needed by tool handlers
pub use super::{JsonRpcError, Tool};

// MCP Protocol types for tools
#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    pub tools: Option<ToolsCapability>,
}

#[derive(Debug, Serialize)]
pub struct ToolsCapability {}

#[derive(Debug, Serialize)]
pub struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

#[derive(Debug, Serialize)]
pub struct ToolsList {
    pub tools: Vec<Tool>,
}

#[derive(Debug, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    pub arguments: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct CallToolResult {
    pub content: Vec<Content>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum Content {
    #[serde(rename = "text")]
    Text { text: String },
}

pub fn handle_initialize() -> Result<serde_json::Value, JsonRpcError> {
    let result = InitializeResult {
        protocol_version: "2024-11-05".to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolsCapability {}),
        },
        server_info: ServerInfo {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    };

    serde_json::to_value(result).map_err(internal_error)
}

pub fn handle_tools_list() -> Result<serde_json::Value, JsonRpcError> {
    let tools = vec![
        Tool {
            name: "web_search".to_string(),
            description: "Search the web through Tavily. Returns the raw Tavily response with ranked results (title, url, content, score). Requires TAVILY_API_KEY; when it is missing the server operator is prompted once.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Free-text search query"
                    }
                },
                "required": ["query"]
            }),
        },
        Tool {
            name: "wikipedia_summary".to_string(),
            description: "Fetch a plain-text summary of an English Wikipedia article. Returns title, extract and pageid. A title that does not exist returns the title with null extract and pageid.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "title": {
                        "type": "string",
                        "description": "Exact article title (e.g., 'Rust (programming language)')"
                    },
                    "sentences": {
                        "type": "number",
                        "description": "Maximum number of sentences in the extract (default: 3)"
                    }
                },
                "required": ["title"]
            }),
        },
        Tool {
            name: "weather_forecast".to_string(),
            description: "Fetch the Open-Meteo forecast for a coordinate. The timezone is resolved automatically. Returns the complete forecast payload including metadata.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "latitude": {
                        "type": "number",
                        "description": "Latitude of the location"
                    },
                    "longitude": {
                        "type": "number",
                        "description": "Longitude of the location"
                    },
                    "hourly": {
                        "type": "array",
                        "items": {"type": "string"},
                        "description": "Hourly variables (e.g., ['temperature_2m', 'windspeed_10m'])"
                    }
                },
                "required": ["latitude", "longitude"]
            }),
        },
        Tool {
            name: "list_countries".to_string(),
            description: "List countries from REST Countries. By default returns the catalogue entries exactly as the service sends them; set full=false for a compact list (name, capital, region, population) sorted by name.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "region": {
                        "type": "string",
                        "description": "Only countries in this region (e.g., 'Europe', 'Americas')"
                    },
                    "full": {
                        "type": "boolean",
                        "description": "Return the raw catalogue entries; false returns summaries (default: true)"
                    }
                },
                "required": []
            }),
        },
        Tool {
            name: "exchange_rates".to_string(),
            description: "Fetch the latest foreign exchange rates against a base currency from exchangerate.host. Returns base, date and a mapping of currency codes to rates.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "base": {
                        "type": "string",
                        "description": "ISO currency code used as the reference (default: 'EUR')"
                    }
                },
                "required": []
            }),
        },
        Tool {
            name: "number_fact".to_string(),
            description: "Fetch a plain-text fact about a number from the Numbers API. Use 'month/day' as the number for date facts.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "number": {
                        "type": ["number", "string"],
                        "description": "Number, or 'month/day' for date facts (e.g., 42, '2/14')"
                    },
                    "kind": {
                        "type": "string",
                        "description": "Fact kind (default: 'trivia')",
                        "enum": ["trivia", "math", "date", "year"]
                    }
                },
                "required": ["number"]
            }),
        },
        Tool {
            name: "bitcoin_price".to_string(),
            description: "Fetch the current Bitcoin Price Index from CoinDesk. Returns the per-currency rates. Failures are returned as {\"error\": \"...\"} instead of a protocol error.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        },
        Tool {
            name: "random_activity".to_string(),
            description: "Suggest a random activity from the Bored API (activity, type, participants, price). Failures are returned as {\"error\": \"...\"} instead of a protocol error.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        },
        Tool {
            name: "news_headlines".to_string(),
            description: "Fetch up to 5 English-language US news articles matching a query from GNews. Uses the api_key argument, or GNEWS_API_KEY when omitted. Failures are returned as {\"error\": \"...\"} instead of a protocol error.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search query for the headlines (e.g., 'AI advancements')"
                    },
                    "api_key": {
                        "type": "string",
                        "description": "GNews API key (optional when the server has GNEWS_API_KEY)"
                    }
                },
                "required": ["query"]
            }),
        },
    ];

    let result = ToolsList { tools };

    serde_json::to_value(result).map_err(internal_error)
}

pub async fn handle_tools_call(
    params: Option<serde_json::Value>,
    ctx: &crate::Context,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: CallToolParams = serde_json::from_value(params.unwrap_or(serde_json::Value::Null))
        .map_err(|e| JsonRpcError {
            code: -32602,
            message: format!("Invalid params: {e}"),
            data: None,
        })?;

    match params.name.as_str() {
        "web_search" => search::handle_web_search(params.arguments, ctx).await,
        "wikipedia_summary" => wiki::handle_wikipedia_summary(params.arguments, ctx).await,
        "weather_forecast" => weather::handle_weather_forecast(params.arguments, ctx).await,
        "list_countries" => countries::handle_list_countries(params.arguments, ctx).await,
        "exchange_rates" => finance::handle_exchange_rates(params.arguments, ctx).await,
        "number_fact" => trivia::handle_number_fact(params.arguments, ctx).await,
        "bitcoin_price" => finance::handle_bitcoin_price(ctx).await,
        "random_activity" => trivia::handle_random_activity(ctx).await,
        "news_headlines" => news::handle_news_headlines(params.arguments, ctx).await,
        _ => Err(JsonRpcError {
            code: -32602,
            message: format!("Unknown tool: {}", params.name),
            data: None,
        }),
    }
}

/// Deserialize tool arguments; a missing object counts as `{}`
fn parse_arguments<T: DeserializeOwned>(
    arguments: Option<serde_json::Value>,
) -> Result<T, JsonRpcError> {
    let arguments = match arguments {
        None | Some(serde_json::Value::Null) => serde_json::json!({}),
        Some(value) => value,
    };

    serde_json::from_value(arguments).map_err(|e| JsonRpcError {
        code: -32602,
        message: format!("Invalid arguments: {e}"),
        data: None,
    })
}

fn execution_error(e: impl std::fmt::Display) -> JsonRpcError {
    JsonRpcError {
        code: -32603,
        message: format!("Tool execution error: {e}"),
        data: None,
    }
}

fn internal_error(e: impl std::fmt::Display) -> JsonRpcError {
    JsonRpcError {
        code: -32603,
        message: format!("Internal error: {e}"),
        data: None,
    }
}

/// Wrap a serializable payload as pretty JSON text content
fn json_result<T: Serialize>(data: &T) -> Result<serde_json::Value, JsonRpcError> {
    let json_string = serde_json::to_string_pretty(data).map_err(|e| JsonRpcError {
        code: -32603,
        message: format!("Serialization error: {e}"),
        data: None,
    })?;

    text_result(json_string)
}

fn text_result(text: String) -> Result<serde_json::Value, JsonRpcError> {
    let result = CallToolResult {
        content: vec![Content::Text { text }],
        is_error: None,
    };

    serde_json::to_value(result).map_err(internal_error)
}
