use crate::prelude::{eprintln, *};
use axum::{
    extract::State,
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use futures::stream::{self, Stream, StreamExt};
use std::convert::Infallible;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

pub async fn run_sse(options: super::cli::SseOptions, ctx: crate::Context) -> Result<()> {
    if ctx.verbose {
        eprintln!(
            "Starting MCP server with SSE transport on {}:{}...",
            options.host, options.port
        );
    }

    let addr = format!("{}:{}", options.host, options.port);
    let verbose = ctx.verbose;

    let app_router = router(ctx);

    if verbose {
        eprintln!("MCP server listening on http://{}", addr);
        eprintln!("SSE endpoint: http://{}/sse", addr);
        eprintln!("Message endpoint: http://{}/message", addr);
    }

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", addr, e))?;

    axum::serve(listener, app_router)
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    Ok(())
}

/// Path clients POST JSON-RPC messages to
const MESSAGE_PATH: &str = "/message";

fn router(ctx: crate::Context) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/sse", get(sse_handler))
        .route(MESSAGE_PATH, post(message_handler))
        .layer(cors)
        .with_state(Arc::new(ctx))
}

/// Announce the message endpoint, then hold the stream open
///
/// Responses travel back in the body of each `/message` POST, so nothing else
/// is pushed here besides keep-alive comments.
async fn sse_handler(
    State(_ctx): State<Arc<crate::Context>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let endpoint = Event::default().event("endpoint").data(MESSAGE_PATH);
    let stream = stream::once(async move { Ok(endpoint) })
        .chain(stream::pending::<Result<Event, Infallible>>());

    Sse::new(stream).keep_alive(KeepAlive::default())
}

async fn message_handler(
    State(ctx): State<Arc<crate::Context>>,
    Json(request): Json<serde_json::Value>,
) -> Response {
    let request_str = serde_json::to_string(&request).unwrap_or_default();

    match super::handle_request(&request_str, &ctx).await {
        Some(response) => {
            Json(serde_json::to_value(response).unwrap_or(serde_json::Value::Null)).into_response()
        }
        None => StatusCode::ACCEPTED.into_response(),
    }
}
