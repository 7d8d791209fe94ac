//! Core library for datatools
//!
//! This crate implements the **Functional Core** of the datatools application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The datatools project uses a two-crate architecture to enforce separation of concerns:
//!
//! - **`datatools_core`** (this crate): Request builders and response transforms with zero I/O
//! - **`datatools`**: HTTP, credential prompting, CLI output and the MCP server (the Imperative Shell)
//!
//! Every lookup is split the same way. The core describes the request as a
//! [`request::RequestSpec`] (method, URL, ordered query pairs, optional JSON body)
//! and reshapes the decoded response. The shell sends the request and hands the
//! envelope back to the core.
//!
//! ## Functional Core Principles
//!
//! - **Pure functions**: Same input always produces the same output
//! - **No side effects**: No I/O operations, no external state mutations
//! - **Testable**: Can be tested with simple fixture data, no mocking required
//!
//! # Module Organization
//!
//! - [`endpoints`]: Base URLs of every remote service
//! - [`request`]: The request descriptor shared by all lookups
//! - [`envelope`]: The `{"error": ...}` envelope returned by the non-failing lookups
//! - [`search`]: Tavily web search
//! - [`wiki`]: Wikipedia article summaries
//! - [`weather`]: Open-Meteo forecasts
//! - [`countries`]: REST Countries catalogue
//! - [`finance`]: Exchange rates and the Bitcoin price index
//! - [`trivia`]: Numbers API facts and Bored API activities
//! - [`news`]: GNews headlines
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use datatools_core::weather::forecast_request;
//!
//! let hourly = vec!["temperature_2m".to_string(), "windspeed_10m".to_string()];
//! let spec = forecast_request("https://api.open-meteo.com", 52.52, 13.41, &hourly);
//!
//! assert_eq!(spec.query_value("hourly"), Some("temperature_2m,windspeed_10m"));
//! ```

pub mod countries;
pub mod endpoints;
pub mod envelope;
pub mod finance;
pub mod news;
pub mod request;
pub mod search;
pub mod trivia;
pub mod weather;
pub mod wiki;
