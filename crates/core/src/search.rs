use crate::endpoints::join_url;
use crate::request::RequestSpec;
use serde::Serialize;
use serde_json::{json, Value};

/// Name of the configuration slot holding the search credential
pub const TAVILY_API_KEY_SLOT: &str = "TAVILY_API_KEY";

/// Single search hit extracted for display
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct SearchHit {
    pub title: Option<String>,
    pub url: Option<String>,
    pub content: Option<String>,
    pub score: Option<f64>,
}

/// Build the Tavily search request
///
/// The credential travels as a bearer token and is added by the shell.
pub fn search_request(base: &str, query: &str) -> RequestSpec {
    RequestSpec::post_json(join_url(base, "/search"), json!({ "query": query }))
}

/// Extract the result list from a raw Tavily response
///
/// Entries that are not objects are skipped.
pub fn extract_hits(response: &Value) -> Vec<SearchHit> {
    response
        .get("results")
        .and_then(Value::as_array)
        .map(|results| {
            results
                .iter()
                .filter(|hit| hit.is_object())
                .map(|hit| SearchHit {
                    title: string_field(hit, "title"),
                    url: string_field(hit, "url"),
                    content: string_field(hit, "content"),
                    score: hit.get("score").and_then(Value::as_f64),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Short answer Tavily includes when `include_answer` is enabled on the account
pub fn extract_answer(response: &Value) -> Option<String> {
    string_field(response, "answer")
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Method;

    #[test]
    fn test_search_request() {
        let spec = search_request("https://api.tavily.com", "who is Leo Messi?");
        assert_eq!(spec.method, Method::Post);
        assert_eq!(spec.url, "https://api.tavily.com/search");
        assert_eq!(spec.body, Some(json!({"query": "who is Leo Messi?"})));
        assert!(spec.query.is_empty());
    }

    #[test]
    fn test_extract_hits() {
        let response = json!({
            "query": "rust",
            "answer": null,
            "results": [
                {"title": "Rust", "url": "https://www.rust-lang.org", "content": "A language", "score": 0.98},
                {"title": "Crates", "url": "https://crates.io"},
                "garbage"
            ]
        });

        let hits = extract_hits(&response);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title.as_deref(), Some("Rust"));
        assert_eq!(hits[0].score, Some(0.98));
        assert_eq!(hits[1].content, None);
        assert_eq!(extract_answer(&response), None);
    }

    #[test]
    fn test_extract_hits_without_results() {
        assert!(extract_hits(&json!({"detail": "unauthorized"})).is_empty());
    }
}
