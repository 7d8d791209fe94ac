use crate::endpoints::join_url;
use crate::request::RequestSpec;
use serde::Serialize;
use serde_json::Value;

pub const NEWS_LANGUAGE: &str = "en";
pub const NEWS_COUNTRY: &str = "us";
pub const MAX_ARTICLES: u32 = 5;

/// Headline extracted from a GNews article
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Headline {
    pub title: Option<String>,
    pub source: Option<String>,
    pub url: Option<String>,
    pub published_at: Option<String>,
}

/// Build the GNews search request: English, US, five articles
pub fn headlines_request(base: &str, query: &str, api_key: &str) -> RequestSpec {
    RequestSpec::get(join_url(base, "/api/v4/search"))
        .param("q", query)
        .param("lang", NEWS_LANGUAGE)
        .param("country", NEWS_COUNTRY)
        .param("max", MAX_ARTICLES)
        .param("token", api_key)
}

pub fn extract_headlines(response: &Value) -> Vec<Headline> {
    response
        .get("articles")
        .and_then(Value::as_array)
        .map(|articles| {
            articles
                .iter()
                .map(|article| Headline {
                    title: str_at(article, &["title"]),
                    source: str_at(article, &["source", "name"]),
                    url: str_at(article, &["url"]),
                    published_at: str_at(article, &["publishedAt"]),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn str_at(value: &Value, path: &[&str]) -> Option<String> {
    path.iter()
        .try_fold(value, |current, key| current.get(*key))
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_headlines_request() {
        let spec = headlines_request("https://gnews.io", "AI advancements", "abc123");
        assert_eq!(spec.url, "https://gnews.io/api/v4/search");
        assert_eq!(
            spec.query,
            vec![
                ("q".to_string(), "AI advancements".to_string()),
                ("lang".to_string(), "en".to_string()),
                ("country".to_string(), "us".to_string()),
                ("max".to_string(), "5".to_string()),
                ("token".to_string(), "abc123".to_string()),
            ]
        );
    }

    #[test]
    fn test_extract_headlines() {
        let response = json!({
            "totalArticles": 2,
            "articles": [
                {
                    "title": "Rust 2.0 announced",
                    "url": "https://example.com/rust",
                    "publishedAt": "2024-01-01T00:00:00Z",
                    "source": {"name": "Example News", "url": "https://example.com"}
                },
                {"title": "No source"}
            ]
        });

        let headlines = extract_headlines(&response);
        assert_eq!(headlines.len(), 2);
        assert_eq!(headlines[0].source.as_deref(), Some("Example News"));
        assert_eq!(headlines[1].source, None);
        assert_eq!(headlines[1].url, None);
    }

    #[test]
    fn test_extract_headlines_error_body() {
        assert!(extract_headlines(&json!({"errors": ["invalid token"]})).is_empty());
    }
}
