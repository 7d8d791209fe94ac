use crate::endpoints::join_url;
use crate::request::RequestSpec;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default number of sentences requested for a summary
pub const DEFAULT_SENTENCES: u32 = 3;

/// Article summary reshaped from the MediaWiki extracts API
///
/// A title that does not resolve comes back as the service's missing-page
/// entry: `title` is set, `extract` and `pageid` are `None`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct WikiSummary {
    pub title: Option<String>,
    pub extract: Option<String>,
    pub pageid: Option<u64>,
}

impl WikiSummary {
    pub fn is_missing(&self) -> bool {
        self.pageid.is_none()
    }
}

/// Build the plain-text extract query for a single title
pub fn summary_request(base: &str, title: &str, sentences: u32) -> RequestSpec {
    RequestSpec::get(join_url(base, "/w/api.php"))
        .param("action", "query")
        .param("prop", "extracts")
        .param("exsentences", sentences)
        .param("explaintext", 1)
        .param("format", "json")
        .param("titles", title)
}

/// Take the first entry of `query.pages` and keep `title`, `extract` and `pageid`
///
/// Pages are taken in the order the service returned them.
pub fn transform_summary(response: &Value) -> Result<WikiSummary, String> {
    let pages = response
        .get("query")
        .and_then(|query| query.get("pages"))
        .and_then(Value::as_object)
        .ok_or_else(|| "Response has no query.pages object".to_string())?;

    let page = pages
        .values()
        .next()
        .ok_or_else(|| "Response contains no pages".to_string())?;

    Ok(WikiSummary {
        title: page.get("title").and_then(Value::as_str).map(str::to_string),
        extract: page
            .get("extract")
            .and_then(Value::as_str)
            .map(str::to_string),
        pageid: page.get("pageid").and_then(Value::as_u64),
    })
}
