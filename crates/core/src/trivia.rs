use crate::endpoints::join_url;
use crate::request::RequestSpec;

pub const DEFAULT_FACT_KIND: &str = "trivia";

/// Fact kinds documented by the Numbers API
pub const FACT_KINDS: [&str; 4] = ["trivia", "math", "date", "year"];

pub fn is_known_fact_kind(kind: &str) -> bool {
    FACT_KINDS.contains(&kind)
}

/// Build the Numbers API request
///
/// Both segments are placed in the path verbatim. Date facts use `month/day`,
/// so `number` may itself contain a slash. Unknown kinds are sent as-is.
pub fn number_fact_request(base: &str, number: &str, kind: &str) -> RequestSpec {
    RequestSpec::get(join_url(base, &format!("/{number}/{kind}")))
}

pub fn activity_request(base: &str) -> RequestSpec {
    RequestSpec::get(join_url(base, "/api/activity"))
}
