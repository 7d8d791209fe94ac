use serde::{Deserialize, Serialize};

pub const TAVILY_API_BASE: &str = "https://api.tavily.com";
pub const WIKIPEDIA_API_BASE: &str = "https://en.wikipedia.org";
pub const OPEN_METEO_API_BASE: &str = "https://api.open-meteo.com";
pub const REST_COUNTRIES_API_BASE: &str = "https://restcountries.com";
pub const EXCHANGE_RATE_API_BASE: &str = "https://api.exchangerate.host";
pub const NUMBERS_API_BASE: &str = "http://numbersapi.com";
pub const COINDESK_API_BASE: &str = "https://api.coindesk.com";
pub const BORED_API_BASE: &str = "https://www.boredapi.com";
pub const GNEWS_API_BASE: &str = "https://gnews.io";

/// Base URL of every remote service, without a trailing slash
///
/// The defaults point at the public services. Tests swap them for a local
/// stub server with [`Endpoints::uniform`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    pub tavily: String,
    pub wikipedia: String,
    pub open_meteo: String,
    pub rest_countries: String,
    pub exchange_rate: String,
    pub numbers: String,
    pub coindesk: String,
    pub bored: String,
    pub gnews: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            tavily: TAVILY_API_BASE.to_string(),
            wikipedia: WIKIPEDIA_API_BASE.to_string(),
            open_meteo: OPEN_METEO_API_BASE.to_string(),
            rest_countries: REST_COUNTRIES_API_BASE.to_string(),
            exchange_rate: EXCHANGE_RATE_API_BASE.to_string(),
            numbers: NUMBERS_API_BASE.to_string(),
            coindesk: COINDESK_API_BASE.to_string(),
            bored: BORED_API_BASE.to_string(),
            gnews: GNEWS_API_BASE.to_string(),
        }
    }
}

impl Endpoints {
    /// Point every service at the same base URL
    ///
    /// Each lookup targets a distinct path, so a single stub server can answer all of them.
    pub fn uniform(base: &str) -> Self {
        let base = base.trim_end_matches('/').to_string();
        Self {
            tavily: base.clone(),
            wikipedia: base.clone(),
            open_meteo: base.clone(),
            rest_countries: base.clone(),
            exchange_rate: base.clone(),
            numbers: base.clone(),
            coindesk: base.clone(),
            bored: base.clone(),
            gnews: base,
        }
    }
}

/// Join a base URL and an absolute path without doubling the slash
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints_are_public_services() {
        let endpoints = Endpoints::default();
        assert_eq!(endpoints.wikipedia, "https://en.wikipedia.org");
        assert_eq!(endpoints.numbers, "http://numbersapi.com");
        assert_eq!(endpoints.gnews, "https://gnews.io");
    }

    #[test]
    fn test_uniform_trims_trailing_slash() {
        let endpoints = Endpoints::uniform("http://127.0.0.1:1234/");
        assert_eq!(endpoints.tavily, "http://127.0.0.1:1234");
        assert_eq!(endpoints.coindesk, "http://127.0.0.1:1234");
    }

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("https://gnews.io/", "/api/v4/search"),
            "https://gnews.io/api/v4/search"
        );
        assert_eq!(
            join_url("https://gnews.io", "api/v4/search"),
            "https://gnews.io/api/v4/search"
        );
    }
}
