use crate::prelude::*;
use datatools_core::endpoints::Endpoints;
use datatools_core::request::{Method, RequestSpec};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP handle shared by every lookup
///
/// Wraps one `reqwest::Client` (with an explicit request timeout) and the base
/// URLs of the remote services. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    endpoints: Endpoints,
}

impl Fetcher {
    pub fn new(timeout: Duration, endpoints: Endpoints) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .wrap_err("Failed to build HTTP client")?;

        Ok(Self { client, endpoints })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Send the request and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, spec: &RequestSpec) -> Result<T, FetchError> {
        self.json(spec, None).await
    }

    /// Send the request with an optional bearer token and decode the JSON body
    pub async fn json<T: DeserializeOwned>(
        &self,
        spec: &RequestSpec,
        bearer: Option<&str>,
    ) -> Result<T, FetchError> {
        let response = self.send(spec, bearer).await?;

        response
            .json::<T>()
            .await
            .map_err(|e| {
                FetchError::Decode(format!("{} ({})", e.without_url(), spec.display_url()))
            })
    }

    /// Send the request and return the body as text
    pub async fn text(&self, spec: &RequestSpec) -> Result<String, FetchError> {
        let response = self.send(spec, None).await?;

        response
            .text()
            .await
            .map_err(|e| {
                FetchError::Decode(format!("{} ({})", e.without_url(), spec.display_url()))
            })
    }

    async fn send(
        &self,
        spec: &RequestSpec,
        bearer: Option<&str>,
    ) -> Result<reqwest::Response, FetchError> {
        log::debug!("{:?} {}", spec.method, spec.display_url());

        let mut request = match spec.method {
            Method::Get => self.client.get(&spec.url),
            Method::Post => self.client.post(&spec.url),
        };

        if !spec.query.is_empty() {
            request = request.query(&spec.query);
        }
        if let Some(body) = &spec.body {
            request = request.json(body);
        }
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| {
                FetchError::Network(format!("{} ({})", e.without_url(), spec.display_url()))
            })?;

        let status = response.status();
        log::debug!("{} -> {}", spec.display_url(), status);

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: spec.display_url(),
            });
        }

        Ok(response)
    }
}

/// Fetcher with every service pointed at `base`
#[cfg(test)]
pub(crate) fn test_fetcher(base: &str) -> Fetcher {
    Fetcher::new(Duration::from_secs(5), Endpoints::uniform(base)).expect("client builds")
}

/// Base URL nothing listens on, for transport failures
#[cfg(test)]
pub(crate) const UNREACHABLE_BASE: &str = "http://127.0.0.1:1";
