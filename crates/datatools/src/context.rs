use crate::client::Fetcher;
use crate::credentials::{CredentialProvider, PromptingCredential, TerminalPrompter};
use crate::prelude::*;
use datatools_core::endpoints::Endpoints;
use datatools_core::search::TAVILY_API_KEY_SLOT;
use std::sync::Arc;
use std::time::Duration;

/// Everything a lookup needs besides its own arguments
///
/// Built once per process from the global flags and shared by the CLI and
/// every MCP request, so a prompted search key survives between tool calls.
#[derive(Clone)]
pub struct Context {
    pub verbose: bool,
    pub fetcher: Fetcher,
    pub search_credential: Arc<dyn CredentialProvider>,
    pub gnews_api_key: Option<String>,
}

impl Context {
    pub fn new(
        verbose: bool,
        fetcher: Fetcher,
        search_credential: Arc<dyn CredentialProvider>,
        gnews_api_key: Option<String>,
    ) -> Self {
        Self {
            verbose,
            fetcher,
            search_credential,
            gnews_api_key,
        }
    }

    pub fn from_global(global: &crate::Global) -> Result<Self> {
        let fetcher = Fetcher::new(Duration::from_secs(global.timeout), Endpoints::default())?;
        let search_credential = Arc::new(PromptingCredential::new(
            TAVILY_API_KEY_SLOT,
            global.tavily_api_key.clone(),
            TerminalPrompter,
        ));

        Ok(Self::new(
            global.verbose,
            fetcher,
            search_credential,
            global.gnews_api_key.clone().filter(|k| !k.trim().is_empty()),
        ))
    }

    /// GNews key from configuration, or an error naming the variable
    pub fn require_gnews_api_key(&self) -> Result<&str> {
        self.gnews_api_key
            .as_deref()
            .ok_or_eyre("GNEWS_API_KEY environment variable not set (or pass --gnews-api-key)")
    }
}
