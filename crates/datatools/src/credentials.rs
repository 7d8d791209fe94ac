use crate::prelude::*;
use std::sync::{Arc, Mutex};

/// Asks the operator for a secret
pub trait Prompter: Send + Sync {
    fn prompt(&self, label: &str) -> Result<String, FetchError>;
}

/// Hidden-input prompt on the controlling terminal
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn prompt(&self, label: &str) -> Result<String, FetchError> {
        dialoguer::Password::new()
            .with_prompt(label)
            .interact()
            .map_err(|e| FetchError::Credential(format!("{label}: {e}")))
    }
}

/// Source of an API credential
pub trait CredentialProvider: Send + Sync {
    fn resolve(&self) -> Result<String, FetchError>;
}

/// Credential read from configuration, prompted for once when absent
///
/// The first successful prompt is cached for the lifetime of the provider, so
/// the operator is asked at most once per process.
pub struct PromptingCredential<P> {
    slot: String,
    value: Mutex<Option<String>>,
    prompter: P,
}

impl<P: Prompter> PromptingCredential<P> {
    /// `preset` is the configured value; empty strings count as unset.
    pub fn new(slot: impl Into<String>, preset: Option<String>, prompter: P) -> Self {
        Self {
            slot: slot.into(),
            value: Mutex::new(preset.filter(|v| !v.trim().is_empty())),
            prompter,
        }
    }
}

impl<P: Prompter> CredentialProvider for PromptingCredential<P> {
    fn resolve(&self) -> Result<String, FetchError> {
        let mut value = self
            .value
            .lock()
            .map_err(|_| FetchError::Credential(f!("{} cache is poisoned", self.slot)))?;

        if let Some(existing) = value.as_ref() {
            return Ok(existing.clone());
        }

        log::debug!("{} not configured, prompting", self.slot);
        let entered = self.prompter.prompt(&f!("Enter {}", self.slot))?;
        let entered = entered.trim().to_string();
        if entered.is_empty() {
            return Err(FetchError::Credential(f!("{} was left empty", self.slot)));
        }

        *value = Some(entered.clone());
        Ok(entered)
    }
}

/// Resolve `provider` on the blocking pool
///
/// A terminal prompt blocks its thread until the operator answers, and the
/// cache lock is held meanwhile; neither may park a runtime worker.
pub async fn resolve_blocking(
    provider: &Arc<dyn CredentialProvider>,
) -> Result<String, FetchError> {
    let provider = Arc::clone(provider);

    tokio::task::spawn_blocking(move || provider.resolve())
        .await
        .map_err(|e| FetchError::Credential(f!("credential prompt aborted: {e}")))?
}
