use crate::domain::error::{AppError, Result};
use keyring::Entry;

/// Provider API keys stored in the OS credential store.
pub struct KeyringManager {
    service: String,
}

impl KeyringManager {
    pub fn new(service: &str) -> Self {
        Self {
            service: service.to_string(),
        }
    }

    fn entry(&self, provider: &str) -> Result<Entry> {
        Entry::new(&self.service, provider)
            .map_err(|e| AppError::SecurityError(format!("Failed to open keyring entry: {}", e)))
    }

    pub fn set_secret(&self, provider: &str, secret: &str) -> Result<()> {
        if secret.trim().is_empty() {
            return Err(AppError::ValidationError("API key must not be empty".to_string()));
        }
        self.entry(provider)?
            .set_password(secret.trim())
            .map_err(|e| AppError::SecurityError(format!("Failed to store API key: {}", e)))
    }

    pub fn get_secret(&self, provider: &str) -> Result<String> {
        match self.entry(provider)?.get_password() {
            Ok(secret) => Ok(secret),
            Err(keyring::Error::NoEntry) => Err(AppError::NotFound(format!(
                "No stored API key for {}",
                provider
            ))),
            Err(e) => Err(AppError::SecurityError(format!("Failed to read API key: {}", e))),
        }
    }

    pub fn delete_secret(&self, provider: &str) -> Result<()> {
        match self.entry(provider)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(AppError::SecurityError(format!("Failed to delete API key: {}", e))),
        }
    }
}
