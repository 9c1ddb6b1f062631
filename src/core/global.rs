use crate::core::client::ApiClient;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ClientError, Result};
use std::sync::OnceLock;

static CLIENT: OnceLock<ApiClient> = OnceLock::new();

/// Builds the process-wide client. Only the first call succeeds; the stored
/// client is never replaced.
pub fn init<C: ConfigProvider + ?Sized>(config: &C) -> Result<&'static ApiClient> {
    let client = ApiClient::new(config)?;
    CLIENT.set(client).map_err(|_| ClientError::ConfigError {
        message: "API client is already initialized".to_string(),
    })?;
    tracing::info!("API client initialized for {}", config.base_url());
    global()
}

pub fn global() -> Result<&'static ApiClient> {
    CLIENT.get().ok_or_else(|| ClientError::ConfigError {
        message: "API client is not initialized; call init() at startup".to_string(),
    })
}
