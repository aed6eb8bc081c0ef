use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::{Result, SessionError};

pub(crate) const DEFAULT_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds the single HTTP client shared by every stage of a run.
pub fn default_client(timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .user_agent(DEFAULT_UA)
        .timeout(timeout)
        .build()?;
    Ok(client)
}

/// Decodes a remote response body; a body that does not match the expected
/// shape is a [`SessionError::DataShape`], not a transport failure.
pub(crate) fn decode<T: DeserializeOwned>(body: &str, what: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| SessionError::DataShape(format!("{what}: {e}")))
}
