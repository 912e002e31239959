//! Client configuration.
//!
//! The core reads no environment variables; hosts build a `ClientConfig`
//! directly or deserialize it from their own configuration files.

use serde::Deserialize;

/// Public endpoint of the Epidata API.
pub const DEFAULT_BASE_URL: &str = "https://delphi.midas.cs.cmu.edu/epidata/api.php";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    /// Whole-request timeout for the bundled transport. `None` waits
    /// indefinitely.
    pub timeout_ms: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: None,
        }
    }
}
