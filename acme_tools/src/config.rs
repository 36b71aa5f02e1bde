use std::time::Duration;

use amg_common::Secret;
use log::*;

const DEFAULT_ACME_BASE_URL: &str = "http://127.0.0.1:8380";
const DEFAULT_ACME_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct AcmeConfig {
    /// Base url of the Acme API, e.g. "https://api.acme.example.com". No trailing slash.
    pub base_url: String,
    pub api_key: Secret<String>,
    /// Hard timeout applied to every request. A hung order fetch stalls the whole reconciliation batch.
    pub timeout: Duration,
}

impl Default for AcmeConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_ACME_BASE_URL.to_string(), api_key: Secret::default(), timeout: DEFAULT_ACME_TIMEOUT }
    }
}

impl AcmeConfig {
    pub fn new_from_env_or_default() -> Self {
        let base_url = std::env::var("AMG_ACME_BASE_URL").unwrap_or_else(|_| {
            warn!("AMG_ACME_BASE_URL not set, using {DEFAULT_ACME_BASE_URL}");
            DEFAULT_ACME_BASE_URL.to_string()
        });
        let base_url = base_url.trim_end_matches('/').to_string();
        let api_key = Secret::new(std::env::var("AMG_ACME_API_KEY").unwrap_or_else(|_| {
            warn!("AMG_ACME_API_KEY not set, using (probably useless) default");
            "acme_00000000000000".to_string()
        }));
        let timeout = std::env::var("AMG_ACME_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_ACME_TIMEOUT);
        Self { base_url, api_key, timeout }
    }
}
