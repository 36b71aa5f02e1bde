use std::{env, time::Duration};

use acme_tools::AcmeConfig;
use amg_common::helpers::parse_boolean_flag;
use log::*;

const DEFAULT_AMG_HOST: &str = "127.0.0.1";
const DEFAULT_AMG_PORT: u16 = 8380;
const DEFAULT_AMG_DATABASE_URL: &str = "sqlite://data/acme_mirror.db";
const DEFAULT_SOURCE_SYSTEM: &str = "Acme";
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// The label identifying the external commerce platform. Stored on every mirrored order and processing error,
    /// so a second gateway instance can mirror a different platform without code changes.
    pub source_system: String,
    /// How long the reconciliation worker sleeps between polling cycles.
    pub poll_interval: Duration,
    /// When true, the simulated Acme API is mounted under `/external-api`. Useful for local development and
    /// end-to-end testing; turn it off when pointing at the real platform.
    pub enable_acme_mock: bool,
    /// Acme API client configuration.
    pub acme: AcmeConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_AMG_HOST.to_string(),
            port: DEFAULT_AMG_PORT,
            database_url: DEFAULT_AMG_DATABASE_URL.to_string(),
            source_system: DEFAULT_SOURCE_SYSTEM.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            enable_acme_mock: true,
            acme: AcmeConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("AMG_HOST").ok().unwrap_or_else(|| DEFAULT_AMG_HOST.into());
        let port = env::var("AMG_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for AMG_PORT. {e} Using the default, {DEFAULT_AMG_PORT}, instead."
                    );
                    DEFAULT_AMG_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_AMG_PORT);
        let database_url = env::var("AMG_DATABASE_URL").unwrap_or_else(|_| {
            warn!("🪛️ AMG_DATABASE_URL is not set. Using the default, {DEFAULT_AMG_DATABASE_URL}.");
            DEFAULT_AMG_DATABASE_URL.to_string()
        });
        let source_system = env::var("AMG_SOURCE_SYSTEM").ok().unwrap_or_else(|| {
            info!("🪛️ AMG_SOURCE_SYSTEM is not set. Using the default, {DEFAULT_SOURCE_SYSTEM}.");
            DEFAULT_SOURCE_SYSTEM.into()
        });
        let poll_interval = env::var("AMG_POLL_INTERVAL_SECS")
            .ok()
            .and_then(|s| {
                s.parse::<u64>()
                    .map_err(|e| {
                        error!("🪛️ {s} is not a valid value for AMG_POLL_INTERVAL_SECS. {e} Using the default.");
                        e
                    })
                    .ok()
            })
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_POLL_INTERVAL);
        let enable_acme_mock = parse_boolean_flag(env::var("AMG_ENABLE_ACME_MOCK").ok(), true);
        let acme = AcmeConfig::new_from_env_or_default();
        Self { host, port, database_url, source_system, poll_interval, enable_acme_mock, acme }
    }
}
