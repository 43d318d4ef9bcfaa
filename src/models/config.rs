use serde::Deserialize;

/// Runtime configuration loaded from `config/*.yaml` and `APP__*` variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// Session cookie signing key, at least 64 bytes.
    pub secret: String,
    /// Origin of the registration site, without a trailing path.
    pub sugang_base_url: String,
    pub user_agent: String,
    /// Timeout of a single lecture lookup.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Upper bound on a whole ingestion run.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
    /// Number of lecture lookups in flight at once.
    #[serde(default = "default_enrich_concurrency")]
    pub enrich_concurrency: usize,
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_fetch_timeout_secs() -> u64 {
    1800
}

fn default_enrich_concurrency() -> usize {
    16
}
