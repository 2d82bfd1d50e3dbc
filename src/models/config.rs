//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::domain::metrics::MetricsPolicy;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// Directory holding exported account snapshots (`<customer_id>.json`).
    pub snapshot_dir: String,
    #[serde(default = "default_summary_cache_ttl_secs")]
    pub summary_cache_ttl_secs: u64,
    #[serde(default)]
    pub metrics_policy: MetricsPolicy,
}

fn default_summary_cache_ttl_secs() -> u64 {
    300
}
