//! Backend Config

use std::time::Duration;

use clap::Args;

/// Row and object store connection settings.
#[derive(Debug, Clone, Args)]
pub struct BackendConfig {
    /// Base URL of the Supabase project
    #[arg(long, env = "SUPABASE_URL")]
    pub supabase_url: String,

    /// API key sent with every request
    #[arg(long, env = "SUPABASE_KEY", hide_env_values = true)]
    pub supabase_key: String,

    /// Request timeout in seconds
    #[arg(long, env = "HTTP_TIMEOUT_SECONDS", default_value_t = 30)]
    pub http_timeout_seconds: u64,
}

impl BackendConfig {
    /// Request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_seconds)
    }
}
