//! Dashboard configuration flags shared by every subcommand

use std::path::PathBuf;
use std::time::Duration;

use alpha_research::DashboardConfig;
use anyhow::Result;
use clap::Args;

/// Flags override `ALPHA_*` variables, which override defaults
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Research service base URL
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Research request timeout in milliseconds
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Seed for generated data
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Live-data override file (JSON)
    #[arg(long, global = true)]
    pub live_data: Option<PathBuf>,
}

impl ConfigArgs {
    /// Resolve the final configuration
    pub fn into_config(self, host: Option<String>, port: Option<u16>) -> Result<DashboardConfig> {
        let mut builder = DashboardConfig::builder();
        if let Some(endpoint) = self.endpoint {
            builder = builder.research_endpoint(endpoint);
        }
        if let Some(ms) = self.timeout_ms {
            builder = builder.request_timeout(Duration::from_millis(ms));
        }
        if let Some(seed) = self.seed {
            builder = builder.seed(seed);
        }
        if let Some(path) = self.live_data {
            builder = builder.live_data_path(path);
        }
        if let Some(host) = host {
            builder = builder.host(host);
        }
        if let Some(port) = port {
            builder = builder.port(port);
        }

        Ok(builder.with_env()?.build()?)
    }
}
