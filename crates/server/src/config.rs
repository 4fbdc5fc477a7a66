//! Server configuration from flags and environment.

use clap::Parser;
use starchain_chain::RegistryConfig;
use std::net::SocketAddr;

#[derive(Debug, Clone, Parser)]
#[command(name = "starchain-server")]
#[command(about = "HTTP API for the starchain star registry", long_about = None)]
pub struct ServerArgs {
    /// Address to bind
    #[arg(long, env = "STARCHAIN_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "STARCHAIN_PORT", default_value = "8000")]
    pub port: u16,

    /// Seconds a signed challenge stays valid
    #[arg(long, env = "STARCHAIN_WINDOW", default_value = "300")]
    pub window: u64,

    /// Maximum story length in bytes
    #[arg(long, env = "STARCHAIN_MAX_STORY_BYTES", default_value = "500")]
    pub max_story_bytes: usize,
}

impl ServerArgs {
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port);
        Ok(addr.parse()?)
    }

    pub fn registry_config(&self) -> RegistryConfig {
        RegistryConfig {
            validation_window_secs: self.window,
            max_story_bytes: self.max_story_bytes,
        }
    }
}
