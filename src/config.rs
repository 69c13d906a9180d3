use std::env;
use std::time::Duration;

use dotenv::dotenv;
use tracing::{debug, warn};

pub mod constant {
    pub(crate) const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:7779";
    pub(crate) const SOLVE_PATH: &str = "/solve";
    pub(crate) const HEALTH_PATH: &str = "/health";
    pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 60;
    pub(crate) const MAX_VEHICLES: usize = 100;
}

/// Where and how to reach the solver service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub server_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            server_url: constant::DEFAULT_SERVER_URL.to_string(),
            timeout: Duration::from_secs(constant::DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Resolve the config: explicit arguments win over `VRP_SERVER_URL` /
    /// `VRP_REQUEST_TIMEOUT_SECS`, which win over the built-in defaults.
    pub fn load(server_url: Option<String>, timeout_secs: Option<u64>) -> ClientConfig {
        dotenv().ok();
        Self::resolve(
            server_url,
            timeout_secs,
            env::var("VRP_SERVER_URL").ok(),
            env::var("VRP_REQUEST_TIMEOUT_SECS").ok(),
        )
    }

    fn resolve(
        server_url: Option<String>,
        timeout_secs: Option<u64>,
        env_url: Option<String>,
        env_timeout: Option<String>,
    ) -> ClientConfig {
        let server_url = server_url
            .or(env_url.filter(|u| !u.trim().is_empty()))
            .unwrap_or_else(|| constant::DEFAULT_SERVER_URL.to_string());

        let env_timeout = env_timeout.and_then(|raw| match raw.trim().parse::<u64>() {
            Ok(secs) => Some(secs),
            Err(e) => {
                warn!("Ignoring VRP_REQUEST_TIMEOUT_SECS={:?}: {}", raw, e);
                None
            }
        });
        let secs = timeout_secs
            .or(env_timeout)
            .unwrap_or(constant::DEFAULT_TIMEOUT_SECS);

        debug!("Resolved server url {} with {}s timeout", server_url, secs);
        ClientConfig {
            server_url,
            timeout: Duration::from_secs(secs),
        }
    }

    /// `server_url` joined with `path`, without doubled slashes.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.server_url.trim_end_matches('/'), path)
    }
}
