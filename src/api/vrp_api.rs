use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, error, info, info_span, trace, warn, Instrument};

use crate::api::error::ApiError;
use crate::config::constant::{HEALTH_PATH, SOLVE_PATH};
use crate::config::ClientConfig;
use crate::domain::types::{HealthStatus, SolveRequest, SolveResponse};

/// Thin HTTP client for the solver service.
pub struct VrpClient {
    client: Client,
    config: ClientConfig,
}

impl VrpClient {
    pub fn new(config: ClientConfig) -> Result<VrpClient, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("vrp-api-client/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(VrpClient { client, config })
    }

    /// POST the problem to `/solve` and read back the route plan.
    ///
    /// Only a 200 carrying a JSON object with `feasible == true` is a success.
    pub async fn solve(&self, request: &SolveRequest) -> Result<SolveResponse, ApiError> {
        let url = self.config.endpoint(SOLVE_PATH);
        let span = info_span!("solve", url = %url);
        self.exchange(&url, request).instrument(span).await
    }

    async fn exchange(&self, url: &str, request: &SolveRequest) -> Result<SolveResponse, ApiError> {
        info!(
            "Sending {} nodes, {} pickup/delivery pairs, {} vehicles",
            request.node_count(),
            request.pickups_deliveries.len(),
            request.num_vehicles
        );

        let response = match self.client.post(url).json(request).send().await {
            Ok(resp) => resp,
            Err(e) => {
                error!("Solve request failed: {}", e);
                return Err(ApiError::Request(e));
            }
        };

        let status = response.status();
        debug!(
            "Received response: HTTP {} ({} bytes)",
            status,
            response.content_length().unwrap_or(0)
        );
        let body = response.text().await?;
        trace!("Response body: {}", body);

        if status != StatusCode::OK {
            warn!(
                "Solver returned HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            );
            return Err(ApiError::Http { status, body });
        }

        let parsed = match serde_json::from_str::<Value>(&body) {
            Ok(json) => SolveResponse::from_json(&json),
            Err(e) => {
                error!(
                    "Failed to parse solver JSON: {} (first 200 chars: {})",
                    e,
                    body.chars().take(200).collect::<String>()
                );
                None
            }
        };
        let solution = parsed.ok_or(ApiError::InvalidJson)?;

        if !solution.feasible {
            warn!("Solver reported no feasible plan");
            return Err(ApiError::Infeasible {
                summary: solution.summary,
            });
        }

        info!(
            "Solved: {} routes, total distance {} in {}ms",
            solution.routes.len(),
            solution.total_distance,
            solution.wall_time_ms
        );
        Ok(solution)
    }

    /// GET `/health`.
    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        let url = self.config.endpoint(HEALTH_PATH);
        debug!("Probing {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::Http { status, body });
        }

        let health = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|json| HealthStatus::from_json(&json))
            .ok_or(ApiError::InvalidJson)?;
        info!(
            "{} {} is '{}' (solvers: {:?})",
            health.service, health.version, health.status, health.solvers
        );
        Ok(health)
    }
}
