use serde::Serialize;

/// Body of `POST /solve`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolveRequest {
    pub distance_matrix: Vec<Vec<i64>>,
    pub pickups_deliveries: Vec<[usize; 2]>,
    pub num_vehicles: usize,
    pub depot: usize,
    pub vehicle_max_distance: i64,
    pub global_span_cost_coefficient: i64,
}

impl SolveRequest {
    pub fn node_count(&self) -> usize {
        self.distance_matrix.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VehicleRoute {
    pub vehicle_id: i64,
    pub nodes: Vec<i64>,
    pub distance: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolveResponse {
    pub feasible: bool,
    pub summary: String,
    pub total_distance: i64,
    pub wall_time_ms: i64,
    pub routes: Vec<VehicleRoute>,
}

/// Reply of `GET /health`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    pub version: String,
    pub solvers: Vec<String>,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}
