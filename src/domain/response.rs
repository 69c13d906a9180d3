use serde_json::Value;
use tracing::{debug, trace};

use crate::domain::types::{HealthStatus, SolveResponse, VehicleRoute};

// Numbers may arrive as floats (the service reports distances as f64); they
// are truncated the same way for every integer field. Out-of-range values
// saturate instead of wrapping.
fn as_int(value: &Value) -> i64 {
    value
        .as_i64()
        .or_else(|| value.as_u64().map(|v| i64::try_from(v).unwrap_or(i64::MAX)))
        .or_else(|| value.as_f64().map(|v| v as i64))
        .unwrap_or(0)
}

fn as_flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        _ => false,
    }
}

fn as_text(value: &Value) -> String {
    value.as_str().unwrap_or_default().to_string()
}

impl VehicleRoute {
    fn from_json(json: &Value) -> VehicleRoute {
        let nodes = json["nodes"]
            .as_array()
            .map(|arr| arr.iter().map(as_int).collect())
            .unwrap_or_default();

        VehicleRoute {
            vehicle_id: as_int(&json["vehicle_id"]),
            nodes,
            distance: as_int(&json["distance"]),
        }
    }
}

impl SolveResponse {
    /// Read a `/solve` reply. Returns `None` when the document is not an object.
    ///
    /// Missing fields take their zero value. Replies that carry `status` and
    /// `message` instead of `feasible` and `summary` are understood too.
    pub fn from_json(json: &Value) -> Option<SolveResponse> {
        let obj = json.as_object()?;
        trace!("Response keys: {:?}", obj.keys().collect::<Vec<_>>());

        let feasible = match obj.get("feasible") {
            Some(v) => as_flag(v),
            None => obj
                .get("status")
                .and_then(Value::as_str)
                .is_some_and(|s| s.eq_ignore_ascii_case("feasible")),
        };

        let summary = obj
            .get("summary")
            .or_else(|| obj.get("message"))
            .map(as_text)
            .unwrap_or_default();

        let routes: Vec<VehicleRoute> = json["routes"]
            .as_array()
            .map(|arr| arr.iter().map(VehicleRoute::from_json).collect())
            .unwrap_or_default();
        debug!("Parsed {} routes (feasible: {})", routes.len(), feasible);

        Some(SolveResponse {
            feasible,
            summary,
            total_distance: as_int(&json["total_distance"]),
            wall_time_ms: as_int(&json["wall_time_ms"]),
            routes,
        })
    }
}

impl HealthStatus {
    pub fn from_json(json: &Value) -> Option<HealthStatus> {
        json.as_object()?;
        let solvers = json["solver_available"]
            .as_array()
            .map(|arr| arr.iter().filter_map(|s| s.as_str().map(String::from)).collect())
            .unwrap_or_default();

        Some(HealthStatus {
            status: as_text(&json["status"]),
            service: as_text(&json["service"]),
            version: as_text(&json["version"]),
            solvers,
        })
    }
}
