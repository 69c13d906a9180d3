use std::error::Error;
use std::path::Path;

use csv::Writer;
use tracing::info;

use crate::domain::types::SolveResponse;

/// One row per stop: `vehicle_id,stop,node,route_distance`.
pub fn write_routes_csv<P: AsRef<Path>>(
    path: P,
    solution: &SolveResponse,
) -> Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_path(path.as_ref())?;

    wtr.write_record(["vehicle_id", "stop", "node", "route_distance"])?;

    for route in &solution.routes {
        for (stop, node) in route.nodes.iter().enumerate() {
            wtr.write_record([
                route.vehicle_id.to_string(),
                stop.to_string(),
                node.to_string(),
                route.distance.to_string(),
            ])?;
        }
    }

    wtr.flush()?;
    info!("Wrote {} routes to {}", solution.routes.len(), path.as_ref().display());
    Ok(())
}
