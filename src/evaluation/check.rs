use std::collections::HashMap;
use std::fmt;

use tracing::{debug, warn};

use crate::domain::types::{SolveRequest, SolveResponse};
use crate::evaluation::distance::route_distance;

/// Something the returned plan gets wrong with respect to the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    TooManyRoutes { routes: usize, vehicles: usize },
    NotAnchoredAtDepot { vehicle: i64 },
    UnknownNode { vehicle: i64, node: i64 },
    VisitedTwice { node: i64 },
    PairUnserved { pickup: usize, delivery: usize },
    PairSplit { pickup: usize, delivery: usize },
    DeliveryBeforePickup { vehicle: i64, pickup: usize, delivery: usize },
    DistanceMismatch { vehicle: i64, reported: i64, computed: i64 },
    OverMaxDistance { vehicle: i64, distance: i64, limit: i64 },
    TotalMismatch { reported: i64, computed: i128 },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::TooManyRoutes { routes, vehicles } => {
                write!(f, "{} routes for {} vehicles", routes, vehicles)
            }
            Violation::NotAnchoredAtDepot { vehicle } => {
                write!(f, "vehicle {} does not start and end at the depot", vehicle)
            }
            Violation::UnknownNode { vehicle, node } => {
                write!(f, "vehicle {} visits unknown node {}", vehicle, node)
            }
            Violation::VisitedTwice { node } => write!(f, "node {} is visited more than once", node),
            Violation::PairUnserved { pickup, delivery } => {
                write!(f, "pair {} -> {} is not served", pickup, delivery)
            }
            Violation::PairSplit { pickup, delivery } => {
                write!(f, "pair {} -> {} is split across vehicles", pickup, delivery)
            }
            Violation::DeliveryBeforePickup { vehicle, pickup, delivery } => write!(
                f,
                "vehicle {} delivers {} before picking up {}",
                vehicle, delivery, pickup
            ),
            Violation::DistanceMismatch { vehicle, reported, computed } => write!(
                f,
                "vehicle {} reports {}m but the matrix gives {}m",
                vehicle, reported, computed
            ),
            Violation::OverMaxDistance { vehicle, distance, limit } => {
                write!(f, "vehicle {} drives {}m, limit is {}m", vehicle, distance, limit)
            }
            Violation::TotalMismatch { reported, computed } => write!(
                f,
                "total distance {}m does not match the route sum {}m",
                reported, computed
            ),
        }
    }
}

/// Verify a returned plan against the problem that was sent.
pub fn check_solution(request: &SolveRequest, solution: &SolveResponse) -> Vec<Violation> {
    let mut violations = vec![];
    let dm = &request.distance_matrix;
    let depot = request.depot as i64;

    if solution.routes.len() > request.num_vehicles {
        violations.push(Violation::TooManyRoutes {
            routes: solution.routes.len(),
            vehicles: request.num_vehicles,
        });
    }

    // node -> (vehicle, position in that vehicle's route)
    let mut visits: HashMap<i64, (i64, usize)> = HashMap::new();
    // reported distances are untrusted; i128 cannot overflow on any route count we accept
    let mut route_sum: i128 = 0;

    for route in &solution.routes {
        let vehicle = route.vehicle_id;
        route_sum += i128::from(route.distance);

        if route.nodes.first() != Some(&depot) || route.nodes.last() != Some(&depot) {
            violations.push(Violation::NotAnchoredAtDepot { vehicle });
        }

        for (pos, &node) in route.nodes.iter().enumerate() {
            if node < 0 || node as usize >= request.node_count() {
                violations.push(Violation::UnknownNode { vehicle, node });
                continue;
            }
            if node == depot {
                continue;
            }
            if visits.insert(node, (vehicle, pos)).is_some() {
                violations.push(Violation::VisitedTwice { node });
            }
        }

        if let Some(computed) = route_distance(&route.nodes, dm) {
            if computed != route.distance {
                violations.push(Violation::DistanceMismatch {
                    vehicle,
                    reported: route.distance,
                    computed,
                });
            }
            if computed > request.vehicle_max_distance {
                violations.push(Violation::OverMaxDistance {
                    vehicle,
                    distance: computed,
                    limit: request.vehicle_max_distance,
                });
            }
        }
    }

    for &[pickup, delivery] in &request.pickups_deliveries {
        match (visits.get(&(pickup as i64)), visits.get(&(delivery as i64))) {
            (Some(&(pv, pp)), Some(&(dv, dp))) => {
                if pv != dv {
                    violations.push(Violation::PairSplit { pickup, delivery });
                } else if dp < pp {
                    violations.push(Violation::DeliveryBeforePickup {
                        vehicle: pv,
                        pickup,
                        delivery,
                    });
                }
            }
            _ => violations.push(Violation::PairUnserved { pickup, delivery }),
        }
    }

    // Each route distance and the total are truncated floats, so the total may
    // exceed the sum of truncated routes by less than one per route.
    let slack = solution.routes.len().max(1) as i128;
    let gap = i128::from(solution.total_distance) - route_sum;
    if !(0..slack).contains(&gap) {
        violations.push(Violation::TotalMismatch {
            reported: solution.total_distance,
            computed: route_sum,
        });
    }

    if violations.is_empty() {
        debug!("Plan passed all checks");
    } else {
        warn!("Plan has {} violations", violations.len());
    }
    violations
}
