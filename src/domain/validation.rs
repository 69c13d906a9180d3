use std::error::Error;
use std::fmt;

use crate::config::constant::MAX_VEHICLES;
use crate::domain::types::SolveRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    EmptyMatrix,
    NotSquare { row: usize, len: usize, expected: usize },
    DepotOutOfRange { depot: usize, nodes: usize },
    VehicleCount(usize),
    PairOutOfRange { pair: usize, node: usize, nodes: usize },
    SameNode { pair: usize, node: usize },
    NegativeMaxDistance(i64),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::EmptyMatrix => write!(f, "distance matrix is empty"),
            RequestError::NotSquare { row, len, expected } => write!(
                f,
                "distance matrix must be square: row {} has {} columns, expected {}",
                row, len, expected
            ),
            RequestError::DepotOutOfRange { depot, nodes } => {
                write!(f, "depot {} out of range (matrix size: {})", depot, nodes)
            }
            RequestError::VehicleCount(n) => {
                write!(f, "num_vehicles must be within 1..={}, got {}", MAX_VEHICLES, n)
            }
            RequestError::PairOutOfRange { pair, node, nodes } => write!(
                f,
                "pickup/delivery pair {}: node {} out of range (matrix size: {})",
                pair, node, nodes
            ),
            RequestError::SameNode { pair, node } => write!(
                f,
                "pickup/delivery pair {}: pickup and delivery are both node {}",
                pair, node
            ),
            RequestError::NegativeMaxDistance(d) => {
                write!(f, "vehicle_max_distance must not be negative, got {}", d)
            }
        }
    }
}

impl Error for RequestError {}

impl SolveRequest {
    /// Same rules the solver service applies before it starts searching.
    pub fn validate(&self) -> Result<(), RequestError> {
        let n = self.node_count();
        if n == 0 {
            return Err(RequestError::EmptyMatrix);
        }
        if let Some((row, r)) = self
            .distance_matrix
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != n)
        {
            return Err(RequestError::NotSquare {
                row,
                len: r.len(),
                expected: n,
            });
        }
        if self.depot >= n {
            return Err(RequestError::DepotOutOfRange {
                depot: self.depot,
                nodes: n,
            });
        }
        if self.num_vehicles == 0 || self.num_vehicles > MAX_VEHICLES {
            return Err(RequestError::VehicleCount(self.num_vehicles));
        }
        for (pair, &[pickup, delivery]) in self.pickups_deliveries.iter().enumerate() {
            if let Some(&node) = [pickup, delivery].iter().find(|&&i| i >= n) {
                return Err(RequestError::PairOutOfRange { pair, node, nodes: n });
            }
            if pickup == delivery {
                return Err(RequestError::SameNode { pair, node: pickup });
            }
        }
        if self.vehicle_max_distance < 0 {
            return Err(RequestError::NegativeMaxDistance(self.vehicle_max_distance));
        }
        Ok(())
    }
}
