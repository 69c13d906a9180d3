/// Distance between two nodes, `None` when either index is outside the matrix.
pub fn dist_between(from: i64, to: i64, dm: &[Vec<i64>]) -> Option<i64> {
    let from = usize::try_from(from).ok()?;
    let to = usize::try_from(to).ok()?;
    dm.get(from)?.get(to).copied()
}

/// Length of a route as the matrix sees it, following `nodes` in order.
pub fn route_distance(nodes: &[i64], dm: &[Vec<i64>]) -> Option<i64> {
    nodes
        .windows(2)
        .try_fold(0, |total, leg| Some(total + dist_between(leg[0], leg[1], dm)?))
}
