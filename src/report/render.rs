use std::io::{self, Write};

use colored::*;
use itertools::Itertools;

use crate::api::ApiError;
use crate::config::constant::SOLVE_PATH;
use crate::domain::types::{HealthStatus, SolveResponse, VehicleRoute};
use crate::evaluation::check::Violation;

const HEADLINE: &str = "=== VRP Solution ===";

pub fn render_banner(server_url: &str) -> String {
    format!("Testing VRP API at: {}{}", server_url, SOLVE_PATH)
}

pub fn render_route(route: &VehicleRoute) -> String {
    format!(
        "  Vehicle {}: {} (Distance: {}m)",
        route.vehicle_id,
        route.nodes.iter().join(" -> "),
        route.distance
    )
}

/// Plain-text report of a solved plan, starting with a blank line.
pub fn render_solution(solution: &SolveResponse) -> String {
    let routes: String = solution
        .routes
        .iter()
        .map(|route| render_route(route) + "\n")
        .collect();

    format!(
        "\n{}\nFeasible: {}\nTotal Distance: {}m\nWall Time: {}ms\n\nRoutes:\n{}\nSummary:\n{}\n",
        HEADLINE,
        if solution.feasible { "Yes" } else { "No" },
        solution.total_distance,
        solution.wall_time_ms,
        routes,
        solution.summary
    )
}

pub fn render_health(health: &HealthStatus) -> String {
    format!(
        "{} {}: {} (solvers: {})",
        health.service,
        health.version,
        health.status,
        health.solvers.iter().join(", ")
    )
}

pub fn render_violations(violations: &[Violation]) -> String {
    if violations.is_empty() {
        return "Checks: all passed".to_string();
    }
    let mut out = format!("Checks: {} failed", violations.len());
    for v in violations {
        out.push_str(&format!("\n  - {}", v));
    }
    out
}

/// Write the report with the headline highlighted.
pub fn print_solution<W: Write>(out: &mut W, solution: &SolveResponse) -> io::Result<()> {
    let report = render_solution(solution);
    match report.split_once(HEADLINE) {
        Some((before, after)) => write!(out, "{}{}{}", before, HEADLINE.green().bold(), after),
        None => write!(out, "{}", report),
    }
}

pub fn print_error(err: &ApiError) {
    eprintln!("{}", err.to_string().red());
}
