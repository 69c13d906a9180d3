use std::error::Error;
use std::io::{self, Write};
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::api::{ApiError, VrpClient};
use crate::cli::args::{get_app, RunOptions};
use crate::config::ClientConfig;
use crate::domain::types::SolveRequest;
use crate::evaluation::check::check_solution;
use crate::fixtures::sample_request::sample_request;
use crate::report::export::write_routes_csv;
use crate::report::render::{
    print_error, print_solution, render_banner, render_health, render_violations,
};

/// Initialize tracing; stdout is reserved for the report.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_span_events(fmt::format::FmtSpan::NEW | fmt::format::FmtSpan::CLOSE)
                .pretty(),
        )
        .init();
}

/// Send `request` once and write the report to `out`.
pub async fn execute<W: Write>(
    opts: RunOptions,
    request: SolveRequest,
    out: &mut W,
) -> Result<(), Box<dyn Error>> {
    let config = ClientConfig::load(opts.server_url.clone(), opts.timeout_secs);

    if opts.dump_request {
        writeln!(out, "{}", serde_json::to_string_pretty(&request)?)?;
        return Ok(());
    }

    writeln!(out, "{}", render_banner(&config.server_url))?;

    request.validate().map_err(ApiError::from)?;

    let client = VrpClient::new(config)?;

    if opts.health {
        let health = client.health().await?;
        writeln!(out, "{}", render_health(&health))?;
        if !health.is_ok() {
            return Err(format!("service reported status '{}'", health.status).into());
        }
    }

    let solution = client.solve(&request).await?;
    print_solution(out, &solution)?;

    if let Some(path) = &opts.csv {
        write_routes_csv(path, &solution)?;
    }

    if opts.check {
        let violations = check_solution(&request, &solution);
        writeln!(out, "\n{}", render_violations(&violations))?;
        if !violations.is_empty() {
            return Err(format!("{} plan checks failed", violations.len()).into());
        }
    }

    Ok(())
}

pub async fn run() -> ExitCode {
    init_tracing();

    let opts = RunOptions::from_matches(&get_app().get_matches());
    info!("Starting VRP API test with {:?}", opts);

    match execute(opts, sample_request(), &mut io::stdout()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Run failed: {}", e);
            match e.downcast_ref::<ApiError>() {
                Some(api_error) => print_error(api_error),
                None => eprintln!("{}", e),
            }
            ExitCode::FAILURE
        }
    }
}
