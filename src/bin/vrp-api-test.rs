use std::process::ExitCode;

use vrp_api_client::cli;

#[tokio::main]
async fn main() -> ExitCode {
    cli::run().await
}
