use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

const SERVER_URL_ARG_NAME: &str = "server-url";
const TIMEOUT_ARG_NAME: &str = "timeout";
const CHECK_ARG_NAME: &str = "check";
const CSV_ARG_NAME: &str = "csv";
const HEALTH_ARG_NAME: &str = "health";
const DUMP_REQUEST_ARG_NAME: &str = "dump-request";

/// What the user asked for on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub server_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub check: bool,
    pub csv: Option<PathBuf>,
    pub health: bool,
    pub dump_request: bool,
}

pub fn get_app() -> Command {
    Command::new("vrp-api-test")
        .about("Sends a sample pickup & delivery problem to a VRP solver service and prints the plan")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new(SERVER_URL_ARG_NAME)
                .help("Base URL of the solver service (env: VRP_SERVER_URL, default http://127.0.0.1:7779)")
                .value_name("SERVER_URL")
                .required(false)
                .index(1),
        )
        .arg(
            Arg::new(TIMEOUT_ARG_NAME)
                .help("Request timeout in seconds (env: VRP_REQUEST_TIMEOUT_SECS)")
                .long(TIMEOUT_ARG_NAME)
                .short('t')
                .value_name("SECS")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new(CHECK_ARG_NAME)
                .help("Verify the returned routes against the request and fail on violations")
                .long(CHECK_ARG_NAME)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(CSV_ARG_NAME)
                .help("Write the returned routes to a CSV file")
                .long(CSV_ARG_NAME)
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(HEALTH_ARG_NAME)
                .help("Probe /health before solving and stop if the service is not ok")
                .long(HEALTH_ARG_NAME)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(DUMP_REQUEST_ARG_NAME)
                .help("Print the request JSON and exit without sending it")
                .long(DUMP_REQUEST_ARG_NAME)
                .action(ArgAction::SetTrue),
        )
}

impl RunOptions {
    pub fn from_matches(matches: &ArgMatches) -> RunOptions {
        RunOptions {
            server_url: matches.get_one::<String>(SERVER_URL_ARG_NAME).cloned(),
            timeout_secs: matches.get_one::<u64>(TIMEOUT_ARG_NAME).copied(),
            check: matches.get_flag(CHECK_ARG_NAME),
            csv: matches.get_one::<PathBuf>(CSV_ARG_NAME).cloned(),
            health: matches.get_flag(HEALTH_ARG_NAME),
            dump_request: matches.get_flag(DUMP_REQUEST_ARG_NAME),
        }
    }
}
