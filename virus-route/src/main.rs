use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use virus_route::config::WalkConfig;
use virus_route::route::RouteFile;
use virus_route::virus::Virus;

/// Environment variable naming the route document, if not given as an argument.
const ROUTE_FILE_VAR: &str = "ROUTE_FILE";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(ROUTE_FILE_VAR).ok())
        .map(PathBuf::from)
        .ok_or_else(|| format!("usage: virus-route <route.json> (or set {ROUTE_FILE_VAR})"))?;

    let config = WalkConfig::from_env()?;
    let route = RouteFile::new(path).load()?;

    info!(
        virus = %config.virus,
        fork_exit = %config.fork_exit,
        computers_on_route = route.len(),
        "starting walk"
    );

    let mut virus = Virus::new(config.selector()?);
    let summary = route.follow_path_with(&mut virus, config.fork_exit);

    for computer in virus.computers() {
        println!("{computer}");
    }
    println!();
    println!(
        "{} computers collected, {} forks taken{}",
        summary.computers_visited,
        summary.forks_taken,
        if summary.stopped {
            ", stopped at a split"
        } else {
            ""
        }
    );

    Ok(())
}
