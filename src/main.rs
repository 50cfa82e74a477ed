use clap::Parser;
use x1_dashboard::{arguments::Args, logger, run::run};

/// Main entry point for x1-dashboard
///
/// Loads configuration, starts the metric pollers and the HTTP API, and runs
/// until Ctrl-C or SIGTERM.
#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = run(args).await {
        eprintln!("x1-dashboard failed: {}", e);
        logger::flush();
        std::process::exit(1);
    }
}
