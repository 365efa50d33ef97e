use clap::Parser;
use tracing_subscriber::EnvFilter;

use knots_release::cli::{self, Cli};
use knots_release::ui;

/// Environment variable holding the log filter (e.g. `debug`)
const LOG_ENV: &str = "KNOTS_RELEASE_LOG";

fn main() {
    init_logging();
    let args = Cli::parse();

    if let Err(e) = cli::run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

// Logs go to stderr so that matrix/tags output on stdout stays parseable.
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
