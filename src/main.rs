use clap::Parser;
use embedlink::cli::{run, Cli};
use embedlink::infrastructure::{FileSystemRepository, WorkspaceRepository};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "EMBEDLINK_LOG";

/// EMBEDLINK_LOG wins, then the workspace's log_level, then "warn".
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        let level = FileSystemRepository::discover()
            .and_then(|repo| repo.load_config())
            .map(|config| config.log_level)
            .unwrap_or_else(|_| "warn".to_string());
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    match run(cli.command) {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}
