use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod collaborators;
mod commands;

#[derive(Parser)]
#[command(name = "focusdesk", version, about = "Focusdesk work/rest timer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive timer session
    Run,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Daily metrics report
    Report {
        #[command(subcommand)]
        action: commands::report::ReportAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run => commands::run::run(),
        Commands::Config { action } => commands::config::run(action),
        Commands::Report { action } => commands::report::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
