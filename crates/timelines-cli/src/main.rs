use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "timelines-cli", version, about = "Timelines CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the visible date range for a center date and scale
    Range(commands::view::ViewArgs),
    /// Show the ruler ticks for a center date and scale
    Ticks(commands::view::ViewArgs),
    /// List zoom scales, finest first
    Scales,
    /// Fetch events from the configured source
    Events(commands::events::EventsArgs),
    /// Data source selection and connection tests
    Source {
        #[command(subcommand)]
        action: commands::source::SourceAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Range(args) => commands::view::run_range(args),
        Commands::Ticks(args) => commands::view::run_ticks(args),
        Commands::Scales => commands::view::run_scales(),
        Commands::Events(args) => commands::events::run(args),
        Commands::Source { action } => commands::source::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
