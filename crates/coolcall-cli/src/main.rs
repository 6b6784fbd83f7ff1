//! coolcall CLI — the instructor-facing controller.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod session;

#[derive(Parser)]
#[command(
    name = "coolcall",
    version,
    about = "Fair random cold calling for instructors"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter config and sample roster
    Init,

    /// Check a roster file without importing it
    Validate {
        /// Roster file to check
        #[arg(long)]
        roster: PathBuf,
    },

    /// Import a roster, replacing the stored one
    Import {
        /// Roster file to import
        #[arg(long)]
        roster: PathBuf,

        /// Commit the import (otherwise only preview the changes)
        #[arg(long)]
        yes: bool,
    },

    /// Export the stored roster to a directory
    Export {
        /// Directory to write roster.txt (or roster<i>.txt) into
        #[arg(long)]
        dir: PathBuf,
    },

    /// Begin a class session: reload and lightly reshuffle the queue
    Start,

    /// Show who is on deck
    Deck,

    /// Call on an on-deck student
    Call {
        /// On-deck position, starting at 1
        #[arg(long, short)]
        position: usize,

        /// Flag the call (no satisfactory response)
        #[arg(long)]
        flag: bool,
    },

    /// Print the summary performance report
    Summary,

    /// Run random distribution verification
    Verify {
        /// Number of simulated restarts
        #[arg(long, default_value = "100")]
        restarts: usize,

        /// Cold calls per restart
        #[arg(long, default_value = "100")]
        calls: usize,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("coolcall=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Validate { roster } => commands::validate::execute(config, roster),
        Commands::Import { roster, yes } => commands::import::execute(config, roster, yes),
        Commands::Export { dir } => commands::export::execute(config, dir),
        Commands::Start => commands::start::execute(config),
        Commands::Deck => commands::deck::execute(config),
        Commands::Call { position, flag } => commands::call::execute(config, position, flag),
        Commands::Summary => commands::summary::execute(config),
        Commands::Verify { restarts, calls } => commands::verify::execute(config, restarts, calls),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
