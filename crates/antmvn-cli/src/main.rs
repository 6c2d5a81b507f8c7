//! antmvn CLI - Inspect the remote repositories an Ant build will use

use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;
mod error;
mod exit_codes;

#[derive(Parser)]
#[command(name = "antmvn")]
#[command(author = "antmvn Contributors")]
#[command(version)]
#[command(about = "Inspect which remote repositories, mirrors and credentials an Ant build will use", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Show informational output (repositories in use, offline mode)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the remote repositories of a build
    Repos {
        /// Build file (default: ./antmvn.yaml if present)
        #[arg(short = 'f', long)]
        build: Option<PathBuf>,

        /// User settings file (overrides the build file and default locations)
        #[arg(short, long)]
        settings: Option<PathBuf>,

        /// Global settings file
        #[arg(long)]
        global_settings: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show which mirror serves a repository
    Mirror {
        /// Repository id
        id: String,

        /// Repository URL (needed for external:* patterns)
        #[arg(long, default_value = "")]
        url: String,

        /// User settings file
        #[arg(short, long)]
        settings: Option<PathBuf>,

        /// Global settings file
        #[arg(long)]
        global_settings: Option<PathBuf>,
    },

    /// Print the id generated for a repository URL
    Id {
        /// Repository URL
        url: String,
    },
}

fn init_logging(verbose: bool, debug: bool) {
    let default_level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn main() {
    // Setup miette for nice error display
    miette::set_panic_hook();

    let cli = Cli::parse();
    init_logging(cli.verbose, cli.debug);

    let result = match cli.command {
        Commands::Repos {
            build,
            settings,
            global_settings,
            json,
        } => commands::repos::run(
            build.as_deref(),
            settings.as_deref(),
            global_settings.as_deref(),
            json,
        ),

        Commands::Mirror {
            id,
            url,
            settings,
            global_settings,
        } => commands::mirror::run(&id, &url, settings.as_deref(), global_settings.as_deref()),

        Commands::Id { url } => commands::id::run(&url),
    };

    if let Err(e) = result {
        let code = e.exit_code();
        eprintln!("{:?}", miette::Report::new(e));
        std::process::exit(code);
    }
}
