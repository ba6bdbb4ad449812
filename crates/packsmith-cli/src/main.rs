//! Packsmith CLI - Split Kubernetes manifests into service groups

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;
mod error;
mod exit_codes;

use display::OutputFormat;

#[derive(Parser)]
#[command(name = "packsmith")]
#[command(author = "Packsmith Contributors")]
#[command(version)]
#[command(about = "Split Kubernetes manifests into service groups and shared values", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Group manifests into services and extract shared global values
    Analyze {
        /// Manifest files or directories (searched recursively for .yaml/.yml)
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, env = "PACKSMITH_FORMAT")]
        format: OutputFormat,

        /// Only print the parent values with the promoted `global` block
        /// (JSON with `--format json`, YAML otherwise)
        #[arg(long)]
        globals_only: bool,
    },
}

fn main() {
    // Setup miette for nice error display
    miette::set_panic_hook();

    let cli = Cli::parse();
    init_logging(cli.debug);

    let result = match cli.command {
        Commands::Analyze {
            paths,
            format,
            globals_only,
        } => commands::analyze::run(&paths, format, globals_only),
    };

    let code = match result {
        Ok(()) => exit_codes::SUCCESS,
        Err(err) => {
            let code = err.exit_code();
            eprintln!("{:?}", miette::Report::new(err));
            code
        }
    };
    std::process::exit(code);
}

/// Log to stderr; `RUST_LOG` overrides the `--debug` switch
fn init_logging(debug: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if debug {
            "packsmith=debug"
        } else {
            "packsmith=warn"
        })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(debug)
        .with_writer(std::io::stderr)
        .init();
}
