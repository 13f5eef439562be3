//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands;
use dbt_ops::output::OutputMode;

/// dbt-ops - configuration audit and deployment trigger for a dbt project
#[derive(Parser, Debug)]
#[command(
    name = "dbt-ops",
    version,
    about = "Configuration audit and deployment trigger for a dbt project",
    long_about = "Audit a dbt project's YAML configuration without cloud credentials,\n\
                  or serve an HTTP endpoint that runs the deployment script in the background."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Audit the project configuration (default when no command is given)
    Audit {
        /// Project root containing dbt_project.yml
        #[arg(short, long, default_value = ".")]
        root: PathBuf,
    },

    /// Serve the deployment trigger endpoints
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value_t = 8080)]
        port: u16,

        /// Project root containing dbt-ops.toml
        #[arg(short, long, default_value = ".")]
        root: PathBuf,
    },

    /// Show version
    Version,
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    match cli.command {
        Some(Command::Audit { root }) => commands::audit(&root, output_mode),
        Some(Command::Serve { port, root }) => commands::serve(port, &root),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION")
                    })
                );
            } else {
                println!("dbt-ops v{}", env!("CARGO_PKG_VERSION"));
            }
            Ok(())
        },
        None => commands::audit(&PathBuf::from("."), output_mode),
    }
}
