mod archive;
mod cli;
mod commands;
mod config;
mod errors;
mod generation;
mod input;
mod layout;
mod llm_client;
mod models;
mod pipeline;
mod render;
mod state;

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppError;
use crate::pipeline::RunOptions;
use crate::state::AppState;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Configuration comes first so the log filter can use RUST_LOG from .env
    let config = Config::from_env();

    // Logs go to stderr; stdout carries only the command summary
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting cv-creator v{}", env!("CARGO_PKG_VERSION"));
    for warning in &config.warnings {
        warn!("{warning}");
    }

    match execute(cli.command, config).await {
        Ok(summary) => {
            print!("{summary}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            debug!("command failed with {}", e.code());
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn execute(command: Commands, config: Config) -> Result<String, AppError> {
    match command {
        Commands::Run {
            job,
            company,
            base,
            use_ai,
            output,
        } => {
            let state = AppState::from_config(config)?;
            let options = RunOptions {
                job_path: job,
                company_path: company,
                base_path: base,
                output_root: output,
                use_ai,
            };
            commands::run(&state, options).await
        }
        Commands::Init { base, force } => commands::init(&base, force),
        Commands::Render { data, output } => commands::render(&data, &output),
    }
}
