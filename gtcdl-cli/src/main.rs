mod cli;
mod commands;
mod config;
mod error;
mod output;

use crate::{
    cli::Args,
    commands::{CommandExecutor, RunOptions},
    config::AppConfig,
    error::{AppError, Result},
};
use clap::Parser;
#[cfg(feature = "colored-output")]
use colored::*;
use std::{io::IsTerminal, process};
use tracing::{Level, error};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    match run(args).await {
        Ok(code) => process::exit(code),
        Err(e) => {
            error!("Application error: {}", e);
            #[cfg(feature = "colored-output")]
            {
                eprintln!("{} {}", "Error:".red().bold(), e);
            }
            #[cfg(not(feature = "colored-output"))]
            {
                eprintln!("Error: {}", e);
            }
            process::exit(1);
        }
    }
}

async fn run(args: Args) -> Result<i32> {
    let config = AppConfig::load(args.config.as_deref())?;

    let source = args.source().ok_or_else(|| {
        AppError::InvalidInput(
            "one of <ID>, --conf-session-id or --ondemand-session-url is required".to_string(),
        )
    })?;

    let colored = std::io::stdout().is_terminal();
    let executor = CommandExecutor::new(config, args.timeout, colored)?;
    executor
        .download(RunOptions {
            source,
            auth_token: args.rainforest_auth,
            directory: args.directory,
            write_meta: args.meta,
            quiet: args.quiet,
        })
        .await
}

fn init_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(verbose)
                .with_writer(std::io::stderr),
        )
        .init();
}
