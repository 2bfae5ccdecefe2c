// textmask/src/main.rs
//! textmask entry point.
//!
//! Parses arguments, sets up logging and dispatches to a command. Exit codes:
//! 0 on success, 1 when any file failed, 2 on a usage or configuration error.

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use textmask::cli::{Cli, Commands};
use textmask::commands::{self, languages, sanitize, text};
use textmask::logger;
use textmask_core::{ProcessorRegistry, SanitizerConfig};

fn log_level(cli: &Cli) -> Option<LevelFilter> {
    if cli.quiet {
        Some(LevelFilter::Off)
    } else if cli.debug {
        Some(LevelFilter::Debug)
    } else {
        None
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let registry = Arc::new(ProcessorRegistry::default());

    match &cli.command {
        Some(Commands::Languages) => {
            languages::run_languages(&registry, &mut io::stdout())?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Text { text: input, language }) => {
            let options = match &cli.config {
                Some(path) => SanitizerConfig::load_from_file(path)?.languages,
                None => Default::default(),
            };
            text::run_text(registry, options, language, input, &mut io::stdout())?;
            Ok(ExitCode::SUCCESS)
        }
        None => {
            let config = sanitize::build_config(cli.config.as_deref(), &cli.run, &registry)?;
            let input = sanitize::resolve_input(cli.run.input.as_deref(), cli.quiet)?;
            let report = sanitize::run_sanitize(config, registry, &input, cli.run.files.as_deref(), cli.quiet)?;
            if report.is_success() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::from(1))
            }
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = log_level(&cli);
    match &cli.log_file {
        Some(path) => {
            if let Err(e) = logger::init_file_logger(level, path) {
                commands::error_msg(format!("{e:#}"));
                return ExitCode::from(2);
            }
        }
        None => logger::init_logger(level),
    }

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            commands::error_msg(format!("{e:#}"));
            ExitCode::from(2)
        }
    }
}
