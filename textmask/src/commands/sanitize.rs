//! Default command: sanitizes a file or directory of JSON documents.
//!
//! License: MIT OR APACHE 2.0

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use textmask_core::{BatchProcessor, BatchReport, LanguageSelector, ProcessorRegistry, SanitizerConfig};

use crate::cli::RunArgs;
use crate::commands::{info_msg, warn_msg};
use crate::ui::output_format;

/// Loads the configuration file (or defaults) and applies command-line
/// overrides on top. The result is validated against `registry`.
pub fn build_config(
    config_path: Option<&Path>,
    args: &RunArgs,
    registry: &ProcessorRegistry,
) -> Result<SanitizerConfig> {
    let mut config = match config_path {
        Some(path) => SanitizerConfig::load_from_file(path)?,
        None => SanitizerConfig::default(),
    };

    if let Some(language) = &args.language {
        config.language = LanguageSelector::from(language.clone());
    }
    if let Some(workers) = args.workers {
        config.workers = usize::from(workers);
    }

    config.validate(registry)?;
    debug!(
        "Effective configuration: language={}, workers={}, suffix={}",
        config.language, config.workers, config.output_suffix
    );
    Ok(config)
}

/// Resolves the input path. A missing argument means the current directory.
pub fn resolve_input(input: Option<&Path>, quiet: bool) -> Result<PathBuf> {
    let path = match input {
        Some(path) => path.to_path_buf(),
        None => {
            let cwd = std::env::current_dir().context("Failed to determine the current directory")?;
            warn_msg(
                format!("No input given, processing the current directory {}", cwd.display()),
                quiet,
            );
            cwd
        }
    };
    if !path.exists() {
        bail!("Input path does not exist: {}", path.display());
    }
    Ok(path)
}

/// Runs the batch and prints the summary to stdout.
pub fn run_sanitize(
    config: SanitizerConfig,
    registry: Arc<ProcessorRegistry>,
    input: &Path,
    files: Option<&[usize]>,
    quiet: bool,
) -> Result<BatchReport> {
    info!("Starting textmask run on {}", input.display());
    info_msg(
        format!(
            "Sanitizing {} with language '{}' and {} worker(s)",
            input.display(),
            config.language,
            config.workers
        ),
        quiet,
    );

    let processor = BatchProcessor::new(config, registry);
    let report = processor.process_files_with_progress(input, files, |done, total, file| {
        info_msg(format!("[{done}/{total}] {}", file.display()), quiet);
    })?;

    if report.total == 0 {
        warn_msg("No JSON files to process.", quiet);
    }
    let colors = io::stdout().is_terminal();
    output_format::print_batch_summary(&mut io::stdout(), &report, colors)?;
    Ok(report)
}
