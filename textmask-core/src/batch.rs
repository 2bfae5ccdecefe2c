//! batch.rs - Sanitizes many JSON files on a bounded worker pool.
//!
//! Each file is an independent task: it gets its own `TextSanitizer`, is
//! read, sanitized and written in one go, and succeeds or fails on its
//! own. A failing file is recorded in the `BatchReport` and never stops the
//! rest of the batch.
//!
//! License: MIT OR APACHE 2.0

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use log::{debug, error, info, warn};
use rayon::prelude::*;

use crate::config::SanitizerConfig;
use crate::errors::TextmaskError;
use crate::file_handler::{load_json_file, output_path_for, save_json_file, select_files};
use crate::registry::ProcessorRegistry;
use crate::sanitizer::TextSanitizer;

/// A file that could not be sanitized, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub total: usize,
    /// Pairs of (input, written output).
    pub succeeded: Vec<(PathBuf, PathBuf)>,
    pub failed: Vec<FileFailure>,
}

impl BatchReport {
    pub fn success_count(&self) -> usize {
        self.succeeded.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failed.len()
    }

    /// True when every selected file was written.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Debug)]
pub struct BatchProcessor {
    config: SanitizerConfig,
    registry: Arc<ProcessorRegistry>,
}

impl BatchProcessor {
    pub fn new(config: SanitizerConfig, registry: Arc<ProcessorRegistry>) -> Self {
        Self { config, registry }
    }

    pub fn config(&self) -> &SanitizerConfig {
        &self.config
    }

    /// A fresh sanitizer configured like this batch.
    pub fn sanitizer(&self) -> TextSanitizer {
        TextSanitizer::new(self.config.language.clone(), Arc::clone(&self.registry))
            .with_processor_options(self.config.languages.clone())
    }

    /// Loads `input_path`, sanitizes every string in it and writes the
    /// result to `output_path`.
    pub fn process_single_file(&self, input_path: &Path, output_path: &Path) -> Result<(), TextmaskError> {
        let data = load_json_file(input_path)?;
        let processed = self.sanitizer().sanitize_json_data(data)?;
        save_json_file(&processed, output_path)
    }

    /// Sanitizes every selected file under `input_path` concurrently.
    ///
    /// Only discovery and pool set-up errors are returned as `Err`; per-file
    /// failures end up in the report.
    pub fn process_files(
        &self,
        input_path: &Path,
        selected_indices: Option<&[usize]>,
    ) -> Result<BatchReport, TextmaskError> {
        self.process_files_with_progress(input_path, selected_indices, |_, _, _| {})
    }

    /// Like `process_files`, calling `on_file_done(done, total, path)` as
    /// each file finishes, successfully or not. Calls come from worker
    /// threads in completion order; `done` counts 1..=total.
    pub fn process_files_with_progress<F>(
        &self,
        input_path: &Path,
        selected_indices: Option<&[usize]>,
        on_file_done: F,
    ) -> Result<BatchReport, TextmaskError>
    where
        F: Fn(usize, usize, &Path) + Sync,
    {
        let files = select_files(input_path, selected_indices, &self.config.output_suffix)?;
        if files.is_empty() {
            warn!("No files to process");
            return Ok(BatchReport::default());
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.workers)
            .thread_name(|i| format!("textmask-worker-{i}"))
            .build()
            .map_err(|e| TextmaskError::Fatal(format!("Failed to build worker pool: {e}")))?;
        debug!("Processing {} file(s) with {} worker(s).", files.len(), self.config.workers);

        let total = files.len();
        let completed = AtomicUsize::new(0);
        let outcomes: Vec<(PathBuf, PathBuf, Result<(), TextmaskError>)> = pool.install(|| {
            files
                .par_iter()
                .map(|file| {
                    let output = output_path_for(file, &self.config.output_suffix);
                    let result = self.process_single_file(file, &output);
                    let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    on_file_done(done, total, file);
                    (file.clone(), output, result)
                })
                .collect()
        });

        let mut report = BatchReport { total, ..BatchReport::default() };
        for (input, output, result) in outcomes {
            match result {
                Ok(()) => {
                    info!("Successfully processed: {}", input.display());
                    report.succeeded.push((input, output));
                }
                Err(e) => {
                    error!("Failed to process file {}: {}", input.display(), e);
                    report.failed.push(FileFailure { path: input, error: e.to_string() });
                }
            }
        }

        info!(
            "Batch processing completed. Success: {}/{}",
            report.success_count(),
            report.total
        );
        Ok(report)
    }
}
