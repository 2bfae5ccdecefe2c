//! file_handler.rs - Discovery, loading and saving of JSON files.
//!
//! License: MIT OR APACHE 2.0

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};
use serde_json::Value;
use walkdir::WalkDir;

use crate::errors::TextmaskError;

fn has_json_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("json"))
}

/// Whether `path` is an output this tool already produced
/// (its stem ends with `suffix`).
pub fn is_processed(path: &Path, suffix: &str) -> bool {
    has_json_extension(path)
        && path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map_or(false, |stem| stem.ends_with(suffix))
}

/// The sibling output path for `input`: `dir/name.json` → `dir/name{suffix}.json`.
pub fn output_path_for(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}{suffix}.json"))
}

/// Every `.json` file at `path`: the file itself, or all JSON files below a
/// directory, sorted by path.
pub fn find_json_files(path: &Path) -> Result<Vec<PathBuf>, TextmaskError> {
    if !path.exists() {
        return Err(TextmaskError::PathNotFound(path.to_path_buf()));
    }

    if path.is_file() {
        return Ok(if has_json_extension(path) { vec![path.to_path_buf()] } else { Vec::new() });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path).follow_links(false) {
        match entry {
            Ok(entry) if entry.file_type().is_file() && has_json_extension(entry.path()) => {
                files.push(entry.into_path());
            }
            Ok(_) => {}
            Err(e) => warn!("Skipping unreadable entry under {}: {}", path.display(), e),
        }
    }
    files.sort();
    debug!("Found {} JSON file(s) under {}.", files.len(), path.display());
    Ok(files)
}

/// Unprocessed JSON files at `path`, optionally narrowed to the given
/// 1-based indices. Indices outside the list are ignored.
pub fn select_files(
    path: &Path,
    selected_indices: Option<&[usize]>,
    suffix: &str,
) -> Result<Vec<PathBuf>, TextmaskError> {
    let files = find_json_files(path)?;
    if files.is_empty() {
        warn!("No JSON files found");
        return Ok(Vec::new());
    }

    let valid_files: Vec<PathBuf> = files.into_iter().filter(|f| !is_processed(f, suffix)).collect();

    let Some(indices) = selected_indices else {
        return Ok(valid_files);
    };

    let mut selected = Vec::with_capacity(indices.len());
    for &index in indices {
        match index.checked_sub(1).and_then(|i| valid_files.get(i)) {
            Some(file) => selected.push(file.clone()),
            None => warn!("Ignoring file index {} (only {} file(s) available).", index, valid_files.len()),
        }
    }
    Ok(selected)
}

/// Reads and parses a JSON document.
pub fn load_json_file(path: &Path) -> Result<Value, TextmaskError> {
    let text = fs::read_to_string(path).map_err(|source| {
        error!("Failed to load JSON file {}: {}", path.display(), source);
        TextmaskError::Io { path: path.to_path_buf(), source }
    })?;
    serde_json::from_str(&text).map_err(|source| {
        error!("Failed to load JSON file {}: {}", path.display(), source);
        TextmaskError::Json { path: path.to_path_buf(), source }
    })
}

/// Writes `data` as two-space indented JSON, keeping key order and writing
/// non-ASCII characters literally.
pub fn save_json_file(data: &Value, path: &Path) -> Result<(), TextmaskError> {
    let text = serde_json::to_string_pretty(data).map_err(|source| {
        error!("Failed to save JSON file {}: {}", path.display(), source);
        TextmaskError::Json { path: path.to_path_buf(), source }
    })?;
    fs::write(path, text).map_err(|source| {
        error!("Failed to save JSON file {}: {}", path.display(), source);
        TextmaskError::Io { path: path.to_path_buf(), source }
    })?;
    info!("Successfully saved file: {}", path.display());
    Ok(())
}
