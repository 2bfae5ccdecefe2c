//! Logger initialization for the textmask binary.
//!
//! License: MIT OR APACHE 2.0

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};
use log::LevelFilter;

fn builder(level: Option<LevelFilter>) -> Builder {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} - {} - {} - {}",
            buf.timestamp(),
            record.target(),
            record.level(),
            record.args()
        )
    });
    builder
}

/// Initializes the global logger writing to stderr.
///
/// `level` overrides `RUST_LOG` when given. Calling this more than once is
/// harmless; later calls are ignored.
pub fn init_logger(level: Option<LevelFilter>) {
    builder(level).try_init().ok();
}

/// Initializes the global logger appending to `path` instead of stderr.
/// Missing parent directories are created.
pub fn init_file_logger(level: Option<LevelFilter>, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;
    builder(level).target(Target::Pipe(Box::new(file))).try_init().ok();
    Ok(())
}
