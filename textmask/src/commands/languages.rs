//! `textmask languages`: lists the registered language codes.

use std::io::Write;

use anyhow::Result;
use textmask_core::{ProcessorOptions, ProcessorRegistry};

/// Writes one `code<TAB>name` line per registered language, sorted by code.
pub fn run_languages<W: Write>(registry: &ProcessorRegistry, out: &mut W) -> Result<()> {
    let defaults = ProcessorOptions::default();
    for code in registry.supported_codes() {
        let processor = registry.create(&code, &defaults)?;
        writeln!(out, "{}\t{}", code, processor.name())?;
    }
    Ok(())
}
