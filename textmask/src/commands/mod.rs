//! Command implementations for the `textmask` binary.

pub mod languages;
pub mod sanitize;
pub mod text;

use std::io;

use is_terminal::IsTerminal;

use crate::ui::output_format;

/// Prints an informational message to stderr unless `quiet` is set.
pub fn info_msg(msg: impl AsRef<str>, quiet: bool) {
    if quiet {
        return;
    }
    let colors = io::stderr().is_terminal();
    let _ = output_format::print_info_message(&mut io::stderr(), msg.as_ref(), colors);
}

/// Prints a warning to stderr unless `quiet` is set.
pub fn warn_msg(msg: impl AsRef<str>, quiet: bool) {
    if quiet {
        return;
    }
    let colors = io::stderr().is_terminal();
    let _ = output_format::print_warn_message(&mut io::stderr(), msg.as_ref(), colors);
}

/// Prints an error to stderr. Errors are never silenced.
pub fn error_msg(msg: impl AsRef<str>) {
    let colors = io::stderr().is_terminal();
    let _ = output_format::print_error_message(&mut io::stderr(), msg.as_ref(), colors);
}
