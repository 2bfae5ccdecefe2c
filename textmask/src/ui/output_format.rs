//! Formatting of user-facing messages and the batch summary.
//!
//! Messages go to the writer they are given so the binary can route them to
//! stderr and tests can capture them. Color is applied only when the caller
//! says the target supports it.
//!
//! License: MIT OR APACHE 2.0

use std::io::{self, Write};

use owo_colors::OwoColorize;
use textmask_core::BatchReport;

/// Prints an informational line.
pub fn print_info_message<W: Write>(writer: &mut W, message: &str, enable_colors: bool) -> io::Result<()> {
    if enable_colors {
        writeln!(writer, "{}", message.cyan())
    } else {
        writeln!(writer, "{message}")
    }
}

/// Prints a warning line.
pub fn print_warn_message<W: Write>(writer: &mut W, message: &str, enable_colors: bool) -> io::Result<()> {
    if enable_colors {
        writeln!(writer, "{} {}", "Warning:".yellow().bold(), message.yellow())
    } else {
        writeln!(writer, "Warning: {message}")
    }
}

/// Prints an error line.
pub fn print_error_message<W: Write>(writer: &mut W, message: &str, enable_colors: bool) -> io::Result<()> {
    if enable_colors {
        writeln!(writer, "{} {}", "Error:".red().bold(), message.red())
    } else {
        writeln!(writer, "Error: {message}")
    }
}

/// Prints the end-of-run summary: counts first, then one line per failed file.
pub fn print_batch_summary<W: Write>(writer: &mut W, report: &BatchReport, enable_colors: bool) -> io::Result<()> {
    let header = format!(
        "Processed {} file(s): {} succeeded, {} failed",
        report.total,
        report.success_count(),
        report.failure_count()
    );
    if !enable_colors {
        writeln!(writer, "{header}")?;
        for failure in &report.failed {
            writeln!(writer, "  {}: {}", failure.path.display(), failure.error)?;
        }
        return Ok(());
    }

    if report.is_success() {
        writeln!(writer, "{}", header.green().bold())?;
    } else {
        writeln!(writer, "{}", header.red().bold())?;
    }
    for failure in &report.failed {
        writeln!(writer, "  {}: {}", failure.path.display().bright_white(), failure.error.red())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use textmask_core::FileFailure;

    fn render(report: &BatchReport) -> String {
        let mut buf = Vec::new();
        print_batch_summary(&mut buf, report, false).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn summary_lists_counts_and_failures() {
        let report = BatchReport {
            total: 3,
            succeeded: vec![
                (PathBuf::from("a.json"), PathBuf::from("a_p.json")),
                (PathBuf::from("b.json"), PathBuf::from("b_p.json")),
            ],
            failed: vec![FileFailure {
                path: PathBuf::from("c.json"),
                error: "Invalid JSON".to_string(),
            }],
        };
        let out = render(&report);
        assert!(out.starts_with("Processed 3 file(s): 2 succeeded, 1 failed\n"));
        assert!(out.contains("  c.json: Invalid JSON\n"));
    }

    #[test]
    fn plain_messages_have_no_escape_codes() {
        let mut buf = Vec::new();
        print_warn_message(&mut buf, "careful", false).unwrap();
        print_error_message(&mut buf, "broken", false).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert_eq!(out, "Warning: careful\nError: broken\n");
        assert!(!out.contains('\u{1b}'));
    }

    #[test]
    fn colored_messages_keep_the_text() {
        let mut buf = Vec::new();
        print_info_message(&mut buf, "hello", true).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("hello"));
        assert!(out.contains('\u{1b}'));
    }
}
