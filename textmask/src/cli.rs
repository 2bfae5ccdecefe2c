// textmask/src/cli.rs
//! Command-line interface definition for the `textmask` binary.
//! License: MIT OR APACHE 2.0

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "textmask",
    author = "Relay",
    version = env!("CARGO_PKG_VERSION"),
    about = "Mask dates and numbers in the text fields of JSON files",
    long_about = "textmask walks a file or directory of JSON documents and masks dates, quantities and free-standing numbers inside every string value. Quoted titles and quotations are left untouched. Results are written next to each input with a configurable suffix.",
    args_conflicts_with_subcommands = true,
)]
pub struct Cli {
    #[command(flatten)]
    pub run: RunArgs,

    /// Suppress all informational and debug messages.
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long, short = 'd', global = true, conflicts_with = "quiet")]
    pub debug: bool,

    /// Path to a YAML configuration file.
    #[arg(long, value_name = "FILE", global = true, env = "TEXTMASK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Append log records to this file instead of stderr.
    #[arg(long = "log-file", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Arguments for the default batch run.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// A JSON file or a directory searched recursively. Defaults to the current directory.
    #[arg(long, short = 'i', value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Language code to force, or `auto` to detect the language of each string.
    #[arg(long, short = 'l', value_name = "CODE")]
    pub language: Option<String>,

    /// Number of files processed concurrently (1-50).
    #[arg(long, short = 'w', value_parser = clap::value_parser!(u16).range(1..=50))]
    pub workers: Option<u16>,

    /// 1-based indices into the sorted file list, comma-separated.
    #[arg(long, short = 'f', value_delimiter = ',', value_name = "N,N,...", value_parser = parse_file_index)]
    pub files: Option<Vec<usize>>,
}

/// Parses one entry of `--files`, ignoring surrounding whitespace.
fn parse_file_index(value: &str) -> Result<usize, String> {
    let value = value.trim();
    value
        .parse::<usize>()
        .map_err(|e| format!("invalid file index '{value}': {e}"))
}

/// Auxiliary commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the supported language codes.
    Languages,

    /// Sanitize a single string and print the result to stdout.
    Text {
        /// The text to sanitize.
        text: String,

        /// Language code to force, or `auto`.
        #[arg(long, short = 'l', value_name = "CODE", default_value = "auto")]
        language: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_accepts_spaces_around_indices() {
        let cli = Cli::try_parse_from(["textmask", "--files", "1, 3 ,5"]).unwrap();
        assert_eq!(cli.run.files, Some(vec![1, 3, 5]));
    }

    #[test]
    fn files_rejects_non_numbers() {
        let err = Cli::try_parse_from(["textmask", "-f", "1,x"]).unwrap_err();
        assert!(err.to_string().contains("invalid file index 'x'"));
    }

    #[test]
    fn language_help_mentions_each_string() {
        let err = Cli::try_parse_from(["textmask", "--help"]).unwrap_err();
        assert!(err.to_string().contains("detect the language of each string"));
    }
}
