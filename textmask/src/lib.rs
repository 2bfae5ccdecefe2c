// textmask/src/lib.rs
//! # textmask CLI
//!
//! Command-line front end for `textmask-core`: argument parsing, logger
//! set-up and console output. All masking logic lives in the core crate.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
