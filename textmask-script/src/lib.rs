#![no_std]

pub mod script;
pub mod profile;

pub use profile::{profile_text, ScriptProfile};
pub use script::{classify, Script};
