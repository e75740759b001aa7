//! Command-line front-end for the XBTV schedule editor.

pub mod commands;
pub mod logging;
pub mod repl;
pub mod settings;
