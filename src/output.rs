//! User-facing output utilities for clean, colored terminal messages
//!
//! Warnings and errors go to stderr in a friendly, colored format without
//! internal logging noise (timestamps, log levels, crate names).

use owo_colors::OwoColorize;

/// Display a warning message to the user in yellow with padding
pub fn warn(message: &str) {
    eprintln!("\n{}\n", message.yellow());
}

/// Display an error message to the user in red with padding
pub fn error(message: &str) {
    eprintln!("\n{}\n", message.red());
}

/// Display an informational message to the user in default color with padding
pub fn info(message: &str) {
    eprintln!("\n{}\n", message);
}
