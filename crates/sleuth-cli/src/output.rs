//! Console message helpers.

use owo_colors::OwoColorize;

/// Print a highlighted warning to stdout
pub fn warning(message: &str) {
    println!("{} {}", "[WARNING]".yellow().bold(), message);
}

/// Print an error to stderr
pub fn error(message: &str) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "Success:".green(), message);
}
