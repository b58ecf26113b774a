//! Output helpers shared by the CLI commands.

use colored::*;

/// Formats and prints an error message with consistent styling
///
/// # Format
/// ```text
///
/// ✕ Error: <message>
///
/// ```
pub fn print_error(message: &str) {
    eprintln!("\n{} {}\n", "✕ Error:".red(), message.white());
}

/// Formats and prints a section header with consistent styling
pub fn print_section_header(header: &str) {
    println!("\n{}:\n", header.white());
}

/// Prints one `label: value` detail line, indented under a file line
pub fn print_detail(label: &str, value: &str) {
    println!("    {} {}", format!("{label}:").bright_black(), value);
}
