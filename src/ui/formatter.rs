//! Pure formatting functions for UI output.
//!
//! Operator-facing report lines go to stdout, errors and warnings to stderr.

use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a warning message in yellow.
pub fn display_warning(message: &str) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Report lines shown before confirmation.
///
/// The previous line is omitted for the first tag of a build type.
pub fn version_report(previous: Option<&str>, next: &str) -> Vec<String> {
    let mut lines = Vec::with_capacity(2);
    if let Some(previous) = previous {
        lines.push(format!("Previous version is: {}", previous));
    }
    lines.push(format!("Next version is:     {}", next));
    lines
}

/// Display the previous and next version.
pub fn display_version_report(previous: Option<&str>, next: &str) {
    println!();
    for line in version_report(previous, next) {
        println!("{}", style(line).bold());
    }
    println!();
}
