//! Terminal output for the human-facing commands
//!
//! `run` never prints through here; its stdout is reserved for the response.

use colored::{ColoredString, Colorize};
use declarative::{FunctionResult, Severity};

/// Title with a rule underneath
pub fn title(text: &str) {
    println!();
    println!("{}", text.bold());
    println!("{}", "─".repeat(text.chars().count()).dimmed());
}

/// Heading for a group of lines
pub fn group(text: &str) {
    println!();
    println!("{}", text.cyan().bold());
}

/// Labelled value, indented under a group
pub fn field(label: &str, value: &str) {
    println!("  {}: {value}", label.dimmed());
}

/// Secondary, indented detail
pub fn detail(text: &str) {
    println!("    {}", text.dimmed());
}

pub fn ok(text: &str) {
    marked("✓".green(), text);
}

pub fn note(text: &str) {
    marked("ℹ".blue(), text);
}

/// Report a failure on stderr
pub fn failure(text: &str) {
    eprintln!("{} {text}", "✗".red());
}

/// Print a function result, marked by severity
pub fn result(result: &FunctionResult) {
    let marker = match result.severity {
        Severity::Normal => "…".yellow(),
        Severity::Fatal => "✗".red(),
    };
    marked(marker, &result.message);
}

fn marked(marker: ColoredString, text: &str) {
    println!("{marker} {text}");
}

/// Pluralize a count for display ("1 resource", "2 resources")
pub fn count(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}
