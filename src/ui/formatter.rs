//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from user interaction.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::domain::{Tag, Version};

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Display the release tag the next version is computed from.
pub fn display_latest_tag(tag: &Tag, version: &Version) {
    println!("{}", format_latest_tag(tag, version));
}

pub fn format_latest_tag(tag: &Tag, version: &Version) -> String {
    format!(
        "Latest semver tag (reachable from HEAD): {}  (version: {})",
        style(tag).bold(),
        version.plain()
    )
}

/// Display the proposed tag change.
pub fn display_proposed_tag(old_tag: &Tag, new_tag: &Tag) {
    println!("\n{}", style("Proposed Tag Change:").bold());
    println!("  From: {}", style(old_tag).red());
    println!("  To:   {}", style(new_tag).green());
}

/// Display what a dry run would have done.
pub fn display_plan(message: &str, tag: &Tag) {
    println!("\n{}", style("Dry run:").bold());
    for step in plan_steps(message, tag) {
        display_success(&step);
    }
}

/// The two mutating steps a release would take, in order
pub fn plan_steps(message: &str, tag: &Tag) -> [String; 2] {
    [
        format!("  Step 1: would run git commit -m {:?}", message),
        format!("  Step 2: would tag HEAD with {}", tag),
    ]
}

/// Display the manual push commands after a release.
///
/// Nothing is pushed automatically.
pub fn display_push_hint(remote: &str) {
    println!(
        "\n{} You may want to push:\n  {}",
        style("→").yellow(),
        style(push_command(remote)).cyan()
    );
}

/// Push command for the configured remote; git's default remote when blank
pub fn push_command(remote: &str) -> String {
    let remote = remote.trim();
    if remote.is_empty() {
        "git push && git push --tags".to_string()
    } else {
        format!("git push {remote} && git push {remote} --tags")
    }
}
