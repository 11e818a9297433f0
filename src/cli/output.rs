//! Terminal output helpers.
//!
//! All styling goes through `console`, which turns itself off for
//! non-tty output and respects NO_COLOR. Everything prints to stdout
//! except [`error`]; stderr is reserved for errors and log lines.

use console::style;

const RULE_WIDTH: usize = 48;

/// Green checkmark line, e.g. `✓ delivered 2 secrets to octo/widgets`.
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green(), msg);
}

/// Red cross line on stderr, e.g. `✗ source file not found: .env`.
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red(), msg);
}

/// Yellow warning line, e.g. `⚠ delivered 2 of 3 secrets`.
pub fn warn(msg: &str) {
    println!("{} {}", style("⚠").yellow(), msg);
}

/// Cyan follow-up suggestion, printed under an error.
pub fn hint(msg: &str) {
    println!("{} {}", style("→").dim(), style(msg).cyan());
}

/// Bold title line.
pub fn header(title: &str) {
    println!("{}", style(title).bold());
}

/// Bulleted list entry.
pub fn list_item(item: &str) {
    println!("  • {}", item);
}

/// Dim horizontal separator.
pub fn rule() {
    println!("{}", style("─".repeat(RULE_WIDTH)).dim());
}

/// Secondary information, dimmed, e.g. `no secrets stored`.
pub fn dimmed(msg: &str) {
    println!("{}", style(msg).dim());
}

/// Blank line, bold title, separator. Used above listings.
pub fn section(title: &str) {
    println!();
    header(title);
    rule();
}

/// A secret name, styled for inline use.
pub fn key(k: &str) -> String {
    style(k).cyan().to_string()
}
