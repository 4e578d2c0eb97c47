use colored::Colorize;

/// Usage lines shown for missing or malformed arguments.
pub const USAGE: &str = "usage: createconfig -e <environment name>\n   \
                         or: createconfig --env=<environment name>";

/// Print a success message.
pub fn success(msg: &str) {
    println!("  {} {}", "✓".green(), msg);
}

/// Print a skipped-item message.
pub fn skipped(msg: &str) {
    println!("  {} {}", "-".dimmed(), msg.dimmed());
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("  {} {}", "✗".red(), msg);
}

/// Print a header line.
pub fn header(msg: &str) {
    println!("\n{}", msg.bold());
}

/// Print the usage text to stdout.
pub fn usage() {
    println!("{USAGE}");
}
