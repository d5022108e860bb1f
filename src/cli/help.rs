use crate::cli::output::{self, raw, section};
use crate::cli::registry::{CommandEntry, CommandRegistry};

pub fn print_overview(registry: &CommandRegistry) {
    section("Available commands");
    for entry in registry.list() {
        raw(format!("  {:<10} {}", entry.name, entry.description));
    }
    output::hint("Use `help <command>` for details.");
}

pub fn print_command(entry: &CommandEntry) {
    section(format!("Help: {}", entry.name));
    raw(format!("  Description: {}", entry.description));
    raw(format!("  Usage: {}", entry.usage));
}
