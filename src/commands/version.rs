//! `lcli version` command.

/// Version line printed by `lcli version`.
#[must_use]
pub fn version_line() -> String {
    format!("lcli v{}", env!("CARGO_PKG_VERSION"))
}

/// Execute the `version` command.
pub fn run() {
    println!("{}", version_line());
}
