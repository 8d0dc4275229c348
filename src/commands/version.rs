//! Command: print version information.

/// Build version: `GROCERY_VERSION` from the build script, else the crate
/// version.
#[must_use]
pub const fn version() -> &'static str {
    match option_env!("GROCERY_VERSION") {
        Some(version) => version,
        None => env!("CARGO_PKG_VERSION"),
    }
}

/// Print the grocery version to stdout.
pub fn run() {
    println!("grocery {}", version());
}
