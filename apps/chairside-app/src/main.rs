//! # Chairside Quote Preview
//!
//! Command-line entry point. Prices one booking request read from stdin;
//! handy for checking a catalog or policy change without the mobile app.
//!
//! The actual setup is in lib.rs for better testability.

use std::process::ExitCode;

fn main() -> ExitCode {
    match chairside_app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("chairside-app: {}", e);
            ExitCode::FAILURE
        }
    }
}
