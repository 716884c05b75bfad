//! Binary entrypoint for the `lcli` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // Recording and replay are handled in commands::dispatch via LCLI_RECORD / LCLI_REPLAY.
    match lcli::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
