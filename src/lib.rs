//! Core library entry for the `lcli` CLI.
//!
//! [`client::LinearClient`] is the programmatic surface; [`run`] drives it
//! from command-line arguments.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod context;
pub mod display;
pub mod error;
pub mod graphql;
pub mod model;
pub mod ports;
pub mod resolver;
pub mod status;

pub use client::LinearClient;
pub use error::{Error, Result, TransportError};

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> std::result::Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    init_logging(cli.verbose);
    commands::dispatch(&cli)
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    // Already initialised when `run` is called more than once in a process.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .try_init();
}
