//! Command dispatch and handlers.

pub mod issues;
pub mod labels;
pub mod teams;
pub mod version;

use std::path::PathBuf;

use tokio_util::sync::CancellationToken;

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::context::ServiceContext;

/// Dispatch a parsed command to its handler.
///
/// When `LCLI_REPLAY` names a cassette, responses are served from it; when
/// `LCLI_RECORD` names a file, every exchange is recorded there.
///
/// # Errors
///
/// Returns an error string if configuration fails or the command fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    if matches!(cli.command, Command::Version) {
        version::run();
        return Ok(());
    }

    let config = Config::load(cli.config.as_deref()).map_err(|e| e.to_string())?;
    let ctx = ServiceContext::from_env(config)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to start runtime: {e}"))?;

    let cancel = CancellationToken::new();
    let result = runtime.block_on(async {
        let on_interrupt = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                log::debug!("interrupted, cancelling in-flight request");
                on_interrupt.cancel();
            }
        });
        dispatch_with_context(&cli.command, &ctx, &cancel).await
    });

    // Finish recording after command completes (even on error)
    combine_with_finish(result, ctx.finish())
}

/// Merge the command's outcome with that of saving the recording.
///
/// A failed save never hides a command error; both messages are kept.
fn combine_with_finish(
    result: Result<(), String>,
    finished: Result<Option<PathBuf>, String>,
) -> Result<(), String> {
    match (result, finished) {
        (result, Ok(saved)) => {
            if let Some(path) = saved {
                eprintln!("Recording saved to: {}", path.display());
            }
            result
        }
        (Ok(()), Err(save)) => Err(save),
        (Err(command), Err(save)) => Err(format!("{command}\nrecording was not saved: {save}")),
    }
}

/// Dispatch a command with the given service context.
async fn dispatch_with_context(
    command: &Command,
    ctx: &ServiceContext,
    cancel: &CancellationToken,
) -> Result<(), String> {
    match command {
        Command::Teams => teams::run(ctx, cancel).await,
        Command::Issues(cmd) => issues::run(ctx, cmd, cancel).await,
        Command::Labels(cmd) => labels::run(ctx, cmd, cancel).await,
        Command::Version => {
            version::run();
            Ok(())
        }
    }
}
