//! `lcli teams` command.

use tokio_util::sync::CancellationToken;

use crate::context::ServiceContext;

/// Execute the `teams` command.
///
/// # Errors
///
/// Returns an error string if the teams cannot be fetched.
pub async fn run(ctx: &ServiceContext, cancel: &CancellationToken) -> Result<(), String> {
    let rendered = ctx.client.display_teams(cancel).await.map_err(|e| e.to_string())?;
    if rendered.is_empty() {
        println!("No teams found.");
    } else {
        print!("{rendered}");
    }
    Ok(())
}
