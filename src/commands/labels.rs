//! `lcli labels` commands.

use tokio_util::sync::CancellationToken;

use super::issues::resolve_issue;
use crate::cli::{IssueTarget, LabelsCommand};
use crate::context::ServiceContext;
use crate::display;

/// Execute a `labels` subcommand.
///
/// # Errors
///
/// Returns an error string if name resolution or any request fails.
pub async fn run(
    ctx: &ServiceContext,
    command: &LabelsCommand,
    cancel: &CancellationToken,
) -> Result<(), String> {
    match command {
        LabelsCommand::List { issue_id, title } => {
            let issue_id = if issue_id.is_none() && title.is_none() {
                None
            } else {
                let target =
                    IssueTarget { issue_id: issue_id.clone(), title_search: title.clone() };
                Some(resolve_issue(ctx, &target, cancel).await?)
            };
            let labels =
                ctx.client.labels(issue_id.as_deref(), cancel).await.map_err(|e| e.to_string())?;
            if labels.is_empty() {
                println!("No labels found.");
            } else {
                print!("{}", display::render_labels(&labels));
            }
            Ok(())
        }
        LabelsCommand::Search { name } => {
            match ctx.client.search_label(name, cancel).await.map_err(|e| e.to_string())? {
                Some(label) => print!("{}", display::render_labels(&[label])),
                None => println!("No label named '{name}'."),
            }
            Ok(())
        }
        LabelsCommand::Create { name } => {
            let label = ctx.client.create_label(name, cancel).await.map_err(|e| e.to_string())?;
            println!("Created label: {} (ID: {})", label.name, label.id);
            Ok(())
        }
    }
}
