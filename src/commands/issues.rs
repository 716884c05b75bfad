//! `lcli issues` commands.

use tokio_util::sync::CancellationToken;

use crate::cli::{IssueTarget, IssuesCommand};
use crate::context::ServiceContext;

/// Execute an `issues` subcommand.
///
/// # Errors
///
/// Returns an error string if name resolution or any request fails.
pub async fn run(
    ctx: &ServiceContext,
    command: &IssuesCommand,
    cancel: &CancellationToken,
) -> Result<(), String> {
    match command {
        IssuesCommand::List { team, titles } => list(ctx, team.as_deref(), *titles, cancel).await,
        IssuesCommand::Create { title, description, team } => {
            let team_id = match team.as_deref() {
                Some(id) => id,
                None => default_team(ctx)?,
            };
            println!("Creating issue '{title}' in team {team_id}...");
            let issue = ctx
                .client
                .add_issue(team_id, title, description.as_deref(), cancel)
                .await
                .map_err(|e| e.to_string())?;
            println!("Created issue: {} (ID: {})", issue.title, issue.id);
            Ok(())
        }
        IssuesCommand::Delete { issue_id } => {
            ctx.client.delete_issue(issue_id, cancel).await.map_err(|e| e.to_string())?;
            println!("Deleted issue {issue_id}");
            Ok(())
        }
        IssuesCommand::Update { target, assign, description, priority, status } => {
            if assign.is_none() && description.is_none() && priority.is_none() && status.is_none() {
                return Err(
                    "nothing to update: pass --assign, --description, --priority or --status"
                        .to_string(),
                );
            }
            let issue_id = resolve_issue(ctx, target, cancel).await?;
            let client = &ctx.client;

            if let Some(assignee) = assign {
                client
                    .update_assignee(&issue_id, assignee, cancel)
                    .await
                    .map_err(|e| e.to_string())?;
                println!("Assigned issue {issue_id} to {assignee}");
            }
            if let Some(text) = description {
                client
                    .update_description(&issue_id, text, cancel)
                    .await
                    .map_err(|e| e.to_string())?;
                println!("Updated description on issue {issue_id}");
            }
            if let Some(value) = priority {
                client.update_priority(&issue_id, *value, cancel).await.map_err(|e| e.to_string())?;
                println!("Set priority {value} on issue {issue_id}");
            }
            if let Some(name) = status {
                client.update_status(&issue_id, name, cancel).await.map_err(|e| e.to_string())?;
                println!("Moved issue {issue_id} to '{name}'");
            }
            Ok(())
        }
        IssuesCommand::Label { target, add, remove } => {
            if add.is_none() && remove.is_none() {
                return Err("nothing to do: pass --add or --remove".to_string());
            }
            let issue_id = resolve_issue(ctx, target, cancel).await?;

            if let Some(name) = add {
                let label = ctx
                    .client
                    .add_label_to_issue(&issue_id, name, cancel)
                    .await
                    .map_err(|e| e.to_string())?;
                println!("Added label '{}' to issue {issue_id}", label.name);
            }
            if let Some(name) = remove {
                ctx.client
                    .remove_label_from_issue(&issue_id, name, cancel)
                    .await
                    .map_err(|e| e.to_string())?;
                println!("Removed label '{name}' from issue {issue_id}");
            }
            Ok(())
        }
    }
}

async fn list(
    ctx: &ServiceContext,
    team: Option<&str>,
    titles_only: bool,
    cancel: &CancellationToken,
) -> Result<(), String> {
    let team_id = match team {
        Some(name) => ctx.client.find_team_by_name(name, cancel).await.map_err(|e| e.to_string())?,
        None => default_team(ctx)?.to_string(),
    };
    let rendered = ctx
        .client
        .display_team_issues(&team_id, titles_only, cancel)
        .await
        .map_err(|e| e.to_string())?;
    print!("{rendered}");
    Ok(())
}

fn default_team(ctx: &ServiceContext) -> Result<&str, String> {
    ctx.config.team_id().ok_or_else(|| {
        "no team given\n  hint: pass --team or set linear.team_id in .lcli.yaml".to_string()
    })
}

/// The issue ID named by `--issue-id`, or found by `--title-search`.
///
/// Title searches are limited to the configured team when one is set.
pub(crate) async fn resolve_issue(
    ctx: &ServiceContext,
    target: &IssueTarget,
    cancel: &CancellationToken,
) -> Result<String, String> {
    match (&target.issue_id, &target.title_search) {
        (Some(id), _) => Ok(id.clone()),
        (None, Some(title)) => ctx
            .client
            .find_issue_by_title(ctx.config.team_id(), title, cancel)
            .await
            .map_err(|e| e.to_string()),
        (None, None) => Err("pass --issue-id or --title-search".to_string()),
    }
}
