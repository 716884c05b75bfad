//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for `lcli`.
#[derive(Debug, Parser)]
#[command(name = "lcli", version, about = "Work with Linear teams, issues and labels")]
pub struct Cli {
    /// Config file (default: ./.lcli.yaml, then ~/.lcli.yaml).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log requests and name resolution to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List all teams.
    Teams,
    /// List and manage issues.
    #[command(subcommand)]
    Issues(IssuesCommand),
    /// List and manage labels.
    #[command(subcommand)]
    Labels(LabelsCommand),
    /// Print the version number.
    Version,
}

/// `lcli issues ...`
#[derive(Debug, Subcommand)]
pub enum IssuesCommand {
    /// List issues for a team.
    List {
        /// Team name (default: the configured team).
        #[arg(short, long)]
        team: Option<String>,
        /// List only issue titles.
        #[arg(short = 'T', long)]
        titles: bool,
    },
    /// Create an issue.
    Create {
        /// Issue title.
        #[arg(short = 'T', long)]
        title: String,
        /// Issue description.
        #[arg(short, long)]
        description: Option<String>,
        /// Team ID (default: the configured team).
        #[arg(short, long)]
        team: Option<String>,
    },
    /// Delete an issue.
    Delete {
        /// ID of the issue to delete.
        issue_id: String,
    },
    /// Update fields on an issue.
    Update {
        /// Issue to update.
        #[command(flatten)]
        target: IssueTarget,
        /// Assign to this user ID.
        #[arg(short, long, value_name = "USER_ID")]
        assign: Option<String>,
        /// Replace the description.
        #[arg(short, long)]
        description: Option<String>,
        /// Priority from 0 (none) to 4.
        #[arg(short, long, allow_negative_numbers = true)]
        priority: Option<i64>,
        /// Workflow status name, e.g. "in progress".
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Add or remove a label on an issue.
    Label {
        /// Issue whose labels change.
        #[command(flatten)]
        target: IssueTarget,
        /// Label to add; created if it does not exist.
        #[arg(short, long, value_name = "NAME")]
        add: Option<String>,
        /// Label to remove.
        #[arg(short, long, value_name = "NAME")]
        remove: Option<String>,
    },
}

/// Identifies an issue either by ID or by a title search.
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct IssueTarget {
    /// Issue ID.
    #[arg(short, long)]
    pub issue_id: Option<String>,
    /// Search for the issue by title.
    #[arg(short, long)]
    pub title_search: Option<String>,
}

/// `lcli labels ...`
#[derive(Debug, Subcommand)]
pub enum LabelsCommand {
    /// List all labels, or the labels on one issue.
    List {
        /// Only labels on this issue ID.
        #[arg(short, long, conflicts_with = "title")]
        issue_id: Option<String>,
        /// Only labels on the issue found by this title.
        #[arg(short, long)]
        title: Option<String>,
    },
    /// Find a label by exact name.
    Search {
        /// Label name.
        name: String,
    },
    /// Create a label.
    Create {
        /// Label name.
        name: String,
    },
}
