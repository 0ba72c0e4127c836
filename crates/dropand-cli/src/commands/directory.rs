//! Directory tree management commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use dropand_core::error::AppError;
use dropand_core::types::DirectoryId;
use dropand_entity::directory::DirectoryNode;
use dropand_service::{DirectoryService, RequestContext, TreeService};

use crate::output::{self, OutputFormat};

/// Arguments for directory commands
#[derive(Debug, Args)]
pub struct DirectoryArgs {
    /// Directory subcommand
    #[command(subcommand)]
    pub command: DirectoryCommand,
}

/// Directory subcommands
#[derive(Debug, Subcommand)]
pub enum DirectoryCommand {
    /// List root directories, or the children of one directory
    List {
        /// Parent directory ID
        #[arg(short, long)]
        parent: Option<i64>,
    },
    /// Show the subtree under a directory
    Tree {
        /// Directory ID
        id: i64,
    },
    /// Create a new directory
    Create {
        /// Directory name
        #[arg(short, long)]
        name: String,
        /// Parent directory ID (omit for root)
        #[arg(short, long)]
        parent: Option<i64>,
    },
    /// Delete a directory and everything beneath it
    Delete {
        /// Directory ID
        id: i64,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

/// Directory display row
#[derive(Debug, Serialize, Tabled)]
struct DirectoryRow {
    /// Directory ID
    id: i64,
    /// Name
    name: String,
    /// Parent directory ID
    parent: String,
    /// Sort position
    order: i32,
    /// Has children
    children: bool,
}

impl From<DirectoryNode> for DirectoryRow {
    fn from(node: DirectoryNode) -> Self {
        Self {
            id: node.id.get(),
            name: node.name,
            parent: node
                .parent_id
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".to_string()),
            order: node.sort_order,
            children: node.has_children,
        }
    }
}

/// Execute directory commands
pub async fn execute(
    args: &DirectoryArgs,
    config_path: Option<&str>,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let backend = super::connect_store(&config).await?;
    let directories = DirectoryService::new(backend.clone());
    let ctx = RequestContext::system();

    match &args.command {
        DirectoryCommand::List { parent } => {
            let nodes = match parent {
                Some(id) => {
                    directories
                        .list_children(&ctx, DirectoryId::new(*id))
                        .await?
                }
                None => directories.list_roots(&ctx).await?,
            };
            let rows: Vec<DirectoryRow> = nodes.into_iter().map(DirectoryRow::from).collect();
            output::print_list(&rows, format);
        }
        DirectoryCommand::Tree { id } => {
            let tree = TreeService::new(backend)
                .subtree(&ctx, DirectoryId::new(*id))
                .await?;
            output::print_tree(&tree, format);
        }
        DirectoryCommand::Create { name, parent } => {
            let node = directories
                .create(&ctx, name, parent.map(DirectoryId::new))
                .await?;
            output::print_item(&DirectoryRow::from(node), format);
        }
        DirectoryCommand::Delete { id, force } => {
            let id = DirectoryId::new(*id);
            let target = directories.get(&ctx, id).await?;

            if !force {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt(format!(
                        "Delete '{}' and everything beneath it?",
                        target.name
                    ))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

                if !confirm {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            directories.delete(&ctx, id).await?;
            output::print_success(&format!("Deleted directory {id}"));
        }
    }

    Ok(())
}
