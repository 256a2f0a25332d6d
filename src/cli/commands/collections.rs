use std::path::PathBuf;

use clap::{Args, Subcommand};
use reqwest::Method;
use serde_json::json;

use super::{body_from_args, load_json_file};
use crate::api::{ListParams, PbClient, Report, Result};

#[derive(Args)]
pub struct CollectionsCommands {
    #[command(subcommand)]
    pub command: CollectionsSubcommands,
}

#[derive(Subcommand)]
pub enum CollectionsSubcommands {
    /// List collections
    List {
        /// Filter expression
        #[arg(long)]
        filter: Option<String>,
        /// Sort expression
        #[arg(long)]
        sort: Option<String>,
        /// Page number
        #[arg(long)]
        page: Option<u32>,
        /// Items per page
        #[arg(long)]
        per_page: Option<u32>,
    },
    /// Get a collection
    Get {
        /// Collection name or ID
        name_or_id: String,
    },
    /// Create a collection
    Create {
        /// JSON body
        json_data: Option<String>,
        /// JSON file with the collection schema
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Update a collection
    Update {
        /// Collection name or ID
        name_or_id: String,
        /// JSON body
        json_data: Option<String>,
        /// JSON file with the update data
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Delete a collection
    Delete {
        /// Collection name or ID
        name_or_id: String,
    },
    /// Import collections from a file
    Import {
        /// JSON file with the collections to import
        #[arg(long)]
        file: PathBuf,
    },
}

pub async fn handle_collections_command(
    args: CollectionsCommands,
    client: &PbClient,
) -> Result<Report> {
    match args.command {
        CollectionsSubcommands::List {
            filter,
            sort,
            page,
            per_page,
        } => {
            let params = ListParams {
                filter,
                sort,
                page,
                per_page,
                ..Default::default()
            };
            let data = client
                .send_authenticated(
                    Method::GET,
                    &format!("/api/collections{}", params.to_query_string()),
                    None,
                )
                .await?
                .into_data();
            Ok(Report::success(200, data))
        }
        CollectionsSubcommands::Get { name_or_id } => {
            let data = client
                .send_authenticated(Method::GET, &format!("/api/collections/{name_or_id}"), None)
                .await?
                .into_data();
            Ok(Report::success(200, data))
        }
        CollectionsSubcommands::Create { json_data, file } => {
            let body = body_from_args(json_data.as_deref(), file.as_deref())?;
            let data = client
                .send_authenticated(Method::POST, "/api/collections", Some(&body))
                .await?
                .into_data();
            Ok(Report::success(200, data))
        }
        CollectionsSubcommands::Update {
            name_or_id,
            json_data,
            file,
        } => {
            let body = body_from_args(json_data.as_deref(), file.as_deref())?;
            let data = client
                .send_authenticated(
                    Method::PATCH,
                    &format!("/api/collections/{name_or_id}"),
                    Some(&body),
                )
                .await?
                .into_data();
            Ok(Report::success(200, data))
        }
        CollectionsSubcommands::Delete { name_or_id } => {
            client
                .send_authenticated(
                    Method::DELETE,
                    &format!("/api/collections/{name_or_id}"),
                    None,
                )
                .await?;
            Ok(Report::success(
                204,
                json!({"message": format!("Collection '{name_or_id}' deleted")}),
            ))
        }
        CollectionsSubcommands::Import { file } => {
            let mut body = load_json_file(&file)?;
            // A top-level array is shorthand for the import envelope.
            if body.is_array() {
                body = json!({ "collections": body });
            }
            client
                .send_authenticated(Method::PUT, "/api/collections/import", Some(&body))
                .await?;
            Ok(Report::success(
                204,
                json!({"message": "Collections imported successfully"}),
            ))
        }
    }
}
