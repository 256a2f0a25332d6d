use std::path::PathBuf;

use clap::{Args, Subcommand};
use reqwest::Method;
use serde_json::json;

use super::body_from_args;
use crate::api::{ListParams, PbClient, Report, Result};

#[derive(Args)]
pub struct RecordsCommands {
    #[command(subcommand)]
    pub command: RecordsSubcommands,
}

#[derive(Subcommand)]
pub enum RecordsSubcommands {
    /// List records
    List {
        /// Collection name or ID
        collection: String,
        /// Filter expression
        #[arg(long)]
        filter: Option<String>,
        /// Sort expression
        #[arg(long)]
        sort: Option<String>,
        /// Expand relations
        #[arg(long)]
        expand: Option<String>,
        /// Fields to return
        #[arg(long)]
        fields: Option<String>,
        /// Page number
        #[arg(long)]
        page: Option<u32>,
        /// Items per page
        #[arg(long)]
        per_page: Option<u32>,
    },
    /// Get a record
    Get {
        /// Collection name or ID
        collection: String,
        /// Record ID
        record_id: String,
        /// Expand relations
        #[arg(long)]
        expand: Option<String>,
        /// Fields to return
        #[arg(long)]
        fields: Option<String>,
    },
    /// Create a record
    Create {
        /// Collection name or ID
        collection: String,
        /// JSON body
        json_data: Option<String>,
        /// JSON file with the record data
        #[arg(long)]
        file: Option<PathBuf>,
        /// Expand relations in the response
        #[arg(long)]
        expand: Option<String>,
    },
    /// Update a record
    Update {
        /// Collection name or ID
        collection: String,
        /// Record ID
        record_id: String,
        /// JSON body
        json_data: Option<String>,
        /// JSON file with the update data
        #[arg(long)]
        file: Option<PathBuf>,
        /// Expand relations in the response
        #[arg(long)]
        expand: Option<String>,
    },
    /// Delete a record
    Delete {
        /// Collection name or ID
        collection: String,
        /// Record ID
        record_id: String,
    },
}

pub async fn handle_records_command(
    args: RecordsCommands,
    client: &PbClient,
) -> Result<Report> {
    match args.command {
        RecordsSubcommands::List {
            collection,
            filter,
            sort,
            expand,
            fields,
            page,
            per_page,
        } => {
            let params = ListParams {
                filter,
                sort,
                expand,
                fields,
                page,
                per_page,
            };
            let data = client
                .send_authenticated(
                    Method::GET,
                    &format!(
                        "/api/collections/{collection}/records{}",
                        params.to_query_string()
                    ),
                    None,
                )
                .await?
                .into_data();
            Ok(Report::success(200, data))
        }
        RecordsSubcommands::Get {
            collection,
            record_id,
            expand,
            fields,
        } => {
            let params = ListParams {
                expand,
                fields,
                ..Default::default()
            };
            let data = client
                .send_authenticated(
                    Method::GET,
                    &format!(
                        "/api/collections/{collection}/records/{record_id}{}",
                        params.to_query_string()
                    ),
                    None,
                )
                .await?
                .into_data();
            Ok(Report::success(200, data))
        }
        RecordsSubcommands::Create {
            collection,
            json_data,
            file,
            expand,
        } => {
            let body = body_from_args(json_data.as_deref(), file.as_deref())?;
            let params = ListParams {
                expand,
                ..Default::default()
            };
            let data = client
                .send_authenticated(
                    Method::POST,
                    &format!(
                        "/api/collections/{collection}/records{}",
                        params.to_query_string()
                    ),
                    Some(&body),
                )
                .await?
                .into_data();
            Ok(Report::success(200, data))
        }
        RecordsSubcommands::Update {
            collection,
            record_id,
            json_data,
            file,
            expand,
        } => {
            let body = body_from_args(json_data.as_deref(), file.as_deref())?;
            let params = ListParams {
                expand,
                ..Default::default()
            };
            let data = client
                .send_authenticated(
                    Method::PATCH,
                    &format!(
                        "/api/collections/{collection}/records/{record_id}{}",
                        params.to_query_string()
                    ),
                    Some(&body),
                )
                .await?
                .into_data();
            Ok(Report::success(200, data))
        }
        RecordsSubcommands::Delete {
            collection,
            record_id,
        } => {
            client
                .send_authenticated(
                    Method::DELETE,
                    &format!("/api/collections/{collection}/records/{record_id}"),
                    None,
                )
                .await?;
            Ok(Report::success(
                204,
                json!({
                    "message": format!("Record '{record_id}' deleted from '{collection}'")
                }),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Config;
    use httpmock::MockServer;
    use httpmock::prelude::*;

    fn client_for(server: &MockServer) -> PbClient {
        PbClient::new(Config::new(server.base_url(), "admin@example.com", "pw"))
    }

    fn mock_auth(server: &MockServer) {
        server.mock(|when, then| {
            when.method(POST)
                .path("/api/collections/_superusers/auth-with-password");
            then.status(200).json_body(json!({"token": "tok"}));
        });
    }

    #[tokio::test]
    async fn list_encodes_the_filter_as_a_single_parameter() {
        let server = MockServer::start_async().await;
        mock_auth(&server);
        let list = server.mock(|when, then| {
            when.method(GET)
                .path("/api/collections/tasks/records")
                .query_param("filter", r#"status = "done""#);
            then.status(200)
                .json_body(json!({"page": 1, "items": [], "totalItems": 0}));
        });

        let report = handle_records_command(
            RecordsCommands {
                command: RecordsSubcommands::List {
                    collection: "tasks".into(),
                    filter: Some(r#"status = "done""#.into()),
                    sort: None,
                    expand: None,
                    fields: None,
                    page: None,
                    per_page: None,
                },
            },
            &client_for(&server),
        )
        .await
        .unwrap();

        assert!(report.success);
        assert_eq!(report.status, 200);
        list.assert();
    }

    #[tokio::test]
    async fn create_posts_the_exact_body_and_reports_the_server_payload() {
        let server = MockServer::start_async().await;
        mock_auth(&server);
        let create = server.mock(|when, then| {
            when.method(POST)
                .path("/api/collections/posts/records")
                .json_body(json!({"title": "x"}));
            then.status(200)
                .json_body(json!({"id": "r1", "title": "x"}));
        });

        let report = handle_records_command(
            RecordsCommands {
                command: RecordsSubcommands::Create {
                    collection: "posts".into(),
                    json_data: Some(r#"{"title":"x"}"#.into()),
                    file: None,
                    expand: None,
                },
            },
            &client_for(&server),
        )
        .await
        .unwrap();

        assert!(report.success);
        assert_eq!(report.status, 200);
        assert_eq!(report.data, json!({"id": "r1", "title": "x"}));
        create.assert();
    }

    #[tokio::test]
    async fn delete_reports_204_with_a_message() {
        let server = MockServer::start_async().await;
        mock_auth(&server);
        server.mock(|when, then| {
            when.method(DELETE).path("/api/collections/posts/records/r1");
            then.status(204);
        });

        let report = handle_records_command(
            RecordsCommands {
                command: RecordsSubcommands::Delete {
                    collection: "posts".into(),
                    record_id: "r1".into(),
                },
            },
            &client_for(&server),
        )
        .await
        .unwrap();

        assert_eq!(report.status, 204);
        assert_eq!(
            report.data["message"],
            json!("Record 'r1' deleted from 'posts'")
        );
    }

    #[tokio::test]
    async fn backend_errors_propagate_with_their_payload() {
        let server = MockServer::start_async().await;
        mock_auth(&server);
        server.mock(|when, then| {
            when.method(GET).path("/api/collections/posts/records/missing");
            then.status(404)
                .json_body(json!({"message": "The requested resource wasn't found."}));
        });

        let err = handle_records_command(
            RecordsCommands {
                command: RecordsSubcommands::Get {
                    collection: "posts".into(),
                    record_id: "missing".into(),
                    expand: None,
                    fields: None,
                },
            },
            &client_for(&server),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status(), 404);
    }
}
