use clap::{Args, Subcommand};
use reqwest::Method;
use serde_json::json;

use crate::api::{PbClient, Report, Result};

#[derive(Args)]
pub struct BackupsCommands {
    #[command(subcommand)]
    pub command: BackupsSubcommands,
}

#[derive(Subcommand)]
pub enum BackupsSubcommands {
    /// List backups
    List,
    /// Create a backup
    Create {
        /// Backup filename (e.g. backup.zip)
        name: Option<String>,
    },
    /// Restore a backup
    Restore {
        /// Backup key/filename
        key: String,
    },
    /// Delete a backup
    Delete {
        /// Backup key/filename
        key: String,
    },
}

pub async fn handle_backups_command(
    args: BackupsCommands,
    client: &PbClient,
) -> Result<Report> {
    match args.command {
        BackupsSubcommands::List => {
            let data = client
                .send_authenticated(Method::GET, "/api/backups", None)
                .await?
                .into_data();
            Ok(Report::success(200, data))
        }
        BackupsSubcommands::Create { name } => {
            let body = match &name {
                Some(name) => json!({ "name": name }),
                None => json!({}),
            };
            client
                .send_authenticated(Method::POST, "/api/backups", Some(&body))
                .await?;
            let message = match name {
                Some(name) => format!("Backup created as {name}"),
                None => "Backup created".to_string(),
            };
            Ok(Report::success(204, json!({ "message": message })))
        }
        BackupsSubcommands::Restore { key } => {
            client
                .send_authenticated(Method::POST, &format!("/api/backups/{key}/restore"), None)
                .await?;
            Ok(Report::success(
                204,
                json!({"message": format!("Backup '{key}' restore initiated")}),
            ))
        }
        BackupsSubcommands::Delete { key } => {
            client
                .send_authenticated(Method::DELETE, &format!("/api/backups/{key}"), None)
                .await?;
            Ok(Report::success(
                204,
                json!({"message": format!("Backup '{key}' deleted")}),
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
    async fn create_without_a_name_sends_an_empty_object() {
        let server = MockServer::start_async().await;
        mock_auth(&server);
        let create = server.mock(|when, then| {
            when.method(POST).path("/api/backups").json_body(json!({}));
            then.status(204);
        });

        let report = handle_backups_command(
            BackupsCommands {
                command: BackupsSubcommands::Create { name: None },
            },
            &client_for(&server),
        )
        .await
        .unwrap();

        assert_eq!(report.status, 204);
        assert_eq!(report.data["message"], json!("Backup created"));
        create.assert();
    }

    #[tokio::test]
    async fn create_with_a_name_sends_it_in_the_body() {
        let server = MockServer::start_async().await;
        mock_auth(&server);
        let create = server.mock(|when, then| {
            when.method(POST)
                .path("/api/backups")
                .json_body(json!({"name": "nightly.zip"}));
            then.status(204);
        });

        let report = handle_backups_command(
            BackupsCommands {
                command: BackupsSubcommands::Create {
                    name: Some("nightly.zip".into()),
                },
            },
            &client_for(&server),
        )
        .await
        .unwrap();

        assert_eq!(report.data["message"], json!("Backup created as nightly.zip"));
        create.assert();
    }

    #[tokio::test]
    async fn deleting_a_missing_backup_surfaces_the_404() {
        let server = MockServer::start_async().await;
        mock_auth(&server);
        server.mock(|when, then| {
            when.method(DELETE).path("/api/backups/missing.zip");
            then.status(404)
                .json_body(json!({"message": "The requested resource wasn't found."}));
        });

        let err = handle_backups_command(
            BackupsCommands {
                command: BackupsSubcommands::Delete {
                    key: "missing.zip".into(),
                },
            },
            &client_for(&server),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status(), 404);
        let report = Report::from(&err);
        assert!(!report.success);
        assert_eq!(report.status, 404);
        assert_eq!(report.exit_code(), 1);
    }

    #[tokio::test]
    async fn restore_hits_the_restore_endpoint() {
        let server = MockServer::start_async().await;
        mock_auth(&server);
        let restore = server.mock(|when, then| {
            when.method(POST).path("/api/backups/nightly.zip/restore");
            then.status(204);
        });

        let report = handle_backups_command(
            BackupsCommands {
                command: BackupsSubcommands::Restore {
                    key: "nightly.zip".into(),
                },
            },
            &client_for(&server),
        )
        .await
        .unwrap();

        assert_eq!(
            report.data["message"],
            json!("Backup 'nightly.zip' restore initiated")
        );
        restore.assert();
    }
}
