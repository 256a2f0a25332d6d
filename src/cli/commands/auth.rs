use clap::Args;
use serde_json::{Value, json};

use crate::api::{Error, PbClient, Report, Result};

#[derive(Args)]
pub struct AuthCommand {
    /// Auth collection name (default: _superusers)
    #[arg(long)]
    pub collection: Option<String>,

    /// Username or email
    #[arg(long)]
    pub identity: Option<String>,

    /// Password
    #[arg(long)]
    pub password: Option<String>,
}

/// Authenticate as superuser (the default), or as a regular user against
/// the given auth collection.
pub async fn handle_auth_command(args: AuthCommand, client: &PbClient) -> Result<Report> {
    match args.collection.as_deref() {
        Some(collection) if collection != "_superusers" => {
            let (Some(identity), Some(password)) = (&args.identity, &args.password) else {
                return Err(Error::Input(
                    "--identity and --password are required for user auth".into(),
                ));
            };
            let response = client
                .auth_with_password(collection, identity, password)
                .await?;
            let data = response.into_data();
            Ok(Report::success(
                200,
                json!({
                    "message": format!("Authentication successful for {collection}"),
                    "token": data.get("token").cloned().unwrap_or(Value::Null),
                    "record": data.get("record").cloned().unwrap_or(Value::Null),
                }),
            ))
        }
        _ => {
            let token = client.authenticate(true).await?;
            Ok(Report::success(
                200,
                json!({
                    "message": "Superuser authentication successful",
                    "token": token,
                }),
            ))
        }
    }
}
