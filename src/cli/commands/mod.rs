pub mod auth;
pub mod backups;
pub mod collections;
pub mod health;
pub mod migration;
pub mod records;

pub use auth::handle_auth_command;
pub use backups::handle_backups_command;
pub use collections::handle_collections_command;
pub use health::handle_health_command;
pub use migration::handle_migration_command;
pub use records::handle_records_command;

use std::path::Path;

use serde_json::Value;

use crate::api::{Error, Result};

/// Load and parse a JSON file into a request body.
pub(crate) fn load_json_file(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => {
            Error::Input(format!("File not found: {}", path.display()))
        }
        _ => Error::Input(format!("Failed to read {}: {e}", path.display())),
    })?;
    serde_json::from_str(&text)
        .map_err(|e| Error::Input(format!("Invalid JSON in file: {e}")))
}

/// Extract the JSON body from the positional argument or `--file`.
pub(crate) fn body_from_args(
    json_data: Option<&str>,
    file: Option<&Path>,
) -> Result<Value> {
    if let Some(path) = file {
        return load_json_file(path);
    }
    if let Some(raw) = json_data {
        return serde_json::from_str(raw)
            .map_err(|e| Error::Input(format!("Invalid JSON: {e}")));
    }
    Err(Error::Input("JSON data or --file is required".into()))
}
