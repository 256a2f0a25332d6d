use std::path::PathBuf;

use clap::{Args, Subcommand};
use regex::Regex;
use serde_json::json;

use crate::api::{Error, Report, Result};

/// Fixed contents of every generated migration file.
const TEMPLATE: &str = include_str!("../../../assets/migration-template.js");

const DEFAULT_MIGRATIONS_DIR: &str = "pb_migrations";

#[derive(Args)]
pub struct MigrationCommands {
    #[command(subcommand)]
    pub command: MigrationSubcommands,
}

#[derive(Subcommand)]
pub enum MigrationSubcommands {
    /// Generate a timestamped migration file
    New {
        /// Migration description (e.g. "create_posts_collection")
        description: String,
        /// Output directory
        #[arg(long, default_value = DEFAULT_MIGRATIONS_DIR)]
        dir: PathBuf,
    },
}

/// Convert a free-text description to a safe filename component:
/// lowercase, runs of anything outside `[a-z0-9_]` become a single
/// underscore, and leading/trailing underscores are trimmed.
pub fn sanitize_name(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let replaced = Regex::new(r"[^a-z0-9_]+")
        .unwrap()
        .replace_all(&lowered, "_");
    let collapsed = Regex::new(r"_+").unwrap().replace_all(&replaced, "_");
    collapsed.trim_matches('_').to_string()
}

pub fn handle_migration_command(args: MigrationCommands) -> Result<Report> {
    match args.command {
        MigrationSubcommands::New { description, dir } => {
            let safe_name = sanitize_name(&description);
            if safe_name.is_empty() {
                return Err(Error::Input("Invalid migration description".into()));
            }

            let timestamp = chrono::Utc::now().timestamp();
            let filename = format!("{timestamp}_{safe_name}.js");

            std::fs::create_dir_all(&dir).map_err(|e| {
                Error::Input(format!("Failed to create {}: {e}", dir.display()))
            })?;
            let path = dir.join(&filename);
            std::fs::write(&path, TEMPLATE).map_err(|e| {
                Error::Input(format!("Failed to write {}: {e}", path.display()))
            })?;

            let absolute = path.canonicalize().unwrap_or_else(|_| path.clone());
            Ok(Report::success(
                0,
                json!({
                    "message": format!("Migration file created: {}", path.display()),
                    "file": absolute.display().to_string(),
                    "filename": filename,
                }),
            ))
        }
    }
}
