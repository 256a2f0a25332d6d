use clap::{Parser, Subcommand};

use super::commands::auth::AuthCommand;
use super::commands::backups::BackupsCommands;
use super::commands::collections::CollectionsCommands;
use super::commands::health::HealthCommand;
use super::commands::migration::MigrationCommands;
use super::commands::records::RecordsCommands;

#[derive(Parser)]
#[command(name = "pocketbase-cli")]
#[command(about = "A CLI tool for interacting with the PocketBase admin API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check instance health and test superuser credentials
    Health(HealthCommand),
    /// Authenticate as superuser or against an auth collection
    Auth(AuthCommand),
    /// Collection (schema) management
    Collections(CollectionsCommands),
    /// Record CRUD within a collection
    Records(RecordsCommands),
    /// Backup management
    Backups(BackupsCommands),
    /// Migration file scaffolding
    Migration(MigrationCommands),
}
