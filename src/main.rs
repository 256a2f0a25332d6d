use clap::Parser;
use log::info;

use pocketbase_cli::api::{PbClient, Report};
use pocketbase_cli::cli::app::{Cli, Commands};
use pocketbase_cli::cli::commands;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_default_env().init();

    let cli = Cli::parse();
    info!("Starting pocketbase-cli");

    let client = PbClient::from_env();

    let result = match cli.command {
        Commands::Health(args) => commands::handle_health_command(args, &client).await,
        Commands::Auth(args) => commands::handle_auth_command(args, &client).await,
        Commands::Collections(args) => {
            commands::handle_collections_command(args, &client).await
        }
        Commands::Records(args) => commands::handle_records_command(args, &client).await,
        Commands::Backups(args) => commands::handle_backups_command(args, &client).await,
        Commands::Migration(args) => commands::handle_migration_command(args),
    };

    // The only place a report is printed and an exit code chosen, so no
    // failure can ever be reported twice.
    let report = match &result {
        Ok(report) => report.clone(),
        Err(error) => Report::from(error),
    };
    report.print();
    std::process::exit(report.exit_code());
}
