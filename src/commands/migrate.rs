//! Migrate command - Database migration management.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::Database;

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    // Manual control: nothing is applied on connect
    let db = Database::connect_without_migrations(&config).await?;

    match args.action {
        MigrateAction::Up => {
            tracing::info!("Running pending migrations...");
            db.run_migrations().await?;
            tracing::info!("Migrations applied");
        }
        MigrateAction::Down => {
            tracing::info!("Rolling back last migration...");
            db.rollback_migration().await?;
            tracing::info!("Rollback complete");
        }
        MigrateAction::Status => {
            for (name, applied) in db.migration_status().await? {
                println!("{}: {}", name, if applied { "applied" } else { "pending" });
            }
        }
        MigrateAction::Fresh => {
            tracing::warn!("Dropping all tables and re-running migrations...");
            db.fresh_migrations().await?;
            tracing::info!("Fresh migrations complete");
        }
    }

    Ok(())
}
