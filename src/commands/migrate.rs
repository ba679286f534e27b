//! Migrate command - Database migration management.

use sea_orm::DbErr;

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    tracing::info!(action = ?args.action, "Running migration command");

    // Connect without auto-running migrations for manual control
    let db = Database::connect_without_migrations(&config)
        .await
        .map_err(|e| migration_error("connect", e))?;

    match args.action {
        MigrateAction::Up => {
            db.run_migrations()
                .await
                .map_err(|e| migration_error("up", e))?;
            tracing::info!("Migrations applied");
        }
        MigrateAction::Down => {
            db.rollback_migration()
                .await
                .map_err(|e| migration_error("down", e))?;
            tracing::info!("Last migration rolled back");
        }
        MigrateAction::Status => {
            let status = db
                .migration_status()
                .await
                .map_err(|e| migration_error("status", e))?;
            for (name, applied) in status {
                println!("{}: {}", name, if applied { "applied" } else { "pending" });
            }
        }
        MigrateAction::Fresh => {
            tracing::warn!("Dropping all tables and re-running migrations");
            db.fresh_migrations()
                .await
                .map_err(|e| migration_error("fresh", e))?;
            tracing::info!("Fresh migrations completed");
        }
    }

    Ok(())
}

fn migration_error(step: &str, e: DbErr) -> AppError {
    AppError::internal(format!("Migration {} failed: {}", step, e))
}
