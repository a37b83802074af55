/// Embedded schema migrations
///
/// The `members`, `member_profiles` and `member_hobbies` tables are created
/// by the files in `members-shared/migrations/`, embedded at compile time.

use sqlx::postgres::PgPool;
use tracing::{info, warn};

/// Applies all pending migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Starting database migrations");

    match sqlx::migrate!("./migrations").run(pool).await {
        Ok(()) => {
            info!("Database migrations completed");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}
