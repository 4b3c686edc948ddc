// PostgreSQL pool bootstrap and schema migrations.
//
// The pool is built once in `main` and handed to the storage adapter.

use std::time::Duration;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};
use tracing::{info, warn};

use crate::shared::infrastructure::config::AppConfig;

const CONNECT_ATTEMPTS: u32 = 10;
const BACKOFF_STEP: Duration = Duration::from_millis(500);

static EMBEDDED_MIGRATIONS: Migrator = sqlx::migrate!("./migrations");

/// Opens the pool, retrying with linear backoff while the database starts up.
pub async fn connect(config: &AppConfig) -> Result<PgPool, sqlx::Error> {
    let mut attempt = 1;
    loop {
        match try_connect(config).await {
            Ok(pool) => {
                info!(attempt, timezone = %config.timezone, "database connected");
                return Ok(pool);
            }
            Err(err) if attempt < CONNECT_ATTEMPTS => {
                let delay = BACKOFF_STEP * attempt;
                warn!(attempt, error = %err, ?delay, "database not reachable, retrying");
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

async fn try_connect(config: &AppConfig) -> Result<PgPool, sqlx::Error> {
    let timezone = config.timezone.clone();
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .after_connect(move |conn, _meta| {
            let timezone = timezone.clone();
            Box::pin(async move {
                sqlx::query("SELECT set_config('TimeZone', $1, false)")
                    .bind(timezone)
                    .execute(conn)
                    .await?;
                Ok(())
            })
        })
        .connect(&config.database_url)
        .await?;
    pool.execute("SELECT 1").await?;
    Ok(pool)
}

/// Applies the embedded migrations, or the ones in `MIGRATIONS_DIR` when set.
pub async fn migrate(pool: &PgPool, config: &AppConfig) -> Result<(), MigrateError> {
    match &config.migrations_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "running migrations from directory");
            Migrator::new(dir.as_path()).await?.run(pool).await
        }
        None => {
            info!(count = EMBEDDED_MIGRATIONS.iter().count(), "running embedded migrations");
            EMBEDDED_MIGRATIONS.run(pool).await
        }
    }
}
