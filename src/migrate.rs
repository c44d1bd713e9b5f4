//! Sequential file-based migration runner. Applies `migrations/*.sql` in
//! filename-lexicographic order, each file exactly once inside its own
//! transaction, tracked in the `schema_migrations` ledger.

use std::path::Path;

use anyhow::Context;
use sqlx::{Executor, PgPool};
use tracing::info;

pub async fn run(db: &PgPool, dir: &Path) -> anyhow::Result<()> {
    db.execute(
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version VARCHAR(255) PRIMARY KEY,
            applied_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .await
    .context("create schema_migrations table")?;

    for path in sql_files(dir)? {
        let version = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        let applied: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM schema_migrations WHERE version = $1)",
        )
        .bind(&version)
        .fetch_one(db)
        .await?;
        if applied {
            continue;
        }

        let sql = std::fs::read_to_string(&path)
            .with_context(|| format!("read migration {version}"))?;

        let mut tx = db.begin().await?;
        (&mut *tx)
            .execute(sql.as_str())
            .await
            .with_context(|| format!("apply migration {version}"))?;
        sqlx::query("INSERT INTO schema_migrations (version) VALUES ($1)")
            .bind(&version)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        info!(%version, "applied migration");
    }

    Ok(())
}

fn sql_files(dir: &Path) -> anyhow::Result<Vec<std::path::PathBuf>> {
    let mut files: Vec<_> = std::fs::read_dir(dir)
        .with_context(|| format!("read migrations dir {}", dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| p.extension().map_or(false, |ext| ext == "sql"))
        .collect();
    files.sort();
    Ok(files)
}
