use sqlx::SqlitePool;

struct Migration {
    version: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "0001_rates_table",
        sql: r#"
CREATE TABLE IF NOT EXISTS rates (
    id TEXT PRIMARY KEY,
    pair TEXT NOT NULL,
    price TEXT NOT NULL,
    created_at TEXT NOT NULL
);
"#,
    },
    Migration {
        version: "0002_indexes",
        sql: r#"
CREATE INDEX IF NOT EXISTS idx_rates_pair_created_at ON rates(pair, created_at);
"#,
    },
];

pub(crate) async fn apply_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
CREATE TABLE IF NOT EXISTS schema_migrations (
    version TEXT PRIMARY KEY,
    applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);
"#,
    )
    .execute(pool)
    .await?;

    for migration in MIGRATIONS {
        let applied: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM schema_migrations WHERE version = ?")
                .bind(migration.version)
                .fetch_one(pool)
                .await?;

        if applied == 0 {
            sqlx::raw_sql(migration.sql).execute(pool).await?;
            sqlx::query("INSERT INTO schema_migrations (version) VALUES (?)")
                .bind(migration.version)
                .execute(pool)
                .await?;
        }
    }

    Ok(())
}
