//! Migration framework for the reference database
//!
//! Migrations are embedded SQL files applied in version order inside a
//! transaction, with checksums recorded so a modified-after-apply file is
//! detected instead of silently diverging.

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use std::collections::BTreeMap;

/// Represents a single migration with up and down SQL
#[derive(Debug, Clone)]
pub struct Migration {
    pub version: i64,
    pub name: String,
    pub up_sql: String,
    pub down_sql: String,
}

/// Migration status in the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AppliedMigration {
    pub version: i64,
    pub name: String,
    pub applied_at: chrono::DateTime<chrono::Utc>,
    pub checksum: String,
}

/// Load all available migrations from the embedded files
pub fn load_migrations() -> BTreeMap<i64, Migration> {
    let mut migrations = BTreeMap::new();

    migrations.insert(1, Migration {
        version: 1,
        name: "initial".to_string(),
        up_sql: include_str!("files/001_initial/up.sql").to_string(),
        down_sql: include_str!("files/001_initial/down.sql").to_string(),
    });

    migrations.insert(2, Migration {
        version: 2,
        name: "indexes".to_string(),
        up_sql: include_str!("files/002_indexes/up.sql").to_string(),
        down_sql: include_str!("files/002_indexes/down.sql").to_string(),
    });

    migrations
}

/// Initialize the migration tracking table
pub async fn init_migration_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            checksum TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create schema_migrations table")?;

    Ok(())
}

/// Get list of applied migrations
pub async fn get_applied_migrations(pool: &SqlitePool) -> Result<Vec<AppliedMigration>> {
    let migrations = sqlx::query_as::<_, AppliedMigration>(
        "SELECT version, name, applied_at, checksum FROM schema_migrations ORDER BY version",
    )
    .fetch_all(pool)
    .await
    .context("Failed to get applied migrations")?;

    Ok(migrations)
}

/// Calculate checksum for migration SQL
pub fn calculate_checksum(sql: &str) -> String {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    sql.hash(&mut hasher);
    format!("{:x}", hasher.finish())
}

/// Validate that applied migrations match available ones
pub async fn validate_migrations(pool: &SqlitePool) -> Result<()> {
    let available = load_migrations();
    let applied = get_applied_migrations(pool).await?;

    for applied_migration in applied {
        if let Some(available_migration) = available.get(&applied_migration.version) {
            let expected_checksum = calculate_checksum(&available_migration.up_sql);
            if applied_migration.checksum != expected_checksum {
                anyhow::bail!(
                    "Migration {} checksum mismatch! Applied: {}, Expected: {}. \
                    This indicates the migration file has been modified after being applied.",
                    applied_migration.version,
                    applied_migration.checksum,
                    expected_checksum
                );
            }
        } else {
            anyhow::bail!(
                "Applied migration {} '{}' not found in available migrations",
                applied_migration.version,
                applied_migration.name
            );
        }
    }

    Ok(())
}

/// Apply all pending migrations, each in its own transaction
pub async fn migrate_up(pool: &SqlitePool) -> Result<()> {
    init_migration_table(pool).await?;
    validate_migrations(pool).await?;

    let available = load_migrations();
    let applied: std::collections::HashSet<i64> = get_applied_migrations(pool)
        .await?
        .into_iter()
        .map(|m| m.version)
        .collect();

    for (version, migration) in available {
        if applied.contains(&version) {
            continue;
        }

        let mut tx = pool.begin().await.context("Failed to start transaction")?;

        for statement in split_statements(&migration.up_sql) {
            sqlx::query(&statement)
                .execute(&mut *tx)
                .await
                .with_context(|| {
                    format!("Failed to apply migration {} '{}'", version, migration.name)
                })?;
        }

        sqlx::query("INSERT INTO schema_migrations (version, name, checksum) VALUES (?, ?, ?)")
            .bind(version)
            .bind(&migration.name)
            .bind(calculate_checksum(&migration.up_sql))
            .execute(&mut *tx)
            .await
            .context("Failed to record applied migration")?;

        tx.commit().await.context("Failed to commit migration")?;

        log::info!("Applied migration {} '{}'", version, migration.name);
    }

    Ok(())
}

/// Get the current schema version (highest applied migration)
pub async fn get_current_version(pool: &SqlitePool) -> Result<Option<i64>> {
    let version: Option<(Option<i64>,)> = sqlx::query_as(
        "SELECT MAX(version) FROM schema_migrations",
    )
    .fetch_optional(pool)
    .await
    .context("Failed to get current schema version")?;

    Ok(version.and_then(|(v,)| v))
}

/// Split a migration file into individual statements.
///
/// SQLite executes one statement per query, so embedded files with several
/// CREATE statements must be split on semicolons. Statements in these files
/// never contain string literals with semicolons.
fn split_statements(sql: &str) -> Vec<String> {
    sql.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_migrations() {
        let migrations = load_migrations();
        assert!(!migrations.is_empty());
        assert!(migrations.contains_key(&1));
        assert!(migrations.contains_key(&2));
        for migration in migrations.values() {
            assert!(!migration.up_sql.is_empty());
            assert!(!migration.down_sql.is_empty());
        }
    }

    #[test]
    fn test_calculate_checksum() {
        let sql = "CREATE TABLE test (id INTEGER);";
        let checksum1 = calculate_checksum(sql);
        let checksum2 = calculate_checksum(sql);
        assert_eq!(checksum1, checksum2);

        let different_sql = "CREATE TABLE test2 (id INTEGER);";
        let checksum3 = calculate_checksum(different_sql);
        assert_ne!(checksum1, checksum3);
    }

    #[test]
    fn test_split_statements() {
        let sql = "CREATE TABLE a (id INTEGER);\n\nCREATE TABLE b (id INTEGER);\n";
        let statements = split_statements(sql);
        assert_eq!(statements.len(), 2);
        assert!(statements[0].starts_with("CREATE TABLE a"));
        assert!(statements[1].starts_with("CREATE TABLE b"));
    }
}
