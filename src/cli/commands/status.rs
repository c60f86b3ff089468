//! Database status command

use anyhow::{Context, Result};
use colored::*;
use std::path::Path;

use crate::db;
use crate::resolver::Resolver;
use crate::store::SqliteStore;

pub async fn handle_status_command(
    resolver: &Resolver<SqliteStore>,
    db_path: &Path,
) -> Result<()> {
    let pool = resolver.store().pool();
    let info = db::get_db_info(pool).await?;

    println!("{}", "Database".bold());
    println!("  path:           {}", db_path.display());
    println!("  sqlite version: {}", info.sqlite_version);
    println!("  schema version: {}", info.schema_version);
    println!("  journal mode:   {}", info.journal_mode);
    println!("  tables:         {}", info.table_count);
    println!();

    println!("{}", "Row counts".bold());
    for table in ["professional_directory", "enrollment_plan", "exam_subjects"] {
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(pool)
            .await
            .with_context(|| format!("Failed to count rows in {table}"))?;
        println!("  {table}: {count}");
    }

    Ok(())
}
