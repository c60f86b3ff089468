//! Professional directory search command

use anyhow::Result;
use clap::Args;

use super::print_response;
use crate::resolver::{ApiResponse, Resolver};
use crate::store::{DirectoryQuery, ReferenceStore, SqliteStore};

#[derive(Args)]
pub struct DirectoryCommands {
    /// Substring matched against any of the three major columns
    pub keyword: Option<String>,

    /// Exact admission category
    #[arg(short, long)]
    pub category: Option<String>,

    /// Number of rows to skip
    #[arg(long, default_value_t = 0)]
    pub skip: i64,

    /// Maximum number of rows to return (config default when omitted)
    #[arg(long)]
    pub limit: Option<i64>,
}

pub async fn handle_directory_command(
    args: DirectoryCommands,
    resolver: &Resolver<SqliteStore>,
    default_limit: i64,
) -> Result<()> {
    let query = DirectoryQuery {
        keyword: args.keyword,
        admission_category: args.category,
        skip: args.skip,
        limit: args.limit.unwrap_or(default_limit),
    };

    let rows = resolver.store().search_directory(&query).await?;
    print_response(&ApiResponse::ok_with_count(&rows));
    Ok(())
}
