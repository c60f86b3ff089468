//! Enrollment plan search command

use anyhow::Result;
use clap::Args;

use super::print_response;
use crate::resolver::{ApiResponse, Resolver};
use crate::store::{PlanQuery, ReferenceStore, SqliteStore};

#[derive(Args)]
pub struct PlanCommands {
    /// Substring matched against school or major name
    pub keyword: Option<String>,

    /// Exact school name
    #[arg(short, long)]
    pub school: Option<String>,

    /// Number of rows to skip
    #[arg(long, default_value_t = 0)]
    pub skip: i64,

    /// Maximum number of rows to return (config default when omitted)
    #[arg(long)]
    pub limit: Option<i64>,
}

pub async fn handle_plan_command(
    args: PlanCommands,
    resolver: &Resolver<SqliteStore>,
    default_limit: i64,
) -> Result<()> {
    let query = PlanQuery {
        keyword: args.keyword,
        school_name: args.school,
        skip: args.skip,
        limit: args.limit.unwrap_or(default_limit),
    };

    let rows = resolver.store().search_plans(&query).await?;
    print_response(&ApiResponse::ok_with_count(&rows));
    Ok(())
}
