//! Undergraduate-major drill-down command

use anyhow::Result;
use clap::Args;

use super::print_response;
use crate::resolver::{ApiResponse, Resolver};
use crate::store::SqliteStore;

#[derive(Args)]
pub struct ByUndergraduateCommands {
    /// Vocational major name (substring match)
    pub keyword: String,

    /// Drill into the schools offering one undergraduate major
    #[arg(short, long)]
    pub major: Option<String>,
}

pub async fn handle_by_undergraduate_command(
    args: ByUndergraduateCommands,
    resolver: &Resolver<SqliteStore>,
) -> Result<()> {
    let outcome = resolver
        .by_undergraduate_major(&args.keyword, args.major.as_deref())
        .await?;

    print_response(&ApiResponse::from_outcome(&outcome));
    Ok(())
}
