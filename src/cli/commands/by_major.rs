//! Vocational-major drill-down command

use anyhow::Result;
use clap::Args;

use super::print_response;
use crate::resolver::{ApiResponse, Resolver};
use crate::store::SqliteStore;

#[derive(Args)]
pub struct ByMajorCommands {
    /// Vocational major name (substring match)
    pub keyword: String,

    /// Drill into one school's majors instead of listing schools
    #[arg(short, long)]
    pub school: Option<String>,
}

pub async fn handle_by_major_command(
    args: ByMajorCommands,
    resolver: &Resolver<SqliteStore>,
) -> Result<()> {
    let outcome = resolver
        .by_vocational_major(&args.keyword, args.school.as_deref())
        .await?;

    print_response(&ApiResponse::from_outcome(&outcome));
    Ok(())
}
