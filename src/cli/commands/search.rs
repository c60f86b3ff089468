//! Comprehensive search command

use anyhow::Result;
use clap::Args;

use super::print_response;
use crate::resolver::{ApiResponse, Outcome, Resolver};
use crate::store::SqliteStore;

#[derive(Args)]
pub struct SearchCommands {
    /// Vocational or undergraduate major name (substring match)
    pub keyword: String,
}

pub async fn handle_search_command(
    args: SearchCommands,
    resolver: &Resolver<SqliteStore>,
) -> Result<()> {
    let outcome = resolver.comprehensive(&args.keyword).await?;

    let response = match &outcome {
        Outcome::Found(records) => ApiResponse::ok_with_count(records),
        Outcome::NotFound { .. } => ApiResponse::from_outcome(&outcome),
    };
    print_response(&response);

    Ok(())
}
