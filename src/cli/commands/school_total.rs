//! School quota totals command

use anyhow::Result;
use clap::Args;

use super::print_response;
use crate::resolver::{ApiResponse, Resolver};
use crate::store::{ReferenceStore, SqliteStore};

#[derive(Args)]
pub struct SchoolTotalCommands {
    /// Exact school name
    pub school: String,
}

pub async fn handle_school_total_command(
    args: SchoolTotalCommands,
    resolver: &Resolver<SqliteStore>,
) -> Result<()> {
    let totals = resolver.store().school_totals(&args.school).await?;
    print_response(&ApiResponse::ok(&totals));
    Ok(())
}
