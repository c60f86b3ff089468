//! Subjects command: the exam-subjects reference table

use anyhow::Result;
use clap::Args;

use super::print_response;
use crate::resolver::{ApiResponse, Resolver};
use crate::store::{ReferenceStore, SqliteStore};

#[derive(Args)]
pub struct SubjectsCommands {
    /// Exact admission category to filter on
    #[arg(long)]
    pub category: Option<String>,
}

pub async fn handle_subjects_command(
    args: SubjectsCommands,
    resolver: &Resolver<SqliteStore>,
) -> Result<()> {
    let store = resolver.store();
    let rows = match &args.category {
        Some(category) => store.exam_subjects_by_category(category).await?,
        None => store.all_exam_subjects().await?,
    };

    print_response(&ApiResponse::ok_with_count(&rows));
    Ok(())
}
