//! Spreadsheet import command

use anyhow::Result;
use clap::Args;
use colored::*;
use std::path::PathBuf;

use crate::loader;
use crate::resolver::Resolver;
use crate::store::{ReferenceStore, SqliteStore};

#[derive(Args)]
pub struct ImportCommands {
    /// Professional directory workbook (.xls/.xlsx)
    #[arg(long)]
    pub directory: Option<PathBuf>,

    /// Enrollment plan workbook (.xls/.xlsx)
    #[arg(long)]
    pub plans: Option<PathBuf>,

    /// Exam subjects workbook (.xls/.xlsx)
    #[arg(long)]
    pub subjects: Option<PathBuf>,
}

pub async fn handle_import_command(
    args: ImportCommands,
    resolver: &Resolver<SqliteStore>,
) -> Result<()> {
    if args.directory.is_none() && args.plans.is_none() && args.subjects.is_none() {
        anyhow::bail!("Provide at least one of --directory, --plans, --subjects");
    }

    let store = resolver.store();

    if let Some(path) = &args.directory {
        println!("Importing professional directory from {}", path.display());
        let rows = loader::read_directory(path)?;
        let count = store.replace_directory(rows).await?;
        println!("{} professional directory: {} rows", "✓".green(), count);
    }

    if let Some(path) = &args.plans {
        println!("Importing enrollment plan from {}", path.display());
        let rows = loader::read_plans(path)?;
        let count = store.replace_plans(rows).await?;
        println!("{} enrollment plan: {} rows", "✓".green(), count);
    }

    if let Some(path) = &args.subjects {
        println!("Importing exam subjects from {}", path.display());
        let rows = loader::read_exam_subjects(path)?;
        let count = store.replace_exam_subjects(rows).await?;
        println!("{} exam subjects: {} rows", "✓".green(), count);
    }

    println!("{}", "Import complete".bold());
    Ok(())
}
