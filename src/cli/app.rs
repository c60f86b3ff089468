use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::commands::by_major::ByMajorCommands;
use super::commands::by_undergraduate::ByUndergraduateCommands;
use super::commands::directory::DirectoryCommands;
use super::commands::import::ImportCommands;
use super::commands::plan::PlanCommands;
use super::commands::school_total::SchoolTotalCommands;
use super::commands::search::SearchCommands;
use super::commands::subjects::SubjectsCommands;

#[derive(Parser)]
#[command(name = "zsb-cli")]
#[command(about = "A CLI tool for querying zhuanshengben admission reference data")]
pub struct Cli {
    /// Path to the reference database (overrides the config file)
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Comprehensive search across vocational and undergraduate majors
    Search(SearchCommands),
    /// Drill down from a vocational major to schools or one school's majors
    ByMajor(ByMajorCommands),
    /// Drill down grouping by undergraduate major
    ByUndergraduate(ByUndergraduateCommands),
    /// Search the professional directory table
    Directory(DirectoryCommands),
    /// Search the enrollment plan table
    Plan(PlanCommands),
    /// Total enrollment quotas for one school
    SchoolTotal(SchoolTotalCommands),
    /// List exam subjects, optionally for one admission category
    Subjects(SubjectsCommands),
    /// List all admission categories and school names
    Options,
    /// Import reference tables from spreadsheet exports
    Import(ImportCommands),
    /// Show database status and row counts
    Status,
}
