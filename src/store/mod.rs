//! Reference store: the query surface the resolver runs against.
//!
//! The three reference tables only ever need exact-equality and
//! case-sensitive substring ("contains") matching, plus distinct listings
//! and full-table replacement for the one-shot import. The trait keeps the
//! resolver independent of the backing store; [`SqliteStore`] is the real
//! backend, [`MemoryStore`] backs tests and fixtures.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{
    DirectoryEntry, EnrollmentPlanEntry, ExamSubjectsEntry, NewDirectoryEntry,
    NewEnrollmentPlanEntry, NewExamSubjectsEntry, SchoolTotals,
};

/// Filters for a professional-directory search.
#[derive(Debug, Clone)]
pub struct DirectoryQuery {
    /// Substring matched against vocational major, undergraduate major, or
    /// undergraduate major group (any of the three).
    pub keyword: Option<String>,
    /// Exact admission category.
    pub admission_category: Option<String>,
    pub skip: i64,
    pub limit: i64,
}

impl Default for DirectoryQuery {
    fn default() -> Self {
        Self {
            keyword: None,
            admission_category: None,
            skip: 0,
            limit: 100,
        }
    }
}

/// Filters for an enrollment-plan search.
#[derive(Debug, Clone)]
pub struct PlanQuery {
    /// Substring matched against school name or major name.
    pub keyword: Option<String>,
    /// Exact school name.
    pub school_name: Option<String>,
    pub skip: i64,
    pub limit: i64,
}

impl Default for PlanQuery {
    fn default() -> Self {
        Self {
            keyword: None,
            school_name: None,
            skip: 0,
            limit: 100,
        }
    }
}

/// Read (and bulk-replace) access to the three reference tables.
///
/// All substring matching is case-sensitive containment; row order is the
/// table's insertion order unless a method says otherwise.
#[async_trait]
pub trait ReferenceStore: Send + Sync {
    /// Directory rows whose vocational major contains `keyword`.
    async fn directory_by_vocational(&self, keyword: &str) -> Result<Vec<DirectoryEntry>>;

    /// Directory rows whose vocational major OR undergraduate major
    /// contains `keyword`.
    async fn directory_by_any_major(&self, keyword: &str) -> Result<Vec<DirectoryEntry>>;

    /// Filtered directory search with pagination.
    async fn search_directory(&self, query: &DirectoryQuery) -> Result<Vec<DirectoryEntry>>;

    /// Plan rows whose major name contains `fragment`.
    async fn plans_by_major(&self, fragment: &str) -> Result<Vec<EnrollmentPlanEntry>>;

    /// Plan rows for exactly `school` whose major name contains `fragment`.
    async fn plans_by_school_and_major(
        &self,
        school: &str,
        fragment: &str,
    ) -> Result<Vec<EnrollmentPlanEntry>>;

    /// Filtered enrollment-plan search with pagination.
    async fn search_plans(&self, query: &PlanQuery) -> Result<Vec<EnrollmentPlanEntry>>;

    /// Exam-subject rows for exactly this (already normalized) category.
    async fn exam_subjects_by_category(&self, category: &str) -> Result<Vec<ExamSubjectsEntry>>;

    /// All exam-subject rows, ordered by category.
    async fn all_exam_subjects(&self) -> Result<Vec<ExamSubjectsEntry>>;

    /// Distinct admission categories in the directory, ordered by value.
    async fn distinct_categories(&self) -> Result<Vec<String>>;

    /// Distinct school names in the enrollment plan, ordered by value.
    async fn distinct_schools(&self) -> Result<Vec<String>>;

    /// Quota sums across all plan rows of one school (exact name).
    async fn school_totals(&self, school: &str) -> Result<SchoolTotals>;

    /// Replace the whole directory table; returns the inserted row count.
    async fn replace_directory(&self, rows: Vec<NewDirectoryEntry>) -> Result<u64>;

    /// Replace the whole enrollment-plan table; returns the inserted row count.
    async fn replace_plans(&self, rows: Vec<NewEnrollmentPlanEntry>) -> Result<u64>;

    /// Replace the whole exam-subjects table; returns the inserted row count.
    async fn replace_exam_subjects(&self, rows: Vec<NewExamSubjectsEntry>) -> Result<u64>;
}
