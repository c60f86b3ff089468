//! Entity types for the three reference tables.
//!
//! Column values are the Chinese dataset strings; column names are English.
//! The tables are bulk-loaded once and read-only afterwards, so there are
//! no update-shaped types, only read rows and insert rows.

use serde::{Deserialize, Serialize};

/// One row of the professional directory: a vocational major mapped to an
/// undergraduate major, tagged with its admission category.
///
/// A vocational major usually maps to several undergraduate majors, so
/// multiple rows share the same `vocational_major`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DirectoryEntry {
    pub id: i64,
    pub vocational_major: String,
    pub undergrad_major_group: String,
    pub undergrad_major: String,
    pub admission_category: String,
}

/// Insert-shaped directory row produced by the spreadsheet loader.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewDirectoryEntry {
    pub vocational_major: String,
    pub undergrad_major_group: String,
    pub undergrad_major: String,
    pub admission_category: String,
}

/// One row of the enrollment plan: quotas a school offers for one major.
///
/// `major_name` is joined against `DirectoryEntry::undergrad_major` by
/// substring containment, not by key; the datasets share no foreign keys.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EnrollmentPlanEntry {
    pub id: i64,
    pub school_name: String,
    pub major_name: String,
    pub general_quota: i64,
    pub targeted_quota: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewEnrollmentPlanEntry {
    pub school_name: String,
    pub major_name: String,
    pub general_quota: i64,
    pub targeted_quota: i64,
}

/// Exam subjects required for one admission category.
///
/// `admission_category` here uses the descriptive-label scheme, not the
/// coded scheme of the directory table; see [`crate::category::CategoryMap`].
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ExamSubjectsEntry {
    pub id: i64,
    pub admission_category: String,
    pub undergrad_enrollment_group: String,
    pub public_subjects: String,
    pub major_subjects: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewExamSubjectsEntry {
    pub admission_category: String,
    pub undergrad_enrollment_group: String,
    pub public_subjects: String,
    pub major_subjects: String,
}

/// Quota sums for a single school across all of its plan rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchoolTotals {
    pub school_name: String,
    pub general_total: i64,
    pub targeted_total: i64,
    pub combined_total: i64,
}
