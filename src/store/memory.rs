//! In-memory reference store
//!
//! Mirrors the SQLite backend's matching semantics (case-sensitive
//! containment, insertion order) over plain vectors. Used by the resolver
//! tests and handy as a fixture store.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::RwLock;

use super::{DirectoryQuery, PlanQuery, ReferenceStore};
use crate::models::{
    DirectoryEntry, EnrollmentPlanEntry, ExamSubjectsEntry, NewDirectoryEntry,
    NewEnrollmentPlanEntry, NewExamSubjectsEntry, SchoolTotals,
};

#[derive(Debug, Default)]
struct Tables {
    directory: Vec<DirectoryEntry>,
    plans: Vec<EnrollmentPlanEntry>,
    exam_subjects: Vec<ExamSubjectsEntry>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a fully populated store in one call.
    pub fn with_tables(
        directory: Vec<NewDirectoryEntry>,
        plans: Vec<NewEnrollmentPlanEntry>,
        exam_subjects: Vec<NewExamSubjectsEntry>,
    ) -> Self {
        let store = Self::new();
        {
            let mut tables = store.tables.write().expect("store lock poisoned");
            tables.directory = number_rows(directory, |id, row| DirectoryEntry {
                id,
                vocational_major: row.vocational_major,
                undergrad_major_group: row.undergrad_major_group,
                undergrad_major: row.undergrad_major,
                admission_category: row.admission_category,
            });
            tables.plans = number_rows(plans, |id, row| EnrollmentPlanEntry {
                id,
                school_name: row.school_name,
                major_name: row.major_name,
                general_quota: row.general_quota,
                targeted_quota: row.targeted_quota,
            });
            tables.exam_subjects = number_rows(exam_subjects, |id, row| ExamSubjectsEntry {
                id,
                admission_category: row.admission_category,
                undergrad_enrollment_group: row.undergrad_enrollment_group,
                public_subjects: row.public_subjects,
                major_subjects: row.major_subjects,
            });
        }
        store
    }
}

fn number_rows<N, E>(rows: Vec<N>, build: impl Fn(i64, N) -> E) -> Vec<E> {
    rows.into_iter()
        .enumerate()
        .map(|(i, row)| build(i as i64 + 1, row))
        .collect()
}

fn paginate<T: Clone>(rows: impl Iterator<Item = T>, skip: i64, limit: i64) -> Vec<T> {
    rows.skip(skip.max(0) as usize)
        .take(limit.max(0) as usize)
        .collect()
}

#[async_trait]
impl ReferenceStore for MemoryStore {
    async fn directory_by_vocational(&self, keyword: &str) -> Result<Vec<DirectoryEntry>> {
        let tables = self.tables.read().expect("store lock poisoned");
        Ok(tables
            .directory
            .iter()
            .filter(|row| row.vocational_major.contains(keyword))
            .cloned()
            .collect())
    }

    async fn directory_by_any_major(&self, keyword: &str) -> Result<Vec<DirectoryEntry>> {
        let tables = self.tables.read().expect("store lock poisoned");
        Ok(tables
            .directory
            .iter()
            .filter(|row| {
                row.vocational_major.contains(keyword) || row.undergrad_major.contains(keyword)
            })
            .cloned()
            .collect())
    }

    async fn search_directory(&self, query: &DirectoryQuery) -> Result<Vec<DirectoryEntry>> {
        let tables = self.tables.read().expect("store lock poisoned");
        let rows = tables.directory.iter().filter(|row| {
            let keyword_ok = query.keyword.as_deref().is_none_or(|kw| {
                row.vocational_major.contains(kw)
                    || row.undergrad_major.contains(kw)
                    || row.undergrad_major_group.contains(kw)
            });
            let category_ok = query
                .admission_category
                .as_deref()
                .is_none_or(|c| row.admission_category == c);
            keyword_ok && category_ok
        });
        Ok(paginate(rows.cloned(), query.skip, query.limit))
    }

    async fn plans_by_major(&self, fragment: &str) -> Result<Vec<EnrollmentPlanEntry>> {
        let tables = self.tables.read().expect("store lock poisoned");
        Ok(tables
            .plans
            .iter()
            .filter(|row| row.major_name.contains(fragment))
            .cloned()
            .collect())
    }

    async fn plans_by_school_and_major(
        &self,
        school: &str,
        fragment: &str,
    ) -> Result<Vec<EnrollmentPlanEntry>> {
        let tables = self.tables.read().expect("store lock poisoned");
        Ok(tables
            .plans
            .iter()
            .filter(|row| row.school_name == school && row.major_name.contains(fragment))
            .cloned()
            .collect())
    }

    async fn search_plans(&self, query: &PlanQuery) -> Result<Vec<EnrollmentPlanEntry>> {
        let tables = self.tables.read().expect("store lock poisoned");
        let rows = tables.plans.iter().filter(|row| {
            let keyword_ok = query
                .keyword
                .as_deref()
                .is_none_or(|kw| row.school_name.contains(kw) || row.major_name.contains(kw));
            let school_ok = query
                .school_name
                .as_deref()
                .is_none_or(|s| row.school_name == s);
            keyword_ok && school_ok
        });
        Ok(paginate(rows.cloned(), query.skip, query.limit))
    }

    async fn exam_subjects_by_category(&self, category: &str) -> Result<Vec<ExamSubjectsEntry>> {
        let tables = self.tables.read().expect("store lock poisoned");
        Ok(tables
            .exam_subjects
            .iter()
            .filter(|row| row.admission_category == category)
            .cloned()
            .collect())
    }

    async fn all_exam_subjects(&self) -> Result<Vec<ExamSubjectsEntry>> {
        let tables = self.tables.read().expect("store lock poisoned");
        let mut rows = tables.exam_subjects.clone();
        rows.sort_by(|a, b| {
            a.admission_category
                .cmp(&b.admission_category)
                .then(a.id.cmp(&b.id))
        });
        Ok(rows)
    }

    async fn distinct_categories(&self) -> Result<Vec<String>> {
        let tables = self.tables.read().expect("store lock poisoned");
        let set: BTreeSet<String> = tables
            .directory
            .iter()
            .map(|row| row.admission_category.clone())
            .collect();
        Ok(set.into_iter().collect())
    }

    async fn distinct_schools(&self) -> Result<Vec<String>> {
        let tables = self.tables.read().expect("store lock poisoned");
        let set: BTreeSet<String> = tables
            .plans
            .iter()
            .map(|row| row.school_name.clone())
            .collect();
        Ok(set.into_iter().collect())
    }

    async fn school_totals(&self, school: &str) -> Result<SchoolTotals> {
        let tables = self.tables.read().expect("store lock poisoned");
        let mut general_total = 0;
        let mut targeted_total = 0;
        for row in tables.plans.iter().filter(|row| row.school_name == school) {
            general_total += row.general_quota;
            targeted_total += row.targeted_quota;
        }
        Ok(SchoolTotals {
            school_name: school.to_string(),
            general_total,
            targeted_total,
            combined_total: general_total + targeted_total,
        })
    }

    async fn replace_directory(&self, rows: Vec<NewDirectoryEntry>) -> Result<u64> {
        let count = rows.len() as u64;
        let mut tables = self.tables.write().expect("store lock poisoned");
        tables.directory = number_rows(rows, |id, row| DirectoryEntry {
            id,
            vocational_major: row.vocational_major,
            undergrad_major_group: row.undergrad_major_group,
            undergrad_major: row.undergrad_major,
            admission_category: row.admission_category,
        });
        Ok(count)
    }

    async fn replace_plans(&self, rows: Vec<NewEnrollmentPlanEntry>) -> Result<u64> {
        let count = rows.len() as u64;
        let mut tables = self.tables.write().expect("store lock poisoned");
        tables.plans = number_rows(rows, |id, row| EnrollmentPlanEntry {
            id,
            school_name: row.school_name,
            major_name: row.major_name,
            general_quota: row.general_quota,
            targeted_quota: row.targeted_quota,
        });
        Ok(count)
    }

    async fn replace_exam_subjects(&self, rows: Vec<NewExamSubjectsEntry>) -> Result<u64> {
        let count = rows.len() as u64;
        let mut tables = self.tables.write().expect("store lock poisoned");
        tables.exam_subjects = number_rows(rows, |id, row| ExamSubjectsEntry {
            id,
            admission_category: row.admission_category,
            undergrad_enrollment_group: row.undergrad_enrollment_group,
            public_subjects: row.public_subjects,
            major_subjects: row.major_subjects,
        });
        Ok(count)
    }
}
