//! SQLite-backed reference store
//!
//! Substring matching uses `instr(column, ?) > 0` rather than `LIKE`:
//! `LIKE` is case-insensitive for ASCII and treats `%`/`_` in the pattern
//! as wildcards, neither of which the contains-join wants.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::{DirectoryQuery, PlanQuery, ReferenceStore};
use crate::models::{
    DirectoryEntry, EnrollmentPlanEntry, ExamSubjectsEntry, NewDirectoryEntry,
    NewEnrollmentPlanEntry, NewExamSubjectsEntry, SchoolTotals,
};

const DIRECTORY_COLUMNS: &str =
    "id, vocational_major, undergrad_major_group, undergrad_major, admission_category";
const PLAN_COLUMNS: &str = "id, school_name, major_name, general_quota, targeted_quota";
const EXAM_COLUMNS: &str =
    "id, admission_category, undergrad_enrollment_group, public_subjects, major_subjects";

#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl ReferenceStore for SqliteStore {
    async fn directory_by_vocational(&self, keyword: &str) -> Result<Vec<DirectoryEntry>> {
        let sql = format!(
            "SELECT {DIRECTORY_COLUMNS} FROM professional_directory \
             WHERE instr(vocational_major, ?) > 0 ORDER BY id"
        );
        sqlx::query_as(&sql)
            .bind(keyword)
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("Failed to query directory by vocational major '{keyword}'"))
    }

    async fn directory_by_any_major(&self, keyword: &str) -> Result<Vec<DirectoryEntry>> {
        let sql = format!(
            "SELECT {DIRECTORY_COLUMNS} FROM professional_directory \
             WHERE instr(vocational_major, ?) > 0 OR instr(undergrad_major, ?) > 0 ORDER BY id"
        );
        sqlx::query_as(&sql)
            .bind(keyword)
            .bind(keyword)
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("Failed to query directory by major keyword '{keyword}'"))
    }

    async fn search_directory(&self, query: &DirectoryQuery) -> Result<Vec<DirectoryEntry>> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT {DIRECTORY_COLUMNS} FROM professional_directory WHERE 1 = 1"
        ));

        if let Some(keyword) = &query.keyword {
            builder.push(" AND (instr(vocational_major, ");
            builder.push_bind(keyword);
            builder.push(") > 0 OR instr(undergrad_major, ");
            builder.push_bind(keyword);
            builder.push(") > 0 OR instr(undergrad_major_group, ");
            builder.push_bind(keyword);
            builder.push(") > 0)");
        }

        if let Some(category) = &query.admission_category {
            builder.push(" AND admission_category = ");
            builder.push_bind(category);
        }

        builder.push(" ORDER BY id LIMIT ");
        builder.push_bind(query.limit);
        builder.push(" OFFSET ");
        builder.push_bind(query.skip);

        builder
            .build_query_as::<DirectoryEntry>()
            .fetch_all(&self.pool)
            .await
            .context("Failed to search professional directory")
    }

    async fn plans_by_major(&self, fragment: &str) -> Result<Vec<EnrollmentPlanEntry>> {
        let sql = format!(
            "SELECT {PLAN_COLUMNS} FROM enrollment_plan \
             WHERE instr(major_name, ?) > 0 ORDER BY id"
        );
        sqlx::query_as(&sql)
            .bind(fragment)
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("Failed to query enrollment plans for major '{fragment}'"))
    }

    async fn plans_by_school_and_major(
        &self,
        school: &str,
        fragment: &str,
    ) -> Result<Vec<EnrollmentPlanEntry>> {
        let sql = format!(
            "SELECT {PLAN_COLUMNS} FROM enrollment_plan \
             WHERE school_name = ? AND instr(major_name, ?) > 0 ORDER BY id"
        );
        sqlx::query_as(&sql)
            .bind(school)
            .bind(fragment)
            .fetch_all(&self.pool)
            .await
            .with_context(|| {
                format!("Failed to query enrollment plans for school '{school}' major '{fragment}'")
            })
    }

    async fn search_plans(&self, query: &PlanQuery) -> Result<Vec<EnrollmentPlanEntry>> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT {PLAN_COLUMNS} FROM enrollment_plan WHERE 1 = 1"
        ));

        if let Some(keyword) = &query.keyword {
            builder.push(" AND (instr(school_name, ");
            builder.push_bind(keyword);
            builder.push(") > 0 OR instr(major_name, ");
            builder.push_bind(keyword);
            builder.push(") > 0)");
        }

        if let Some(school) = &query.school_name {
            builder.push(" AND school_name = ");
            builder.push_bind(school);
        }

        builder.push(" ORDER BY id LIMIT ");
        builder.push_bind(query.limit);
        builder.push(" OFFSET ");
        builder.push_bind(query.skip);

        builder
            .build_query_as::<EnrollmentPlanEntry>()
            .fetch_all(&self.pool)
            .await
            .context("Failed to search enrollment plans")
    }

    async fn exam_subjects_by_category(&self, category: &str) -> Result<Vec<ExamSubjectsEntry>> {
        let sql = format!(
            "SELECT {EXAM_COLUMNS} FROM exam_subjects WHERE admission_category = ? ORDER BY id"
        );
        sqlx::query_as(&sql)
            .bind(category)
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("Failed to query exam subjects for category '{category}'"))
    }

    async fn all_exam_subjects(&self) -> Result<Vec<ExamSubjectsEntry>> {
        let sql = format!(
            "SELECT {EXAM_COLUMNS} FROM exam_subjects ORDER BY admission_category, id"
        );
        sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list exam subjects")
    }

    async fn distinct_categories(&self) -> Result<Vec<String>> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT DISTINCT admission_category FROM professional_directory \
             ORDER BY admission_category",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list admission categories")?;

        Ok(rows.into_iter().map(|(category,)| category).collect())
    }

    async fn distinct_schools(&self) -> Result<Vec<String>> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT DISTINCT school_name FROM enrollment_plan ORDER BY school_name",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list school names")?;

        Ok(rows.into_iter().map(|(school,)| school).collect())
    }

    async fn school_totals(&self, school: &str) -> Result<SchoolTotals> {
        let (general_total, targeted_total): (i64, i64) = sqlx::query_as(
            "SELECT COALESCE(SUM(general_quota), 0), COALESCE(SUM(targeted_quota), 0) \
             FROM enrollment_plan WHERE school_name = ?",
        )
        .bind(school)
        .fetch_one(&self.pool)
        .await
        .with_context(|| format!("Failed to total enrollment plans for school '{school}'"))?;

        Ok(SchoolTotals {
            school_name: school.to_string(),
            general_total,
            targeted_total,
            combined_total: general_total + targeted_total,
        })
    }

    async fn replace_directory(&self, rows: Vec<NewDirectoryEntry>) -> Result<u64> {
        let mut tx = self.pool.begin().await.context("Failed to start transaction")?;

        sqlx::query("DELETE FROM professional_directory")
            .execute(&mut *tx)
            .await
            .context("Failed to clear professional directory")?;

        let count = rows.len() as u64;
        for row in rows {
            sqlx::query(
                "INSERT INTO professional_directory \
                 (vocational_major, undergrad_major_group, undergrad_major, admission_category) \
                 VALUES (?, ?, ?, ?)",
            )
            .bind(&row.vocational_major)
            .bind(&row.undergrad_major_group)
            .bind(&row.undergrad_major)
            .bind(&row.admission_category)
            .execute(&mut *tx)
            .await
            .with_context(|| {
                format!("Failed to insert directory row '{}'", row.vocational_major)
            })?;
        }

        tx.commit().await.context("Failed to commit transaction")?;

        log::info!("Replaced professional directory with {} rows", count);
        Ok(count)
    }

    async fn replace_plans(&self, rows: Vec<NewEnrollmentPlanEntry>) -> Result<u64> {
        let mut tx = self.pool.begin().await.context("Failed to start transaction")?;

        sqlx::query("DELETE FROM enrollment_plan")
            .execute(&mut *tx)
            .await
            .context("Failed to clear enrollment plan")?;

        let count = rows.len() as u64;
        for row in rows {
            sqlx::query(
                "INSERT INTO enrollment_plan \
                 (school_name, major_name, general_quota, targeted_quota) \
                 VALUES (?, ?, ?, ?)",
            )
            .bind(&row.school_name)
            .bind(&row.major_name)
            .bind(row.general_quota)
            .bind(row.targeted_quota)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to insert plan row '{}'", row.school_name))?;
        }

        tx.commit().await.context("Failed to commit transaction")?;

        log::info!("Replaced enrollment plan with {} rows", count);
        Ok(count)
    }

    async fn replace_exam_subjects(&self, rows: Vec<NewExamSubjectsEntry>) -> Result<u64> {
        let mut tx = self.pool.begin().await.context("Failed to start transaction")?;

        sqlx::query("DELETE FROM exam_subjects")
            .execute(&mut *tx)
            .await
            .context("Failed to clear exam subjects")?;

        let count = rows.len() as u64;
        for row in rows {
            sqlx::query(
                "INSERT INTO exam_subjects \
                 (admission_category, undergrad_enrollment_group, public_subjects, major_subjects) \
                 VALUES (?, ?, ?, ?)",
            )
            .bind(&row.admission_category)
            .bind(&row.undergrad_enrollment_group)
            .bind(&row.public_subjects)
            .bind(&row.major_subjects)
            .execute(&mut *tx)
            .await
            .with_context(|| {
                format!("Failed to insert exam subjects row '{}'", row.admission_category)
            })?;
        }

        tx.commit().await.context("Failed to commit transaction")?;

        log::info!("Replaced exam subjects with {} rows", count);
        Ok(count)
    }
}
