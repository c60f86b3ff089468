//! Cross-table resolver
//!
//! Answers the three drill-down queries by joining the professional
//! directory, the enrollment plan, and the exam subjects table in
//! application code. The directory-to-plan join is substring containment
//! on major names (the datasets share no keys); the directory-to-exam join
//! goes through the injected [`CategoryMap`].
//!
//! Resolution is a pure function of (keyword, tables, mapping): identical
//! calls over unchanged reference data produce identical output.

pub mod response;

use anyhow::Result;
use std::collections::{HashMap, HashSet};

use crate::category::CategoryMap;
use crate::models::{DirectoryEntry, ExamSubjectsEntry};
use crate::store::ReferenceStore;

pub use response::{
    ApiResponse, CategoryExamSubjects, ComprehensiveRecord, MajorDetail, Outcome, PlanQuota,
    SchoolPlan, SchoolPlanTotal, SchoolRank, UndergraduateMajorRank, UndergraduateResolution,
    VocationalResolution,
};

pub struct Resolver<S> {
    store: S,
    categories: CategoryMap,
}

impl<S: ReferenceStore> Resolver<S> {
    pub fn new(store: S, categories: CategoryMap) -> Self {
        Self { store, categories }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Drill down from a vocational major.
    ///
    /// Without `school`, ranks the schools reachable from the matched
    /// directory rows. With `school`, lists that school's majors with exam
    /// subjects and quota rows; directory rows the school has no plans for
    /// are dropped from this branch (observed behavior, kept as is).
    pub async fn by_vocational_major(
        &self,
        keyword: &str,
        school: Option<&str>,
    ) -> Result<Outcome<VocationalResolution>> {
        let keyword = validated_keyword(keyword)?;

        let directory = self.store.directory_by_vocational(keyword).await?;
        if directory.is_empty() {
            return Ok(Outcome::NotFound {
                message: "No matching vocational major found".to_string(),
            });
        }

        let resolution = match school {
            Some(school) => self.majors_at_school(&directory, school).await?,
            None => self.rank_schools(&directory).await?,
        };

        Ok(Outcome::Found(resolution))
    }

    async fn rank_schools(&self, directory: &[DirectoryEntry]) -> Result<VocationalResolution> {
        // Each matched plan row counts once per directory row that matched
        // it, so a school enrolling for three reachable majors counts 3.
        let mut order: Vec<String> = Vec::new();
        let mut counts: HashMap<String, u32> = HashMap::new();

        for entry in directory {
            let plans = self.store.plans_by_major(&entry.undergrad_major).await?;
            for plan in plans {
                if !counts.contains_key(&plan.school_name) {
                    order.push(plan.school_name.clone());
                }
                *counts.entry(plan.school_name).or_insert(0) += 1;
            }
        }

        let mut schools: Vec<SchoolRank> = order
            .into_iter()
            .map(|school_name| {
                let major_count = counts[&school_name];
                SchoolRank {
                    school_name,
                    major_count,
                }
            })
            .collect();
        // Stable sort keeps ties in first-encounter order.
        schools.sort_by(|a, b| b.major_count.cmp(&a.major_count));

        Ok(VocationalResolution::Schools {
            vocational_major: directory[0].vocational_major.clone(),
            schools,
        })
    }

    async fn majors_at_school(
        &self,
        directory: &[DirectoryEntry],
        school: &str,
    ) -> Result<VocationalResolution> {
        let mut majors = Vec::new();

        for entry in directory {
            let plans = self
                .store
                .plans_by_school_and_major(school, &entry.undergrad_major)
                .await?;
            if plans.is_empty() {
                continue;
            }

            let exam_subjects = self.exam_subjects_for(&entry.admission_category).await?;

            majors.push(MajorDetail {
                vocational_major: entry.vocational_major.clone(),
                undergrad_major: entry.undergrad_major.clone(),
                undergrad_major_group: entry.undergrad_major_group.clone(),
                admission_category: entry.admission_category.clone(),
                exam_subjects,
                plans: plans
                    .into_iter()
                    .map(|plan| PlanQuota {
                        major_name: plan.major_name,
                        general_quota: plan.general_quota,
                        targeted_quota: plan.targeted_quota,
                    })
                    .collect(),
            });
        }

        Ok(VocationalResolution::Majors {
            school_name: school.to_string(),
            majors,
        })
    }

    /// Drill down grouping by undergraduate major.
    ///
    /// Without `major`, groups the matched directory rows per undergraduate
    /// major and ranks them by how many distinct schools enroll for each.
    /// With `major`, ranks the schools offering it by total quota.
    pub async fn by_undergraduate_major(
        &self,
        keyword: &str,
        major: Option<&str>,
    ) -> Result<Outcome<UndergraduateResolution>> {
        let keyword = validated_keyword(keyword)?;

        let directory = self.store.directory_by_vocational(keyword).await?;
        if directory.is_empty() {
            return Ok(Outcome::NotFound {
                message: "No matching vocational major found".to_string(),
            });
        }

        let resolution = match major {
            Some(major) => self.rank_schools_by_quota(major).await?,
            None => self.rank_undergrad_majors(&directory).await?,
        };

        Ok(Outcome::Found(resolution))
    }

    async fn rank_undergrad_majors(
        &self,
        directory: &[DirectoryEntry],
    ) -> Result<UndergraduateResolution> {
        // Group by undergraduate major in first-encounter order; the first
        // row's group/category metadata wins for the whole group.
        let mut majors: Vec<UndergraduateMajorRank> = Vec::new();
        let mut seen_majors: HashSet<String> = HashSet::new();

        for entry in directory {
            if !seen_majors.insert(entry.undergrad_major.clone()) {
                continue;
            }

            let plans = self.store.plans_by_major(&entry.undergrad_major).await?;
            let mut schools: Vec<&str> = plans.iter().map(|p| p.school_name.as_str()).collect();
            schools.sort_unstable();
            schools.dedup();

            majors.push(UndergraduateMajorRank {
                undergrad_major: entry.undergrad_major.clone(),
                undergrad_major_group: entry.undergrad_major_group.clone(),
                admission_category: entry.admission_category.clone(),
                school_count: schools.len() as u32,
            });
        }

        majors.sort_by(|a, b| b.school_count.cmp(&a.school_count));

        // Distinct categories in first-encounter order; unmapped or
        // exam-less categories are skipped, not reported.
        let mut exam_subjects: Vec<CategoryExamSubjects> = Vec::new();
        let mut seen_categories: HashSet<String> = HashSet::new();
        for entry in directory {
            if !seen_categories.insert(entry.admission_category.clone()) {
                continue;
            }
            if let Some(subjects) = self.exam_subjects_for(&entry.admission_category).await? {
                exam_subjects.push(CategoryExamSubjects {
                    admission_category: entry.admission_category.clone(),
                    exam_subjects: subjects,
                });
            }
        }

        Ok(UndergraduateResolution::Majors {
            vocational_major: directory[0].vocational_major.clone(),
            majors,
            exam_subjects,
        })
    }

    async fn rank_schools_by_quota(&self, major: &str) -> Result<UndergraduateResolution> {
        let plans = self.store.plans_by_major(major).await?;

        let mut order: Vec<String> = Vec::new();
        let mut totals: HashMap<String, (i64, i64)> = HashMap::new();
        for plan in plans {
            if !totals.contains_key(&plan.school_name) {
                order.push(plan.school_name.clone());
            }
            let entry = totals.entry(plan.school_name).or_insert((0, 0));
            entry.0 += plan.general_quota;
            entry.1 += plan.targeted_quota;
        }

        let mut schools: Vec<SchoolPlanTotal> = order
            .into_iter()
            .map(|school_name| {
                let (general_total, targeted_total) = totals[&school_name];
                SchoolPlanTotal {
                    school_name,
                    general_total,
                    targeted_total,
                    plan_total: general_total + targeted_total,
                }
            })
            .collect();
        schools.sort_by(|a, b| b.plan_total.cmp(&a.plan_total));

        Ok(UndergraduateResolution::Schools {
            undergrad_major: major.to_string(),
            schools,
        })
    }

    /// Comprehensive search: keyword against either major field, one output
    /// record per matched directory row, no deduplication across rows.
    pub async fn comprehensive(&self, keyword: &str) -> Result<Outcome<Vec<ComprehensiveRecord>>> {
        let keyword = validated_keyword(keyword)?;

        let directory = self.store.directory_by_any_major(keyword).await?;
        if directory.is_empty() {
            return Ok(Outcome::NotFound {
                message: "No matching major found".to_string(),
            });
        }

        let mut records = Vec::with_capacity(directory.len());
        for entry in &directory {
            let exam_subjects = self.exam_subjects_for(&entry.admission_category).await?;
            let plans = self.store.plans_by_major(&entry.undergrad_major).await?;

            records.push(ComprehensiveRecord {
                vocational_major: entry.vocational_major.clone(),
                undergrad_major: entry.undergrad_major.clone(),
                undergrad_major_group: entry.undergrad_major_group.clone(),
                admission_category: entry.admission_category.clone(),
                exam_subjects,
                schools: plans
                    .into_iter()
                    .map(|plan| SchoolPlan {
                        school_name: plan.school_name,
                        major_name: plan.major_name,
                        general_quota: plan.general_quota,
                        targeted_quota: plan.targeted_quota,
                    })
                    .collect(),
            });
        }

        Ok(Outcome::Found(records))
    }

    /// Normalize a directory category and look up its exam subjects.
    ///
    /// First matching row wins; a missing mapping or a missing exam row
    /// both resolve to `None`.
    async fn exam_subjects_for(&self, directory_code: &str) -> Result<Option<ExamSubjectsEntry>> {
        let Some(category) = self.categories.normalize(directory_code) else {
            return Ok(None);
        };
        let mut rows = self.store.exam_subjects_by_category(category).await?;
        if rows.is_empty() {
            Ok(None)
        } else {
            Ok(Some(rows.remove(0)))
        }
    }
}

fn validated_keyword(keyword: &str) -> Result<&str> {
    if keyword.trim().is_empty() {
        anyhow::bail!("Query keyword must not be empty");
    }
    Ok(keyword)
}
