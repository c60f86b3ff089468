//! Resolver semantics over the in-memory store.

use zsb_cli::category::CategoryMap;
use zsb_cli::models::{NewDirectoryEntry, NewEnrollmentPlanEntry, NewExamSubjectsEntry};
use zsb_cli::resolver::{
    Outcome, Resolver, UndergraduateResolution, VocationalResolution,
};
use zsb_cli::store::MemoryStore;

fn directory_row(
    vocational: &str,
    group: &str,
    undergrad: &str,
    category: &str,
) -> NewDirectoryEntry {
    NewDirectoryEntry {
        vocational_major: vocational.to_string(),
        undergrad_major_group: group.to_string(),
        undergrad_major: undergrad.to_string(),
        admission_category: category.to_string(),
    }
}

fn plan_row(school: &str, major: &str, general: i64, targeted: i64) -> NewEnrollmentPlanEntry {
    NewEnrollmentPlanEntry {
        school_name: school.to_string(),
        major_name: major.to_string(),
        general_quota: general,
        targeted_quota: targeted,
    }
}

fn exam_row(category: &str, group: &str, public: &str, major: &str) -> NewExamSubjectsEntry {
    NewExamSubjectsEntry {
        admission_category: category.to_string(),
        undergrad_enrollment_group: group.to_string(),
        public_subjects: public.to_string(),
        major_subjects: major.to_string(),
    }
}

/// One directory row, one plan row: the minimal drill-down dataset.
fn minimal_resolver() -> Resolver<MemoryStore> {
    let store = MemoryStore::with_tables(
        vec![directory_row("园林技术", "农林类", "风景园林", "09农林生物医药类")],
        vec![plan_row("内蒙古农业大学", "风景园林", 30, 5)],
        vec![exam_row("农林生物\n医药类", "农学类", "政治、英语", "植物学")],
    );
    Resolver::new(store, CategoryMap::builtin().clone())
}

/// Richer dataset exercising duplicates, overlaps, and missing mappings.
fn full_resolver() -> Resolver<MemoryStore> {
    let store = MemoryStore::with_tables(
        vec![
            directory_row("园林技术", "农林类", "风景园林", "09农林生物医药类"),
            directory_row("园林技术", "农林类", "园艺", "09农林生物医药类"),
            directory_row("园林技术", "农林类", "林学", "09农林生物医药类"),
            directory_row("风景园林设计", "设计类", "风景园林", "13艺术类"),
            directory_row("机械设计与制造", "机械类", "机械设计制造及其自动化", "07理工类1"),
            directory_row("大数据技术", "计算机类", "数据科学与大数据技术", "99未知类"),
        ],
        vec![
            plan_row("内蒙古农业大学", "风景园林", 30, 5),
            plan_row("鸿德文理学院", "风景园林设计", 12, 3),
            plan_row("内蒙古农业大学", "园艺", 20, 0),
            plan_row("呼和浩特民族学院", "园艺", 15, 10),
            plan_row("内蒙古工业大学", "机械设计制造及其自动化", 40, 8),
            plan_row("内蒙古师范大学", "数据科学与大数据技术", 25, 5),
        ],
        vec![
            exam_row("农林生物\n医药类", "农学类", "政治、英语", "植物学"),
            exam_row("理工类1", "机械类", "政治、英语", "高等数学（一）"),
        ],
    );
    Resolver::new(store, CategoryMap::builtin().clone())
}

#[tokio::test]
async fn test_school_level_minimal_scenario() {
    let resolver = minimal_resolver();
    let outcome = resolver.by_vocational_major("园林", None).await.unwrap();

    let Outcome::Found(VocationalResolution::Schools {
        vocational_major,
        schools,
    }) = outcome
    else {
        panic!("expected school-level resolution");
    };

    assert_eq!(vocational_major, "园林技术");
    assert_eq!(schools.len(), 1);
    assert_eq!(schools[0].school_name, "内蒙古农业大学");
    assert_eq!(schools[0].major_count, 1);
}

#[tokio::test]
async fn test_major_level_minimal_scenario() {
    let resolver = minimal_resolver();
    let outcome = resolver
        .by_vocational_major("园林", Some("内蒙古农业大学"))
        .await
        .unwrap();

    let Outcome::Found(VocationalResolution::Majors { school_name, majors }) = outcome else {
        panic!("expected major-level resolution");
    };

    assert_eq!(school_name, "内蒙古农业大学");
    assert_eq!(majors.len(), 1);

    let major = &majors[0];
    assert_eq!(major.undergrad_major, "风景园林");
    assert_eq!(major.plans.len(), 1);
    assert_eq!(major.plans[0].general_quota, 30);
    assert_eq!(major.plans[0].targeted_quota, 5);

    let subjects = major.exam_subjects.as_ref().expect("exam subjects resolved");
    assert_eq!(subjects.admission_category, "农林生物\n医药类");
}

#[tokio::test]
async fn test_no_match_is_success_with_message() {
    let resolver = minimal_resolver();
    let outcome = resolver
        .by_vocational_major("NoSuchMajor", None)
        .await
        .unwrap();

    let Outcome::NotFound { message } = outcome else {
        panic!("expected not-found outcome");
    };
    assert!(message.contains("No matching"));
}

#[tokio::test]
async fn test_empty_keyword_rejected() {
    let resolver = minimal_resolver();
    assert!(resolver.by_vocational_major("", None).await.is_err());
    assert!(resolver.by_vocational_major("   ", None).await.is_err());
    assert!(resolver.by_undergraduate_major("", None).await.is_err());
    assert!(resolver.comprehensive("\t").await.is_err());
}

#[tokio::test]
async fn test_school_ranking_counts_pairs_and_is_non_increasing() {
    let resolver = full_resolver();
    let outcome = resolver.by_vocational_major("园林", None).await.unwrap();

    let Outcome::Found(VocationalResolution::Schools { schools, .. }) = outcome else {
        panic!("expected school-level resolution");
    };

    // 风景园林 matches twice (two directory rows reach it), so its plan
    // rows count twice: 内蒙古农业大学 = 2 + 园艺 = 3 total.
    assert_eq!(schools[0].school_name, "内蒙古农业大学");
    assert_eq!(schools[0].major_count, 3);
    assert_eq!(schools[1].school_name, "鸿德文理学院");
    assert_eq!(schools[1].major_count, 2);
    assert_eq!(schools[2].school_name, "呼和浩特民族学院");
    assert_eq!(schools[2].major_count, 1);

    for pair in schools.windows(2) {
        assert!(pair[0].major_count >= pair[1].major_count);
    }
}

#[tokio::test]
async fn test_school_filter_excludes_majors_without_plans() {
    let resolver = full_resolver();
    let outcome = resolver
        .by_vocational_major("园林", Some("内蒙古农业大学"))
        .await
        .unwrap();

    let Outcome::Found(VocationalResolution::Majors { majors, .. }) = outcome else {
        panic!("expected major-level resolution");
    };

    // 林学 has no plan rows anywhere and is dropped from this branch.
    assert_eq!(majors.len(), 3);
    assert!(majors.iter().all(|m| m.undergrad_major != "林学"));

    // Same undergraduate major reached through an art-category row: the
    // category maps but has no exam row, which yields null, not an error.
    let art = majors
        .iter()
        .find(|m| m.admission_category == "13艺术类")
        .expect("art-category record present");
    assert!(art.exam_subjects.is_none());
}

#[tokio::test]
async fn test_substring_match_only_returns_containing_rows() {
    let resolver = full_resolver();
    let outcome = resolver.comprehensive("园林").await.unwrap();

    let Outcome::Found(records) = outcome else {
        panic!("expected records");
    };
    assert!(!records.is_empty());
    for record in &records {
        assert!(
            record.vocational_major.contains("园林") || record.undergrad_major.contains("园林")
        );
    }
}

#[tokio::test]
async fn test_undergraduate_grouping_first_occurrence_wins() {
    let resolver = full_resolver();
    let outcome = resolver.by_undergraduate_major("园林", None).await.unwrap();

    let Outcome::Found(UndergraduateResolution::Majors {
        vocational_major,
        majors,
        exam_subjects,
    }) = outcome
    else {
        panic!("expected major-level resolution");
    };

    assert_eq!(vocational_major, "园林技术");

    // 风景园林 appears in two directory rows with different categories;
    // the first row's metadata is kept for the group.
    let landscape = majors
        .iter()
        .find(|m| m.undergrad_major == "风景园林")
        .expect("风景园林 group present");
    assert_eq!(landscape.undergrad_major_group, "农林类");
    assert_eq!(landscape.admission_category, "09农林生物医药类");
    assert_eq!(landscape.school_count, 2);

    // A major with no plan rows is still reported, with count 0.
    let forestry = majors
        .iter()
        .find(|m| m.undergrad_major == "林学")
        .expect("林学 group present");
    assert_eq!(forestry.school_count, 0);

    for pair in majors.windows(2) {
        assert!(pair[0].school_count >= pair[1].school_count);
    }

    // 09农林生物医药类 resolves; 13艺术类 maps but has no exam row and is
    // silently skipped from the category list.
    assert_eq!(exam_subjects.len(), 1);
    assert_eq!(exam_subjects[0].admission_category, "09农林生物医药类");
}

#[tokio::test]
async fn test_undergraduate_filter_ranks_schools_by_plan_total() {
    let resolver = full_resolver();
    let outcome = resolver
        .by_undergraduate_major("园林", Some("风景园林"))
        .await
        .unwrap();

    let Outcome::Found(UndergraduateResolution::Schools {
        undergrad_major,
        schools,
    }) = outcome
    else {
        panic!("expected school-level resolution");
    };

    assert_eq!(undergrad_major, "风景园林");
    assert_eq!(schools.len(), 2);

    // 风景园林设计 contains 风景园林, so 鸿德文理学院 is part of the
    // result set: the substring join is deliberate.
    assert_eq!(schools[0].school_name, "内蒙古农业大学");
    assert_eq!(schools[0].general_total, 30);
    assert_eq!(schools[0].targeted_total, 5);
    assert_eq!(schools[0].plan_total, 35);
    assert_eq!(schools[1].school_name, "鸿德文理学院");
    assert_eq!(schools[1].plan_total, 15);
}

#[tokio::test]
async fn test_comprehensive_no_dedup_and_unmapped_category_is_null() {
    let resolver = full_resolver();
    let outcome = resolver.comprehensive("风景园林").await.unwrap();

    let Outcome::Found(records) = outcome else {
        panic!("expected records");
    };

    // Two directory rows reach 风景园林; both are reported independently
    // with the same school list.
    let landscape: Vec<_> = records
        .iter()
        .filter(|r| r.undergrad_major == "风景园林")
        .collect();
    assert_eq!(landscape.len(), 2);
    for record in &landscape {
        assert_eq!(record.schools.len(), 2);
    }

    let outcome = resolver.comprehensive("大数据").await.unwrap();
    let Outcome::Found(records) = outcome else {
        panic!("expected records");
    };
    assert_eq!(records.len(), 1);
    assert!(records[0].exam_subjects.is_none());
    assert_eq!(records[0].schools.len(), 1);
}

#[tokio::test]
async fn test_resolution_is_idempotent() {
    let resolver = full_resolver();

    let first = resolver.by_vocational_major("园林", None).await.unwrap();
    let second = resolver.by_vocational_major("园林", None).await.unwrap();

    let (Outcome::Found(first), Outcome::Found(second)) = (first, second) else {
        panic!("expected data both times");
    };
    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap()
    );
}
