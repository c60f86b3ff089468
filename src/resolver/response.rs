//! Resolver output shapes and the JSON envelope.
//!
//! Drill-down results are level-discriminated unions: the `level` field
//! tells the consumer whether it received a school ranking or a per-major
//! breakdown. Every CLI command wraps its payload in [`ApiResponse`].

use serde::Serialize;

use crate::models::ExamSubjectsEntry;

/// Result of a resolve operation: either data, or an explicit "nothing
/// matched" outcome. The empty case is a success, not an error.
#[derive(Debug)]
pub enum Outcome<T> {
    Found(T),
    NotFound { message: String },
}

/// Drill-down from a vocational major.
#[derive(Debug, Serialize)]
#[serde(tag = "level")]
pub enum VocationalResolution {
    /// No school filter: which schools are reachable, ranked by how many
    /// matched (directory row, plan row) pairs they account for.
    #[serde(rename = "school")]
    Schools {
        vocational_major: String,
        schools: Vec<SchoolRank>,
    },
    /// School filter given: the majors this school enrolls for, each with
    /// its exam subjects and quota rows.
    #[serde(rename = "major")]
    Majors {
        school_name: String,
        majors: Vec<MajorDetail>,
    },
}

#[derive(Debug, Serialize)]
pub struct SchoolRank {
    pub school_name: String,
    pub major_count: u32,
}

#[derive(Debug, Serialize)]
pub struct MajorDetail {
    pub vocational_major: String,
    pub undergrad_major: String,
    pub undergrad_major_group: String,
    pub admission_category: String,
    pub exam_subjects: Option<ExamSubjectsEntry>,
    pub plans: Vec<PlanQuota>,
}

/// Quota rows inside a school-filtered result; the school is implied by
/// the surrounding record.
#[derive(Debug, Serialize)]
pub struct PlanQuota {
    pub major_name: String,
    pub general_quota: i64,
    pub targeted_quota: i64,
}

/// Drill-down grouping by undergraduate major.
#[derive(Debug, Serialize)]
#[serde(tag = "level")]
pub enum UndergraduateResolution {
    /// No major filter: reachable undergraduate majors ranked by how many
    /// distinct schools enroll for them, plus exam subjects per category.
    #[serde(rename = "major")]
    Majors {
        vocational_major: String,
        majors: Vec<UndergraduateMajorRank>,
        exam_subjects: Vec<CategoryExamSubjects>,
    },
    /// Major filter given: schools offering it, ranked by total quota.
    #[serde(rename = "school")]
    Schools {
        undergrad_major: String,
        schools: Vec<SchoolPlanTotal>,
    },
}

#[derive(Debug, Serialize)]
pub struct UndergraduateMajorRank {
    pub undergrad_major: String,
    pub undergrad_major_group: String,
    pub admission_category: String,
    pub school_count: u32,
}

#[derive(Debug, Serialize)]
pub struct CategoryExamSubjects {
    pub admission_category: String,
    pub exam_subjects: ExamSubjectsEntry,
}

/// Per-school quota sums; the components are reported separately and only
/// `plan_total` drives the ranking.
#[derive(Debug, Serialize)]
pub struct SchoolPlanTotal {
    pub school_name: String,
    pub general_total: i64,
    pub targeted_total: i64,
    pub plan_total: i64,
}

/// One row of the comprehensive (either-field) search.
#[derive(Debug, Serialize)]
pub struct ComprehensiveRecord {
    pub vocational_major: String,
    pub undergrad_major: String,
    pub undergrad_major_group: String,
    pub admission_category: String,
    pub exam_subjects: Option<ExamSubjectsEntry>,
    pub schools: Vec<SchoolPlan>,
}

#[derive(Debug, Serialize)]
pub struct SchoolPlan {
    pub school_name: String,
    pub major_name: String,
    pub general_quota: i64,
    pub targeted_quota: i64,
}

/// The `{success, data}` / `{success, error}` envelope every command emits.
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    /// Success wrapping `data`. A payload that fails to serialize turns
    /// into the error envelope rather than a `success` with no data.
    pub fn ok<T: Serialize>(data: &T) -> Self {
        match serde_json::to_value(data) {
            Ok(value) => Self {
                success: true,
                data: Some(value),
                count: None,
                message: None,
                error: None,
            },
            Err(err) => {
                log::error!("Failed to serialize response data: {err}");
                Self::error("failed to serialize response data")
            }
        }
    }

    /// Success carrying a list plus its length.
    pub fn ok_with_count<T: Serialize>(data: &[T]) -> Self {
        let response = Self::ok(&data);
        if response.success {
            Self {
                count: Some(data.len()),
                ..response
            }
        } else {
            response
        }
    }

    /// The empty-match outcome: success, empty data, explanatory message.
    pub fn empty(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(serde_json::Value::Array(Vec::new())),
            count: None,
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn error(message: impl ToString) -> Self {
        Self {
            success: false,
            data: None,
            count: None,
            message: None,
            error: Some(message.to_string()),
        }
    }

    /// Collapse an `Outcome` into the envelope.
    pub fn from_outcome<T: Serialize>(outcome: &Outcome<T>) -> Self {
        match outcome {
            Outcome::Found(data) => Self::ok(data),
            Outcome::NotFound { message } => Self::empty(message.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::ser::Error as _;

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("not representable"))
        }
    }

    #[test]
    fn test_ok_wraps_data_with_count() {
        let response = ApiResponse::ok_with_count(&["a", "b"]);
        assert!(response.success);
        assert_eq!(response.count, Some(2));
        assert!(response.data.is_some());
        assert!(response.error.is_none());
    }

    #[test]
    fn test_unserializable_payload_becomes_error_envelope() {
        let response = ApiResponse::ok(&Unserializable);
        assert!(!response.success);
        assert!(response.data.is_none());
        assert!(response.error.is_some());

        let counted = ApiResponse::ok_with_count(&[Unserializable]);
        assert!(!counted.success);
        assert_eq!(counted.count, None);
    }
}
