use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::modules::courses::model::CourseWithTeacher;
use crate::utils::pagination::Pagination;

pub const EXAM_TYPES: [&str; 3] = ["Midterm", "Final", "Makeup"];

fn validate_exam_type(value: &str) -> Result<(), ValidationError> {
    if EXAM_TYPES.contains(&value) {
        return Ok(());
    }

    let mut error = ValidationError::new("exam_type");
    error.message = Some("must be one of Midterm, Final or Makeup".into());
    Err(error)
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Exam {
    pub id: i64,
    pub course_id: i64,
    pub exam_type: String,
    pub date: String,
    pub average_score: f64,
    pub comments: Option<String>,
}

/// Exam with its course (and that course's teacher) embedded.
#[derive(Debug, Serialize, ToSchema)]
pub struct ExamDetail {
    pub id: i64,
    pub course_id: i64,
    pub exam_type: String,
    pub date: String,
    pub average_score: f64,
    pub comments: Option<String>,
    pub course: CourseWithTeacher,
}

impl ExamDetail {
    pub fn from_parts(exam: Exam, course: CourseWithTeacher) -> Self {
        Self {
            id: exam.id,
            course_id: exam.course_id,
            exam_type: exam.exam_type,
            date: exam.date,
            average_score: exam.average_score,
            comments: exam.comments,
            course,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateExamDto {
    pub course_id: i64,
    #[validate(custom(function = validate_exam_type))]
    pub exam_type: String,
    #[validate(length(min = 1, max = 20))]
    pub date: String,
    #[validate(range(min = 0.0, max = 100.0))]
    pub average_score: f64,
    pub comments: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateExamDto {
    pub course_id: Option<i64>,
    #[validate(custom(function = validate_exam_type))]
    pub exam_type: Option<String>,
    #[validate(length(min = 1, max = 20))]
    pub date: Option<String>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub average_score: Option<f64>,
    pub comments: Option<String>,
}

/// Exam tally for one course.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExamCountResponse {
    pub course_id: i64,
    pub exam_count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedExamsResponse {
    pub pagination: Pagination,
    pub data: Vec<ExamDetail>,
}
