use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::modules::exams::model::Exam;
use crate::modules::teachers::model::Teacher;
use crate::utils::pagination::Pagination;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Course {
    pub id: i64,
    pub teacher_id: i64,
    pub name: String,
    pub code: String,
    pub group_name: String,
    pub schedule: String,
    pub room: String,
}

/// Course with its owning teacher and exams embedded.
#[derive(Debug, Serialize, ToSchema)]
pub struct CourseDetail {
    pub id: i64,
    pub teacher_id: i64,
    pub name: String,
    pub code: String,
    pub group_name: String,
    pub schedule: String,
    pub room: String,
    pub teacher: Teacher,
    pub exams: Vec<Exam>,
}

impl CourseDetail {
    pub fn from_parts(course: Course, teacher: Teacher, exams: Vec<Exam>) -> Self {
        Self {
            id: course.id,
            teacher_id: course.teacher_id,
            name: course.name,
            code: course.code,
            group_name: course.group_name,
            schedule: course.schedule,
            room: course.room,
            teacher,
            exams,
        }
    }
}

/// Course with only the owning teacher embedded; nested inside exam
/// responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CourseWithTeacher {
    pub id: i64,
    pub teacher_id: i64,
    pub name: String,
    pub code: String,
    pub group_name: String,
    pub schedule: String,
    pub room: String,
    pub teacher: Teacher,
}

impl CourseWithTeacher {
    pub fn from_parts(course: Course, teacher: Teacher) -> Self {
        Self {
            id: course.id,
            teacher_id: course.teacher_id,
            name: course.name,
            code: course.code,
            group_name: course.group_name,
            schedule: course.schedule,
            room: course.room,
            teacher,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCourseDto {
    pub teacher_id: i64,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 20))]
    pub code: String,
    #[validate(length(min = 1, max = 20))]
    pub group_name: String,
    #[validate(length(min = 1, max = 100))]
    pub schedule: String,
    #[validate(length(min = 1, max = 20))]
    pub room: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCourseDto {
    pub teacher_id: Option<i64>,
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 20))]
    pub code: Option<String>,
    #[validate(length(min = 1, max = 20))]
    pub group_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub schedule: Option<String>,
    #[validate(length(min = 1, max = 20))]
    pub room: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedCoursesResponse {
    pub pagination: Pagination,
    pub data: Vec<CourseDetail>,
}
