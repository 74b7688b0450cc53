use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::modules::courses::model::Course;
use crate::utils::pagination::Pagination;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Teacher {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub subject_area: String,
    pub academic_level: String,
    pub admission_date: String,
}

/// Teacher with its courses embedded, as returned by lookups and lists.
#[derive(Debug, Serialize, ToSchema)]
pub struct TeacherWithCourses {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub subject_area: String,
    pub academic_level: String,
    pub admission_date: String,
    pub courses: Vec<Course>,
}

impl TeacherWithCourses {
    pub fn from_parts(teacher: Teacher, courses: Vec<Course>) -> Self {
        Self {
            id: teacher.id,
            first_name: teacher.first_name,
            last_name: teacher.last_name,
            email: teacher.email,
            subject_area: teacher.subject_area,
            academic_level: teacher.academic_level,
            admission_date: teacher.admission_date,
            courses,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTeacherDto {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    pub subject_area: String,
    #[validate(length(min = 1, max = 50))]
    pub academic_level: String,
    #[validate(length(min = 1, max = 20))]
    pub admission_date: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateTeacherDto {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub subject_area: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub academic_level: Option<String>,
    #[validate(length(min = 1, max = 20))]
    pub admission_date: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedTeachersResponse {
    pub pagination: Pagination,
    pub data: Vec<TeacherWithCourses>,
}
