use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use crate::modules::courses::model::{
    Course, CourseDetail, CreateCourseDto, PaginatedCoursesResponse, UpdateCourseDto,
};
use crate::modules::courses::service::CourseService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::pagination::PageQuery;
use crate::utils::response::MessageResponse;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/courses",
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "Course created", body = Course),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Referenced teacher not found")
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn create_course(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateCourseDto>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    let course = CourseService::create_course(&state.db, dto).await?;

    Ok((StatusCode::CREATED, Json(course)))
}

#[utoipa::path(
    get,
    path = "/courses",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of courses with teacher and exams", body = PaginatedCoursesResponse)
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_courses(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PaginatedCoursesResponse>, AppError> {
    let base_url = format!("{}/courses", state.server_config.public_url);
    let courses = CourseService::list_courses(&state.db, &query, &base_url).await?;

    Ok(Json(courses))
}

#[utoipa::path(
    get,
    path = "/courses/with-exams",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of courses with their exams embedded", body = PaginatedCoursesResponse)
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_courses_with_exams(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PaginatedCoursesResponse>, AppError> {
    let base_url = format!("{}/courses/with-exams", state.server_config.public_url);
    let courses = CourseService::courses_with_exams(&state.db, &query, &base_url).await?;

    Ok(Json(courses))
}

#[utoipa::path(
    get,
    path = "/courses/by-teacher/{teacher_id}",
    params(
        ("teacher_id" = i64, Path, description = "Owning teacher ID"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Courses owned by the teacher", body = PaginatedCoursesResponse),
        (status = 404, description = "Teacher not found")
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_courses_by_teacher(
    State(state): State<AppState>,
    Path(teacher_id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PaginatedCoursesResponse>, AppError> {
    let base_url = format!(
        "{}/courses/by-teacher/{}",
        state.server_config.public_url, teacher_id
    );
    let courses =
        CourseService::courses_by_teacher(&state.db, teacher_id, &query, &base_url).await?;

    Ok(Json(courses))
}

#[utoipa::path(
    get,
    path = "/courses/by-group/{group}",
    params(
        ("group" = String, Path, description = "Group label"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Courses with the given group label", body = PaginatedCoursesResponse)
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_courses_by_group(
    State(state): State<AppState>,
    Path(group): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PaginatedCoursesResponse>, AppError> {
    let base_url = format!(
        "{}/courses/by-group/{}",
        state.server_config.public_url, group
    );
    let courses = CourseService::courses_by_group(&state.db, &group, &query, &base_url).await?;

    Ok(Json(courses))
}

#[utoipa::path(
    get,
    path = "/courses/{id}",
    params(
        ("id" = i64, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course with teacher and exams", body = CourseDetail),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_course_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CourseDetail>, AppError> {
    let course = CourseService::get_course_by_id(&state.db, id).await?;

    Ok(Json(course))
}

#[utoipa::path(
    patch,
    path = "/courses/{id}",
    params(
        ("id" = i64, Path, description = "Course ID")
    ),
    request_body = UpdateCourseDto,
    responses(
        (status = 200, description = "Course updated", body = CourseDetail),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Course or referenced teacher not found")
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateCourseDto>,
) -> Result<Json<CourseDetail>, AppError> {
    let course = CourseService::update_course(&state.db, id, dto).await?;

    Ok(Json(course))
}

#[utoipa::path(
    delete,
    path = "/courses/{id}",
    params(
        ("id" = i64, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course deleted", body = MessageResponse),
        (status = 404, description = "Course not found"),
        (status = 409, description = "Course still has exams")
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    CourseService::delete_course(&state.db, id).await?;

    Ok(Json(MessageResponse {
        message: format!("Course {id} deleted"),
    }))
}
