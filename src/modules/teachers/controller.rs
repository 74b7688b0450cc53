use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use crate::modules::teachers::model::{
    CreateTeacherDto, PaginatedTeachersResponse, Teacher, TeacherWithCourses, UpdateTeacherDto,
};
use crate::modules::teachers::service::TeacherService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::pagination::PageQuery;
use crate::utils::response::MessageResponse;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/teachers",
    request_body = CreateTeacherDto,
    responses(
        (status = 201, description = "Teacher created", body = Teacher),
        (status = 400, description = "Invalid input")
    ),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn create_teacher(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateTeacherDto>,
) -> Result<(StatusCode, Json<Teacher>), AppError> {
    let teacher = TeacherService::create_teacher(&state.db, dto).await?;

    Ok((StatusCode::CREATED, Json(teacher)))
}

#[utoipa::path(
    get,
    path = "/teachers",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of teachers with their courses", body = PaginatedTeachersResponse)
    ),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn get_teachers(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PaginatedTeachersResponse>, AppError> {
    let base_url = format!("{}/teachers", state.server_config.public_url);
    let teachers = TeacherService::list_teachers(&state.db, &query, &base_url).await?;

    Ok(Json(teachers))
}

#[utoipa::path(
    get,
    path = "/teachers/area/{area}",
    params(
        ("area" = String, Path, description = "Subject area"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Teachers in the given subject area", body = PaginatedTeachersResponse)
    ),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn get_teachers_by_area(
    State(state): State<AppState>,
    Path(area): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PaginatedTeachersResponse>, AppError> {
    let base_url = format!("{}/teachers/area/{}", state.server_config.public_url, area);
    let teachers = TeacherService::teachers_by_area(&state.db, &area, &query, &base_url).await?;

    Ok(Json(teachers))
}

#[utoipa::path(
    get,
    path = "/teachers/level/{level}",
    params(
        ("level" = String, Path, description = "Academic level"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Teachers with the given academic level", body = PaginatedTeachersResponse)
    ),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn get_teachers_by_level(
    State(state): State<AppState>,
    Path(level): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PaginatedTeachersResponse>, AppError> {
    let base_url = format!("{}/teachers/level/{}", state.server_config.public_url, level);
    let teachers = TeacherService::teachers_by_level(&state.db, &level, &query, &base_url).await?;

    Ok(Json(teachers))
}

#[utoipa::path(
    get,
    path = "/teachers/{id}",
    params(
        ("id" = i64, Path, description = "Teacher ID")
    ),
    responses(
        (status = 200, description = "Teacher with its courses", body = TeacherWithCourses),
        (status = 404, description = "Teacher not found")
    ),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn get_teacher_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TeacherWithCourses>, AppError> {
    let teacher = TeacherService::get_teacher_by_id(&state.db, id).await?;

    Ok(Json(teacher))
}

#[utoipa::path(
    patch,
    path = "/teachers/{id}",
    params(
        ("id" = i64, Path, description = "Teacher ID")
    ),
    request_body = UpdateTeacherDto,
    responses(
        (status = 200, description = "Teacher updated", body = TeacherWithCourses),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Teacher not found")
    ),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn update_teacher(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateTeacherDto>,
) -> Result<Json<TeacherWithCourses>, AppError> {
    let teacher = TeacherService::update_teacher(&state.db, id, dto).await?;

    Ok(Json(teacher))
}

#[utoipa::path(
    delete,
    path = "/teachers/{id}",
    params(
        ("id" = i64, Path, description = "Teacher ID")
    ),
    responses(
        (status = 200, description = "Teacher deleted", body = MessageResponse),
        (status = 404, description = "Teacher not found"),
        (status = 409, description = "Teacher still owns courses")
    ),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn delete_teacher(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    TeacherService::delete_teacher(&state.db, id).await?;

    Ok(Json(MessageResponse {
        message: format!("Teacher {id} deleted"),
    }))
}
