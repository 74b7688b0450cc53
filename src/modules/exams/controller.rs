use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use crate::modules::exams::model::{
    CreateExamDto, Exam, ExamCountResponse, ExamDetail, PaginatedExamsResponse, UpdateExamDto,
};
use crate::modules::exams::service::ExamService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::pagination::PageQuery;
use crate::utils::response::MessageResponse;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/exams",
    request_body = CreateExamDto,
    responses(
        (status = 201, description = "Exam created", body = Exam),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Referenced course not found")
    ),
    tag = "Exams"
)]
#[instrument(skip(state))]
pub async fn create_exam(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateExamDto>,
) -> Result<(StatusCode, Json<Exam>), AppError> {
    let exam = ExamService::create_exam(&state.db, dto).await?;

    Ok((StatusCode::CREATED, Json(exam)))
}

#[utoipa::path(
    get,
    path = "/exams",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of exams with course and teacher", body = PaginatedExamsResponse)
    ),
    tag = "Exams"
)]
#[instrument(skip(state))]
pub async fn get_exams(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PaginatedExamsResponse>, AppError> {
    let base_url = format!("{}/exams", state.server_config.public_url);
    let exams = ExamService::list_exams(&state.db, &query, &base_url).await?;

    Ok(Json(exams))
}

#[utoipa::path(
    get,
    path = "/exams/by-type/{exam_type}",
    params(
        ("exam_type" = String, Path, description = "Exam type: Midterm, Final or Makeup"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Exams of the given type, most recent first", body = PaginatedExamsResponse)
    ),
    tag = "Exams"
)]
#[instrument(skip(state))]
pub async fn get_exams_by_type(
    State(state): State<AppState>,
    Path(exam_type): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PaginatedExamsResponse>, AppError> {
    let base_url = format!(
        "{}/exams/by-type/{}",
        state.server_config.public_url, exam_type
    );
    let exams = ExamService::exams_by_type(&state.db, &exam_type, &query, &base_url).await?;

    Ok(Json(exams))
}

#[utoipa::path(
    get,
    path = "/exams/by-date/{date}",
    params(
        ("date" = String, Path, description = "Exam date"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Exams held on the given date", body = PaginatedExamsResponse)
    ),
    tag = "Exams"
)]
#[instrument(skip(state))]
pub async fn get_exams_by_date(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PaginatedExamsResponse>, AppError> {
    let base_url = format!("{}/exams/by-date/{}", state.server_config.public_url, date);
    let exams = ExamService::exams_by_date(&state.db, &date, &query, &base_url).await?;

    Ok(Json(exams))
}

#[utoipa::path(
    get,
    path = "/exams/count-by-course/{course_id}",
    params(
        ("course_id" = i64, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Exam count for the course", body = ExamCountResponse),
        (status = 404, description = "Course not found")
    ),
    tag = "Exams"
)]
#[instrument(skip(state))]
pub async fn count_exams_by_course(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> Result<Json<ExamCountResponse>, AppError> {
    let count = ExamService::count_by_course(&state.db, course_id).await?;

    Ok(Json(count))
}

#[utoipa::path(
    get,
    path = "/exams/{id}",
    params(
        ("id" = i64, Path, description = "Exam ID")
    ),
    responses(
        (status = 200, description = "Exam with its course and teacher", body = ExamDetail),
        (status = 404, description = "Exam not found")
    ),
    tag = "Exams"
)]
#[instrument(skip(state))]
pub async fn get_exam_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ExamDetail>, AppError> {
    let exam = ExamService::get_exam_by_id(&state.db, id).await?;

    Ok(Json(exam))
}

#[utoipa::path(
    patch,
    path = "/exams/{id}",
    params(
        ("id" = i64, Path, description = "Exam ID")
    ),
    request_body = UpdateExamDto,
    responses(
        (status = 200, description = "Exam updated", body = ExamDetail),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Exam or referenced course not found")
    ),
    tag = "Exams"
)]
#[instrument(skip(state))]
pub async fn update_exam(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateExamDto>,
) -> Result<Json<ExamDetail>, AppError> {
    let exam = ExamService::update_exam(&state.db, id, dto).await?;

    Ok(Json(exam))
}

#[utoipa::path(
    delete,
    path = "/exams/{id}",
    params(
        ("id" = i64, Path, description = "Exam ID")
    ),
    responses(
        (status = 200, description = "Exam deleted", body = MessageResponse),
        (status = 404, description = "Exam not found")
    ),
    tag = "Exams"
)]
#[instrument(skip(state))]
pub async fn delete_exam(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    ExamService::delete_exam(&state.db, id).await?;

    Ok(Json(MessageResponse {
        message: format!("Exam {id} deleted"),
    }))
}
