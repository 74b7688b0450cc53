use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use sqlx::PgPool;

use registrar::config::cors::CorsConfig;
use registrar::config::server::ServerConfig;
use registrar::router::init_router;
use registrar::state::AppState;

pub fn setup_test_app(pool: PgPool) -> Router {
    dotenvy::dotenv().ok();
    let state = AppState {
        db: pool,
        server_config: ServerConfig::from_env(),
        cors_config: CorsConfig::from_env(),
    };
    init_router(state)
}

#[allow(dead_code)]
pub async fn create_test_teacher(
    pool: &PgPool,
    first_name: &str,
    last_name: &str,
    subject_area: &str,
    academic_level: &str,
) -> i64 {
    sqlx::query_scalar::<_, i64>(
        r#"INSERT INTO teachers (first_name, last_name, email, subject_area, academic_level, admission_date)
           VALUES ($1, $2, $3, $4, $5, '2020-01-15')
           RETURNING id"#,
    )
    .bind(first_name)
    .bind(last_name)
    .bind(format!(
        "{}.{}@faculty.test",
        first_name.to_lowercase(),
        last_name.to_lowercase()
    ))
    .bind(subject_area)
    .bind(academic_level)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn create_test_course(
    pool: &PgPool,
    teacher_id: i64,
    name: &str,
    group_name: &str,
) -> i64 {
    sqlx::query_scalar::<_, i64>(
        r#"INSERT INTO courses (teacher_id, name, code, group_name, schedule, room)
           VALUES ($1, $2, 'CRS-100', $3, 'Tue/Thu 08:00-10:00', 'A-101')
           RETURNING id"#,
    )
    .bind(teacher_id)
    .bind(name)
    .bind(group_name)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn create_test_exam(
    pool: &PgPool,
    course_id: i64,
    exam_type: &str,
    date: &str,
    average_score: f64,
) -> i64 {
    sqlx::query_scalar::<_, i64>(
        r#"INSERT INTO exams (course_id, exam_type, date, average_score, comments)
           VALUES ($1, $2, $3, $4, NULL)
           RETURNING id"#,
    )
    .bind(course_id)
    .bind(exam_type)
    .bind(date)
    .bind(average_score)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

#[allow(dead_code)]
pub fn delete_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn response_json(response: Response<axum::body::Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
