mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

use common::{
    create_test_course, create_test_teacher, delete_request, get_request, json_request,
    response_json, setup_test_app,
};

#[sqlx::test(migrations = "./migrations")]
async fn test_teacher_round_trip(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    // create
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/teachers",
            json!({
                "first_name": "Laura",
                "last_name": "Mendez",
                "email": "laura.mendez@faculty.test",
                "subject_area": "Mathematics",
                "academic_level": "Doctorate",
                "admission_date": "2019-08-12"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = response_json(response).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["first_name"], "Laura");
    assert_eq!(created["admission_date"], "2019-08-12");

    // read back, identical fields plus empty courses
    let response = app
        .clone()
        .oneshot(get_request(&format!("/teachers/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = response_json(response).await;
    assert_eq!(fetched["email"], "laura.mendez@faculty.test");
    assert_eq!(fetched["subject_area"], "Mathematics");
    assert_eq!(fetched["courses"], json!([]));

    // partial update changes only the supplied field
    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/teachers/{id}"),
            json!({ "email": "l.mendez@faculty.test" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = response_json(response).await;
    assert_eq!(updated["email"], "l.mendez@faculty.test");
    assert_eq!(updated["first_name"], "Laura");
    assert_eq!(updated["subject_area"], "Mathematics");

    // delete, then reads and deletes fail with 404
    let response = app
        .clone()
        .oneshot(delete_request(&format!("/teachers/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let message = response_json(response).await;
    assert_eq!(message["message"], format!("Teacher {id} deleted"));

    let response = app
        .clone()
        .oneshot(get_request(&format!("/teachers/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(delete_request(&format!("/teachers/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_teacher_missing_field_is_400(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app
        .oneshot(json_request(
            "POST",
            "/teachers",
            json!({
                "first_name": "Laura",
                "last_name": "Mendez"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("required"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_teacher_invalid_email_is_400(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app
        .oneshot(json_request(
            "POST",
            "/teachers",
            json!({
                "first_name": "Laura",
                "last_name": "Mendez",
                "email": "not-an-email",
                "subject_area": "Mathematics",
                "academic_level": "Doctorate",
                "admission_date": "2019-08-12"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("email"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_missing_teacher_is_404(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app
        .oneshot(json_request(
            "PATCH",
            "/teachers/99999",
            json!({ "first_name": "Ghost" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("99999"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_teachers_paginates_25_rows(pool: PgPool) {
    for i in 1..=25 {
        create_test_teacher(
            &pool,
            &format!("First{i:02}"),
            &format!("Last{i:02}"),
            "History",
            "Bachelor's",
        )
        .await;
    }
    let app = setup_test_app(pool);

    let response = app
        .clone()
        .oneshot(get_request("/teachers?page=1&limit=10"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;

    assert_eq!(body["data"].as_array().unwrap().len(), 10);
    assert_eq!(body["pagination"]["total"], 25);
    assert_eq!(body["pagination"]["totalPages"], 3);
    assert_eq!(body["pagination"]["currentPage"], 1);
    assert_eq!(body["pagination"]["prev"], json!(null));
    assert!(
        body["pagination"]["next"]
            .as_str()
            .unwrap()
            .ends_with("/teachers?page=2&limit=10")
    );

    // past the last page: empty data, no next, prev points back
    let response = app
        .oneshot(get_request("/teachers?page=5&limit=10"))
        .await
        .unwrap();
    let body = response_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
    assert_eq!(body["pagination"]["next"], json!(null));
    assert!(
        body["pagination"]["prev"]
            .as_str()
            .unwrap()
            .ends_with("/teachers?page=4&limit=10")
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_teachers_clamps_bad_page_inputs(pool: PgPool) {
    for i in 1..=3 {
        create_test_teacher(&pool, &format!("F{i}"), &format!("L{i}"), "Art", "Master's").await;
    }
    let app = setup_test_app(pool);

    let response = app
        .oneshot(get_request("/teachers?page=0&limit=-5"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;

    // page clamps to 1, limit clamps to 1
    assert_eq!(body["pagination"]["currentPage"], 1);
    assert_eq!(body["pagination"]["limit"], 1);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_teachers_by_area_filters_and_embeds_courses(pool: PgPool) {
    let math_id = create_test_teacher(&pool, "Zoe", "Alvarez", "Math", "Doctorate").await;
    create_test_teacher(&pool, "Ben", "Zamora", "Math", "Master's").await;
    create_test_teacher(&pool, "Eva", "Luna", "Biology", "Master's").await;
    create_test_course(&pool, math_id, "Algebra", "A").await;

    let app = setup_test_app(pool);
    let response = app
        .oneshot(get_request("/teachers/area/Math?page=1&limit=10"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;

    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    // ordered by last name ascending
    assert_eq!(data[0]["last_name"], "Alvarez");
    assert_eq!(data[1]["last_name"], "Zamora");
    assert_eq!(data[0]["courses"].as_array().unwrap().len(), 1);
    assert_eq!(data[0]["courses"][0]["name"], "Algebra");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_teachers_by_level_filters(pool: PgPool) {
    create_test_teacher(&pool, "Ana", "Reyes", "Physics", "Master's").await;
    create_test_teacher(&pool, "Leo", "Bravo", "Physics", "Doctorate").await;

    let app = setup_test_app(pool);
    let response = app
        .oneshot(get_request("/teachers/level/Master's?page=1&limit=10"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;

    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["last_name"], "Reyes");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_teacher_with_courses_is_409(pool: PgPool) {
    let teacher_id = create_test_teacher(&pool, "Irene", "Vidal", "Literature", "Doctorate").await;
    create_test_course(&pool, teacher_id, "Poetry", "A").await;

    let app = setup_test_app(pool);
    let response = app
        .clone()
        .oneshot(delete_request(&format!("/teachers/{teacher_id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // row must survive
    let response = app
        .oneshot(get_request(&format!("/teachers/{teacher_id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
