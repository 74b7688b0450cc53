use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    count_exams_by_course, create_exam, delete_exam, get_exam_by_id, get_exams, get_exams_by_date,
    get_exams_by_type, update_exam,
};

pub fn init_exams_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_exam).get(get_exams))
        .route("/by-type/{exam_type}", get(get_exams_by_type))
        .route("/by-date/{date}", get(get_exams_by_date))
        .route("/count-by-course/{course_id}", get(count_exams_by_course))
        .route(
            "/{id}",
            get(get_exam_by_id).patch(update_exam).delete(delete_exam),
        )
}
