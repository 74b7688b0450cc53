use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_course, delete_course, get_course_by_id, get_courses, get_courses_by_group,
    get_courses_by_teacher, get_courses_with_exams, update_course,
};

pub fn init_courses_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_course).get(get_courses))
        .route("/with-exams", get(get_courses_with_exams))
        .route("/by-teacher/{teacher_id}", get(get_courses_by_teacher))
        .route("/by-group/{group}", get(get_courses_by_group))
        .route(
            "/{id}",
            get(get_course_by_id)
                .patch(update_course)
                .delete(delete_course),
        )
}
