use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_teacher, delete_teacher, get_teacher_by_id, get_teachers, get_teachers_by_area,
    get_teachers_by_level, update_teacher,
};

pub fn init_teachers_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_teacher).get(get_teachers))
        .route("/area/{area}", get(get_teachers_by_area))
        .route("/level/{level}", get(get_teachers_by_level))
        .route(
            "/{id}",
            get(get_teacher_by_id)
                .patch(update_teacher)
                .delete(delete_teacher),
        )
}
