use axum::{
    routing::{delete, get},
    Router,
};

use crate::state::AppState;

pub mod dto;
pub mod handlers;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/doctors",
            get(handlers::list_doctors).post(handlers::create_doctor),
        )
        .route(
            "/doctors/:id",
            get(handlers::get_doctor)
                .put(handlers::update_doctor)
                .delete(handlers::delete_doctor),
        )
        .route("/doctors/reset/all", delete(handlers::delete_all_doctors))
}
