use axum::{routing::get, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::services::RentalsService;
use crate::web::error::panic_response;
use crate::web::routes::rentals;

pub mod error;
pub mod routes;

#[derive(Clone)]
pub struct AppState {
    pub rentals: RentalsService,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/v1/rentals", get(rentals::get_rentals_handler))
        .route("/v1/rentals/:rental_id", get(rentals::get_rental_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(panic_response))
        .with_state(state)
}
