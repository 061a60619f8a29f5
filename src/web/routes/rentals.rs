use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::error::RentalsError;
use crate::models::{GetRentalsParams, Rental, RentalsQuery};
use crate::web::AppState;

pub async fn get_rental_handler(
    State(state): State<AppState>,
    Path(rental_id): Path<String>,
) -> Result<Json<Rental>, RentalsError> {
    // A non-numeric id can't match anything, so it reads as "not found".
    let Ok(id) = rental_id.trim().parse::<i32>() else {
        return Err(RentalsError::NotFound(format!(
            "rental with id '{}' not found",
            rental_id
        )));
    };

    state.rentals.get_rental(id).await.map(Json)
}

pub async fn get_rentals_handler(
    State(state): State<AppState>,
    Query(query): Query<RentalsQuery>,
) -> Result<Json<Vec<Rental>>, RentalsError> {
    let params = GetRentalsParams::try_from(query)?;
    state.rentals.get_rentals(&params).await.map(Json)
}
