pub mod rental;
pub mod rental_row;
pub mod rentals_params;

pub use rental::{Location, Price, Rental, User};
pub use rental_row::RentalRow;
pub use rentals_params::{GeoPoint, GetRentalsParams, RentalsQuery, SortKey};
