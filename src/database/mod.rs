pub mod memory_rentals_repo;
pub mod rental_query;
pub mod rentals_repo;

pub use memory_rentals_repo::InMemoryRentalsRepo;
pub use rentals_repo::{PgRentalsRepo, RentalsRepository};
