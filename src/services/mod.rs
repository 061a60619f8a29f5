pub mod rentals_service;

pub use rentals_service::RentalsService;
