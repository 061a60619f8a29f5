pub mod rentals;
