use serde::{Deserialize, Serialize};

use crate::models::RentalRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rental {
    pub id: i32,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub rental_type: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub length: f32,
    pub sleeps: i32,
    pub primary_image_url: String,
    pub price: Price,
    pub location: Location,
    pub user: User,
}

/// Per-day price in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub day: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
}

impl From<RentalRow> for Rental {
    fn from(row: RentalRow) -> Self {
        Rental {
            id: row.id,
            name: row.name,
            description: row.description,
            rental_type: row.rental_type,
            make: row.make,
            model: row.model,
            year: row.year,
            length: row.length,
            sleeps: row.sleeps,
            primary_image_url: row.primary_image_url,
            price: Price { day: row.price },
            location: Location {
                city: row.city,
                state: row.state,
                zip: row.zip,
                country: row.country,
                lat: row.lat,
                lng: row.lng,
            },
            user: User {
                id: row.user_id,
                first_name: row.first_name,
                last_name: row.last_name,
            },
        }
    }
}
