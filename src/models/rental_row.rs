// Flat row of the rentals/users join, aliased to match the select list in rentals_repo.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct RentalRow {
    pub id: i32,
    pub user_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub name: String,
    #[sqlx(rename = "type")]
    pub rental_type: String,
    pub description: String,
    pub sleeps: i32,
    pub price: i64,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub length: f32,
    pub lat: f64,
    pub lng: f64,
    pub primary_image_url: String,
}
