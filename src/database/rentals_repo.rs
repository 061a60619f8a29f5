use async_trait::async_trait;
use sqlx::{postgres::PgArguments, Arguments, PgPool};
use tracing::debug;

use crate::database::rental_query::{RentalQuery, SqlArg};
use crate::error::RentalsError;
use crate::models::{GetRentalsParams, Rental, RentalRow};

#[async_trait]
pub trait RentalsRepository: Send + Sync {
    async fn get_rental(&self, id: i32) -> Result<Rental, RentalsError>;

    async fn get_rentals(&self, params: &GetRentalsParams) -> Result<Vec<Rental>, RentalsError>;
}

// Numeric columns are cast so NUMERIC-typed schemas decode the same way.
pub const SQL_SELECT_RENTALS: &str = r#"
SELECT
    r.id,
    r.user_id,
    u.first_name,
    u.last_name,
    r.name,
    r.type,
    r.description,
    r.sleeps,
    r.price_per_day::int8 AS price,
    r.home_city AS city,
    r.home_state AS state,
    r.home_zip AS zip,
    r.home_country AS country,
    r.vehicle_make AS make,
    r.vehicle_model AS model,
    r.vehicle_year AS year,
    r.vehicle_length::float4 AS length,
    r.lat::float8 AS lat,
    r.lng::float8 AS lng,
    r.primary_image_url
FROM rentals r
JOIN users u ON u.id = r.user_id
"#;

#[derive(Clone)]
pub struct PgRentalsRepo {
    pool: PgPool,
}

impl PgRentalsRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RentalsRepository for PgRentalsRepo {
    async fn get_rental(&self, id: i32) -> Result<Rental, RentalsError> {
        let sql = format!("{}WHERE r.id = $1", SQL_SELECT_RENTALS);

        let row = sqlx::query_as::<_, RentalRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RentalsError::internal("failed to get rental", e))?;

        row.map(Rental::from)
            .ok_or_else(|| RentalsError::rental_not_found(id))
    }

    async fn get_rentals(&self, params: &GetRentalsParams) -> Result<Vec<Rental>, RentalsError> {
        let rendered = RentalQuery::from_params(params).render(SQL_SELECT_RENTALS);
        debug!(sql = %rendered.sql, args = ?rendered.args, "rentals query");

        let mut args = PgArguments::default();
        for arg in rendered.args {
            match arg {
                SqlArg::Int4(v) => args.add(v),
                SqlArg::Int8(v) => args.add(v),
                SqlArg::Float8(v) => args.add(v),
            }
        }

        let rows = sqlx::query_as_with::<_, RentalRow, _>(&rendered.sql, args)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RentalsError::internal("failed to get rentals", e))?;

        Ok(rows.into_iter().map(Rental::from).collect())
    }
}
