use async_trait::async_trait;
use std::cmp::Ordering;

use crate::database::rental_query::{distance_miles, RentalFilter, RentalQuery, NEAR_RADIUS_MILES};
use crate::database::rentals_repo::RentalsRepository;
use crate::error::RentalsError;
use crate::models::{GetRentalsParams, Rental, RentalRow, SortKey};

#[derive(Debug, Clone, Default)]
pub struct InMemoryRentalsRepo {
    rows: Vec<RentalRow>,
    unavailable: bool,
}

impl InMemoryRentalsRepo {
    pub fn new(rows: Vec<RentalRow>) -> Self {
        Self {
            rows,
            unavailable: false,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            rows: Vec::new(),
            unavailable: true,
        }
    }

    fn check_available(&self, context: &'static str) -> Result<(), RentalsError> {
        if self.unavailable {
            return Err(RentalsError::internal(context, sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

#[async_trait]
impl RentalsRepository for InMemoryRentalsRepo {
    async fn get_rental(&self, id: i32) -> Result<Rental, RentalsError> {
        self.check_available("failed to get rental")?;

        self.rows
            .iter()
            .find(|row| row.id == id)
            .cloned()
            .map(Rental::from)
            .ok_or_else(|| RentalsError::rental_not_found(id))
    }

    async fn get_rentals(&self, params: &GetRentalsParams) -> Result<Vec<Rental>, RentalsError> {
        self.check_available("failed to get rentals")?;

        let query = RentalQuery::from_params(params);

        let mut rows = self
            .rows
            .iter()
            .filter(|row| query.filters.iter().all(|f| matches(f, row)))
            .collect::<Vec<_>>();

        if let Some(key) = query.sort {
            rows.sort_by(|a, b| compare(key, a, b).then(a.id.cmp(&b.id)));
        }

        let offset = query.offset.unwrap_or(0) as usize;
        let limit = query.limit.map_or(usize::MAX, |v| v as usize);

        Ok(rows
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .map(Rental::from)
            .collect())
    }
}

fn matches(filter: &RentalFilter, row: &RentalRow) -> bool {
    match filter {
        RentalFilter::IdIn(ids) => ids.contains(&row.id),
        RentalFilter::PriceAtLeast(min) => row.price >= *min,
        RentalFilter::PriceAtMost(max) => row.price <= *max,
        RentalFilter::Near(point) => distance_miles(*point, row.lat, row.lng) <= NEAR_RADIUS_MILES,
    }
}

fn compare(key: SortKey, a: &RentalRow, b: &RentalRow) -> Ordering {
    match key {
        SortKey::Id => a.id.cmp(&b.id),
        SortKey::Name => a.name.cmp(&b.name),
        SortKey::Type => a.rental_type.cmp(&b.rental_type),
        SortKey::Make => a.make.cmp(&b.make),
        SortKey::Model => a.model.cmp(&b.model),
        SortKey::Year => a.year.cmp(&b.year),
        SortKey::Length => a.length.total_cmp(&b.length),
        SortKey::Sleeps => a.sleeps.cmp(&b.sleeps),
        SortKey::Price => a.price.cmp(&b.price),
        SortKey::City => a.city.cmp(&b.city),
        SortKey::State => a.state.cmp(&b.state),
        SortKey::Zip => a.zip.cmp(&b.zip),
        SortKey::Country => a.country.cmp(&b.country),
        SortKey::Lat => a.lat.total_cmp(&b.lat),
        SortKey::Lng => a.lng.total_cmp(&b.lng),
    }
}
