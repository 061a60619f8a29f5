use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::database::RentalsRepository;
use crate::error::RentalsError;
use crate::models::{GetRentalsParams, Rental};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct RentalsService {
    repo: Arc<dyn RentalsRepository>,
    timeout: Duration,
}

impl RentalsService {
    pub fn new(repo: Arc<dyn RentalsRepository>) -> Self {
        Self {
            repo,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn get_rental(&self, id: i32) -> Result<Rental, RentalsError> {
        self.deadline("get rental", self.repo.get_rental(id)).await
    }

    pub async fn get_rentals(&self, params: &GetRentalsParams) -> Result<Vec<Rental>, RentalsError> {
        debug!(
            ids = params.ids.len(),
            price_min = ?params.price_min,
            price_max = ?params.price_max,
            near = ?params.near,
            sort = params.sort.map(|k| k.as_str()),
            limit = ?params.limit,
            offset = ?params.offset,
            "listing rentals"
        );
        self.deadline("get rentals", self.repo.get_rentals(params)).await
    }

    // Dropping the store future on expiry abandons the in-flight query.
    async fn deadline<T>(
        &self,
        context: &'static str,
        call: impl Future<Output = Result<T, RentalsError>>,
    ) -> Result<T, RentalsError> {
        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| RentalsError::TimedOut {
                context,
                elapsed: self.timeout,
            })?
    }
}
