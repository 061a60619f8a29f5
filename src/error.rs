use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidInput,
    Internal,
}

#[derive(Debug, Error)]
pub enum RentalsError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{context}: {source}")]
    Internal {
        context: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("{context}: timed out after {elapsed:?}")]
    TimedOut {
        context: &'static str,
        elapsed: std::time::Duration,
    },
}

impl RentalsError {
    pub fn rental_not_found(id: impl std::fmt::Display) -> Self {
        RentalsError::NotFound(format!("rental with id {} not found", id))
    }

    pub fn internal(context: &'static str, source: sqlx::Error) -> Self {
        RentalsError::Internal { context, source }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RentalsError::NotFound(_) => ErrorKind::NotFound,
            RentalsError::InvalidInput(_) => ErrorKind::InvalidInput,
            RentalsError::Internal { .. } | RentalsError::TimedOut { .. } => ErrorKind::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_rental() {
        let err = RentalsError::rental_not_found(404);
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "rental with id 404 not found");
    }

    #[test]
    fn internal_keeps_the_cause() {
        let err = RentalsError::internal("failed to get rentals", sqlx::Error::PoolTimedOut);
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert!(err.to_string().starts_with("failed to get rentals: "));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn timeout_is_internal() {
        let err = RentalsError::TimedOut {
            context: "get rentals",
            elapsed: std::time::Duration::from_millis(50),
        };
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(err.to_string(), "get rentals: timed out after 50ms");
    }
}
