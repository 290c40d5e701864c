use salvo::http::StatusCode;
use thiserror::Error;

use tatami_core::error::CoreError;
use tatami_db::error::DbError;
use tatami_service::error::ServiceError;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] ServiceError),

    #[error(transparent)]
    DatabaseError(#[from] DbError),

    #[error(transparent)]
    CoreError(#[from] CoreError),
}

pub type AppResult<T> = std::result::Result<T, AppError>;

impl AppError {
    /// ## Summary
    /// HTTP status for the error taxonomy: validation and capacity failures
    /// are client errors, missing targets are 404, storage failures stay
    /// opaque 500s.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ServiceError(err) => service_status(err),
            Self::CoreError(err) => core_status(err),
            Self::DatabaseError(DbError::CoreError(err)) => core_status(err),
            Self::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn service_status(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::CoreError(core) => core_status(core),
        ServiceError::DatabaseError(DbError::CoreError(core)) => core_status(core),
        ServiceError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn core_status(err: &CoreError) -> StatusCode {
    match err {
        CoreError::InvalidWindow { .. }
        | CoreError::CapacityExceeded(_)
        | CoreError::ValidationError(_)
        | CoreError::ParseError(_) => StatusCode::BAD_REQUEST,
        CoreError::NotFound(_) => StatusCode::NOT_FOUND,
        CoreError::InvalidConfiguration(_) | CoreError::InvariantViolation(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
