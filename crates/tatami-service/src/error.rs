use thiserror::Error;

/// Service layer errors - combines lower layers with orchestration outcomes
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    DatabaseError(#[from] tatami_db::error::DbError),

    #[error(transparent)]
    CoreError(#[from] tatami_core::error::CoreError),

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
