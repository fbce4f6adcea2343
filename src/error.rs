use rocket::http::Status;
use rocket::response::{self, Responder};
use rocket::Request;
use rusqlite::ErrorCode;

/// Failure of a data-access operation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
    #[error("store connection failed: {0}")]
    Connection(String),
    #[error("database error: {0}")]
    Database(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound,
            rusqlite::Error::SqliteFailure(ref e, ref msg)
                if e.code == ErrorCode::ConstraintViolation =>
            {
                StoreError::ConstraintViolation(
                    msg.clone().unwrap_or_else(|| e.to_string()),
                )
            }
            other => StoreError::Database(other.to_string()),
        }
    }
}

impl From<r2d2::Error> for StoreError {
    fn from(err: r2d2::Error) -> Self {
        StoreError::Connection(err.to_string())
    }
}

impl StoreError {
    pub fn status(&self) -> Status {
        match self {
            StoreError::NotFound => Status::NotFound,
            StoreError::ConstraintViolation(_) => Status::Conflict,
            StoreError::Connection(_) | StoreError::Database(_) => Status::InternalServerError,
        }
    }
}

/// Hands the request over to the matching catcher.
impl<'r> Responder<'r, 'static> for StoreError {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        match &self {
            StoreError::NotFound => {
                log::warn!("{} {}: {}", req.method(), req.uri(), self)
            }
            StoreError::ConstraintViolation(_) => {
                log::warn!("{} {}: {}", req.method(), req.uri(), self)
            }
            _ => log::error!("{} {}: {}", req.method(), req.uri(), self),
        }
        Err(self.status())
    }
}
