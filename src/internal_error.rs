use rocket::http::Status;
use rocket::request::Request;
use rocket::response::{self, Responder};
use thiserror::Error;
use tracing::{error, warn};

use std::sync::PoisonError;

#[derive(Debug, Error)]
pub enum InternalError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Connection lock poisoned: {0}")]
    Poisoned(String),
}

impl InternalError {
    pub fn bad_request(what: impl Into<String>) -> InternalError {
        InternalError::BadRequest(what.into())
    }

    pub fn not_found(what: impl Into<String>) -> InternalError {
        InternalError::NotFound(what.into())
    }

    pub fn status(&self) -> Status {
        match self {
            InternalError::BadRequest(_) => Status::BadRequest,
            InternalError::NotFound(_) => Status::NotFound,
            InternalError::Database(_) | InternalError::Json(_) | InternalError::Poisoned(_) => {
                Status::InternalServerError
            }
        }
    }
}

impl<T> From<PoisonError<T>> for InternalError {
    fn from(e: PoisonError<T>) -> InternalError {
        InternalError::Poisoned(e.to_string())
    }
}

impl<'r> Responder<'r, 'static> for InternalError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();

        if status == Status::InternalServerError {
            error!(uri = %request.uri(), "{}", self);
        } else {
            warn!(uri = %request.uri(), status = status.code, "{}", self);
        }

        (status, self.to_string()).respond_to(request)
    }
}

pub type InternalResult<T> = Result<T, InternalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_error_kind() {
        assert_eq!(
            InternalError::bad_request("Invalid date").status(),
            Status::BadRequest
        );
        assert_eq!(
            InternalError::not_found("Entry not found").status(),
            Status::NotFound
        );
        assert_eq!(
            InternalError::from(rusqlite::Error::QueryReturnedNoRows).status(),
            Status::InternalServerError
        );
    }

    #[test]
    fn client_errors_display_their_message_only() {
        assert_eq!(
            InternalError::not_found("Habit tracker not found").to_string(),
            "Habit tracker not found"
        );
    }
}
