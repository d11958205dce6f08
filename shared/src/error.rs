use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use thiserror::Error;

/// Every failure the application can report. Validation-style errors are
/// deterministic and must not be retried; `Conflict` is the one retryable
/// kind, and `Unavailable` means the storage layer itself is unreachable.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("{0}")]
    ValidationError(#[from] garde::Report),
    #[error("schedule cannot be booked: {0}")]
    InvalidScheduleState(String),
    #[error("invalid month: {0}")]
    InvalidMonth(String),
    #[error("already booked on {}", join_dates(.0))]
    DuplicateBooking(Vec<NaiveDate>),
    #[error("no spots left on {}", join_dates(.0))]
    SlotFull(Vec<NaiveDate>),
    #[error("the booking window for next month has not opened yet")]
    BookingWindowClosed,
    #[error("authentication required")]
    Unauthenticated,
    #[error("operation not permitted")]
    Forbidden,
    #[error("illegal reservation state: {0}")]
    InvalidState(String),
    #[error("{0}")]
    EntityNotFound(String),
    #[error("conversion failed: {0}")]
    ConversionEntityError(String),
    #[error("transaction conflict, the request may be retried")]
    Conflict,
    #[error("storage unavailable")]
    Unavailable(#[source] sqlx::Error),
    #[error("transaction failed")]
    TransactionError(#[source] sqlx::Error),
    #[error("external service error: {0}")]
    ExternalServiceError(String),
}

pub type AppResult<T> = Result<T, AppError>;

// PostgreSQL SQLSTATE for a failed SERIALIZABLE transaction.
const PG_SERIALIZATION_FAILURE: &str = "40001";

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db) = e {
            if db.code().as_deref() == Some(PG_SERIALIZATION_FAILURE) {
                return AppError::Conflict;
            }
        }
        match e {
            sqlx::Error::RowNotFound => AppError::EntityNotFound("row not found".into()),
            other => AppError::Unavailable(other),
        }
    }
}

impl AppError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Conflict)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_)
            | AppError::ValidationError(_)
            | AppError::InvalidMonth(_)
            | AppError::ConversionEntityError(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::EntityNotFound(_) => StatusCode::NOT_FOUND,
            AppError::SlotFull(_) | AppError::Conflict => StatusCode::CONFLICT,
            AppError::InvalidScheduleState(_)
            | AppError::DuplicateBooking(_)
            | AppError::BookingWindowClosed
            | AppError::InvalidState(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Unavailable(_) | AppError::TransactionError(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::ExternalServiceError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(
                error.cause_chain = ?self,
                error.message = %self,
                "request failed"
            );
        }
        (status, self.to_string()).into_response()
    }
}

fn join_dates(dates: &[NaiveDate]) -> String {
    dates
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
