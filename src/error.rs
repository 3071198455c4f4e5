//! Defines the app level error type and its conversion to JSON error responses.
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A field required to create a transaction was missing or blank.
    #[error("missing required field \"{0}\"")]
    MissingField(&'static str),

    /// The amount could not be interpreted as a number.
    #[error("amount must be a number")]
    InvalidAmount,

    /// The amount was zero or negative.
    ///
    /// Whether money was spent or earned is recorded by the transaction type,
    /// so amounts are always positive.
    #[error("amount must be a positive number")]
    NonPositiveAmount,

    /// The date was not a valid calendar date in the format `YYYY-MM-DD`.
    #[error("\"{0}\" is not a valid date, expected the format YYYY-MM-DD")]
    InvalidDate(String),

    /// The transaction type was not one of "expense" or "income".
    #[error("\"{0}\" is not a valid transaction type, expected \"expense\" or \"income\"")]
    InvalidTransactionType(String),

    /// An empty string was used for a transaction description.
    #[error("description cannot be empty")]
    EmptyDescription,

    /// An update or delete request did not specify which transaction to act on.
    #[error("transaction ID is required")]
    MissingId,

    /// The request body was not valid JSON or did not have the expected shape.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update a transaction that does not exist
    #[error("tried to update a transaction that is not in the database")]
    UpdateMissingTransaction,

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that is not in the database")]
    DeleteMissingTransaction,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl Error {
    /// Whether the error was caused by bad input from the client.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Error::MissingField(_)
                | Error::InvalidAmount
                | Error::NonPositiveAmount
                | Error::InvalidDate(_)
                | Error::InvalidTransactionType(_)
                | Error::EmptyDescription
                | Error::MissingId
                | Error::InvalidBody(_)
        )
    }

    /// Whether the error was caused by an ID that matches no stored record.
    pub fn is_not_found_error(&self) -> bool {
        matches!(
            self,
            Error::NotFound | Error::UpdateMissingTransaction | Error::DeleteMissingTransaction
        )
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status_code, message) = match self {
            error if error.is_validation_error() => (StatusCode::BAD_REQUEST, error.to_string()),
            Error::NotFound => (StatusCode::NOT_FOUND, "Not found".to_owned()),
            error if error.is_not_found_error() => {
                (StatusCode::NOT_FOUND, "Transaction not found".to_owned())
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred, check the server logs for more details."
                        .to_owned(),
                )
            }
        };

        (status_code, Json(json!({ "error": message }))).into_response()
    }
}
