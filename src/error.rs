//! Error types for the Biblio client

use serde::Deserialize;
use thiserror::Error;

/// Error codes reported by the library server in its error bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    NotAuthorized = 2,
    DbFailure = 3,
    NoSuchUser = 4,
    NoSuchItem = 5,
    ItemNotAvailable = 7,
    Duplicate = 8,
    MaxBorrowsReached = 11,
    NotBorrowable = 12,
    SpecimenBorrowed = 13,
    BadValue = 18,
    UserIdentificationAlreadyExists = 19,
    UserHasBorrowedSpecimens = 21,
    Unknown = u32::MAX,
}

impl From<u32> for ErrorCode {
    fn from(v: u32) -> Self {
        match v {
            0 => ErrorCode::Success,
            1 => ErrorCode::Failure,
            2 => ErrorCode::NotAuthorized,
            3 => ErrorCode::DbFailure,
            4 => ErrorCode::NoSuchUser,
            5 => ErrorCode::NoSuchItem,
            7 => ErrorCode::ItemNotAvailable,
            8 => ErrorCode::Duplicate,
            11 => ErrorCode::MaxBorrowsReached,
            12 => ErrorCode::NotBorrowable,
            13 => ErrorCode::SpecimenBorrowed,
            18 => ErrorCode::BadValue,
            19 => ErrorCode::UserIdentificationAlreadyExists,
            21 => ErrorCode::UserHasBorrowedSpecimens,
            _ => ErrorCode::Unknown,
        }
    }
}

/// Error body returned by the server on non-2xx responses
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub code: u32,
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub message: String,
}

impl ErrorResponse {
    pub fn error_code(&self) -> ErrorCode {
        ErrorCode::from(self.code)
    }
}

/// How an error is surfaced to the user.
///
/// Business rejections land in a slice's `response` field, everything else
/// in its `error` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Business,
    Transport,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{message}")]
    Rejected {
        status: u16,
        code: ErrorCode,
        message: String,
    },

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid response payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Session storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl AppError {
    /// Split errors between backend business rejections and everything else
    pub fn class(&self) -> ErrorClass {
        match self {
            AppError::Rejected { .. } | AppError::Validation(_) | AppError::NotAuthenticated => {
                ErrorClass::Business
            }
            AppError::Server { .. }
            | AppError::Transport(_)
            | AppError::Decode(_)
            | AppError::Storage(_)
            | AppError::Config(_) => ErrorClass::Transport,
        }
    }

    /// Build an error from a non-success HTTP status and its raw body
    pub fn from_status(status: u16, body: &str) -> Self {
        let parsed = serde_json::from_str::<ErrorResponse>(body).ok();
        let message = match &parsed {
            Some(resp) if !resp.message.is_empty() => resp.message.clone(),
            Some(resp) if !resp.error.is_empty() => resp.error.clone(),
            _ if !body.trim().is_empty() => body.trim().to_string(),
            _ => format!("HTTP {}", status),
        };

        if status >= 500 {
            return AppError::Server { status, message };
        }

        AppError::Rejected {
            status,
            code: parsed
                .map(|resp| resp.error_code())
                .unwrap_or(ErrorCode::Unknown),
            message,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("Invalid value for {}", field),
                })
            })
            .collect::<Vec<_>>()
            .join(", ");
        AppError::Validation(message)
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
