use thiserror::Error;

/// Broad failure classes used to decide how an error is surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Permission or tag-restriction failure, detected before any remote call
    Authorization,
    /// Malformed input caught before submission
    Validation,
    /// Network failure or non-2xx response
    Transport,
    /// 2xx response carrying an embedded error flag
    Logical,
    /// Post-delete refetch gave up after its bounded retries
    Reconcile,
    Internal,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Remote error: {0}")]
    Remote(String),

    #[error("Reconcile error: {0}")]
    RefetchExhausted(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Forbidden(_) => ErrorKind::Authorization,
            AppError::Validation(_) | AppError::NotFound(_) => ErrorKind::Validation,
            AppError::Transport(_) => ErrorKind::Transport,
            AppError::Remote(_) => ErrorKind::Logical,
            AppError::RefetchExhausted(_) => ErrorKind::Reconcile,
            AppError::Config(_) => ErrorKind::Internal,
        }
    }

    /// Message suitable for showing to the console user.
    ///
    /// Server-provided messages are passed through verbatim; empty ones fall
    /// back to a generic message so no failure is ever shown blank.
    pub fn user_message(&self) -> String {
        let (msg, fallback) = match self {
            AppError::Forbidden(m) => (m, "You are not allowed to perform this action"),
            AppError::Validation(m) => (m, "The submitted data is invalid"),
            AppError::NotFound(m) => (m, "The requested item was not found"),
            AppError::Transport(m) => (m, "Could not reach the server"),
            AppError::Remote(m) => (m, "The server rejected the request"),
            AppError::RefetchExhausted(m) => (m, "failed to fetch updated list"),
            AppError::Config(m) => (m, "Something went wrong"),
        };

        if msg.trim().is_empty() {
            fallback.to_string()
        } else {
            msg.clone()
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
