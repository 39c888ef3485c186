use std::fmt;

use lastos_core::context::StoreError;
use reqwest::StatusCode;

/// Failure of a backend call.
#[derive(Debug)]
pub enum ApiError {
    /// The request never produced a response (connect, timeout, body read).
    Transport(reqwest::Error),
    /// Non-2xx response.
    Status {
        status: u16,
        /// The body's `error` field, else the HTTP reason phrase.
        message: String,
        /// Parsed JSON body, or the raw text as a JSON string.
        body: serde_json::Value,
    },
    /// A 2xx body that does not match the expected shape, or a request body
    /// that failed to serialize.
    Decode(serde_json::Error),
}

impl ApiError {
    /// Build the error for a non-2xx response from its status and raw body.
    pub fn from_response(status: StatusCode, text: &str) -> Self {
        let body = serde_json::from_str::<serde_json::Value>(text)
            .unwrap_or_else(|_| serde_json::Value::String(text.to_string()));
        let message = body
            .get("error")
            .and_then(|e| e.as_str())
            .map(str::to_string)
            .or_else(|| status.canonical_reason().map(str::to_string))
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
        ApiError::Status {
            status: status.as_u16(),
            message,
            body,
        }
    }

    /// HTTP status, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            ApiError::Decode(_) => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(err) => write!(f, "request failed: {err}"),
            ApiError::Status {
                status, message, ..
            } => write!(f, "{message} (HTTP {status})"),
            ApiError::Decode(err) => write!(f, "unexpected response body: {err}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Transport(err) => Some(err),
            ApiError::Decode(err) => Some(err),
            ApiError::Status { .. } => None,
        }
    }
}

/// Failure of the sign-in, sign-out or token-refresh flow.
#[derive(Debug)]
pub enum AuthError {
    /// The identity provider rejected or failed the operation.
    Provider(String),
    /// The account's email is outside the allowed domain.
    DomainRestricted { email: String, domain: String },
    /// The session context could not be persisted.
    Store(StoreError),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Provider(msg) => write!(f, "identity provider error: {msg}"),
            AuthError::DomainRestricted { email, domain } => {
                write!(f, "only @{domain} emails are allowed (signed in as {email:?})")
            },
            AuthError::Store(err) => write!(f, "could not persist credentials: {err}"),
        }
    }
}

impl std::error::Error for AuthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AuthError::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        AuthError::Store(err)
    }
}
