//! Error types for the service-protocol hooks.
//!
//! Codes follow JSON-RPC conventions so debugging clients can tell an invalid
//! request apart from a view that simply no longer exists.

use serde::Serialize;
use thiserror::Error;

// ============================================================================
// Error Codes
// ============================================================================

/// Stable numeric codes reported to protocol clients
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum HooksErrorCode {
    /// No live view matches the requested handle
    ViewNotFound = -32000,
    /// The owning context did not produce a snapshot in time
    SnapshotTimeout = -32001,
    /// The owning context has shut down
    OwnerUnavailable = -32002,
    /// Method not found
    MethodNotFound = -32601,
    /// Missing or malformed request parameter
    InvalidParams = -32602,
    /// Internal error (registration, configuration)
    Internal = -32603,
}

// ============================================================================
// Error Type
// ============================================================================

/// Errors produced while registering or serving extension requests
#[derive(Debug, Error)]
pub enum HooksError {
    #[error("[{}] Invalid params: {0}", HooksErrorCode::InvalidParams as i32)]
    InvalidParams(String),

    #[error("[{}] Method not found: {0}", HooksErrorCode::MethodNotFound as i32)]
    MethodNotFound(String),

    #[error("[{}] View not found: {0}", HooksErrorCode::ViewNotFound as i32)]
    ViewNotFound(String),

    #[error(
        "[{}] Timed out after {timeout_ms}ms waiting for the view snapshot",
        HooksErrorCode::SnapshotTimeout as i32
    )]
    SnapshotTimeout { timeout_ms: u64 },

    #[error("[{}] Owning context unavailable: {0}", HooksErrorCode::OwnerUnavailable as i32)]
    OwnerUnavailable(String),

    #[error("[{}] Registration failed for '{name}': {reason}", HooksErrorCode::Internal as i32)]
    Registration { name: String, reason: String },

    #[error("[{}] Configuration error: {0}", HooksErrorCode::Internal as i32)]
    Config(String),
}

impl HooksError {
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::InvalidParams(message.into())
    }

    pub fn method_not_found(method: impl Into<String>) -> Self {
        Self::MethodNotFound(method.into())
    }

    pub fn view_not_found(view_id: impl Into<String>) -> Self {
        Self::ViewNotFound(view_id.into())
    }

    pub fn owner_unavailable(message: impl Into<String>) -> Self {
        Self::OwnerUnavailable(message.into())
    }

    pub fn registration(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Registration {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn code(&self) -> HooksErrorCode {
        match self {
            Self::InvalidParams(_) => HooksErrorCode::InvalidParams,
            Self::MethodNotFound(_) => HooksErrorCode::MethodNotFound,
            Self::ViewNotFound(_) => HooksErrorCode::ViewNotFound,
            Self::SnapshotTimeout { .. } => HooksErrorCode::SnapshotTimeout,
            Self::OwnerUnavailable(_) => HooksErrorCode::OwnerUnavailable,
            Self::Registration { .. } | Self::Config(_) => HooksErrorCode::Internal,
        }
    }

    /// Short, client-facing message for the error object
    fn message(&self) -> &'static str {
        match self {
            Self::InvalidParams(_) => "Invalid params",
            Self::MethodNotFound(_) => "Method not found",
            Self::ViewNotFound(_) => "View not found",
            Self::SnapshotTimeout { .. } => "View snapshot timed out",
            Self::OwnerUnavailable(_) => "Owning context unavailable",
            Self::Registration { .. } | Self::Config(_) => "Internal error",
        }
    }

    /// Render the error as the JSON error object handed back to the dispatcher:
    /// `{"code":<int>,"message":"<text>","data":{"details":"<text>"}}`
    pub fn to_json(&self) -> String {
        let object = ErrorObject {
            code: self.code() as i32,
            message: self.message(),
            data: ErrorData {
                details: self.to_string(),
            },
        };
        // A struct of integers and strings always serializes.
        serde_json::to_string(&object).unwrap_or_default()
    }
}

#[derive(Serialize)]
struct ErrorObject {
    code: i32,
    message: &'static str,
    data: ErrorData,
}

#[derive(Serialize)]
struct ErrorData {
    details: String,
}

pub type Result<T> = std::result::Result<T, HooksError>;
