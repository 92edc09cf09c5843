//! Error types and error response formatting.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::pagination::NavigationError;

/// API error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // General errors
    AuthenticationFailed,
    AuthorizationFailure,
    SessionExpired,
    InvalidSessionToken,
    InvalidInput,
    MissingRequiredField,
    InvalidQueryParameterValue,
    InvalidEmail,
    ResourceNotFound,
    RequestBodyTooLarge,
    NavigationFailed,
    InternalError,

    // Schedule and booking errors
    ClassNotFound,
    ClassFull,
    ClassInPast,
    BookingNotFound,
    BookingAlreadyCancelled,

    // Image errors
    ImageNotFound,
    UnsupportedImageType,
    ChecksumMismatch,

    // Admin and invitation errors
    AdminNotFound,
    AdminAlreadyExists,
    InviteNotFound,
    InviteExpired,
    InviteAlreadyRedeemed,
}

impl ErrorCode {
    /// Returns the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::AuthenticationFailed => "AuthenticationFailed",
            ErrorCode::AuthorizationFailure => "AuthorizationFailure",
            ErrorCode::SessionExpired => "SessionExpired",
            ErrorCode::InvalidSessionToken => "InvalidSessionToken",
            ErrorCode::InvalidInput => "InvalidInput",
            ErrorCode::MissingRequiredField => "MissingRequiredField",
            ErrorCode::InvalidQueryParameterValue => "InvalidQueryParameterValue",
            ErrorCode::InvalidEmail => "InvalidEmail",
            ErrorCode::ResourceNotFound => "ResourceNotFound",
            ErrorCode::RequestBodyTooLarge => "RequestBodyTooLarge",
            ErrorCode::NavigationFailed => "NavigationFailed",
            ErrorCode::InternalError => "InternalError",
            ErrorCode::ClassNotFound => "ClassNotFound",
            ErrorCode::ClassFull => "ClassFull",
            ErrorCode::ClassInPast => "ClassInPast",
            ErrorCode::BookingNotFound => "BookingNotFound",
            ErrorCode::BookingAlreadyCancelled => "BookingAlreadyCancelled",
            ErrorCode::ImageNotFound => "ImageNotFound",
            ErrorCode::UnsupportedImageType => "UnsupportedImageType",
            ErrorCode::ChecksumMismatch => "ChecksumMismatch",
            ErrorCode::AdminNotFound => "AdminNotFound",
            ErrorCode::AdminAlreadyExists => "AdminAlreadyExists",
            ErrorCode::InviteNotFound => "InviteNotFound",
            ErrorCode::InviteExpired => "InviteExpired",
            ErrorCode::InviteAlreadyRedeemed => "InviteAlreadyRedeemed",
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            ErrorCode::InvalidInput
            | ErrorCode::MissingRequiredField
            | ErrorCode::InvalidQueryParameterValue
            | ErrorCode::InvalidEmail
            | ErrorCode::ChecksumMismatch => StatusCode::BAD_REQUEST,

            // 401 Unauthorized
            ErrorCode::AuthenticationFailed
            | ErrorCode::SessionExpired
            | ErrorCode::InvalidSessionToken => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            ErrorCode::AuthorizationFailure => StatusCode::FORBIDDEN,

            // 404 Not Found
            ErrorCode::ResourceNotFound
            | ErrorCode::ClassNotFound
            | ErrorCode::BookingNotFound
            | ErrorCode::ImageNotFound
            | ErrorCode::AdminNotFound
            | ErrorCode::InviteNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            ErrorCode::ClassFull
            | ErrorCode::ClassInPast
            | ErrorCode::BookingAlreadyCancelled
            | ErrorCode::AdminAlreadyExists
            | ErrorCode::InviteExpired
            | ErrorCode::InviteAlreadyRedeemed => StatusCode::CONFLICT,

            // 413 Payload Too Large
            ErrorCode::RequestBodyTooLarge => StatusCode::PAYLOAD_TOO_LARGE,

            // 415 Unsupported Media Type
            ErrorCode::UnsupportedImageType => StatusCode::UNSUPPORTED_MEDIA_TYPE,

            // 500 Internal Server Error
            ErrorCode::NavigationFailed | ErrorCode::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Returns the default message for this error code.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::AuthenticationFailed => {
                "The request could not be authenticated. Check the email and access key \
                 or the bearer token supplied."
            }
            ErrorCode::AuthorizationFailure => {
                "This request is not authorized to perform this operation."
            }
            ErrorCode::SessionExpired => "The session has expired. Sign in again.",
            ErrorCode::InvalidSessionToken => "The session token is malformed.",
            ErrorCode::InvalidEmail => "The supplied email address is not valid.",
            ErrorCode::ClassNotFound => "The specified class does not exist.",
            ErrorCode::ClassFull => "The class has no spots left.",
            ErrorCode::ClassInPast => "The class has already taken place.",
            ErrorCode::BookingNotFound => "The specified booking does not exist.",
            ErrorCode::BookingAlreadyCancelled => "The booking is already cancelled.",
            ErrorCode::ImageNotFound => "The specified image does not exist.",
            ErrorCode::UnsupportedImageType => "The image content type is not supported.",
            ErrorCode::ChecksumMismatch => {
                "The Content-MD5 header does not match the uploaded body."
            }
            ErrorCode::AdminNotFound => "The specified administrator does not exist.",
            ErrorCode::AdminAlreadyExists => "An administrator with this email already exists.",
            ErrorCode::InviteNotFound => "The specified invitation does not exist.",
            ErrorCode::InviteExpired => "The invitation has expired.",
            ErrorCode::InviteAlreadyRedeemed => "The invitation has already been redeemed.",
            ErrorCode::RequestBodyTooLarge => "The request body exceeds the size limit.",
            ErrorCode::InternalError => "The server encountered an internal error.",
            _ => "An error occurred while processing the request.",
        }
    }
}

/// API error with code and message.
#[derive(Debug, Error)]
#[error("{code:?}: {message}")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
    pub request_id: Option<String>,
}

impl ApiError {
    /// Creates a new error with the given code and default message.
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.default_message().to_string(),
            code,
            request_id: None,
        }
    }

    /// Creates a new error with a custom message.
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            request_id: None,
        }
    }

    /// Sets the request ID for this error.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

impl From<NavigationError> for ApiError {
    fn from(err: NavigationError) -> Self {
        ApiError::with_message(ErrorCode::NavigationFailed, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status_code();
        let request_id = self
            .request_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        let body = json!({
            "error": {
                "code": self.code.as_str(),
                "message": self.message,
            },
            "requestId": request_id,
        });

        Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .header("x-request-id", &request_id)
            .header("x-error-code", self.code.as_str())
            .body(body.to_string().into())
            .unwrap()
    }
}

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
