//! Uniform JSON response envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

/// Outcome reported in the `status` field of every response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    /// Request handled
    Success,
    /// Client error (validation, unknown id)
    Fail,
    /// Server error
    Error,
}

/// Response envelope: `{status, message?, data?}`
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip)]
    code: StatusCode,
}

impl<T> Envelope<T> {
    /// 200 success envelope carrying `data`
    pub fn ok(data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: None,
            data: Some(data),
            code: StatusCode::OK,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_code(mut self, code: StatusCode) -> Self {
        self.code = code;
        self
    }
}

impl Envelope<()> {
    /// Envelope without `data`
    pub fn message(status: ResponseStatus, code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: Some(message.into()),
            data: None,
            code,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (self.code, Json(self)).into_response()
    }
}

/// Envelope layout as documented in the OpenAPI schema
#[derive(Serialize, ToSchema)]
pub struct EnvelopeDoc {
    pub status: ResponseStatus,
    /// Human readable outcome
    pub message: Option<String>,
    /// Operation specific payload
    #[schema(value_type = Object)]
    pub data: Option<serde_json::Value>,
}
