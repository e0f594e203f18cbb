//! Status-coded response envelope returned by every boundary call.

use log::warn;
use pokedex_core::{ServiceError, ServiceResult};
use serde::Serialize;

pub const STATUS_OK: u16 = 200;
pub const STATUS_NO_CONTENT: u16 = 204;

/// Response envelope mirroring an HTTP reply.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse<T> {
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 200 with the read result as body.
    pub(crate) fn read(result: ServiceResult<T>) -> Self {
        match result {
            Ok(body) => Self {
                status: STATUS_OK,
                message: None,
                body: Some(body),
            },
            Err(err) => Self::failure(&err),
        }
    }

    /// 200 with a confirmation message and the created projection.
    pub(crate) fn created(result: ServiceResult<T>) -> Self {
        match result {
            Ok(body) => Self {
                status: STATUS_OK,
                message: Some("Successfully created".to_string()),
                body: Some(body),
            },
            Err(err) => Self::failure(&err),
        }
    }

    fn failure(err: &ServiceError) -> Self {
        let status = err.status_code();
        if status >= 500 {
            warn!("event=api_response module=api status=error code={status} error={err}");
        }
        Self {
            status,
            message: Some(err.to_string()),
            body: None,
        }
    }
}

impl ApiResponse<bool> {
    /// 200 with a confirmation message; body reports whether a row changed.
    pub(crate) fn updated(result: ServiceResult<bool>) -> Self {
        match result {
            Ok(applied) => Self {
                status: STATUS_OK,
                message: Some("Successfully updated".to_string()),
                body: Some(applied),
            },
            Err(err) => Self::failure(&err),
        }
    }
}

impl ApiResponse<()> {
    /// 204 without body, whatever the store reported.
    pub(crate) fn deleted<D>(result: ServiceResult<D>) -> Self {
        match result {
            Ok(_) => Self {
                status: STATUS_NO_CONTENT,
                message: None,
                body: None,
            },
            Err(err) => Self::failure(&err),
        }
    }
}

/// Absent payloads are a caller error.
pub(crate) fn require_payload<P>(payload: Option<P>) -> ServiceResult<P> {
    payload.ok_or_else(|| ServiceError::InvalidRequest("payload is required".to_string()))
}
