//! HTTP Error Handling
//!
//! 错误以对应的 HTTP 状态码返回，响应体携带可区分的类别与可读信息

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::ApplicationError;

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub errno: u16,
    pub kind: &'static str,
    pub error: String,
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    /// 422 - 请求内容不合法
    Validation(String),
    /// 400 - 标识符格式错误
    InvalidIdentifier(String),
    /// 404 - 资源不存在
    NotFound(String),
    /// 503 - 存储未连接
    StoreUnavailable(String),
    /// 500 - 存储或内部错误
    Internal(String),
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str, &str) {
        match self {
            ApiError::Validation(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", msg)
            }
            ApiError::InvalidIdentifier(msg) => (StatusCode::BAD_REQUEST, "invalid_identifier", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::StoreUnavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "store_unavailable", msg)
            }
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "store_error", msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, msg) = self.parts();

        if status.is_server_error() {
            tracing::error!(errno = status.as_u16(), kind, error = %msg, "Request failed");
        } else {
            tracing::warn!(errno = status.as_u16(), kind, error = %msg, "Request rejected");
        }

        let body = ErrorResponse {
            errno: status.as_u16(),
            kind,
            error: msg.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::ValidationError(msg) => ApiError::Validation(msg),
            ApplicationError::InvalidIdentifier { .. } => ApiError::InvalidIdentifier(e.to_string()),
            ApplicationError::NotFound(msg) => ApiError::NotFound(msg),
            ApplicationError::StoreUnavailable(_) => ApiError::StoreUnavailable(e.to_string()),
            ApplicationError::StoreError(_) | ApplicationError::InternalError(_) => {
                ApiError::Internal(e.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_error_status_codes() {
        let cases = [
            (
                ApplicationError::ValidationError("bad".to_string()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (ApplicationError::invalid_identifier("story"), StatusCode::BAD_REQUEST),
            (ApplicationError::not_found("Story not found"), StatusCode::NOT_FOUND),
            (
                ApplicationError::StoreUnavailable("down".to_string()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                ApplicationError::StoreError("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let response = ApiError::from(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn test_invalid_identifier_message() {
        let err = ApiError::from(ApplicationError::invalid_identifier("chapter"));
        assert!(matches!(err, ApiError::InvalidIdentifier(ref msg) if msg == "Invalid chapter id"));
    }
}
