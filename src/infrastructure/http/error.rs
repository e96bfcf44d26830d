//! HTTP Error Handling
//!
//! 验证错误与工件获取错误使用真实 4xx 状态码；引擎错误在请求
//! 边界捕获，以 HTTP 200 + 结构化错误体返回（不升级为传输层故障，
//! 进程永不因此崩溃）。

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::ApplicationError;

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub errno: i32,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(errno: i32, message: impl Into<String>) -> Self {
        Self {
            status: "error",
            errno,
            message: message.into(),
        }
    }
}

/// 错误码定义
pub mod errno {
    pub const BAD_REQUEST: i32 = 400;
    pub const NOT_FOUND: i32 = 404;
    pub const INTERNAL_ERROR: i32 = 500;
    pub const ENGINE_ERROR: i32 = 502;
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Engine(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, response) = match &self {
            ApiError::BadRequest(msg) => {
                tracing::warn!(errno = errno::BAD_REQUEST, error = %msg, "Bad request");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new(errno::BAD_REQUEST, msg.clone()),
                )
            }
            ApiError::NotFound(msg) => {
                tracing::warn!(errno = errno::NOT_FOUND, error = %msg, "Resource not found");
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse::new(errno::NOT_FOUND, msg.clone()),
                )
            }
            ApiError::Engine(msg) => {
                tracing::error!(errno = errno::ENGINE_ERROR, error = %msg, "Synthesis engine error");
                (
                    StatusCode::OK,
                    ErrorResponse::new(errno::ENGINE_ERROR, msg.clone()),
                )
            }
            ApiError::Internal(msg) => {
                tracing::error!(errno = errno::INTERNAL_ERROR, error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(errno::INTERNAL_ERROR, msg.clone()),
                )
            }
        };

        (status, Json(response)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::InvalidRequest(msg) => ApiError::BadRequest(msg),
            ApplicationError::SynthesisFailed(msg) => ApiError::Engine(msg),
            ApplicationError::CacheFailure(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<crate::application::ports::CacheError> for ApiError {
    fn from(e: crate::application::ports::CacheError) -> Self {
        ApiError::Internal(e.to_string())
    }
}
