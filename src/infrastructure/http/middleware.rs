//! HTTP Middleware
//!
//! 请求日志中间件：记录延迟，4xx/5xx 提升日志级别

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};

/// 请求日志中间件
///
/// 每个请求记录方法、路径、状态码与耗时；4xx 记 warn，5xx 记 error。
/// 合成请求的耗时以引擎调用为主，未命中与命中的量级差异在这里可见。
/// 注意：引擎错误以 200 + 错误体返回，在 ApiError::into_response() 中记录
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let latency_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            latency_ms = latency_ms,
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            latency_ms = latency_ms,
            "HTTP client error"
        );
    } else {
        tracing::debug!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            latency_ms = latency_ms,
            "HTTP request served"
        );
    }

    response
}
