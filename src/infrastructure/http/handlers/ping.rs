//! Root / Ping Handlers

use axum::Json;

use crate::infrastructure::http::dto::RootResponse;
use serde::Serialize;

/// Ping 响应
#[derive(Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// 服务描述 - GET /
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        service: "chamada - TTS synthesis and announcement cache",
        version: env!("CARGO_PKG_VERSION"),
        synthesize: "/synthesize",
        speakers: "/speakers",
        cache: "/cache",
    })
}

/// Ping endpoint - 健康检查
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
