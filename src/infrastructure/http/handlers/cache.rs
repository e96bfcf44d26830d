//! Cache Handlers - GET /cache, DELETE /cache

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::infrastructure::http::dto::{bytes_to_mb, CacheInfoResponse, ClearCacheResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 缓存统计：各命名空间与总计的文件数、大小（MB）
pub async fn get_cache_info(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CacheInfoResponse>, ApiError> {
    let stats = state.audio_cache.stats().await?;

    Ok(Json(CacheInfoResponse {
        text_entries: stats.text.files,
        text_size_mb: bytes_to_mb(stats.text.size_bytes),
        ticket_entries: stats.ticket.files,
        ticket_size_mb: bytes_to_mb(stats.ticket.size_bytes),
        counter_entries: stats.counter.files,
        counter_size_mb: bytes_to_mb(stats.counter.size_bytes),
        total_entries: stats.total_files(),
        total_size_mb: bytes_to_mb(stats.total_size_bytes()),
    }))
}

/// 清空全部三个命名空间并重置索引
pub async fn clear_cache(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ClearCacheResponse>, ApiError> {
    state.audio_cache.clear().await?;

    Ok(Json(ClearCacheResponse {
        status: "ok",
        message: "cache cleared",
    }))
}
