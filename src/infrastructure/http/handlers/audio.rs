//! Audio Handler - GET /audio/{namespace}/{filename}
//!
//! 按命名空间与文件名取单个工件，以 WAV 字节流返回。

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
};
use std::sync::Arc;
use tokio_util::io::ReaderStream;

use crate::domain::CacheNamespace;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

pub async fn get_audio_file(
    State(state): State<Arc<AppState>>,
    Path((namespace, filename)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let namespace: CacheNamespace = namespace
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Unknown audio namespace: {}", namespace)))?;

    // 路由参数不含 '/'，这里只防备 ".." 形式的逃逸
    if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
        return Err(ApiError::BadRequest("Invalid file name".to_string()));
    }

    let path = state.audio_cache.namespace_dir(namespace).join(&filename);

    let file = tokio::fs::File::open(&path).await.map_err(|_| {
        ApiError::NotFound(format!("Audio file not found: {}/{}", namespace, filename))
    })?;

    let size = file
        .metadata()
        .await
        .map(|m| m.len())
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let stream = ReaderStream::new(file);

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "audio/wav")
        .header(header::CONTENT_LENGTH, size)
        .body(Body::from_stream(stream))
        .map_err(|e| ApiError::Internal(e.to_string()))?)
}
