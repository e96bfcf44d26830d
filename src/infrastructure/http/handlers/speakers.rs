//! Speakers Handler - GET /speakers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::domain::default_speaker_table;
use crate::infrastructure::http::dto::SpeakersResponse;
use crate::infrastructure::http::state::AppState;

/// 列出引擎可用发音人与默认发音人表
///
/// 引擎不可达时降级为空列表（默认表仍然返回），不让端点失败。
pub async fn get_speakers(State(state): State<Arc<AppState>>) -> Json<SpeakersResponse> {
    let speakers = match state.tts_engine.speakers().await {
        Ok(speakers) => speakers,
        Err(e) => {
            tracing::warn!(error = %e, "Speaker list unavailable from engine");
            Vec::new()
        }
    };

    Json(SpeakersResponse {
        speakers,
        default_speakers: default_speaker_table(),
    })
}
