//! Data Transfer Objects

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Synthesize DTOs
// ============================================================================

/// POST /synthesize 请求体
///
/// 两种形态共用：自由文本，或 ticket + counter 短语对。
#[derive(Debug, Deserialize)]
pub struct SynthesizeRequest {
    pub text: Option<String>,

    #[serde(default = "default_language")]
    pub language: String,

    pub reference_file: Option<String>,

    pub speaker: Option<String>,

    #[serde(default = "default_speed")]
    pub speed: f32,

    #[serde(default)]
    pub force_refresh: bool,

    pub ticket: Option<String>,

    pub counter: Option<String>,
}

fn default_language() -> String {
    "pt".to_string()
}

fn default_speed() -> f32 {
    1.0
}

/// 文本分支响应
#[derive(Debug, Serialize)]
pub struct TextSynthesisResponse {
    pub status: &'static str,
    pub kind: &'static str,
    pub text: String,
    pub language: String,
    pub speaker: String,
    pub reference_file: Option<String>,
    pub speed: f32,
    pub cache_key: String,
    pub cache_file: String,
    pub url: String,
    pub cached: bool,
    pub hits: u64,
}

/// 叫号分支的两段工件
#[derive(Debug, Serialize)]
pub struct AnnouncementParts {
    pub ticket: String,
    pub counter: String,
}

/// 叫号分支响应
#[derive(Debug, Serialize)]
pub struct AnnouncementResponse {
    pub status: &'static str,
    pub kind: &'static str,
    pub ticket: String,
    pub counter: String,
    pub language: String,
    pub speaker: String,
    pub speed: f32,
    pub files: AnnouncementParts,
    pub urls: AnnouncementParts,
    pub cached: AnnouncementCached,
}

/// 叫号分支各段是否命中
#[derive(Debug, Serialize)]
pub struct AnnouncementCached {
    pub ticket: bool,
    pub counter: bool,
}

/// POST /synthesize 响应（两种形态之一）
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SynthesizeResponse {
    Text(TextSynthesisResponse),
    Announcement(AnnouncementResponse),
}

// ============================================================================
// Speakers / Cache DTOs
// ============================================================================

/// GET /speakers 响应
#[derive(Debug, Serialize)]
pub struct SpeakersResponse {
    pub speakers: Vec<String>,
    pub default_speakers: BTreeMap<String, String>,
}

/// GET /cache 响应
#[derive(Debug, Serialize)]
pub struct CacheInfoResponse {
    pub text_entries: usize,
    pub text_size_mb: f64,
    pub ticket_entries: usize,
    pub ticket_size_mb: f64,
    pub counter_entries: usize,
    pub counter_size_mb: f64,
    pub total_entries: usize,
    pub total_size_mb: f64,
}

/// DELETE /cache 响应
#[derive(Debug, Serialize)]
pub struct ClearCacheResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// GET / 响应
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub synthesize: &'static str,
    pub speakers: &'static str,
    pub cache: &'static str,
}

/// 字节数换算为 MB，保留两位小数
pub fn bytes_to_mb(bytes: u64) -> f64 {
    let mb = bytes as f64 / (1024.0 * 1024.0);
    (mb * 100.0).round() / 100.0
}
