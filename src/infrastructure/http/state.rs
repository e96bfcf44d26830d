//! Application State

use std::sync::Arc;

use crate::application::{AudioCachePort, SpeakHandler, TtsEnginePort};
use crate::infrastructure::http::urls::{UrlMapper, DEFAULT_BASE_URL};

/// 应用状态
///
/// 端口与 SpeakHandler 由所有请求处理器共享。
pub struct AppState {
    pub audio_cache: Arc<dyn AudioCachePort>,
    pub tts_engine: Arc<dyn TtsEnginePort>,
    pub speak_handler: SpeakHandler,
    pub url_mapper: UrlMapper,
    /// Host 头缺失时响应 URL 使用的 Base URL（来自配置）
    pub fallback_base_url: String,
}

impl AppState {
    /// 创建应用状态
    pub fn new(audio_cache: Arc<dyn AudioCachePort>, tts_engine: Arc<dyn TtsEnginePort>) -> Self {
        Self::with_base_url(audio_cache, tts_engine, DEFAULT_BASE_URL)
    }

    /// 创建应用状态，指定配置的 Base URL 兜底
    pub fn with_base_url(
        audio_cache: Arc<dyn AudioCachePort>,
        tts_engine: Arc<dyn TtsEnginePort>,
        fallback_base_url: impl Into<String>,
    ) -> Self {
        let url_mapper = UrlMapper::new(audio_cache.as_ref());
        let speak_handler = SpeakHandler::new(audio_cache.clone(), tts_engine.clone());

        Self {
            audio_cache,
            tts_engine,
            speak_handler,
            url_mapper,
            fallback_base_url: fallback_base_url.into(),
        }
    }
}
