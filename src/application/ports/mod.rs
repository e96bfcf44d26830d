//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_cache;
mod tts_engine;

pub use audio_cache::{
    AudioCachePort, CacheEntry, CacheError, CacheMetadata, CacheStats, NamespaceStats,
};
pub use tts_engine::{SynthesisRequest, TtsEnginePort, TtsError, Voice};
