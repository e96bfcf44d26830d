//! Application Layer - 应用层
//!
//! - Ports: 出站端口（AudioCache, TtsEngine）
//! - Speak: 双形态请求解析与缓存决策

pub mod error;
pub mod ports;
pub mod speak;

pub use error::ApplicationError;
pub use ports::{
    AudioCachePort, CacheEntry, CacheError, CacheMetadata, CacheStats, NamespaceStats,
    SynthesisRequest, TtsEnginePort, TtsError, Voice,
};
pub use speak::{Announcement, SpeakCommand, SpeakHandler, SpeakOutcome, TextSpeech};
