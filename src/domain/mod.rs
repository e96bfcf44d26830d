//! Domain Layer - 领域层
//!
//! 纯函数与值类型，不依赖任何基础设施：
//! - namespace: 缓存命名空间（text / ticket / counter）
//! - cache_key: 基于请求语义参数的缓存 key 推导
//! - sanitize: 播报短语到文件名的安全转换
//! - speaker: 按语言解析默认发音人

pub mod cache_key;
pub mod namespace;
pub mod sanitize;
pub mod speaker;

pub use cache_key::{clamp_speed, derive_cache_key, SPEED_MAX, SPEED_MIN};
pub use namespace::CacheNamespace;
pub use sanitize::safe_file_name;
pub use speaker::{default_speaker_table, resolve_speaker, GLOBAL_DEFAULT_SPEAKER};
