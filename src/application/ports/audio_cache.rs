//! Audio Cache Port - 音频缓存管理
//!
//! 文件系统三命名空间缓存的抽象接口。文件是否存在是"是否已缓存"的
//! 唯一事实来源；JSON 元数据索引只是尽力而为的统计层（仅覆盖 text
//! 命名空间），索引缺失或损坏不得阻塞服务。

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::CacheNamespace;

/// Audio Cache 错误
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// 索引条目的请求参数（插入/重置时提供）
#[derive(Debug, Clone)]
pub struct CacheMetadata {
    pub text: String,
    pub language: String,
    pub speaker: Option<String>,
    pub speed: f32,
}

/// 元数据索引条目
///
/// hits 单调不减，只有整体清空才会移除条目。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub text: String,
    pub language: String,
    pub speaker: Option<String>,
    pub speed: f32,
    pub hits: u64,
    pub created: i64,
}

/// 单个命名空间的统计
#[derive(Debug, Clone, Copy, Default)]
pub struct NamespaceStats {
    pub files: usize,
    pub size_bytes: u64,
}

/// 缓存统计信息
///
/// 由目录遍历实时计算，不读索引，索引过期/缺失也保持准确。
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheStats {
    pub text: NamespaceStats,
    pub ticket: NamespaceStats,
    pub counter: NamespaceStats,
}

impl CacheStats {
    pub fn namespace(&self, ns: CacheNamespace) -> NamespaceStats {
        match ns {
            CacheNamespace::Text => self.text,
            CacheNamespace::Ticket => self.ticket,
            CacheNamespace::Counter => self.counter,
        }
    }

    pub fn total_files(&self) -> usize {
        self.text.files + self.ticket.files + self.counter.files
    }

    pub fn total_size_bytes(&self) -> u64 {
        self.text.size_bytes + self.ticket.size_bytes + self.counter.size_bytes
    }
}

/// Audio Cache Port
#[async_trait]
pub trait AudioCachePort: Send + Sync {
    /// 命名空间对应的存储目录
    fn namespace_dir(&self, namespace: CacheNamespace) -> PathBuf;

    /// 工件的确定性路径：`<namespace-dir>/<name>.wav`
    fn artifact_path(&self, namespace: CacheNamespace, name: &str) -> PathBuf;

    /// 工件是否已缓存（文件存在性检查）
    async fn exists(&self, namespace: CacheNamespace, name: &str) -> bool;

    /// 持久化工件；已存在则覆盖（force-refresh 路径）
    async fn write(
        &self,
        namespace: CacheNamespace,
        name: &str,
        audio_data: &[u8],
    ) -> Result<PathBuf, CacheError>;

    /// 记录一次命中：key 已存在则 hits + 1，否则以 hits = 1 插入
    ///
    /// 返回更新后的 hits。
    async fn record_hit(&self, key: &str, metadata: &CacheMetadata) -> Result<u64, CacheError>;

    /// 插入/覆盖索引条目并把 hits 重置为 1（缓存未命中或 force-refresh）
    async fn reset_entry(&self, key: &str, metadata: &CacheMetadata) -> Result<(), CacheError>;

    /// 查询索引条目（统计用）
    async fn entry(&self, key: &str) -> Option<CacheEntry>;

    /// 遍历目录计算各命名空间的文件数与字节数
    async fn stats(&self) -> Result<CacheStats, CacheError>;

    /// 删除全部三个命名空间的音频文件并把索引重置为空（持久化空索引）
    async fn clear(&self) -> Result<(), CacheError>;
}
