//! FS Audio Cache - 文件系统音频缓存实现
//!
//! 实现 AudioCachePort trait：
//! - 根目录下 text/ ticket/ counter/ 三个命名空间目录
//! - cache_index.json 统计索引（仅 text 命名空间），整体读-改-写
//! - 索引缺失/损坏降级为空索引，绝不阻塞启动或服务

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

use crate::application::ports::{
    AudioCachePort, CacheEntry, CacheError, CacheMetadata, CacheStats, NamespaceStats,
};
use crate::domain::CacheNamespace;

/// 索引文件名
const INDEX_FILE_NAME: &str = "cache_index.json";

/// 文件系统音频缓存
///
/// 索引由本对象独占持有（异步互斥锁后面），每次更新整体重写文件。
pub struct FsAudioCache {
    root: PathBuf,
    index_path: PathBuf,
    index: Mutex<HashMap<String, CacheEntry>>,
}

impl FsAudioCache {
    /// 创建缓存实例：建好三个命名空间目录并加载索引
    pub async fn new(root: impl AsRef<Path>) -> Result<Self, CacheError> {
        let root = root.as_ref().to_path_buf();

        for namespace in CacheNamespace::ALL {
            fs::create_dir_all(root.join(namespace.dir_name()))
                .await
                .map_err(|e| CacheError::IoError(e.to_string()))?;
        }

        let index_path = root.join(INDEX_FILE_NAME);
        let index = Self::load_index(&index_path).await;

        tracing::info!(
            root = %root.display(),
            entries = index.len(),
            "FsAudioCache initialized"
        );

        Ok(Self {
            root,
            index_path,
            index: Mutex::new(index),
        })
    }

    /// 缓存根目录
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 加载索引；缺失或损坏降级为空索引
    async fn load_index(path: &Path) -> HashMap<String, CacheEntry> {
        let bytes = match fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return HashMap::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Cache index unreadable, starting empty");
                return HashMap::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(index) => index,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Cache index corrupted, starting empty"
                );
                HashMap::new()
            }
        }
    }

    /// 整体持久化索引
    async fn persist_index(&self, index: &HashMap<String, CacheEntry>) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec_pretty(index)
            .map_err(|e| CacheError::SerializationError(e.to_string()))?;
        fs::write(&self.index_path, bytes)
            .await
            .map_err(|e| CacheError::IoError(e.to_string()))
    }

    /// 统计单个命名空间目录下的 .wav 文件
    async fn namespace_stats(&self, namespace: CacheNamespace) -> Result<NamespaceStats, CacheError> {
        let mut stats = NamespaceStats::default();
        let dir = self.namespace_dir(namespace);

        let mut entries = fs::read_dir(&dir)
            .await
            .map_err(|e| CacheError::IoError(e.to_string()))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| CacheError::IoError(e.to_string()))?
        {
            if entry.path().extension().map_or(false, |ext| ext == "wav") {
                stats.files += 1;
                if let Ok(metadata) = entry.metadata().await {
                    stats.size_bytes += metadata.len();
                }
            }
        }

        Ok(stats)
    }
}

#[async_trait]
impl AudioCachePort for FsAudioCache {
    fn namespace_dir(&self, namespace: CacheNamespace) -> PathBuf {
        self.root.join(namespace.dir_name())
    }

    fn artifact_path(&self, namespace: CacheNamespace, name: &str) -> PathBuf {
        self.namespace_dir(namespace).join(format!("{}.wav", name))
    }

    async fn exists(&self, namespace: CacheNamespace, name: &str) -> bool {
        self.artifact_path(namespace, name).exists()
    }

    async fn write(
        &self,
        namespace: CacheNamespace,
        name: &str,
        audio_data: &[u8],
    ) -> Result<PathBuf, CacheError> {
        let path = self.artifact_path(namespace, name);

        fs::write(&path, audio_data)
            .await
            .map_err(|e| CacheError::IoError(e.to_string()))?;

        tracing::debug!(
            namespace = %namespace,
            name = %name,
            size_bytes = audio_data.len(),
            "Artifact written"
        );

        Ok(path)
    }

    async fn record_hit(&self, key: &str, metadata: &CacheMetadata) -> Result<u64, CacheError> {
        let mut index = self.index.lock().await;

        let hits = match index.get_mut(key) {
            Some(entry) => {
                entry.hits += 1;
                entry.hits
            }
            None => {
                // 文件在、索引不在：索引曾丢失或被清过，补一条
                index.insert(
                    key.to_string(),
                    CacheEntry {
                        text: metadata.text.clone(),
                        language: metadata.language.clone(),
                        speaker: metadata.speaker.clone(),
                        speed: metadata.speed,
                        hits: 1,
                        created: Utc::now().timestamp(),
                    },
                );
                1
            }
        };

        self.persist_index(&index).await?;
        Ok(hits)
    }

    async fn reset_entry(&self, key: &str, metadata: &CacheMetadata) -> Result<(), CacheError> {
        let mut index = self.index.lock().await;

        index.insert(
            key.to_string(),
            CacheEntry {
                text: metadata.text.clone(),
                language: metadata.language.clone(),
                speaker: metadata.speaker.clone(),
                speed: metadata.speed,
                hits: 1,
                created: Utc::now().timestamp(),
            },
        );

        self.persist_index(&index).await
    }

    async fn entry(&self, key: &str) -> Option<CacheEntry> {
        self.index.lock().await.get(key).cloned()
    }

    async fn stats(&self) -> Result<CacheStats, CacheError> {
        Ok(CacheStats {
            text: self.namespace_stats(CacheNamespace::Text).await?,
            ticket: self.namespace_stats(CacheNamespace::Ticket).await?,
            counter: self.namespace_stats(CacheNamespace::Counter).await?,
        })
    }

    async fn clear(&self) -> Result<(), CacheError> {
        let mut deleted = 0u64;

        for namespace in CacheNamespace::ALL {
            let dir = self.namespace_dir(namespace);
            let mut entries = fs::read_dir(&dir)
                .await
                .map_err(|e| CacheError::IoError(e.to_string()))?;

            while let Some(entry) = entries
                .next_entry()
                .await
                .map_err(|e| CacheError::IoError(e.to_string()))?
            {
                if entry.path().extension().map_or(false, |ext| ext == "wav") {
                    fs::remove_file(entry.path())
                        .await
                        .map_err(|e| CacheError::IoError(e.to_string()))?;
                    deleted += 1;
                }
            }
        }

        let mut index = self.index.lock().await;
        index.clear();
        self.persist_index(&index).await?;

        tracing::info!(deleted_files = deleted, "Cache cleared");
        Ok(())
    }
}
