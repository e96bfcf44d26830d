//! URL Mapper - 工件路径到公开 URL 的映射
//!
//! 根据工件落在哪个命名空间目录，改写为对应的公开前缀
//! （/text /ticket /counter）。Base URL 取自入站请求头。

use axum::http::header::HOST;
use axum::http::HeaderMap;
use std::path::{Path, PathBuf};

use crate::application::ports::AudioCachePort;
use crate::domain::CacheNamespace;

/// 配置未给出 base_url 时的最终兜底
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// 从入站请求头推导 Base URL
///
/// scheme 取 X-Forwarded-Proto（反向代理场景），host 取 Host 头；
/// Host 头缺失时退回配置的 `server.base_url`。
pub fn base_url_from_headers(headers: &HeaderMap, fallback: &str) -> String {
    let host = headers
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if host.is_empty() {
        return fallback.to_string();
    }

    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");

    format!("{}://{}", scheme, host)
}

/// URL Mapper
#[derive(Debug, Clone)]
pub struct UrlMapper {
    dirs: Vec<(CacheNamespace, PathBuf)>,
}

impl UrlMapper {
    /// 从缓存的命名空间目录构建
    pub fn new(cache: &dyn AudioCachePort) -> Self {
        let dirs = CacheNamespace::ALL
            .iter()
            .map(|&ns| (ns, cache.namespace_dir(ns)))
            .collect();
        Self { dirs }
    }

    /// 把工件路径改写为公开 URL
    ///
    /// 路径不在任何命名空间目录下时原样返回（防御性兜底，
    /// 正常流程不会出现）。
    pub fn to_url(&self, base_url: &str, artifact_path: &Path) -> String {
        for (namespace, dir) in &self.dirs {
            if artifact_path.starts_with(dir) {
                let filename = artifact_path
                    .file_name()
                    .map(|f| f.to_string_lossy())
                    .unwrap_or_default();
                return format!("{}{}/{}", base_url, namespace.url_prefix(), filename);
            }
        }

        artifact_path.to_string_lossy().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::fs::FsAudioCache;
    use axum::http::HeaderValue;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_maps_each_namespace() {
        let dir = tempdir().unwrap();
        let cache = FsAudioCache::new(dir.path()).await.unwrap();
        let mapper = UrlMapper::new(&cache);

        let base = "http://example.com";
        let text_path = cache.artifact_path(CacheNamespace::Text, "abc123");
        let ticket_path = cache.artifact_path(CacheNamespace::Ticket, "ticket_4_pt");
        let counter_path = cache.artifact_path(CacheNamespace::Counter, "counter_6_pt");

        assert_eq!(mapper.to_url(base, &text_path), "http://example.com/text/abc123.wav");
        assert_eq!(
            mapper.to_url(base, &ticket_path),
            "http://example.com/ticket/ticket_4_pt.wav"
        );
        assert_eq!(
            mapper.to_url(base, &counter_path),
            "http://example.com/counter/counter_6_pt.wav"
        );
    }

    #[tokio::test]
    async fn test_unknown_path_passes_through() {
        let dir = tempdir().unwrap();
        let cache = FsAudioCache::new(dir.path()).await.unwrap();
        let mapper = UrlMapper::new(&cache);

        let outside = Path::new("/somewhere/else/file.wav");
        assert_eq!(mapper.to_url("http://x", outside), "/somewhere/else/file.wav");
    }

    #[test]
    fn test_base_url_from_headers() {
        let mut headers = HeaderMap::new();
        // Host 缺失 → 配置兜底
        assert_eq!(
            base_url_from_headers(&headers, "https://audio.example.org"),
            "https://audio.example.org"
        );
        assert_eq!(
            base_url_from_headers(&headers, DEFAULT_BASE_URL),
            "http://localhost:8000"
        );

        headers.insert(HOST, HeaderValue::from_static("tts.example.com"));
        assert_eq!(
            base_url_from_headers(&headers, DEFAULT_BASE_URL),
            "http://tts.example.com"
        );

        headers.insert("x-forwarded-proto", HeaderValue::from_static("https"));
        assert_eq!(
            base_url_from_headers(&headers, DEFAULT_BASE_URL),
            "https://tts.example.com"
        );
    }
}
