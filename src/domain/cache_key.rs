//! Cache Key - 缓存 key 推导
//!
//! 自由文本模式的缓存 key 由请求语义参数决定：
//! 固定顺序拼接 text、language、speaker、speed，可选追加参考音频的
//! 内容哈希，整体做 md5 得到 key。相同输入永远得到相同 key，
//! 这是整个缓存的核心性质。

use std::path::Path;

/// 语速下限
pub const SPEED_MIN: f32 = 0.5;
/// 语速上限
pub const SPEED_MAX: f32 = 3.0;

/// 参考音频读取失败时使用的占位片段
///
/// 读取失败只降级 key 的区分度，不中断整个请求。
const REFERENCE_ERROR_SENTINEL: &str = "reference_error";

/// speaker 缺省时使用的占位片段
const NO_SPEAKER_SENTINEL: &str = "None";

/// 将语速钳制到 [0.5, 3.0]
///
/// 越界输入静默纠正，从不拒绝。钳制发生在 key 推导与合成调用之前，
/// 因此 speed=10.0 与 speed=3.0 是同一个缓存条目。
pub fn clamp_speed(speed: f32) -> f32 {
    speed.clamp(SPEED_MIN, SPEED_MAX)
}

/// 推导自由文本模式的缓存 key
///
/// 参考音频按内容哈希参与 key：两个不同的参考文件绝不碰撞，
/// 同一文件换个路径仍然命中同一条缓存。
pub fn derive_cache_key(
    text: &str,
    language: &str,
    speaker: Option<&str>,
    speed: f32,
    reference_path: Option<&Path>,
) -> String {
    let mut parts: Vec<String> = vec![
        text.to_string(),
        language.to_string(),
        speaker.unwrap_or(NO_SPEAKER_SENTINEL).to_string(),
        speed.to_string(),
    ];

    if let Some(path) = reference_path {
        match std::fs::read(path) {
            Ok(bytes) => {
                parts.push(format!("{:x}", md5::compute(&bytes)));
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Reference audio unreadable, degrading cache key"
                );
                parts.push(REFERENCE_ERROR_SENTINEL.to_string());
            }
        }
    }

    let key_string = parts.join("_");
    format!("{:x}", md5::compute(key_string.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_deterministic() {
        let k1 = derive_cache_key("Hello", "en", Some("Nova Hogarth"), 1.0, None);
        let k2 = derive_cache_key("Hello", "en", Some("Nova Hogarth"), 1.0, None);
        assert_eq!(k1, k2);
        // md5 hex digest
        assert_eq!(k1.len(), 32);
    }

    #[test]
    fn test_sensitive_to_each_parameter() {
        let base = derive_cache_key("Hello", "en", Some("Nova Hogarth"), 1.0, None);
        assert_ne!(base, derive_cache_key("Hello!", "en", Some("Nova Hogarth"), 1.0, None));
        assert_ne!(base, derive_cache_key("Hello", "pt", Some("Nova Hogarth"), 1.0, None));
        assert_ne!(base, derive_cache_key("Hello", "en", Some("Alma María"), 1.0, None));
        assert_ne!(base, derive_cache_key("Hello", "en", Some("Nova Hogarth"), 1.5, None));
        assert_ne!(base, derive_cache_key("Hello", "en", None, 1.0, None));
    }

    #[test]
    fn test_reference_content_hashed_not_path() {
        let dir = tempfile::tempdir().unwrap();
        let path_a = dir.path().join("ref_a.wav");
        let path_b = dir.path().join("ref_b.wav");

        std::fs::File::create(&path_a)
            .unwrap()
            .write_all(b"same bytes")
            .unwrap();
        std::fs::File::create(&path_b)
            .unwrap()
            .write_all(b"same bytes")
            .unwrap();

        // 同内容不同路径 → 同一个 key
        let ka = derive_cache_key("Oi", "pt", None, 1.0, Some(&path_a));
        let kb = derive_cache_key("Oi", "pt", None, 1.0, Some(&path_b));
        assert_eq!(ka, kb);

        // 改内容 → key 变化
        std::fs::write(&path_b, b"other bytes").unwrap();
        let kc = derive_cache_key("Oi", "pt", None, 1.0, Some(&path_b));
        assert_ne!(ka, kc);
    }

    #[test]
    fn test_unreadable_reference_degrades_to_sentinel() {
        let missing = Path::new("/nonexistent/ref.wav");
        let k1 = derive_cache_key("Oi", "pt", None, 1.0, Some(missing));
        let k2 = derive_cache_key("Oi", "pt", None, 1.0, Some(missing));
        // 降级后仍然确定性
        assert_eq!(k1, k2);
        // 与不带参考音频的请求不是同一个 key
        assert_ne!(k1, derive_cache_key("Oi", "pt", None, 1.0, None));
    }

    #[test]
    fn test_clamp_speed() {
        assert_eq!(clamp_speed(10.0), SPEED_MAX);
        assert_eq!(clamp_speed(0.01), SPEED_MIN);
        assert_eq!(clamp_speed(1.0), 1.0);
        assert_eq!(clamp_speed(SPEED_MAX), SPEED_MAX);
    }

    #[test]
    fn test_clamped_speeds_share_key() {
        let a = derive_cache_key("Hi", "en", None, clamp_speed(10.0), None);
        let b = derive_cache_key("Hi", "en", None, clamp_speed(3.0), None);
        assert_eq!(a, b);
    }
}
