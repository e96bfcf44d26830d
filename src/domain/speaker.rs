//! Speaker Resolution - 发音人解析
//!
//! 请求未指定发音人时，按语言查默认表；语言没有表项时回退到全局默认。

use std::collections::BTreeMap;

/// 全局默认发音人（语言在默认表中没有条目时使用）
pub const GLOBAL_DEFAULT_SPEAKER: &str = "Nova Hogarth";

/// 各语言的默认发音人
const DEFAULT_SPEAKERS: &[(&str, &str)] = &[
    ("pt", "Alma María"),
    ("en", "Nova Hogarth"),
    ("es", "Alma María"),
    ("fr", "Alison Dietlinde"),
    ("de", "Alison Dietlinde"),
    ("it", "Ana Florence"),
];

/// 解析本次请求实际使用的发音人
///
/// 显式指定 > 语言默认 > 全局默认。
pub fn resolve_speaker(explicit: Option<&str>, language: &str) -> String {
    if let Some(name) = explicit {
        return name.to_string();
    }

    DEFAULT_SPEAKERS
        .iter()
        .find(|(lang, _)| *lang == language)
        .map(|(_, speaker)| speaker.to_string())
        .unwrap_or_else(|| GLOBAL_DEFAULT_SPEAKER.to_string())
}

/// 默认发音人表（/speakers 端点展示用）
pub fn default_speaker_table() -> BTreeMap<String, String> {
    let mut table: BTreeMap<String, String> = DEFAULT_SPEAKERS
        .iter()
        .map(|(lang, speaker)| (lang.to_string(), speaker.to_string()))
        .collect();
    table.insert("default".to_string(), GLOBAL_DEFAULT_SPEAKER.to_string());
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_speaker_wins() {
        assert_eq!(resolve_speaker(Some("Ana Florence"), "pt"), "Ana Florence");
    }

    #[test]
    fn test_language_default() {
        assert_eq!(resolve_speaker(None, "pt"), "Alma María");
        assert_eq!(resolve_speaker(None, "it"), "Ana Florence");
    }

    #[test]
    fn test_global_fallback_for_unknown_language() {
        assert_eq!(resolve_speaker(None, "ja"), GLOBAL_DEFAULT_SPEAKER);
        assert_eq!(resolve_speaker(None, ""), GLOBAL_DEFAULT_SPEAKER);
    }

    #[test]
    fn test_table_contains_global_default() {
        let table = default_speaker_table();
        assert_eq!(table.get("default").unwrap(), GLOBAL_DEFAULT_SPEAKER);
        assert_eq!(table.get("pt").unwrap(), "Alma María");
    }
}
