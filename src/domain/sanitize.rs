//! Filename Sanitization - 短语净化
//!
//! 把叫号短语（如 "Ticket 4"）转换为安全的文件名片段。
//! 必须是纯函数：同一短语永远得到同一文件名。

/// 将短语净化为文件系统安全的名字
///
/// 规则：全部小写；每个空白字符与路径分隔符（`/`、`\`）替换为 `_`。
/// 其余字符（包括 Unicode 字母）原样保留，短语之间不会因净化而互相碰撞。
pub fn safe_file_name(phrase: &str) -> String {
    phrase
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_whitespace() || c == '/' || c == '\\' {
                '_'
            } else {
                c
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_phrase() {
        assert_eq!(safe_file_name("Ticket 4"), "ticket_4");
        assert_eq!(safe_file_name("Counter 6"), "counter_6");
    }

    #[test]
    fn test_slashes_replaced() {
        assert_eq!(safe_file_name("a/b"), "a_b");
        assert_eq!(safe_file_name("..\\up"), ".._up");
        assert_eq!(safe_file_name("x/../y"), "x_.._y");
    }

    #[test]
    fn test_repeated_spaces() {
        // 不折叠：每个空白字符各自变成一个下划线
        assert_eq!(safe_file_name("Senha   12"), "senha___12");
        assert_eq!(safe_file_name("a\t b"), "a__b");
    }

    #[test]
    fn test_unicode_preserved() {
        assert_eq!(safe_file_name("Guichê 3"), "guichê_3");
        assert_eq!(safe_file_name("Señal Á"), "señal_á");
    }

    #[test]
    fn test_deterministic() {
        let a = safe_file_name("Ticket 4");
        let b = safe_file_name("Ticket 4");
        assert_eq!(a, b);
    }

    #[test]
    fn test_distinct_phrases_stay_distinct() {
        assert_ne!(safe_file_name("Ticket 4"), safe_file_name("Ticket 41"));
        assert_ne!(safe_file_name("Ticket 4"), safe_file_name("Counter 4"));
    }
}
