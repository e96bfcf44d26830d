//! Cache Namespace - 缓存命名空间
//!
//! 三个命名空间各自对应一个存储目录与一个公开 URL 前缀。
//! 工件属于哪个命名空间只由产生它的请求形态决定，绝不混用。

use std::fmt;
use std::str::FromStr;

/// 缓存命名空间
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheNamespace {
    /// 自由文本合成，文件名为缓存 key（哈希）
    Text,
    /// 叫号语音的"票号"部分，文件名为净化短语 + 语言码
    Ticket,
    /// 叫号语音的"柜台"部分，文件名为净化短语 + 语言码
    Counter,
}

impl CacheNamespace {
    /// 全部命名空间（目录遍历、统计、清空时使用）
    pub const ALL: [CacheNamespace; 3] = [
        CacheNamespace::Text,
        CacheNamespace::Ticket,
        CacheNamespace::Counter,
    ];

    /// 存储目录名
    pub fn dir_name(&self) -> &'static str {
        match self {
            CacheNamespace::Text => "text",
            CacheNamespace::Ticket => "ticket",
            CacheNamespace::Counter => "counter",
        }
    }

    /// 公开访问的 URL 前缀
    pub fn url_prefix(&self) -> &'static str {
        match self {
            CacheNamespace::Text => "/text",
            CacheNamespace::Ticket => "/ticket",
            CacheNamespace::Counter => "/counter",
        }
    }
}

impl fmt::Display for CacheNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for CacheNamespace {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(CacheNamespace::Text),
            "ticket" => Ok(CacheNamespace::Ticket),
            "counter" => Ok(CacheNamespace::Counter),
            _ => Err(()),
        }
    }
}
