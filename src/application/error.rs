//! 应用层错误定义

use thiserror::Error;

use super::ports::{CacheError, TtsError};

/// 应用层错误
///
/// 所有变体都是请求级的，没有错误会导致进程退出。
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 请求形态不合法：既没有可用文本，也没有完整的叫号短语对
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// 合成引擎失败（在请求边界捕获并返回结构化错误）
    #[error("Synthesis failed: {0}")]
    SynthesisFailed(String),

    /// 缓存存储错误
    #[error("Cache error: {0}")]
    CacheFailure(String),
}

impl ApplicationError {
    /// 创建验证错误
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }
}

impl From<TtsError> for ApplicationError {
    fn from(err: TtsError) -> Self {
        Self::SynthesisFailed(err.to_string())
    }
}

impl From<CacheError> for ApplicationError {
    fn from(err: CacheError) -> Self {
        Self::CacheFailure(err.to_string())
    }
}
