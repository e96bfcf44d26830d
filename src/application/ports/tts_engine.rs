//! TTS Engine Port - 合成引擎抽象
//!
//! 神经网络合成引擎是外部协作者，这里只定义抽象接口，
//! 具体实现在 infrastructure/adapters 层（HTTP sidecar / 测试用 Fake）。

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// TTS 错误
#[derive(Debug, Error)]
pub enum TtsError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 本次合成使用的音色
///
/// 预置发音人与参考音频二选一，绝不同时传给引擎。
#[derive(Debug, Clone)]
pub enum Voice {
    /// 模型内置发音人名
    Speaker(String),
    /// 参考音频文件路径（引擎自行读取做音色克隆）
    Reference(PathBuf),
}

/// 合成请求
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    /// 要合成的文本
    pub text: String,
    /// 语言码（如 "pt"、"en"）
    pub language: String,
    /// 音色
    pub voice: Voice,
    /// 语速（调用方已钳制到合法区间）
    pub speed: f32,
}

/// TTS Engine Port
#[async_trait]
pub trait TtsEnginePort: Send + Sync {
    /// 执行一次合成，返回 WAV 字节流
    ///
    /// 引擎错误是请求级的：调用方捕获后以结构化错误返回，不得使进程崩溃。
    async fn synthesize(&self, request: SynthesisRequest) -> Result<Vec<u8>, TtsError>;

    /// 列出引擎可用的发音人
    async fn speakers(&self) -> Result<Vec<String>, TtsError>;

    /// 检查引擎是否可用
    async fn health_check(&self) -> bool {
        true // 默认实现
    }
}
