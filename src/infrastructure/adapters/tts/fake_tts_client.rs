//! Fake TTS Client - 用于测试的合成引擎
//!
//! 始终返回固定的音频字节，不实际调用合成服务；
//! 记录调用次数，可配置在第 N 次之后开始失败（模拟引擎故障）。

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::application::ports::{SynthesisRequest, TtsEnginePort, TtsError};

/// Fake TTS Client 配置
#[derive(Debug, Clone)]
pub struct FakeTtsClientConfig {
    /// 固定返回的音频字节
    pub audio_data: Vec<u8>,
    /// /speakers 返回的发音人列表
    pub speakers: Vec<String>,
    /// 前 N 次调用成功，之后全部失败；None 表示永不失败
    pub fail_after: Option<usize>,
}

impl Default for FakeTtsClientConfig {
    fn default() -> Self {
        Self {
            audio_data: b"RIFFfake-wav-payload".to_vec(),
            speakers: vec!["Nova Hogarth".to_string(), "Alma María".to_string()],
            fail_after: None,
        }
    }
}

/// Fake TTS Client
pub struct FakeTtsClient {
    config: FakeTtsClientConfig,
    calls: AtomicUsize,
    last_request: Mutex<Option<SynthesisRequest>>,
}

impl FakeTtsClient {
    pub fn new(config: FakeTtsClientConfig) -> Self {
        Self {
            config,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(FakeTtsClientConfig::default())
    }

    /// 已发生的合成调用次数
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// 最近一次收到的合成请求
    pub fn last_request(&self) -> Option<SynthesisRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl TtsEnginePort for FakeTtsClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<Vec<u8>, TtsError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        *self.last_request.lock().unwrap() = Some(request.clone());

        if let Some(limit) = self.config.fail_after {
            if call > limit {
                return Err(TtsError::ServiceError(format!(
                    "fake engine failure on call {}",
                    call
                )));
            }
        }

        tracing::debug!(
            call = call,
            text_len = request.text.len(),
            "FakeTtsClient: returning fixed audio"
        );

        Ok(self.config.audio_data.clone())
    }

    async fn speakers(&self) -> Result<Vec<String>, TtsError> {
        Ok(self.config.speakers.clone())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
