//! HTTP TTS Client - 调用外部合成引擎（XTTS sidecar）
//!
//! 实现 TtsEnginePort trait，通过 HTTP 调用外部合成服务
//!
//! 外部 TTS API:
//! POST {base}/api/tts
//! Request: {"text": "...", "language": "pt", "speed": 1.0,
//!           "speaker": "..." 或 "speaker_wav": "..."}  (JSON，二者互斥)
//! Response: audio/wav binary
//! GET {base}/api/speakers -> {"speakers": ["...", ...]}

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{SynthesisRequest, TtsEnginePort, TtsError, Voice};

/// 合成请求体 (JSON)
#[derive(Debug, Serialize)]
struct TtsHttpRequest {
    /// 要合成的文本
    text: String,
    /// 语言码
    language: String,
    /// 语速
    speed: f32,
    /// 预置发音人名（与 speaker_wav 互斥）
    #[serde(skip_serializing_if = "Option::is_none")]
    speaker: Option<String>,
    /// 参考音频路径（与 speaker 互斥）
    #[serde(skip_serializing_if = "Option::is_none")]
    speaker_wav: Option<String>,
}

/// 发音人列表响应体
#[derive(Debug, Deserialize)]
struct SpeakersHttpResponse {
    speakers: Vec<String>,
}

/// HTTP TTS 客户端配置
#[derive(Debug, Clone)]
pub struct HttpTtsClientConfig {
    /// 合成服务基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 网络错误重试次数
    pub max_retries: u32,
}

impl Default for HttpTtsClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5002".to_string(),
            timeout_secs: 120,
            max_retries: 0,
        }
    }
}

impl HttpTtsClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// HTTP TTS 客户端
pub struct HttpTtsClient {
    client: Client,
    config: HttpTtsClientConfig,
}

impl HttpTtsClient {
    /// 创建新的 HTTP TTS 客户端
    pub fn new(config: HttpTtsClientConfig) -> Result<Self, TtsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TtsError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn synthesize_url(&self) -> String {
        format!("{}/api/tts", self.config.base_url)
    }

    fn speakers_url(&self) -> String {
        format!("{}/api/speakers", self.config.base_url)
    }

    fn health_url(&self) -> String {
        format!("{}/health", self.config.base_url)
    }

    /// 单次合成调用
    async fn synthesize_once(&self, body: &TtsHttpRequest) -> Result<Vec<u8>, TtsError> {
        let response = self
            .client
            .post(self.synthesize_url())
            .json(body)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TtsError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let audio_data = response
            .bytes()
            .await
            .map_err(|e| TtsError::InvalidResponse(format!("Failed to read audio: {}", e)))?
            .to_vec();

        if audio_data.is_empty() {
            return Err(TtsError::InvalidResponse("Empty audio payload".to_string()));
        }

        Ok(audio_data)
    }
}

fn map_send_error(e: reqwest::Error) -> TtsError {
    if e.is_timeout() {
        TtsError::Timeout
    } else if e.is_connect() {
        TtsError::NetworkError(format!("Cannot connect to TTS service: {}", e))
    } else {
        TtsError::NetworkError(e.to_string())
    }
}

#[async_trait]
impl TtsEnginePort for HttpTtsClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<Vec<u8>, TtsError> {
        let (speaker, speaker_wav) = match &request.voice {
            Voice::Speaker(name) => (Some(name.clone()), None),
            Voice::Reference(path) => (None, Some(path.to_string_lossy().to_string())),
        };

        let body = TtsHttpRequest {
            text: request.text.clone(),
            language: request.language.clone(),
            speed: request.speed,
            speaker,
            speaker_wav,
        };

        tracing::debug!(
            url = %self.synthesize_url(),
            text_len = body.text.len(),
            language = %body.language,
            "Sending synthesis request"
        );

        // 仅网络级错误重试；服务端错误直接上抛
        let mut attempt = 0;
        loop {
            match self.synthesize_once(&body).await {
                Ok(audio) => {
                    tracing::info!(
                        audio_size = audio.len(),
                        attempts = attempt + 1,
                        "Synthesis completed"
                    );
                    return Ok(audio);
                }
                Err(e @ (TtsError::NetworkError(_) | TtsError::Timeout))
                    if attempt < self.config.max_retries =>
                {
                    attempt += 1;
                    tracing::warn!(
                        error = %e,
                        attempt = attempt,
                        max_retries = self.config.max_retries,
                        "Synthesis attempt failed, retrying"
                    );
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn speakers(&self) -> Result<Vec<String>, TtsError> {
        let response = self
            .client
            .get(self.speakers_url())
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TtsError::ServiceError(format!("HTTP {}", status)));
        }

        let body: SpeakersHttpResponse = response
            .json()
            .await
            .map_err(|e| TtsError::InvalidResponse(e.to_string()))?;

        Ok(body.speakers)
    }

    async fn health_check(&self) -> bool {
        match self
            .client
            .get(self.health_url())
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_config_default() {
        let config = HttpTtsClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:5002");
        assert_eq!(config.timeout_secs, 120);
    }

    #[test]
    fn test_config_builder() {
        let config = HttpTtsClientConfig::new("http://tts:9000").with_timeout(60);
        assert_eq!(config.base_url, "http://tts:9000");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn test_request_body_voice_exclusivity() {
        let speaker_body = TtsHttpRequest {
            text: "Oi".to_string(),
            language: "pt".to_string(),
            speed: 1.0,
            speaker: Some("Alma María".to_string()),
            speaker_wav: None,
        };
        let json = serde_json::to_value(&speaker_body).unwrap();
        assert!(json.get("speaker").is_some());
        assert!(json.get("speaker_wav").is_none());

        let reference_body = TtsHttpRequest {
            text: "Oi".to_string(),
            language: "pt".to_string(),
            speed: 1.0,
            speaker: None,
            speaker_wav: Some(PathBuf::from("/tmp/ref.wav").to_string_lossy().to_string()),
        };
        let json = serde_json::to_value(&reference_body).unwrap();
        assert!(json.get("speaker").is_none());
        assert!(json.get("speaker_wav").is_some());
    }
}
