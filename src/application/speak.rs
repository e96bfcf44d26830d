//! Speak Handler - 请求解析与缓存决策
//!
//! 每个合成请求走两条分支之一：
//! - 叫号分支：ticket + counter 两段短语，分别落到 ticket / counter
//!   命名空间，文件名为净化短语 + 语言码
//! - 文本分支：自由文本，落到 text 命名空间，文件名为语义参数哈希
//!
//! 命中判定以文件存在性为准；text 分支额外维护统计索引。

use std::path::PathBuf;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::application::error::ApplicationError;
use crate::application::ports::{
    AudioCachePort, CacheMetadata, SynthesisRequest, TtsEnginePort, Voice,
};
use crate::domain::{
    clamp_speed, derive_cache_key, resolve_speaker, safe_file_name, CacheNamespace,
};

/// 合成命令（两种请求形态共用一个载体）
#[derive(Debug, Clone)]
pub struct SpeakCommand {
    /// 自由文本（文本分支）
    pub text: Option<String>,
    /// 语言码
    pub language: String,
    /// 参考音频路径（可选，音色克隆）
    pub reference_file: Option<String>,
    /// 显式发音人（可选）
    pub speaker: Option<String>,
    /// 请求语速（入口处钳制）
    pub speed: f32,
    /// 跳过存在性检查，强制重新合成并覆盖
    pub force_refresh: bool,
    /// 票号短语（叫号分支，如 "Ticket 4"）
    pub ticket: Option<String>,
    /// 柜台短语（叫号分支，如 "Counter 6"）
    pub counter: Option<String>,
}

/// 文本分支结果
#[derive(Debug, Clone)]
pub struct TextSpeech {
    pub text: String,
    pub language: String,
    pub speaker: String,
    pub reference_file: Option<String>,
    pub speed: f32,
    pub cache_key: String,
    pub artifact_path: PathBuf,
    /// 本次是否直接复用了已有工件
    pub cached: bool,
    /// 索引中的命中计数（miss / force-refresh 后为 1）
    pub hits: u64,
}

/// 叫号分支结果
#[derive(Debug, Clone)]
pub struct Announcement {
    pub ticket: String,
    pub counter: String,
    pub language: String,
    pub speaker: String,
    pub speed: f32,
    pub ticket_path: PathBuf,
    pub counter_path: PathBuf,
    pub ticket_cached: bool,
    pub counter_cached: bool,
}

/// 合成结果
#[derive(Debug, Clone)]
pub enum SpeakOutcome {
    Text(TextSpeech),
    Announcement(Announcement),
}

/// Speak Handler
///
/// 持有缓存与引擎端口。inflight 表对同一工件名的并发未命中做
/// 进程内串行化：第一个请求合成，其余等待后直接命中，避免重复的
/// 引擎调用（跨进程的重复合成仍可能发生，属良性竞争）。
pub struct SpeakHandler {
    audio_cache: Arc<dyn AudioCachePort>,
    tts_engine: Arc<dyn TtsEnginePort>,
    inflight: DashMap<String, Arc<Mutex<()>>>,
}

impl SpeakHandler {
    pub fn new(audio_cache: Arc<dyn AudioCachePort>, tts_engine: Arc<dyn TtsEnginePort>) -> Self {
        Self {
            audio_cache,
            tts_engine,
            inflight: DashMap::new(),
        }
    }

    pub async fn handle(&self, cmd: SpeakCommand) -> Result<SpeakOutcome, ApplicationError> {
        let speed = clamp_speed(cmd.speed);
        let speaker = resolve_speaker(cmd.speaker.as_deref(), &cmd.language);

        let has_phrase_pair = non_empty(cmd.ticket.as_deref()) && non_empty(cmd.counter.as_deref());

        if has_phrase_pair {
            self.handle_announcement(&cmd, speaker, speed).await
        } else if non_empty(cmd.text.as_deref()) {
            self.handle_text(&cmd, speaker, speed).await
        } else {
            Err(ApplicationError::invalid_request(
                "provide \"text\" or both \"ticket\" and \"counter\"",
            ))
        }
    }

    /// 叫号分支：两段短语各自独立检查/合成
    ///
    /// 任一段合成失败则整个请求失败，但已写入的工件保留，
    /// 重试时直接命中（幂等）。
    async fn handle_announcement(
        &self,
        cmd: &SpeakCommand,
        speaker: String,
        speed: f32,
    ) -> Result<SpeakOutcome, ApplicationError> {
        let ticket_phrase = cmd.ticket.as_deref().unwrap_or_default().to_string();
        let counter_phrase = cmd.counter.as_deref().unwrap_or_default().to_string();

        let (ticket_path, ticket_cached) = self
            .ensure_phrase_artifact(
                CacheNamespace::Ticket,
                &ticket_phrase,
                &cmd.language,
                &speaker,
                speed,
                cmd.force_refresh,
            )
            .await?;

        let (counter_path, counter_cached) = self
            .ensure_phrase_artifact(
                CacheNamespace::Counter,
                &counter_phrase,
                &cmd.language,
                &speaker,
                speed,
                cmd.force_refresh,
            )
            .await?;

        Ok(SpeakOutcome::Announcement(Announcement {
            ticket: ticket_phrase,
            counter: counter_phrase,
            language: cmd.language.clone(),
            speaker,
            speed,
            ticket_path,
            counter_path,
            ticket_cached,
            counter_cached,
        }))
    }

    /// 确保一段叫号短语的工件存在，返回路径与是否命中
    async fn ensure_phrase_artifact(
        &self,
        namespace: CacheNamespace,
        phrase: &str,
        language: &str,
        speaker: &str,
        speed: f32,
        force_refresh: bool,
    ) -> Result<(PathBuf, bool), ApplicationError> {
        let name = format!("{}_{}", safe_file_name(phrase), language);
        let _guard = self.lock_artifact(namespace, &name).await;

        if !force_refresh && self.audio_cache.exists(namespace, &name).await {
            let path = self.audio_cache.artifact_path(namespace, &name);
            tracing::debug!(namespace = %namespace, name = %name, "Announcement cache hit");
            return Ok((path, true));
        }

        tracing::info!(namespace = %namespace, phrase = %phrase, "Synthesizing announcement phrase");
        let audio = self
            .tts_engine
            .synthesize(SynthesisRequest {
                text: phrase.to_string(),
                language: language.to_string(),
                voice: Voice::Speaker(speaker.to_string()),
                speed,
            })
            .await?;

        let path = self.audio_cache.write(namespace, &name, &audio).await?;
        Ok((path, false))
    }

    /// 文本分支：语义参数哈希作为工件名，text 命名空间 + 统计索引
    async fn handle_text(
        &self,
        cmd: &SpeakCommand,
        speaker: String,
        speed: f32,
    ) -> Result<SpeakOutcome, ApplicationError> {
        let text = cmd.text.as_deref().unwrap_or_default().to_string();
        let reference_path = cmd.reference_file.as_deref().map(PathBuf::from);

        let cache_key = derive_cache_key(
            &text,
            &cmd.language,
            Some(&speaker),
            speed,
            reference_path.as_deref(),
        );

        let metadata = CacheMetadata {
            text: text.clone(),
            language: cmd.language.clone(),
            speaker: Some(speaker.clone()),
            speed,
        };

        let _guard = self.lock_artifact(CacheNamespace::Text, &cache_key).await;

        let (artifact_path, cached, hits) = if !cmd.force_refresh
            && self.audio_cache.exists(CacheNamespace::Text, &cache_key).await
        {
            let hits = self.audio_cache.record_hit(&cache_key, &metadata).await?;
            let path = self.audio_cache.artifact_path(CacheNamespace::Text, &cache_key);
            tracing::debug!(cache_key = %cache_key, hits = hits, "Text cache hit");
            (path, true, hits)
        } else {
            // 参考音频与预置发音人二选一传给引擎
            let voice = match &reference_path {
                Some(path) => Voice::Reference(path.clone()),
                None => Voice::Speaker(speaker.clone()),
            };

            tracing::info!(
                cache_key = %cache_key,
                text_len = text.len(),
                force_refresh = cmd.force_refresh,
                "Synthesizing text"
            );
            let audio = self
                .tts_engine
                .synthesize(SynthesisRequest {
                    text: text.clone(),
                    language: cmd.language.clone(),
                    voice,
                    speed,
                })
                .await?;

            let path = self
                .audio_cache
                .write(CacheNamespace::Text, &cache_key, &audio)
                .await?;
            self.audio_cache.reset_entry(&cache_key, &metadata).await?;
            (path, false, 1)
        };

        Ok(SpeakOutcome::Text(TextSpeech {
            text,
            language: cmd.language.clone(),
            speaker,
            reference_file: cmd.reference_file.clone(),
            speed,
            cache_key,
            artifact_path,
            cached,
            hits,
        }))
    }

    /// 获取某个工件名的进程内锁
    ///
    /// 条目极小且只随不同工件名增长（与缓存本身同阶），不做回收。
    async fn lock_artifact(
        &self,
        namespace: CacheNamespace,
        name: &str,
    ) -> tokio::sync::OwnedMutexGuard<()> {
        let lock_key = format!("{}/{}", namespace.dir_name(), name);
        let lock = self
            .inflight
            .entry(lock_key)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }
}

fn non_empty(value: Option<&str>) -> bool {
    value.map_or(false, |s| !s.is_empty())
}
