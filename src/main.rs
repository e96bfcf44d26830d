//! Chamada - 语音合成与叫号播报缓存网关
//!
//! 启动流程：配置 → 日志 → 缓存目录 → 引擎客户端 → HTTP 服务器

use std::sync::Arc;

use chamada::application::ports::TtsEnginePort;
use chamada::config::{load_config, print_config};
use chamada::infrastructure::adapters::{HttpTtsClient, HttpTtsClientConfig};
use chamada::infrastructure::http::{AppState, HttpServer, ServerConfig};
use chamada::infrastructure::persistence::fs::FsAudioCache;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},chamada={},tower_http=debug",
        config.log.level, config.log.level
    );
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));
    if config.log.json {
        tracing_subscriber::fmt().with_env_filter(env_filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    tracing::info!("Chamada - TTS synthesis and announcement cache");
    print_config(&config);

    // 创建文件系统缓存（建目录 + 加载统计索引）
    let audio_cache = Arc::new(
        FsAudioCache::new(&config.cache.dir)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to open audio cache: {}", e))?,
    );

    // 创建 HTTP TTS 引擎客户端
    let tts_config = HttpTtsClientConfig {
        base_url: config.tts.url.clone(),
        timeout_secs: config.tts.timeout_secs,
        max_retries: config.tts.max_retries,
    };
    let tts_engine = Arc::new(
        HttpTtsClient::new(tts_config).map_err(|e| anyhow::anyhow!("TTS client: {}", e))?,
    );

    if !tts_engine.health_check().await {
        tracing::warn!(url = %config.tts.url, "TTS engine not reachable at startup");
    }

    // 创建 HTTP 服务器
    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let state = AppState::with_base_url(audio_cache, tts_engine, config.server.public_base_url());
    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for ctrl-c");
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
