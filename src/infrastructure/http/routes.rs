//! HTTP Routes
//!
//! API Endpoints:
//! - /                      GET    服务描述
//! - /ping                  GET    健康检查
//! - /synthesize            POST   合成（文本模式 或 ticket/counter 叫号模式）
//! - /speakers              GET    发音人列表与默认表
//! - /cache                 GET    缓存统计
//! - /cache                 DELETE 清空缓存
//! - /audio/:ns/:filename   GET    按命名空间取单个工件（WAV 流）
//! - /text /ticket /counter 静态托管各命名空间目录

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::services::ServeDir;

use super::handlers;
use super::state::AppState;
use crate::domain::CacheNamespace;

/// 动态路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::root))
        .route("/ping", get(handlers::ping))
        .route("/synthesize", post(handlers::synthesize))
        .route("/speakers", get(handlers::get_speakers))
        .route(
            "/cache",
            get(handlers::get_cache_info).delete(handlers::clear_cache),
        )
        .route("/audio/:namespace/:filename", get(handlers::get_audio_file))
}

/// 完整 Router：动态路由 + 各命名空间的静态托管
pub fn create_router(state: Arc<AppState>) -> Router {
    let mut router = create_routes();

    for namespace in CacheNamespace::ALL {
        let dir = state.audio_cache.namespace_dir(namespace);
        router = router.nest_service(namespace.url_prefix(), ServeDir::new(dir));
    }

    router.with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::{FakeTtsClient, FakeTtsClientConfig};
    use crate::infrastructure::persistence::fs::FsAudioCache;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use std::sync::Arc;
    use tempfile::tempdir;
    use tower::util::ServiceExt;

    async fn test_router(fail_after: Option<usize>) -> (tempfile::TempDir, Router) {
        let dir = tempdir().unwrap();
        let cache = Arc::new(FsAudioCache::new(dir.path()).await.unwrap());
        let engine = Arc::new(FakeTtsClient::new(FakeTtsClientConfig {
            audio_data: b"RIFFfakewav".to_vec(),
            speakers: vec!["Nova Hogarth".to_string()],
            fail_after,
        }));
        let state = Arc::new(AppState::new(cache, engine));
        (dir, create_router(state))
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::HOST, "tts.example.com")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_synthesize_text_flow() {
        let (_dir, router) = test_router(None).await;

        let response = router
            .clone()
            .oneshot(post_json(
                "/synthesize",
                r#"{"text": "Hello", "language": "en", "speed": 1.0}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["kind"], "text");
        assert_eq!(body["speaker"], "Nova Hogarth");
        assert_eq!(body["cached"], false);
        assert_eq!(body["hits"], 1);
        let url = body["url"].as_str().unwrap();
        assert!(url.starts_with("http://tts.example.com/text/"));
        assert!(url.ends_with(".wav"));

        // 第二次相同请求：命中，hits 变 2，URL 不变
        let response = router
            .oneshot(post_json(
                "/synthesize",
                r#"{"text": "Hello", "language": "en", "speed": 1.0}"#,
            ))
            .await
            .unwrap();
        let body2 = json_body(response).await;
        assert_eq!(body2["cached"], true);
        assert_eq!(body2["hits"], 2);
        assert_eq!(body2["url"], body["url"]);
    }

    #[tokio::test]
    async fn test_configured_base_url_used_without_host_header() {
        let dir = tempdir().unwrap();
        let cache = Arc::new(FsAudioCache::new(dir.path()).await.unwrap());
        let engine = Arc::new(FakeTtsClient::with_defaults());
        let state = Arc::new(AppState::with_base_url(
            cache,
            engine,
            "https://audio.example.org",
        ));
        let router = create_router(state);

        // 不带 Host 头：退回配置的 base_url
        let request = Request::builder()
            .method("POST")
            .uri("/synthesize")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"text": "Hello"}"#))
            .unwrap();
        let body = json_body(router.oneshot(request).await.unwrap()).await;
        let url = body["url"].as_str().unwrap();
        assert!(url.starts_with("https://audio.example.org/text/"));
    }

    #[tokio::test]
    async fn test_synthesize_announcement_flow() {
        let (_dir, router) = test_router(None).await;

        let response = router
            .oneshot(post_json(
                "/synthesize",
                r#"{"ticket": "Ticket 4", "counter": "Counter 6", "language": "pt"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["kind"], "announcement");
        assert_eq!(
            body["urls"]["ticket"],
            "http://tts.example.com/ticket/ticket_4_pt.wav"
        );
        assert_eq!(
            body["urls"]["counter"],
            "http://tts.example.com/counter/counter_6_pt.wav"
        );
    }

    #[tokio::test]
    async fn test_synthesize_invalid_request_is_400() {
        let (_dir, router) = test_router(None).await;

        let response = router
            .oneshot(post_json("/synthesize", r#"{"language": "pt"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(body["status"], "error");
        assert_eq!(body["errno"], 400);
    }

    #[tokio::test]
    async fn test_engine_failure_is_structured_error_not_transport_fault() {
        let (_dir, router) = test_router(Some(0)).await;

        let response = router
            .oneshot(post_json("/synthesize", r#"{"text": "Hello"}"#))
            .await
            .unwrap();
        // 引擎错误不升级为传输层故障
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["status"], "error");
        assert_eq!(body["errno"], 502);
        assert!(body["message"].as_str().unwrap().contains("fake engine"));
    }

    #[tokio::test]
    async fn test_cache_info_and_clear() {
        let (_dir, router) = test_router(None).await;

        router
            .clone()
            .oneshot(post_json("/synthesize", r#"{"text": "Hello"}"#))
            .await
            .unwrap();

        let get_cache = Request::builder()
            .uri("/cache")
            .body(Body::empty())
            .unwrap();
        let body = json_body(router.clone().oneshot(get_cache).await.unwrap()).await;
        assert_eq!(body["text_entries"], 1);
        assert_eq!(body["total_entries"], 1);

        let delete = Request::builder()
            .method("DELETE")
            .uri("/cache")
            .body(Body::empty())
            .unwrap();
        let response = router.clone().oneshot(delete).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let get_cache = Request::builder()
            .uri("/cache")
            .body(Body::empty())
            .unwrap();
        let body = json_body(router.clone().oneshot(get_cache).await.unwrap()).await;
        assert_eq!(body["total_entries"], 0);
        assert_eq!(body["total_size_mb"], 0.0);

        // 清空后同一请求重新走未命中路径
        let body = json_body(
            router
                .oneshot(post_json("/synthesize", r#"{"text": "Hello"}"#))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(body["cached"], false);
        assert_eq!(body["hits"], 1);
    }

    #[tokio::test]
    async fn test_speakers_endpoint() {
        let (_dir, router) = test_router(None).await;

        let request = Request::builder()
            .uri("/speakers")
            .body(Body::empty())
            .unwrap();
        let body = json_body(router.oneshot(request).await.unwrap()).await;
        assert_eq!(body["speakers"][0], "Nova Hogarth");
        assert_eq!(body["default_speakers"]["pt"], "Alma María");
        assert_eq!(body["default_speakers"]["default"], "Nova Hogarth");
    }

    #[tokio::test]
    async fn test_audio_file_fetch_and_errors() {
        let (dir, router) = test_router(None).await;

        std::fs::write(dir.path().join("ticket").join("ticket_4_pt.wav"), b"RIFF").unwrap();

        let ok = Request::builder()
            .uri("/audio/ticket/ticket_4_pt.wav")
            .body(Body::empty())
            .unwrap();
        let response = router.clone().oneshot(ok).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "audio/wav"
        );

        let missing = Request::builder()
            .uri("/audio/ticket/nope.wav")
            .body(Body::empty())
            .unwrap();
        let response = router.clone().oneshot(missing).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bad_ns = Request::builder()
            .uri("/audio/senha/x.wav")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(bad_ns).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_static_mounts_serve_namespace_dirs() {
        let (dir, router) = test_router(None).await;

        std::fs::write(dir.path().join("counter").join("counter_6_pt.wav"), b"RIFF").unwrap();

        let request = Request::builder()
            .uri("/counter/counter_6_pt.wav")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
