//! HTTP Server
//!
//! Axum HTTP 服务器启动和配置

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::middleware::error_logging_middleware;
use super::routes::create_routes;
use super::state::AppState;

/// 请求体大小上限（气泡内容为富文本）
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// 服务器配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// HTTP 服务器
pub struct HttpServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl HttpServer {
    /// 创建新的 HTTP 服务器
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self {
            config,
            state: Arc::new(state),
        }
    }

    /// 构建 Router
    pub fn build_router(&self) -> Router {
        // CORS 配置 - 完全开放：任意来源、方法、请求头
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
            .expose_headers(Any);

        create_routes()
            .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
            .layer(middleware::from_fn(error_logging_middleware))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .with_state(self.state.clone())
    }

    /// 启动服务器（带优雅关闭）
    pub async fn run_with_shutdown<F>(self, shutdown_signal: F) -> Result<(), std::io::Error>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let router = self.build_router();
        let addr = self.config.addr();

        info!("Starting HTTP server on {} (with graceful shutdown)", addr);

        let listener = TcpListener::bind(&addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::DocumentStorePort;
    use crate::infrastructure::persistence::{DisconnectedStore, InMemoryDocumentStore};
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    struct TestApp {
        router: Router,
    }

    impl TestApp {
        fn with_store(store: Arc<dyn DocumentStorePort>) -> Self {
            let server = HttpServer::new(ServerConfig::default(), AppState::new(store));
            Self {
                router: server.build_router(),
            }
        }

        fn new() -> Self {
            Self::with_store(Arc::new(InMemoryDocumentStore::new()))
        }

        async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
            let response = self.router.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let body = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap()
            };
            (status, body)
        }

        async fn get(&self, uri: &str) -> (StatusCode, Value) {
            self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
        }

        async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
            self.send(
                Request::builder()
                    .method(Method::POST)
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
        }

        async fn create(&self, uri: &str, body: Value) -> String {
            let (status, body) = self.post(uri, body).await;
            assert_eq!(status, StatusCode::OK, "{body}");
            body["id"].as_str().unwrap().to_string()
        }
    }

    #[tokio::test]
    async fn test_messages() {
        let app = TestApp::new();

        let (status, body) = app.get("/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Story App Backend Running"}));

        let (_, body) = app.get("/api/hello").await;
        assert_eq!(body, json!({"message": "Hello from the backend API!"}));
    }

    #[tokio::test]
    async fn test_story_round_trip() {
        let app = TestApp::new();
        let id = app
            .create(
                "/api/stories",
                json!({"title": "A", "author": "Ann", "cover_image": "http://x/c.png"}),
            )
            .await;

        let (status, body) = app.get("/api/stories").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([{
                "id": id,
                "title": "A",
                "author": "Ann",
                "cover_image": "http://x/c.png",
                "description": null
            }])
        );

        let (status, body) = app.get(&format!("/api/stories/{id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "A");
        assert_eq!(body["chapters"], json!([]));
    }

    #[tokio::test]
    async fn test_story_detail_example() {
        let app = TestApp::new();
        let s1 = app.create("/api/stories", json!({"title": "A"})).await;
        let c1 = app
            .create("/api/chapters", json!({"story_id": s1, "title": "C1", "order": 1}))
            .await;
        let c2 = app
            .create("/api/chapters", json!({"story_id": s1, "title": "C2", "order": 0}))
            .await;
        let b1 = app
            .create(
                "/api/bubbles",
                json!({"chapter_id": c1, "content_html": "<p>x</p>", "order": 0}),
            )
            .await;

        let (status, body) = app.get(&format!("/api/stories/{s1}")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "id": s1,
                "title": "A",
                "author": null,
                "cover_image": null,
                "description": null,
                "chapters": [
                    {"id": c2, "title": "C2", "order": 0, "bubbles": []},
                    {"id": c1, "title": "C1", "order": 1, "bubbles": [
                        {"id": b1, "content_html": "<p>x</p>", "order": 0}
                    ]}
                ]
            })
        );
    }

    #[tokio::test]
    async fn test_listing_endpoints_ordered() {
        let app = TestApp::new();
        let s1 = app.create("/api/stories", json!({"title": "A"})).await;
        let late = app
            .create("/api/chapters", json!({"story_id": s1, "title": "late", "order": 5}))
            .await;
        let early = app
            .create("/api/chapters", json!({"story_id": s1, "title": "early"}))
            .await;
        app.create(
            "/api/bubbles",
            json!({"chapter_id": early, "content_html": "b", "order": 2}),
        )
        .await;
        app.create(
            "/api/bubbles",
            json!({"chapter_id": early, "content_html": "a", "order": 1}),
        )
        .await;

        let (status, body) = app.get(&format!("/api/chapters?story_id={s1}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["id"], early.as_str());
        assert_eq!(body[0]["order"], 0);
        assert_eq!(body[0]["story_id"], s1.as_str());
        assert_eq!(body[1]["id"], late.as_str());

        let (_, body) = app.get(&format!("/api/bubbles?chapter_id={early}")).await;
        let contents: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["content_html"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(contents, ["a", "b"]);

        let (status, body) = app.get("/api/bubbles?chapter_id=nope").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_validation_errors_are_422() {
        let app = TestApp::new();

        let (status, body) = app.post("/api/stories", json!({"author": "Ann"})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["kind"], "validation_error");
        assert_eq!(body["errno"], 422);

        let (status, _) = app.post("/api/stories", json!({"title": ""})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = app.post("/api/stories", json!({"title": 42})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let s1 = app.create("/api/stories", json!({"title": "A"})).await;
        let (status, _) = app
            .post("/api/chapters", json!({"story_id": s1, "title": "C", "order": -1}))
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = app
            .post("/api/bubbles", json!({"chapter_id": "000000000000000000000001"}))
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = app
            .post(
                "/api/bubbles",
                json!({"chapter_id": "000000000000000000000001", "content_html": "<p/>", "order": -1}),
            )
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = app.get("/api/chapters").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_chapter_title_may_be_empty() {
        let app = TestApp::new();
        let s1 = app.create("/api/stories", json!({"title": "A"})).await;

        let (status, body) = app
            .post("/api/chapters", json!({"story_id": s1, "title": ""}))
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");

        let (_, body) = app.get(&format!("/api/chapters?story_id={s1}")).await;
        assert_eq!(body[0]["title"], "");
        assert_eq!(body[0]["order"], 0);

        // 缺少 title 仍然是 422
        let (status, _) = app.post("/api/chapters", json!({"story_id": s1})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_identifier_errors() {
        let app = TestApp::new();

        let (status, body) = app.get("/api/stories/not-an-id").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "invalid_identifier");
        assert_eq!(body["error"], "Invalid story id");

        let (status, body) = app.get("/api/stories/000000000000000000000001").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Story not found");

        let (status, body) = app
            .post("/api/chapters", json!({"story_id": "xyz", "title": "C"}))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid story id");

        let (status, body) = app
            .post(
                "/api/chapters",
                json!({"story_id": "000000000000000000000001", "title": "C"}),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Parent story not found");

        let (status, body) = app
            .post("/api/bubbles", json!({"chapter_id": "xyz", "content_html": "<p/>"}))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid chapter id");

        let (status, body) = app
            .post(
                "/api/bubbles",
                json!({"chapter_id": "000000000000000000000001", "content_html": "<p/>"}),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Parent chapter not found");
    }

    #[tokio::test]
    async fn test_degraded_store() {
        let app = TestApp::with_store(Arc::new(DisconnectedStore::new(
            "DATABASE_URL not set",
            false,
        )));

        let (status, body) = app.get("/test").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["backend"], "✅ Running");
        assert_eq!(body["connection_status"], "Not Connected");
        assert_eq!(body["collections"], json!([]));

        let (status, body) = app.post("/api/stories", json!({"title": "A"})).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["kind"], "store_unavailable");

        // 格式错误的 id 在访问存储之前就被拒绝
        let (status, _) = app.get("/api/stories/bad").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_diagnostics_with_memory_store() {
        let app = TestApp::new();
        app.create("/api/stories", json!({"title": "A"})).await;

        let (status, body) = app.get("/test").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["database"], "✅ Connected & Working");
        assert_eq!(body["connection_status"], "Connected");
        assert_eq!(body["collections"], json!(["story"]));
    }

    #[tokio::test]
    async fn test_cors_is_open() {
        let app = TestApp::new();
        let response = app
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/hello")
                    .header(header::ORIGIN, "http://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
    }
}
