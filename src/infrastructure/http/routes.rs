//! HTTP Routes
//!
//! API Endpoints:
//! - /                           GET   服务运行提示
//! - /test                       GET   存储自检
//! - /api/hello                  GET   问候
//! - /api/stories                POST  创建故事
//! - /api/stories                GET   列出所有故事
//! - /api/stories/{id}           GET   故事详情（含章节与气泡）
//! - /api/chapters               POST  创建章节
//! - /api/chapters?story_id=     GET   列出故事下的章节（按 order 升序）
//! - /api/bubbles                POST  创建气泡
//! - /api/bubbles?chapter_id=    GET   列出章节下的气泡（按 order 升序）

use axum::{routing::get, Router};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::root))
        .route("/test", get(handlers::test_database))
        .nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/hello", get(handlers::hello))
        .route(
            "/stories",
            get(handlers::list_stories).post(handlers::create_story),
        )
        .route("/stories/:story_id", get(handlers::get_story_detail))
        .route(
            "/chapters",
            get(handlers::list_chapters).post(handlers::create_chapter),
        )
        .route(
            "/bubbles",
            get(handlers::list_bubbles).post(handlers::create_bubble),
        )
}
