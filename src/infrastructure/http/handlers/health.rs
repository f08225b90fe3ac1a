//! Health Handlers
//!
//! 运行提示与存储自检端点

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::GetDiagnostics;
use crate::infrastructure::http::dto::{DiagnosticsResponse, MessageResponse};
use crate::infrastructure::http::state::AppState;

/// 根路径
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Story App Backend Running",
    })
}

/// 问候
pub async fn hello() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello from the backend API!",
    })
}

/// 存储自检 - 总是 200，存储问题写在响应内容里
pub async fn test_database(State(state): State<Arc<AppState>>) -> Json<DiagnosticsResponse> {
    let diagnostics = state.diagnostics_handler.handle(GetDiagnostics).await;
    Json(DiagnosticsResponse::from(diagnostics))
}
