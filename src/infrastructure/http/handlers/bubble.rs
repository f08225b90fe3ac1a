//! Bubble HTTP Handlers

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use std::sync::Arc;

use crate::application::{CreateBubble, ListBubbles};
use crate::infrastructure::http::dto::{
    BubbleResponse, CreateBubbleRequest, CreatedResponse, ListBubblesParams,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 创建气泡（父章节必须存在）
pub async fn create_bubble(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateBubbleRequest>, JsonRejection>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let Json(req) = payload?;

    let command = CreateBubble {
        chapter_id: req.chapter_id,
        content_html: req.content_html,
        order: req.order,
    };
    let id = state.create_bubble_handler.handle(command).await?;

    Ok(Json(CreatedResponse::from(id)))
}

/// 列出章节下的气泡，按 order 升序
pub async fn list_bubbles(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ListBubblesParams>, QueryRejection>,
) -> Result<Json<Vec<BubbleResponse>>, ApiError> {
    let Query(params) = params?;

    let bubbles = state
        .list_bubbles_handler
        .handle(ListBubbles {
            chapter_id: params.chapter_id,
        })
        .await?;

    Ok(Json(bubbles.iter().map(BubbleResponse::from).collect()))
}
