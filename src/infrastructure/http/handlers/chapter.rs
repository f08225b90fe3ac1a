//! Chapter HTTP Handlers

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use std::sync::Arc;

use crate::application::{CreateChapter, ListChapters};
use crate::infrastructure::http::dto::{
    ChapterResponse, CreateChapterRequest, CreatedResponse, ListChaptersParams,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 创建章节（父故事必须存在）
pub async fn create_chapter(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateChapterRequest>, JsonRejection>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let Json(req) = payload?;

    let command = CreateChapter {
        story_id: req.story_id,
        title: req.title,
        order: req.order,
    };
    let id = state.create_chapter_handler.handle(command).await?;

    Ok(Json(CreatedResponse::from(id)))
}

/// 列出故事下的章节，按 order 升序
pub async fn list_chapters(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ListChaptersParams>, QueryRejection>,
) -> Result<Json<Vec<ChapterResponse>>, ApiError> {
    let Query(params) = params?;

    let chapters = state
        .list_chapters_handler
        .handle(ListChapters {
            story_id: params.story_id,
        })
        .await?;

    Ok(Json(chapters.iter().map(ChapterResponse::from).collect()))
}
