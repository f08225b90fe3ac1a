//! Story HTTP Handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use std::sync::Arc;

use crate::application::{CreateStory, GetStoryDetail, ListStories};
use crate::infrastructure::http::dto::{
    CreateStoryRequest, CreatedResponse, StoryDetailResponse, StoryResponse,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 创建故事
pub async fn create_story(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateStoryRequest>, JsonRejection>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let Json(req) = payload?;

    let command = CreateStory {
        title: req.title,
        author: req.author,
        cover_image: req.cover_image,
        description: req.description,
    };
    let id = state.create_story_handler.handle(command).await?;

    Ok(Json(CreatedResponse::from(id)))
}

/// 获取故事列表
pub async fn list_stories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StoryResponse>>, ApiError> {
    let stories = state.list_stories_handler.handle(ListStories).await?;
    Ok(Json(stories.iter().map(StoryResponse::from).collect()))
}

/// 获取故事详情（含有序章节与气泡）
pub async fn get_story_detail(
    State(state): State<Arc<AppState>>,
    Path(story_id): Path<String>,
) -> Result<Json<StoryDetailResponse>, ApiError> {
    let tree = state
        .get_story_detail_handler
        .handle(GetStoryDetail { story_id })
        .await?;

    Ok(Json(StoryDetailResponse::from(&tree)))
}
