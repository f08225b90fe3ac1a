//! Data Transfer Objects
//!
//! 请求体在这里声明必填/可选字段；类型错误或缺字段由 JSON 提取器拒绝（422）。
//! 响应中的标识一律为字符串。

use serde::{Deserialize, Serialize};

use crate::application::Diagnostics;
use crate::domain::story::{Bubble, Chapter, ChapterNode, Identifier, Story, StoryTree};

// ============================================================================
// 通用响应
// ============================================================================

/// 文本消息响应
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// 创建成功响应
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: String,
}

impl From<Identifier> for CreatedResponse {
    fn from(id: Identifier) -> Self {
        Self { id: id.into() }
    }
}

/// 自检响应
#[derive(Debug, Serialize)]
pub struct DiagnosticsResponse {
    pub backend: String,
    pub database: String,
    pub database_url: Option<String>,
    pub database_name: Option<String>,
    pub connection_status: String,
    pub collections: Vec<String>,
}

impl From<Diagnostics> for DiagnosticsResponse {
    fn from(d: Diagnostics) -> Self {
        Self {
            backend: d.backend,
            database: d.database,
            database_url: d.database_url,
            database_name: d.database_name,
            connection_status: d.connection_status,
            collections: d.collections,
        }
    }
}

// ============================================================================
// Story DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateStoryRequest {
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StoryResponse {
    pub id: String,
    pub title: String,
    pub author: Option<String>,
    pub cover_image: Option<String>,
    pub description: Option<String>,
}

impl From<&Story> for StoryResponse {
    fn from(story: &Story) -> Self {
        Self {
            id: story.id().to_string(),
            title: story.title().to_string(),
            author: story.author().map(str::to_string),
            cover_image: story.cover_image().map(str::to_string),
            description: story.description().map(str::to_string),
        }
    }
}

/// 故事详情：故事字段 + 嵌套章节
#[derive(Debug, Serialize)]
pub struct StoryDetailResponse {
    #[serde(flatten)]
    pub story: StoryResponse,
    pub chapters: Vec<ChapterNodeResponse>,
}

impl From<&StoryTree> for StoryDetailResponse {
    fn from(tree: &StoryTree) -> Self {
        Self {
            story: StoryResponse::from(tree.story()),
            chapters: tree.chapters().iter().map(ChapterNodeResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChapterNodeResponse {
    pub id: String,
    pub title: String,
    pub order: i64,
    pub bubbles: Vec<BubbleNodeResponse>,
}

impl From<&ChapterNode> for ChapterNodeResponse {
    fn from(node: &ChapterNode) -> Self {
        let chapter = node.chapter();
        Self {
            id: chapter.id().to_string(),
            title: chapter.title().to_string(),
            order: chapter.order().value(),
            bubbles: node.bubbles().iter().map(BubbleNodeResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BubbleNodeResponse {
    pub id: String,
    pub content_html: String,
    pub order: i64,
}

impl From<&Bubble> for BubbleNodeResponse {
    fn from(bubble: &Bubble) -> Self {
        Self {
            id: bubble.id().to_string(),
            content_html: bubble.content_html().to_string(),
            order: bubble.order().value(),
        }
    }
}

// ============================================================================
// Chapter DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateChapterRequest {
    pub story_id: String,
    pub title: String,
    #[serde(default)]
    pub order: i64,
}

#[derive(Debug, Deserialize)]
pub struct ListChaptersParams {
    pub story_id: String,
}

#[derive(Debug, Serialize)]
pub struct ChapterResponse {
    pub id: String,
    pub story_id: String,
    pub title: String,
    pub order: i64,
}

impl From<&Chapter> for ChapterResponse {
    fn from(chapter: &Chapter) -> Self {
        Self {
            id: chapter.id().to_string(),
            story_id: chapter.story_id().to_string(),
            title: chapter.title().to_string(),
            order: chapter.order().value(),
        }
    }
}

// ============================================================================
// Bubble DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateBubbleRequest {
    pub chapter_id: String,
    pub content_html: String,
    #[serde(default)]
    pub order: i64,
}

#[derive(Debug, Deserialize)]
pub struct ListBubblesParams {
    pub chapter_id: String,
}

#[derive(Debug, Serialize)]
pub struct BubbleResponse {
    pub id: String,
    pub chapter_id: String,
    pub content_html: String,
    pub order: i64,
}

impl From<&Bubble> for BubbleResponse {
    fn from(bubble: &Bubble) -> Self {
        Self {
            id: bubble.id().to_string(),
            chapter_id: bubble.chapter_id().to_string(),
            content_html: bubble.content_html().to_string(),
            order: bubble.order().value(),
        }
    }
}
