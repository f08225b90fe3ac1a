//! Story Commands - 写操作
//!
//! 命令字段保持请求原样，校验在处理器中完成

/// 创建故事命令
#[derive(Debug, Clone)]
pub struct CreateStory {
    pub title: String,
    pub author: Option<String>,
    pub cover_image: Option<String>,
    pub description: Option<String>,
}

/// 创建章节命令
#[derive(Debug, Clone)]
pub struct CreateChapter {
    /// 父故事 id（未校验）
    pub story_id: String,
    pub title: String,
    pub order: i64,
}

/// 创建气泡命令
#[derive(Debug, Clone)]
pub struct CreateBubble {
    /// 父章节 id（未校验）
    pub chapter_id: String,
    pub content_html: String,
    pub order: i64,
}
