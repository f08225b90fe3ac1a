//! Story Queries - 读操作

/// 列出所有故事
#[derive(Debug, Clone)]
pub struct ListStories;

/// 获取故事详情（含章节与气泡）
#[derive(Debug, Clone)]
pub struct GetStoryDetail {
    pub story_id: String,
}

/// 列出故事下的章节
#[derive(Debug, Clone)]
pub struct ListChapters {
    pub story_id: String,
}

/// 列出章节下的气泡
#[derive(Debug, Clone)]
pub struct ListBubbles {
    pub chapter_id: String,
}

/// 服务与存储自检
#[derive(Debug, Clone)]
pub struct GetDiagnostics;
