//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态。
//! 进程级只共享一个存储句柄，启动时创建，请求间不共享其他可变状态。

use std::sync::Arc;

use crate::application::{
    // Command handlers
    CreateBubbleHandler, CreateChapterHandler, CreateStoryHandler,
    // Query handlers
    GetDiagnosticsHandler, GetStoryDetailHandler, ListBubblesHandler, ListChaptersHandler,
    ListStoriesHandler,
    // Ports
    DocumentStorePort,
};

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub store: Arc<dyn DocumentStorePort>,

    // ========== Command Handlers ==========
    pub create_story_handler: CreateStoryHandler,
    pub create_chapter_handler: CreateChapterHandler,
    pub create_bubble_handler: CreateBubbleHandler,

    // ========== Query Handlers ==========
    pub list_stories_handler: ListStoriesHandler,
    pub get_story_detail_handler: GetStoryDetailHandler,
    pub list_chapters_handler: ListChaptersHandler,
    pub list_bubbles_handler: ListBubblesHandler,
    pub diagnostics_handler: GetDiagnosticsHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(store: Arc<dyn DocumentStorePort>) -> Self {
        Self {
            // Ports
            store: store.clone(),

            // Command handlers
            create_story_handler: CreateStoryHandler::new(store.clone()),
            create_chapter_handler: CreateChapterHandler::new(store.clone()),
            create_bubble_handler: CreateBubbleHandler::new(store.clone()),

            // Query handlers
            list_stories_handler: ListStoriesHandler::new(store.clone()),
            get_story_detail_handler: GetStoryDetailHandler::new(store.clone()),
            list_chapters_handler: ListChaptersHandler::new(store.clone()),
            list_bubbles_handler: ListBubblesHandler::new(store.clone()),
            diagnostics_handler: GetDiagnosticsHandler::new(store),
        }
    }
}
