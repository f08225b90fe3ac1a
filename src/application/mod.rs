//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（DocumentStorePort）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - integrity / listing: 父实体存在性检查、有序子实体列表
//! - records: 实体与存储记录的映射
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod integrity;
pub mod listing;
pub mod ports;
pub mod queries;
pub mod records;

// Re-exports
pub use commands::{
    // Story commands
    CreateBubble,
    CreateChapter,
    CreateStory,
    // Handlers
    handlers::{CreateBubbleHandler, CreateChapterHandler, CreateStoryHandler},
};

pub use error::ApplicationError;
pub use integrity::ParentGuard;
pub use listing::OrderedListing;

pub use ports::{
    Collection, ConnectionState, DocumentStorePort, Filter, NewRecord, StoreError, StoreStatus,
    StoredRecord,
};

pub use queries::{
    // Story queries
    GetDiagnostics,
    GetStoryDetail,
    ListBubbles,
    ListChapters,
    ListStories,
    // Handlers
    handlers::{
        Diagnostics, GetDiagnosticsHandler, GetStoryDetailHandler, ListBubblesHandler,
        ListChaptersHandler, ListStoriesHandler,
    },
};
