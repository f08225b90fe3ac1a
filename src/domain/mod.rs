//! Domain Layer - 领域层
//!
//! 包含一个限界上下文:
//! - Story Context: 故事 → 章节 → 气泡

pub mod story;
