//! Story Context - 故事限界上下文
//!
//! 职责:
//! - Story → Chapter → Bubble 三级实体及字段约束
//! - 同级排序规则
//! - 故事详情树的组装

mod aggregate;
mod entities;
mod errors;
mod ordering;
mod value_objects;

pub use aggregate::{ChapterNode, StoryTree};
pub use entities::{Bubble, Chapter, NewBubble, NewChapter, NewStory, Story};
pub use errors::DomainError;
pub use ordering::{sort_by_order, Ordered};
pub use value_objects::{Identifier, Order, Title};
