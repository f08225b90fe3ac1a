//! Query Handlers 实现
//!
//! 所有 QueryHandler 的具体实现

mod diagnostics_handlers;
mod story_handlers;

pub use diagnostics_handlers::*;
pub use story_handlers::*;
