//! HTTP Handlers

mod bubble;
mod chapter;
mod health;
mod story;

pub use bubble::*;
pub use chapter::*;
pub use health::*;
pub use story::*;
