//! Story Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("标识符格式错误: {0}")]
    InvalidIdentifier(String),

    #[error("invalid title: {0}")]
    InvalidTitle(String),

    #[error("order must be a non-negative integer, got {0}")]
    InvalidOrder(i64),

    /// 子实体不属于给定的父实体
    #[error("{child} 不属于 {parent}")]
    ForeignChild { child: String, parent: String },
}
