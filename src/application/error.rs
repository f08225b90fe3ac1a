//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::StoreError;
use crate::domain::story::DomainError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 请求内容不合法（缺字段、类型错误、约束不满足）
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 标识符格式错误
    #[error("Invalid {resource_type} id")]
    InvalidIdentifier { resource_type: &'static str },

    /// 资源未找到
    #[error("{0}")]
    NotFound(String),

    /// 存储不可用（未连接）
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// 存储读写失败
    #[error("Store error: {0}")]
    StoreError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建标识符格式错误
    pub fn invalid_identifier(resource_type: &'static str) -> Self {
        Self::InvalidIdentifier { resource_type }
    }

    /// 创建 NotFound 错误
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}

impl From<StoreError> for ApplicationError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => Self::StoreUnavailable(msg),
            other => Self::StoreError(other.to_string()),
        }
    }
}

impl From<DomainError> for ApplicationError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidTitle(_) | DomainError::InvalidOrder(_) => {
                Self::ValidationError(err.to_string())
            }
            DomainError::InvalidIdentifier(_) => Self::ValidationError(err.to_string()),
            DomainError::ForeignChild { .. } => Self::InternalError(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_conversion() {
        let err = ApplicationError::from(StoreError::Database("连接被重置".to_string()));
        assert!(matches!(err, ApplicationError::StoreError(ref msg) if msg == "数据库错误: 连接被重置"));

        let err = ApplicationError::from(StoreError::Unavailable("DATABASE_URL not set".to_string()));
        assert!(matches!(err, ApplicationError::StoreUnavailable(ref msg) if msg == "DATABASE_URL not set"));
    }

    #[test]
    fn test_domain_error_conversion() {
        let err = ApplicationError::from(DomainError::InvalidOrder(-1));
        assert_eq!(
            err.to_string(),
            "Validation error: order must be a non-negative integer, got -1"
        );

        let err = ApplicationError::from(DomainError::ForeignChild {
            child: "b".to_string(),
            parent: "c".to_string(),
        });
        assert!(matches!(err, ApplicationError::InternalError(ref msg) if msg == "b 不属于 c"));
    }
}
