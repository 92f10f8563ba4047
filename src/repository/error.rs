// ==========================================
// 经销商销售报表系统 - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 仓储层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 会话错误 =====
    #[error("会话不存在或已过期: upload_id={0}")]
    SessionNotFound(String),

    #[error("会话仓储锁获取失败: {0}")]
    LockError(String),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl<T> From<std::sync::PoisonError<T>> for RepositoryError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        RepositoryError::LockError(err.to_string())
    }
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_not_found_message_contains_id() {
        let err = RepositoryError::SessionNotFound("abc123".to_string());
        assert!(err.to_string().contains("abc123"));
    }
}
