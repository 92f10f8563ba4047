// ==========================================
// 经销商销售报表系统 - 数据仓储层
// ==========================================
// 职责: 会话登记与检索（纯内存）
// 红线: 不含筛选规则，不含解析逻辑
// ==========================================

pub mod error;
pub mod session_repo;

// 重导出核心类型
pub use error::{RepositoryError, RepositoryResult};
pub use session_repo::SessionRepository;
