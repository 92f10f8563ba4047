// ==========================================
// 经销商销售报表系统 - 领域模型层
// ==========================================
// 职责: 定义单元格、表格、列角色、会话等领域类型
// 红线: 不含解析逻辑,不含查询逻辑
// ==========================================

pub mod cell;
pub mod session;
pub mod table;
pub mod types;

// 重导出核心类型
pub use cell::RawCell;
pub use session::{Session, SessionId};
pub use table::{ColumnRoles, DisplayRow, RawTable, RoleIndexes};
pub use types::{ColumnRole, ALL_MONTHS_LABEL, ALL_MONTHS_SENTINEL, MONTH_NAMES};
