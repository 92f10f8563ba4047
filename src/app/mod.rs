// ==========================================
// 经销商销售报表系统 - 应用层
// ==========================================
// 职责: 组装配置、会话仓储与 API，供宿主程序持有
// ==========================================

pub mod state;

// 重导出
pub use state::AppState;
