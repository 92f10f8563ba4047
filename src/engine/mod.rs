// ==========================================
// 经销商销售报表系统 - 引擎层
// ==========================================
// 职责: 值标准化、月份识别、列角色识别、会话构建、筛选查询
// 红线: 纯内存计算，不做 I/O；解析失败一律降级
// ==========================================

pub mod column_classifier;
pub mod ingestion;
pub mod month_classifier;
pub mod query;
pub mod value_normalizer;

// 重导出核心引擎
pub use column_classifier::classify;
pub use ingestion::{display_row, ingest};
pub use month_classifier::month_of;
pub use query::{QueryEngine, QueryFilter, QueryResult};
pub use value_normalizer::{normalize_date, to_display, DateNormalization};
