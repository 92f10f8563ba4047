// ==========================================
// 经销商销售报表系统 - 核心库
// ==========================================
// 职责: 表格导入 → 列角色识别 → 会话 → 按经销商/月份筛选
// 技术栈: Rust + calamine + csv + tokio
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 单元格、表、会话
pub mod domain;

// 引擎层 - 值标准化、识别、查询
pub mod engine;

// 数据仓储层 - 会话登记
pub mod repository;

// 导入层 - 外部表格文件
pub mod importer;

// 导出层 - CSV / 报表文档
pub mod exporter;

// 配置层 - 应用配置
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 共享状态
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    ColumnRole, ColumnRoles, DisplayRow, RawCell, RawTable, Session, SessionId,
    ALL_MONTHS_LABEL, ALL_MONTHS_SENTINEL, MONTH_NAMES,
};

// 引擎
pub use engine::{classify, ingest, month_of, normalize_date, to_display, QueryEngine, QueryFilter, QueryResult};

// API
pub use api::{ApiError, ApiResult, DealerApi, DealerDataResponse, UploadResponse};

// 应用
pub use app::AppState;
pub use config::AppConfig;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "经销商销售报表系统";
