// ==========================================
// 经销商销售报表系统 - 配置层
// ==========================================
// 职责: 应用配置加载，支持多级覆写
// 来源: 默认值 / JSON 配置文件 / 环境变量
// ==========================================

pub mod config_manager;

// 重导出核心配置管理器
pub use config_manager::{
    config_keys, get_default_config_path, AppConfig, ConfigError, ConfigManager, ConfigResult,
    DEFAULT_MAX_SESSIONS,
};
