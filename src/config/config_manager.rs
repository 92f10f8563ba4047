// ==========================================
// 经销商销售报表系统 - 配置管理器
// ==========================================
// 职责: 配置加载（多级覆写）
// 顺序: 默认值 → JSON 配置文件 → 环境变量
// 说明: 配置文件缺失时使用默认值；文件格式错误时报错
// ==========================================

use crate::domain::types::ALL_MONTHS_SENTINEL;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// 默认最大会话数
pub const DEFAULT_MAX_SESSIONS: usize = 64;

// ==========================================
// ConfigError - 配置错误
// ==========================================
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败: {path}: {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件格式错误: {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("环境变量 {key} 取值无效: {value}")]
    InvalidEnvValue { key: String, value: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// AppConfig - 应用配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// 同时保留的会话上限
    pub max_sessions: usize,

    /// 导出文件默认目录（None = 当前目录）
    pub default_export_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_sessions: DEFAULT_MAX_SESSIONS,
            default_export_dir: None,
        }
    }
}

impl AppConfig {
    /// "全部月份" 标记（固定值，不可配置）
    pub fn all_months_sentinel(&self) -> &'static str {
        ALL_MONTHS_SENTINEL
    }

    /// 导出文件完整路径
    pub fn export_path(&self, file_name: &str) -> PathBuf {
        match &self.default_export_dir {
            Some(dir) => dir.join(file_name),
            None => PathBuf::from(file_name),
        }
    }
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager;

impl ConfigManager {
    /// 加载配置
    ///
    /// # 返回
    /// - Ok(AppConfig): 合并后的配置
    /// - Err: 配置文件格式错误 / 环境变量取值无效
    pub fn load() -> ConfigResult<AppConfig> {
        let mut config = match get_default_config_path() {
            Some(path) => Self::load_from(&path)?,
            None => AppConfig::default(),
        };
        Self::apply_env_overrides(&mut config)?;
        debug!(?config, "配置加载完成");
        Ok(config)
    }

    /// 从指定文件加载配置（不含环境变量覆写）
    pub fn load_from(path: &Path) -> ConfigResult<AppConfig> {
        if !path.exists() {
            debug!(path = %path.display(), "配置文件不存在，使用默认配置");
            return Ok(AppConfig::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config: AppConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        info!(path = %path.display(), "已加载配置文件");
        Ok(config)
    }

    /// 应用环境变量覆写
    pub fn apply_env_overrides(config: &mut AppConfig) -> ConfigResult<()> {
        if let Ok(raw) = std::env::var(config_keys::ENV_MAX_SESSIONS) {
            let value = raw.trim();
            if !value.is_empty() {
                config.max_sessions = parse_max_sessions(value)?;
            }
        }

        if let Ok(raw) = std::env::var(config_keys::ENV_EXPORT_DIR) {
            let value = raw.trim();
            if !value.is_empty() {
                config.default_export_dir = Some(PathBuf::from(value));
            }
        }

        Ok(())
    }
}

fn parse_max_sessions(value: &str) -> ConfigResult<usize> {
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => {
            warn!(key = config_keys::ENV_MAX_SESSIONS, value, "会话上限取值无效");
            Err(ConfigError::InvalidEnvValue {
                key: config_keys::ENV_MAX_SESSIONS.to_string(),
                value: value.to_string(),
            })
        }
    }
}

/// 获取默认配置文件路径
///
/// # 返回
/// - DEALER_REPORT_CONFIG 指定的路径（若设置）
/// - 否则: 用户配置目录/dealer-report/config.json
pub fn get_default_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(config_keys::ENV_CONFIG_PATH) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }

    dirs::config_dir().map(|dir| dir.join(config_keys::APP_DIR_NAME).join(config_keys::CONFIG_FILE_NAME))
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 环境变量
    pub const ENV_CONFIG_PATH: &str = "DEALER_REPORT_CONFIG";
    pub const ENV_MAX_SESSIONS: &str = "DEALER_REPORT_MAX_SESSIONS";
    pub const ENV_EXPORT_DIR: &str = "DEALER_REPORT_EXPORT_DIR";
    pub const ENV_LOG_FORMAT: &str = "DEALER_REPORT_LOG_FORMAT";

    // 默认配置文件位置
    pub const APP_DIR_NAME: &str = "dealer-report";
    pub const CONFIG_FILE_NAME: &str = "config.json";
}
