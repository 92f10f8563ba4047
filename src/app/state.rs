// ==========================================
// 经销商销售报表系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::sync::Arc;

use crate::api::DealerApi;
use crate::config::{AppConfig, ConfigManager, ConfigResult};
use crate::repository::SessionRepository;
use tracing::info;

/// 应用状态
///
/// 包含配置、会话仓储和API实例
pub struct AppState {
    /// 应用配置
    pub config: AppConfig,

    /// 会话仓储（与 API 共享）
    pub session_repo: Arc<SessionRepository>,

    /// 经销商报表API
    pub dealer_api: Arc<DealerApi>,
}

impl AppState {
    /// 按给定配置创建应用状态
    pub fn new(config: AppConfig) -> Self {
        let session_repo = Arc::new(SessionRepository::new(config.max_sessions));
        let dealer_api = Arc::new(DealerApi::new(Arc::clone(&session_repo)));

        info!(max_sessions = session_repo.capacity(), "应用状态初始化完成");

        Self {
            config,
            session_repo,
            dealer_api,
        }
    }

    /// 加载配置并创建应用状态
    pub fn from_env() -> ConfigResult<Self> {
        Ok(Self::new(ConfigManager::load()?))
    }
}
