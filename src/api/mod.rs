// ==========================================
// 经销商销售报表系统 - API 层
// ==========================================
// 职责: 对宿主（CLI / HTTP 等）暴露的业务接口
// ==========================================

pub mod dealer_api;
pub mod error;

// 重导出
pub use dealer_api::{DealerApi, DealerDataResponse, ExportFile, UploadResponse};
pub use error::{ApiError, ApiResult};
