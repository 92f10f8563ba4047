// ==========================================
// 经销商销售报表系统 - 经销商报表 API
// ==========================================
// 职责: 封装上传、筛选查询、导出、释放
// 红线: 只做参数校验与结果组装；筛选规则全部在引擎层
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::session::{Session, SessionId};
use crate::domain::table::DisplayRow;
use crate::domain::types::ALL_MONTHS_SENTINEL;
use crate::engine::query::{QueryEngine, QueryFilter, QueryResult};
use crate::exporter::{export_file_name, to_csv_bytes, to_xlsx_bytes, DealerReport};
use crate::importer::{ImportOutcome, TableImporter, TableImporterImpl};
use crate::repository::SessionRepository;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// 上传成功提示
pub const UPLOAD_SUCCESS_MESSAGE: &str = "Sheet loaded successfully";

/// 上传响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    /// 会话句柄（后续查询使用）
    pub upload_id: String,
    pub dealer_name_col: Option<String>,
    pub dealer_code_col: Option<String>,
    pub month_col: Option<String>,
    /// 经销商下拉（去重、字典序）
    pub dealers: Vec<String>,
    /// 月份下拉（日历顺序）
    pub months: Vec<String>,
}

/// 查询响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealerDataResponse {
    pub success: bool,
    /// 行数据：表头 → 展示值
    pub rows: Vec<Map<String, Value>>,
    pub total: usize,
    pub dealer_code: Option<String>,
    pub month_label: String,
}

/// 导出文件
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub file_name: String,
    pub content: Vec<u8>,
}

/// 经销商报表 API
pub struct DealerApi {
    session_repo: Arc<SessionRepository>,
    importer: TableImporterImpl,
    query_engine: QueryEngine,
}

impl DealerApi {
    /// 创建新的 DealerApi 实例
    pub fn new(session_repo: Arc<SessionRepository>) -> Self {
        Self {
            importer: TableImporterImpl::with_default_parser(Arc::clone(&session_repo)),
            session_repo,
            query_engine: QueryEngine::new(),
        }
    }

    // ==========================================
    // 上传
    // ==========================================

    /// 从本地文件上传
    pub async fn upload_file(&self, file_path: &str) -> ApiResult<UploadResponse> {
        if file_path.trim().is_empty() {
            return Err(ApiError::InvalidInput("未指定上传文件".to_string()));
        }
        let outcome = self.importer.import_file(Path::new(file_path)).await?;
        Ok(Self::upload_response(outcome))
    }

    /// 从上传内容上传
    ///
    /// # 参数
    /// - file_name: 原始文件名（用于判断格式）
    /// - bytes: 文件内容
    pub async fn upload_bytes(&self, file_name: &str, bytes: Vec<u8>) -> ApiResult<UploadResponse> {
        if file_name.trim().is_empty() {
            return Err(ApiError::InvalidInput("未指定上传文件".to_string()));
        }
        let outcome = self.importer.import_bytes(file_name, bytes).await?;
        Ok(Self::upload_response(outcome))
    }

    fn upload_response(outcome: ImportOutcome) -> UploadResponse {
        let session = &outcome.session;
        let roles = session.roles();
        UploadResponse {
            success: true,
            message: UPLOAD_SUCCESS_MESSAGE.to_string(),
            upload_id: outcome.session_id.to_string(),
            dealer_name_col: roles.dealer_name.clone(),
            dealer_code_col: roles.dealer_code.clone(),
            month_col: roles.month.clone(),
            dealers: session.dealers().to_vec(),
            months: session.months().to_vec(),
        }
    }

    // ==========================================
    // 查询
    // ==========================================

    /// 按经销商 / 月份筛选
    ///
    /// # 参数
    /// - upload_id: 会话句柄
    /// - dealer: 经销商名称（None 或空 = 全部）
    /// - month: 月份全称（None / 空 / "ALL" = 全部）
    pub fn dealer_data(
        &self,
        upload_id: &str,
        dealer: Option<&str>,
        month: Option<&str>,
    ) -> ApiResult<DealerDataResponse> {
        let (session, result) = self.run_query(upload_id, dealer, month)?;
        let rows = result
            .rows
            .iter()
            .map(|row| row_to_map(session.headers(), row))
            .collect();

        Ok(DealerDataResponse {
            success: true,
            rows,
            total: result.total,
            dealer_code: result.dealer_code,
            month_label: result.month_label,
        })
    }

    fn run_query(
        &self,
        upload_id: &str,
        dealer: Option<&str>,
        month: Option<&str>,
    ) -> ApiResult<(Arc<Session>, QueryResult)> {
        let session = self.session(upload_id)?;
        let filter = QueryFilter::new(dealer, Some(month.unwrap_or(ALL_MONTHS_SENTINEL)));
        let result = self.query_engine.run(&session, &filter);
        info!(upload_id, total = result.total, "经销商数据查询完成");
        Ok((session, result))
    }

    fn session(&self, upload_id: &str) -> ApiResult<Arc<Session>> {
        let upload_id = upload_id.trim();
        if upload_id.is_empty() {
            return Err(ApiError::InvalidInput("upload_id 不能为空".to_string()));
        }
        self.session_repo
            .get(&SessionId::from(upload_id))
            .map_err(|e| {
                warn!(upload_id, error = %e, "会话查找失败");
                ApiError::from(e)
            })
    }

    // ==========================================
    // 导出
    // ==========================================

    /// 导出 CSV（全部表头）
    pub fn export_csv(
        &self,
        upload_id: &str,
        dealer: Option<&str>,
        month: Option<&str>,
    ) -> ApiResult<ExportFile> {
        let (session, result) = self.run_query(upload_id, dealer, month)?;
        let content = to_csv_bytes(session.headers(), &result.rows)?;
        Ok(ExportFile {
            file_name: export_file_name(dealer, "csv"),
            content,
        })
    }

    /// 导出 Excel（全部表头）
    pub fn export_xlsx(
        &self,
        upload_id: &str,
        dealer: Option<&str>,
        month: Option<&str>,
    ) -> ApiResult<ExportFile> {
        let (session, result) = self.run_query(upload_id, dealer, month)?;
        let content = to_xlsx_bytes(session.headers(), &result.rows)?;
        Ok(ExportFile {
            file_name: export_file_name(dealer, "xlsx"),
            content,
        })
    }

    /// 生成报表文档
    pub fn report(
        &self,
        upload_id: &str,
        dealer: Option<&str>,
        month: Option<&str>,
    ) -> ApiResult<DealerReport> {
        let (session, result) = self.run_query(upload_id, dealer, month)?;
        Ok(DealerReport::build(&session, dealer, &result))
    }

    // ==========================================
    // 释放
    // ==========================================

    /// 释放会话
    ///
    /// # 返回
    /// - true: 已释放
    /// - false: 句柄不存在
    pub fn release(&self, upload_id: &str) -> ApiResult<bool> {
        Ok(self.session_repo.release(&SessionId::from(upload_id))?)
    }
}

/// 展示行 → 表头映射（重复表头取首列）
fn row_to_map(headers: &[String], row: &DisplayRow) -> Map<String, Value> {
    let mut map = Map::new();
    for (header, value) in headers.iter().zip(row) {
        if !map.contains_key(header) {
            map.insert(header.clone(), Value::String(value.clone()));
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api() -> DealerApi {
        DealerApi::new(Arc::new(SessionRepository::new(8)))
    }

    const CSV: &str = "Dealer Name,Dealer Code,Month,Amount\n\
                       Acme Motors,D100,20250812,500\n\
                       Best Cars,D200,Jan,20\n";

    #[tokio::test]
    async fn test_upload_and_query() {
        let api = api();
        let upload = api.upload_bytes("sales.csv", CSV.as_bytes().to_vec()).await.unwrap();
        assert!(upload.success);
        assert_eq!(upload.dealer_name_col.as_deref(), Some("Dealer Name"));
        assert_eq!(upload.dealers, vec!["Acme Motors", "Best Cars"]);
        assert_eq!(upload.months, vec!["January", "August"]);

        let data = api.dealer_data(&upload.upload_id, Some("Acme Motors"), None).unwrap();
        assert_eq!(data.total, 1);
        assert_eq!(data.month_label, "All");
        assert_eq!(data.dealer_code.as_deref(), Some("D100"));
        assert_eq!(data.rows[0]["Month"], Value::String("12/08/2025".into()));
    }

    #[tokio::test]
    async fn test_rows_keep_column_order() {
        let api = api();
        let upload = api.upload_bytes("sales.csv", CSV.as_bytes().to_vec()).await.unwrap();
        let data = api.dealer_data(&upload.upload_id, None, Some("ALL")).unwrap();
        let keys: Vec<&String> = data.rows[0].keys().collect();
        assert_eq!(keys, ["Dealer Name", "Dealer Code", "Month", "Amount"]);
    }

    #[test]
    fn test_unknown_upload_id() {
        let err = api().dealer_data("deadbeef", None, None).unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));

        let err = api().dealer_data("  ", None, None).unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_export_and_release() {
        let api = api();
        let upload = api.upload_bytes("sales.csv", CSV.as_bytes().to_vec()).await.unwrap();

        let file = api.export_csv(&upload.upload_id, Some("Best Cars"), None).unwrap();
        assert_eq!(file.file_name, "dealer_data_Best_Cars.csv");
        let text = String::from_utf8(file.content).unwrap();
        assert_eq!(text, "Dealer Name,Dealer Code,Month,Amount\nBest Cars,D200,Jan,20\n");

        assert!(api.release(&upload.upload_id).unwrap());
        assert!(api.dealer_data(&upload.upload_id, None, None).is_err());
    }

    #[test]
    fn test_row_to_map_first_duplicate_wins() {
        let headers = vec!["A".to_string(), "A".to_string()];
        let map = row_to_map(&headers, &vec!["1".to_string(), "2".to_string()]);
        assert_eq!(map.len(), 1);
        assert_eq!(map["A"], Value::String("1".into()));
    }
}
