// ==========================================
// 经销商销售报表系统 - 表格导入器实现
// ==========================================
// 职责: 整合导入流程，从文件到会话
// 流程: 解析（阻塞线程） → 构建会话 → 登记
// ==========================================

use crate::domain::table::RawTable;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::table_importer_trait::{FileParser, ImportOutcome, TableImporter};
use crate::repository::SessionRepository;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, instrument};

// ==========================================
// TableImporterImpl - 表格导入器实现
// ==========================================
pub struct TableImporterImpl {
    // 文件解析器
    file_parser: Arc<dyn FileParser>,

    // 会话仓储
    session_repo: Arc<SessionRepository>,
}

impl TableImporterImpl {
    /// 创建导入器
    ///
    /// # 参数
    /// - file_parser: 文件解析器
    /// - session_repo: 会话仓储
    pub fn new(file_parser: Arc<dyn FileParser>, session_repo: Arc<SessionRepository>) -> Self {
        Self {
            file_parser,
            session_repo,
        }
    }

    /// 使用通用解析器
    pub fn with_default_parser(session_repo: Arc<SessionRepository>) -> Self {
        Self::new(Arc::new(UniversalFileParser), session_repo)
    }

    fn register(&self, table: RawTable, start_time: Instant) -> ImportResult<ImportOutcome> {
        let (session_id, session) = self.session_repo.ingest(table)?;
        let elapsed_ms = start_time.elapsed().as_millis();

        info!(
            upload_id = %session_id,
            rows = session.row_count(),
            dealers = session.dealers().len(),
            months = session.months().len(),
            elapsed_ms,
            "导入完成"
        );

        Ok(ImportOutcome {
            session_id,
            session,
            elapsed_ms,
        })
    }
}

#[async_trait]
impl TableImporter for TableImporterImpl {
    #[instrument(skip(self, file_path))]
    async fn import_file<P: AsRef<Path> + Send>(&self, file_path: P) -> ImportResult<ImportOutcome> {
        let start_time = Instant::now();
        let path: PathBuf = file_path.as_ref().to_path_buf();
        info!(file_path = %path.display(), "开始导入报表文件");

        let parser = Arc::clone(&self.file_parser);
        let parse_path = path.clone();
        let table = tokio::task::spawn_blocking(move || parser.parse_file(&parse_path))
            .await?
            .map_err(|e| {
                error!(file_path = %path.display(), error = %e, "文件解析失败");
                e
            })?;

        self.register(table, start_time)
    }

    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn import_bytes(&self, file_name: &str, bytes: Vec<u8>) -> ImportResult<ImportOutcome> {
        let start_time = Instant::now();
        info!(file_name, "开始导入上传内容");

        if bytes.is_empty() {
            return Err(ImportError::EmptyFile(file_name.to_string()));
        }

        let parser = Arc::clone(&self.file_parser);
        let name = file_name.to_string();
        let table = tokio::task::spawn_blocking(move || parser.parse_bytes(&name, &bytes))
            .await?
            .map_err(|e| {
                error!(file_name, error = %e, "上传内容解析失败");
                e
            })?;

        self.register(table, start_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SessionId;

    fn importer(capacity: usize) -> (TableImporterImpl, Arc<SessionRepository>) {
        let repo = Arc::new(SessionRepository::new(capacity));
        (TableImporterImpl::with_default_parser(Arc::clone(&repo)), repo)
    }

    #[tokio::test]
    async fn test_import_bytes_registers_session() {
        let (importer, repo) = importer(4);
        let csv = "Dealer Name,Month\nAcme,Aug\nBest,Jan\n";

        let outcome = importer.import_bytes("sales.csv", csv.as_bytes().to_vec()).await.unwrap();
        assert_eq!(outcome.session.row_count(), 2);
        assert_eq!(outcome.session.months(), ["January", "August"]);
        assert!(repo.contains(&outcome.session_id).unwrap());
    }

    #[tokio::test]
    async fn test_failed_import_registers_nothing() {
        let (importer, repo) = importer(4);

        let err = importer.import_bytes("sales.txt", b"a,b".to_vec()).await.unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedFormat(_)));

        let err = importer.import_bytes("sales.csv", Vec::new()).await.unwrap_err();
        assert!(matches!(err, ImportError::EmptyFile(_)));

        assert!(repo.is_empty());
        assert!(!repo.contains(&SessionId::from("sales")).unwrap());
    }

    #[tokio::test]
    async fn test_import_missing_file() {
        let (importer, _) = importer(4);
        let err = importer.import_file("/nonexistent/sales.xlsx").await.unwrap_err();
        assert!(matches!(err, ImportError::FileNotFound(_)));
    }
}
