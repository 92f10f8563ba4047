// ==========================================
// 经销商销售报表系统 - 表格导入 Trait
// ==========================================
// 职责: 定义文件解析与会话导入接口（不包含实现）
// ==========================================

use crate::domain::session::{Session, SessionId};
use crate::domain::table::RawTable;
use crate::importer::error::{ImportError, ImportResult};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件 → 原始表（首行为表头）
// 实现者: ExcelParser, CsvParser, UniversalFileParser
pub trait FileParser: Send + Sync {
    /// 解析上传内容
    ///
    /// # 参数
    /// - file_name: 原始文件名（用于判断格式）
    /// - bytes: 文件内容
    ///
    /// # 返回
    /// - Ok(RawTable): 表头 + 原始行
    /// - Err: 格式不支持 / 文件损坏
    fn parse_bytes(&self, file_name: &str, bytes: &[u8]) -> ImportResult<RawTable>;

    /// 解析本地文件
    fn parse_file(&self, file_path: &Path) -> ImportResult<RawTable> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }
        let bytes = std::fs::read(file_path)?;
        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        self.parse_bytes(&file_name, &bytes)
    }
}

// ==========================================
// 导入结果
// ==========================================
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    /// 会话句柄
    pub session_id: SessionId,
    /// 已登记的只读会话
    pub session: Arc<Session>,
    /// 解析耗时（毫秒）
    pub elapsed_ms: u128,
}

// ==========================================
// TableImporter Trait
// ==========================================
// 用途: 文件 → 会话（解析 + 构建 + 登记）
// 实现者: TableImporterImpl
#[async_trait]
pub trait TableImporter: Send + Sync {
    /// 从本地文件导入
    async fn import_file<P: AsRef<Path> + Send>(&self, file_path: P) -> ImportResult<ImportOutcome>;

    /// 从上传内容导入
    async fn import_bytes(&self, file_name: &str, bytes: Vec<u8>) -> ImportResult<ImportOutcome>;
}
