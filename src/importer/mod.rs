// ==========================================
// 经销商销售报表系统 - 导入层
// ==========================================
// 职责: 外部表格文件 → 原始表 → 会话
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod error;
pub mod file_parser;
pub mod table_importer_impl;
pub mod table_importer_trait;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use table_importer_impl::TableImporterImpl;

// 重导出 Trait 接口
pub use table_importer_trait::{FileParser, ImportOutcome, TableImporter};
