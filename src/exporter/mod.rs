// ==========================================
// 经销商销售报表系统 - 导出层
// ==========================================
// 职责: 筛选结果导出（CSV / Excel 表格，报表文档模型）
// ==========================================

pub mod csv_exporter;
pub mod error;
pub mod report;
pub mod xlsx_exporter;

pub use csv_exporter::{export_csv_file, to_csv_bytes, write_csv};
pub use error::{ExportError, ExportResult};
pub use report::{export_file_name, DealerReport};
pub use xlsx_exporter::{export_xlsx_file, to_xlsx_bytes};
