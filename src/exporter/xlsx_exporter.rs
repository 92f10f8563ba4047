// ==========================================
// 经销商销售报表系统 - Excel 导出
// ==========================================
// 职责: 筛选结果 → .xlsx（单工作表 DealerData，全部表头 + 展示值）
// 说明: 不做样式；所有单元格按文本写入
// ==========================================

use crate::domain::table::DisplayRow;
use crate::exporter::error::{ExportError, ExportResult};
use rust_xlsxwriter::{Workbook, Worksheet};
use std::path::Path;
use tracing::info;

/// 导出工作表名称
pub const EXPORT_SHEET_NAME: &str = "DealerData";

fn column_index(col: usize) -> ExportResult<u16> {
    u16::try_from(col).map_err(|_| ExportError::XlsxError(format!("列数超出 Excel 上限: {}", col + 1)))
}

fn row_index(row: usize) -> ExportResult<u32> {
    u32::try_from(row).map_err(|_| ExportError::XlsxError(format!("行数超出 Excel 上限: {}", row + 1)))
}

fn fill_worksheet(worksheet: &mut Worksheet, headers: &[String], rows: &[DisplayRow]) -> ExportResult<()> {
    for (c, header) in headers.iter().enumerate() {
        worksheet.write_string(0, column_index(c)?, header)?;
    }

    for (r, row) in rows.iter().enumerate() {
        let row_num = row_index(r + 1)?;
        for (c, value) in row.iter().enumerate().take(headers.len()) {
            if !value.is_empty() {
                worksheet.write_string(row_num, column_index(c)?, value)?;
            }
        }
    }
    Ok(())
}

fn build_workbook(headers: &[String], rows: &[DisplayRow]) -> ExportResult<Workbook> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet().set_name(EXPORT_SHEET_NAME)?;
    fill_worksheet(worksheet, headers, rows)?;
    Ok(workbook)
}

/// 生成 .xlsx 字节（用于下载）
pub fn to_xlsx_bytes(headers: &[String], rows: &[DisplayRow]) -> ExportResult<Vec<u8>> {
    let mut workbook = build_workbook(headers, rows)?;
    Ok(workbook.save_to_buffer()?)
}

/// 导出到本地 .xlsx 文件
pub fn export_xlsx_file(path: &Path, headers: &[String], rows: &[DisplayRow]) -> ExportResult<()> {
    let mut workbook = build_workbook(headers, rows)?;
    workbook.save(path)?;
    info!(path = %path.display(), rows = rows.len(), "Excel 导出完成");
    Ok(())
}
