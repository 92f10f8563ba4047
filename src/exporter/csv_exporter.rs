// ==========================================
// 经销商销售报表系统 - 表格导出
// ==========================================
// 职责: 筛选结果 → CSV（全部表头 + 展示值）
// ==========================================

use crate::domain::table::DisplayRow;
use crate::exporter::error::ExportResult;
use csv::{QuoteStyle, WriterBuilder};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// 写出 CSV：首行为表头，其后为展示行
pub fn write_csv<W: Write>(writer: W, headers: &[String], rows: &[DisplayRow]) -> ExportResult<()> {
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .flexible(true)
        .from_writer(writer);

    wtr.write_record(headers)?;
    for row in rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// 生成 CSV 字节（用于下载）
pub fn to_csv_bytes(headers: &[String], rows: &[DisplayRow]) -> ExportResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, headers, rows)?;
    Ok(buffer)
}

/// 导出到本地文件
pub fn export_csv_file(path: &Path, headers: &[String], rows: &[DisplayRow]) -> ExportResult<()> {
    let file = File::create(path)?;
    write_csv(BufWriter::new(file), headers, rows)?;
    info!(path = %path.display(), rows = rows.len(), "CSV 导出完成");
    Ok(())
}
