// ==========================================
// 经销商销售报表系统 - 文件解析器实现
// ==========================================
// 支持: Excel (.xlsx/.xlsm/.xlsb/.xls/.ods) / CSV (.csv)
// 规则: 只读第一个工作表；首行为表头，其余为数据行
// ==========================================

use crate::domain::cell::RawCell;
use crate::domain::table::RawTable;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::table_importer_trait::FileParser;
use calamine::{Data, Ods, Range, Reader, Xls, Xlsb, Xlsx};
use chrono::{NaiveDate, NaiveDateTime};
use csv::{ByteRecord, ReaderBuilder};
use std::io::{Cursor, Read, Seek};

/// 文件扩展名（小写）
pub fn file_extension(file_name: &str) -> String {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_bytes(&self, file_name: &str, bytes: &[u8]) -> ImportResult<RawTable> {
        let ext = file_extension(file_name);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // 允许行长度不一致
            .from_reader(bytes);

        // 按字节读取：非 UTF-8 字符替换为 U+FFFD，不拒绝整个文件
        let mut records = reader.byte_records();

        // 读取表头（首行）
        let headers: Vec<Option<String>> = match records.next() {
            Some(record) => lossy_fields(&record?)
                .into_iter()
                .enumerate()
                .map(|(idx, h)| {
                    let h = if idx == 0 { h.trim_start_matches('\u{feff}').to_string() } else { h };
                    Some(h)
                })
                .collect(),
            None => return Ok(RawTable::default()),
        };

        // 读取数据行
        let mut rows = Vec::new();
        for result in records {
            let fields = lossy_fields(&result?);

            // 跳过完全空白的行
            if fields.iter().all(|v| v.trim().is_empty()) {
                continue;
            }

            rows.push(
                fields
                    .into_iter()
                    .map(|v| if v.is_empty() { RawCell::Empty } else { RawCell::Text(v) })
                    .collect(),
            );
        }

        Ok(RawTable::new(headers, rows))
    }
}

fn lossy_fields(record: &ByteRecord) -> Vec<String> {
    record
        .iter()
        .map(|field| String::from_utf8_lossy(field).into_owned())
        .collect()
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_bytes(&self, file_name: &str, bytes: &[u8]) -> ImportResult<RawTable> {
        let ext = file_extension(file_name);
        let cursor = Cursor::new(bytes.to_vec());

        match ext.as_str() {
            "xlsx" | "xlsm" => first_sheet_table(open_workbook::<_, Xlsx<_>>(cursor)?),
            "xlsb" => first_sheet_table(open_workbook::<_, Xlsb<_>>(cursor)?),
            "xls" => first_sheet_table(open_workbook::<_, Xls<_>>(cursor)?),
            "ods" => first_sheet_table(open_workbook::<_, Ods<_>>(cursor)?),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

fn open_workbook<RS, R>(reader: RS) -> ImportResult<R>
where
    RS: Read + Seek,
    R: Reader<RS>,
    R::Error: std::fmt::Display,
{
    R::new(reader).map_err(|e| ImportError::ExcelParseError(e.to_string()))
}

fn first_sheet_table<RS, R>(mut workbook: R) -> ImportResult<RawTable>
where
    RS: Read + Seek,
    R: Reader<RS>,
    R::Error: std::fmt::Display,
{
    let sheet_names = workbook.sheet_names();
    let sheet_name = sheet_names
        .first()
        .cloned()
        .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

    Ok(range_to_table(&range))
}

/// 工作表区域 → 原始表
///
/// calamine 的区域从第一个非空单元格开始；这里补齐前导空行/空列，
/// 使表头始终是工作表第 1 行、第 1 列对应 A 列。
pub fn range_to_table(range: &Range<Data>) -> RawTable {
    let Some((start_row, start_col)) = range.start() else {
        return RawTable::default();
    };
    let (lead_rows, lead_cols) = (start_row as usize, start_col as usize);
    let width = lead_cols + range.width();

    let anchored = |row: &[Data]| -> Vec<RawCell> {
        std::iter::repeat(RawCell::Empty)
            .take(lead_cols)
            .chain(row.iter().map(cell_to_raw))
            .collect()
    };
    let mut rows = (0..lead_rows)
        .map(|_| vec![RawCell::Empty; width])
        .chain(range.rows().map(anchored));

    // 提取表头（第一行）
    let headers: Vec<Option<String>> = match rows.next() {
        Some(header_row) => header_row
            .into_iter()
            .map(|cell| match cell {
                RawCell::Empty => None,
                other => Some(other.natural_string()),
            })
            .collect(),
        None => return RawTable::default(),
    };

    RawTable::new(headers, rows.collect())
}

/// calamine 单元格 → 原始单元格
pub fn cell_to_raw(cell: &Data) -> RawCell {
    match cell {
        Data::Int(i) => RawCell::Int(*i),
        Data::Float(f) => RawCell::Float(*f),
        Data::String(s) => RawCell::Text(s.clone()),
        Data::Bool(b) => RawCell::Text(if *b { "True" } else { "False" }.to_string()),
        // as_datetime 已区分 1900 / 1904 日期系统
        Data::DateTime(dt) if dt.is_duration() => RawCell::Float(dt.as_f64()),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(RawCell::Temporal)
            .unwrap_or(RawCell::Float(dt.as_f64())),
        Data::DateTimeIso(s) => parse_iso_datetime(s)
            .map(RawCell::Temporal)
            .unwrap_or_else(|| RawCell::Text(s.clone())),
        Data::DurationIso(s) => RawCell::Text(s.clone()),
        Data::Error(e) => RawCell::Text(e.to_string()),
        Data::Empty => RawCell::Empty,
    }
}

fn parse_iso_datetime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse_bytes(&self, file_name: &str, bytes: &[u8]) -> ImportResult<RawTable> {
        if bytes.is_empty() {
            return Err(ImportError::EmptyFile(file_name.to_string()));
        }

        match file_extension(file_name).as_str() {
            "csv" => CsvParser.parse_bytes(file_name, bytes),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => ExcelParser.parse_bytes(file_name, bytes),
            other => Err(ImportError::UnsupportedFormat(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{ExcelDateTime, ExcelDateTimeType};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_csv_parser_valid_bytes() {
        let content = "Dealer Name,Dealer Code,Sale_Date,Amount\nAcme Motors,D100,20250812,500\n";
        let table = CsvParser.parse_bytes("sales.csv", content.as_bytes()).unwrap();

        assert_eq!(table.headers.len(), 4);
        assert_eq!(table.headers[2].as_deref(), Some("Sale_Date"));
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0][0], RawCell::Text("Acme Motors".into()));
    }

    #[test]
    fn test_csv_parser_keeps_empty_cells_and_skips_blank_rows() {
        let content = "\u{feff}Dealer Name,Amount\nAcme,\n,\nBest,12\n";
        let table = CsvParser.parse_bytes("sales.csv", content.as_bytes()).unwrap();

        assert_eq!(table.headers[0].as_deref(), Some("Dealer Name"));
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][1], RawCell::Empty);
        assert_eq!(table.rows[1][1], RawCell::Text("12".into()));
    }

    #[test]
    fn test_csv_parser_from_file() {
        let mut temp_file = NamedTempFile::with_suffix(".csv").unwrap();
        writeln!(temp_file, "Party Name,Month").unwrap();
        writeln!(temp_file, "Acme,Aug").unwrap();

        let table = UniversalFileParser.parse_file(temp_file.path()).unwrap();
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_file_not_found() {
        let result = UniversalFileParser.parse_file(std::path::Path::new("non_existent.xlsx"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_unsupported_and_empty_uploads() {
        assert!(matches!(
            UniversalFileParser.parse_bytes("report.pdf", b"%PDF"),
            Err(ImportError::UnsupportedFormat(ref ext)) if ext == "pdf"
        ));
        assert!(matches!(
            UniversalFileParser.parse_bytes("report.xlsx", b""),
            Err(ImportError::EmptyFile(_))
        ));
    }

    #[test]
    fn test_corrupt_workbook_is_read_error() {
        let result = UniversalFileParser.parse_bytes("broken.xlsx", b"not a zip archive");
        assert!(matches!(result, Err(ImportError::ExcelParseError(_))));
    }

    fn excel_date(value: f64, kind: ExcelDateTimeType, is_1904: bool) -> Data {
        Data::DateTime(ExcelDateTime::new(value, kind, is_1904))
    }

    fn ymd_hms(y: i32, m: u32, d: u32, h: u32) -> RawCell {
        RawCell::Temporal(NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, 0, 0).unwrap())
    }

    #[test]
    fn test_excel_date_cells_1900_system() {
        assert_eq!(
            cell_to_raw(&excel_date(45658.0, ExcelDateTimeType::DateTime, false)),
            ymd_hms(2025, 1, 1, 0)
        );
        assert_eq!(
            cell_to_raw(&excel_date(45881.5, ExcelDateTimeType::DateTime, false)),
            ymd_hms(2025, 8, 12, 12)
        );
    }

    #[test]
    fn test_excel_date_cells_1904_system() {
        assert_eq!(
            cell_to_raw(&excel_date(44000.0, ExcelDateTimeType::DateTime, true)),
            ymd_hms(2024, 6, 19, 0)
        );
        assert_eq!(
            cell_to_raw(&excel_date(0.0, ExcelDateTimeType::DateTime, true)),
            ymd_hms(1904, 1, 1, 0)
        );
    }

    #[test]
    fn test_excel_duration_cell_stays_numeric() {
        assert_eq!(
            cell_to_raw(&excel_date(1.5, ExcelDateTimeType::TimeDelta, false)),
            RawCell::Float(1.5)
        );
    }

    #[test]
    fn test_csv_parser_keeps_non_utf8_rows() {
        let content: &[u8] = b"Dealer Name,Month\nAcme,Aug\nCaf\xe9,Jan\n";
        let table = CsvParser.parse_bytes("sales.csv", content).unwrap();

        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][0], RawCell::Text("Acme".into()));
        assert_eq!(table.rows[1][0], RawCell::Text("Caf\u{fffd}".into()));
        assert_eq!(table.rows[1][1], RawCell::Text("Jan".into()));
    }

    #[test]
    fn test_csv_parser_non_utf8_header() {
        let content: &[u8] = b"D\xe9aler,Month\nAcme,Aug\n";
        let table = CsvParser.parse_bytes("sales.csv", content).unwrap();
        assert_eq!(table.headers[0].as_deref(), Some("D\u{fffd}aler"));
        assert_eq!(table.headers[1].as_deref(), Some("Month"));
    }

    #[test]
    fn test_cell_conversion() {
        assert_eq!(cell_to_raw(&Data::Int(7)), RawCell::Int(7));
        assert_eq!(cell_to_raw(&Data::Bool(true)), RawCell::Text("True".into()));
        assert_eq!(cell_to_raw(&Data::Empty), RawCell::Empty);
        assert_eq!(
            cell_to_raw(&Data::DateTimeIso("2025-08-12".into())),
            RawCell::Temporal(
                NaiveDate::from_ymd_opt(2025, 8, 12)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap()
            )
        );
    }

    #[test]
    fn test_range_to_table() {
        let mut range = Range::new((0, 0), (2, 1));
        range.set_value((0, 0), Data::String("Dealer Name".into()));
        range.set_value((0, 1), Data::String("Sale Date".into()));
        range.set_value((1, 0), Data::String("Acme".into()));
        range.set_value((1, 1), Data::Float(20250812.0));
        range.set_value((2, 0), Data::String("Best".into()));

        let table = range_to_table(&range);
        assert_eq!(table.headers, vec![Some("Dealer Name".into()), Some("Sale Date".into())]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][1], RawCell::Float(20250812.0));
        assert_eq!(table.rows[1][1], RawCell::Empty);
    }

    #[test]
    fn test_range_to_table_anchors_at_first_row_and_column() {
        // 数据从 B2 开始：第 1 行为空表头行，A 列为空列
        let mut range = Range::new((1, 1), (2, 2));
        range.set_value((1, 1), Data::String("Dealer Name".into()));
        range.set_value((1, 2), Data::String("Month".into()));
        range.set_value((2, 1), Data::String("Acme".into()));
        range.set_value((2, 2), Data::String("Aug".into()));

        let table = range_to_table(&range);
        assert_eq!(table.headers, vec![None, None, None]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(
            table.rows[0],
            vec![RawCell::Empty, RawCell::Text("Dealer Name".into()), RawCell::Text("Month".into())]
        );
        assert_eq!(table.rows[1][0], RawCell::Empty);
        assert_eq!(table.rows[1][1], RawCell::Text("Acme".into()));
    }

    #[test]
    fn test_range_to_table_blank_column_a() {
        let mut range = Range::new((0, 1), (1, 1));
        range.set_value((0, 1), Data::String("Dealer Name".into()));
        range.set_value((1, 1), Data::String("Acme".into()));

        let table = range_to_table(&range);
        assert_eq!(table.headers, vec![None, Some("Dealer Name".into())]);
        assert_eq!(table.rows, vec![vec![RawCell::Empty, RawCell::Text("Acme".into())]]);
    }

    #[test]
    fn test_empty_range() {
        let range: Range<Data> = Range::empty();
        assert_eq!(range_to_table(&range), RawTable::default());
    }
}
