// ==========================================
// 经销商销售报表系统 - 会话构建
// ==========================================
// 职责: 原始表 → 不可变会话
// 流程: 表头标准化 → 行对齐 → 展示行 → 列角色识别 → 下拉选项
// 红线: 单元格问题一律降级，不中断导入
// ==========================================

use crate::domain::session::Session;
use crate::domain::table::{align_row, normalize_headers, DisplayRow, RawTable, RoleIndexes};
use crate::domain::types::month_index;
use crate::domain::RawCell;
use crate::engine::column_classifier::classify;
use crate::engine::month_classifier::month_of;
use crate::engine::value_normalizer::to_display;
use std::collections::BTreeSet;
use tracing::{debug, instrument};

/// 原始行 → 展示行
pub fn display_row(row: &[RawCell]) -> DisplayRow {
    row.iter().map(to_display).collect()
}

/// 由原始表构建会话
#[instrument(skip(table), fields(rows = table.rows.len(), columns = table.headers.len()))]
pub fn ingest(table: RawTable) -> Session {
    let headers = normalize_headers(&table.headers);
    let width = headers.len();

    let raw_rows: Vec<Vec<RawCell>> = table
        .rows
        .into_iter()
        .map(|row| align_row(row, width))
        .collect();
    let display_rows: Vec<DisplayRow> = raw_rows.iter().map(|r| display_row(r)).collect();

    let roles = classify(&headers);
    let indexes = RoleIndexes::locate(&roles, &headers);

    let dealers = collect_dealers(&display_rows, indexes.dealer_name);
    let months = collect_months(&raw_rows, indexes.month);
    debug!(dealers = dealers.len(), months = ?months, "下拉选项计算完成");

    Session::from_parts(headers, raw_rows, display_rows, roles, indexes, dealers, months)
}

/// 经销商下拉：去空白、去重、字典序（空值保留）
fn collect_dealers(display_rows: &[DisplayRow], column: Option<usize>) -> Vec<String> {
    let Some(idx) = column else {
        return Vec::new();
    };
    display_rows
        .iter()
        .map(|row| row.get(idx).map(|v| v.trim()).unwrap_or("").to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// 月份下拉：按日历顺序，数据中未出现的月份省略
fn collect_months(raw_rows: &[Vec<RawCell>], column: Option<usize>) -> Vec<String> {
    let Some(idx) = column else {
        return Vec::new();
    };
    let mut seen = [false; 12];
    for row in raw_rows {
        if let Some(pos) = row.get(idx).and_then(month_of).and_then(month_index) {
            seen[pos] = true;
        }
    }
    crate::domain::types::MONTH_NAMES
        .iter()
        .zip(seen)
        .filter(|(_, present)| *present)
        .map(|(name, _)| name.to_string())
        .collect()
}
