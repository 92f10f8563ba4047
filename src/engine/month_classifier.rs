// ==========================================
// 经销商销售报表系统 - 月份识别
// ==========================================
// 职责: 原始单元格 → 英文月份全称
// 规则:
//   1. 可标准化为日期 → 该日期所在月份
//   2. 文本 → 首字母大写后匹配全称，否则匹配前三字符缩写
//   3. 其他 → None
// 红线: 纯函数，每次查询每行调用一次
// ==========================================

use crate::domain::cell::RawCell;
use crate::domain::types::{month_name, MONTH_ABBREVIATIONS, MONTH_NAMES};
use crate::engine::value_normalizer::normalize_date;
use chrono::Datelike;

/// 识别单元格所属月份
pub fn month_of(value: &RawCell) -> Option<&'static str> {
    if let Some(date) = normalize_date(value).date() {
        return month_name(date.month());
    }

    match value {
        RawCell::Text(s) => month_from_text(s),
        _ => None,
    }
}

/// 自由文本月份识别（全称或缩写前缀）
pub fn month_from_text(text: &str) -> Option<&'static str> {
    let cap = capitalize(text.trim());

    if let Some(full) = MONTH_NAMES.iter().find(|m| **m == cap) {
        return Some(*full);
    }

    let prefix: String = cap.chars().take(3).collect();
    MONTH_ABBREVIATIONS
        .iter()
        .position(|abbr| *abbr == prefix)
        .map(|idx| MONTH_NAMES[idx])
}

/// 首字符大写，其余小写
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
