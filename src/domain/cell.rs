// ==========================================
// 经销商销售报表系统 - 原始单元格类型
// ==========================================
// 职责: 表格单元格的无类型标量（未做任何标准化）
// 取值: 时间 / 整数 / 浮点 / 文本 / 空
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 原始单元格值
///
/// 由外部表格读取器提供，核心只做只读解释。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RawCell {
    /// 时间值（Excel 日期单元格等）
    Temporal(NaiveDateTime),
    /// 整数
    Int(i64),
    /// 浮点数
    Float(f64),
    /// 文本（保留原样，不做 trim）
    Text(String),
    /// 空单元格
    Empty,
}

impl RawCell {
    /// 单元格的自然字符串形式（不做日期识别）
    ///
    /// - 整数型浮点数不带小数部分（表格数字统一以浮点存储）
    /// - 空单元格为空字符串
    pub fn natural_string(&self) -> String {
        match self {
            RawCell::Temporal(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            RawCell::Int(i) => i.to_string(),
            RawCell::Float(f) => format_float(*f),
            RawCell::Text(s) => s.clone(),
            RawCell::Empty => String::new(),
        }
    }
}

impl fmt::Display for RawCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.natural_string())
    }
}

impl From<&str> for RawCell {
    fn from(value: &str) -> Self {
        RawCell::Text(value.to_string())
    }
}

impl From<String> for RawCell {
    fn from(value: String) -> Self {
        RawCell::Text(value)
    }
}

impl From<i64> for RawCell {
    fn from(value: i64) -> Self {
        RawCell::Int(value)
    }
}

impl From<f64> for RawCell {
    fn from(value: f64) -> Self {
        RawCell::Float(value)
    }
}

impl From<NaiveDateTime> for RawCell {
    fn from(value: NaiveDateTime) -> Self {
        RawCell::Temporal(value)
    }
}

impl<T: Into<RawCell>> From<Option<T>> for RawCell {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(RawCell::Empty)
    }
}

fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        (value as i64).to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_natural_string_variants() {
        assert_eq!(RawCell::Int(500).natural_string(), "500");
        assert_eq!(RawCell::Float(500.0).natural_string(), "500");
        assert_eq!(RawCell::Float(12.5).natural_string(), "12.5");
        assert_eq!(RawCell::Text("  D100 ".into()).natural_string(), "  D100 ");
        assert_eq!(RawCell::Empty.natural_string(), "");

        let dt = NaiveDate::from_ymd_opt(2025, 8, 12)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(RawCell::Temporal(dt).natural_string(), "2025-08-12 00:00:00");
    }

    #[test]
    fn test_option_conversion() {
        let none: Option<&str> = None;
        assert_eq!(RawCell::from(none), RawCell::Empty);
        assert_eq!(RawCell::from(Some(7_i64)), RawCell::Int(7));
    }
}
