// ==========================================
// 经销商销售报表系统 - 单元格值标准化
// ==========================================
// 职责: 原始单元格 → 规范日期（可识别时）/ 展示字符串
// 红线: 解析失败不报错，一律回退为原值
// ==========================================
// 日期格式优先级（固定顺序，日在前优先于月在前）:
//   1. YYYYMMDD（8 位纯数字）
//   2. DD/MM/YYYY
//   3. YYYY-MM-DD
//   4. DD-MM-YYYY
//   5. MM/DD/YYYY
//   6. DD.MM.YYYY
// ==========================================

use crate::domain::cell::RawCell;
use chrono::NaiveDate;

/// 日期标准化结果
///
/// 失败分支携带原始单元格（不是错误）。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DateNormalization<'a> {
    /// 识别为规范日期
    Date(NaiveDate),
    /// 无法识别，原样返回
    Unchanged(&'a RawCell),
}

impl<'a> DateNormalization<'a> {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            DateNormalization::Date(d) => Some(*d),
            DateNormalization::Unchanged(_) => None,
        }
    }
}

// ==========================================
// 文本日期格式表
// ==========================================

#[derive(Debug, Clone, Copy)]
enum Field {
    Day,
    Month,
    Year,
}

struct DatePattern {
    separator: char,
    order: [Field; 3],
}

const TEXT_DATE_PATTERNS: [DatePattern; 5] = [
    DatePattern {
        separator: '/',
        order: [Field::Day, Field::Month, Field::Year],
    },
    DatePattern {
        separator: '-',
        order: [Field::Year, Field::Month, Field::Day],
    },
    DatePattern {
        separator: '-',
        order: [Field::Day, Field::Month, Field::Year],
    },
    DatePattern {
        separator: '/',
        order: [Field::Month, Field::Day, Field::Year],
    },
    DatePattern {
        separator: '.',
        order: [Field::Day, Field::Month, Field::Year],
    },
];

impl DatePattern {
    fn parse(&self, text: &str) -> Option<NaiveDate> {
        let parts: Vec<&str> = text.split(self.separator).collect();
        if parts.len() != 3 {
            return None;
        }

        let (mut year, mut month, mut day) = (None, None, None);
        for (field, part) in self.order.iter().zip(parts) {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            match field {
                Field::Year if part.len() == 4 => year = part.parse::<i32>().ok(),
                Field::Month if part.len() <= 2 => month = part.parse::<u32>().ok(),
                Field::Day if part.len() <= 2 => day = part.parse::<u32>().ok(),
                _ => return None,
            }
        }

        build_date(year?, month?, day?)
    }
}

fn build_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    if year < 1 {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// 解析 8 位 YYYYMMDD 数字串
pub fn parse_compact_date(digits: &str) -> Option<NaiveDate> {
    if digits.len() != 8 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = digits[0..4].parse::<i32>().ok()?;
    let month = digits[4..6].parse::<u32>().ok()?;
    let day = digits[6..8].parse::<u32>().ok()?;
    build_date(year, month, day)
}

/// 按固定优先级解析文本日期
pub fn parse_text_date(value: &str) -> Option<NaiveDate> {
    let s = value.trim();
    if s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit()) {
        if let Some(date) = parse_compact_date(s) {
            return Some(date);
        }
    }
    TEXT_DATE_PATTERNS.iter().find_map(|p| p.parse(s))
}

// ==========================================
// 对外接口
// ==========================================

/// 尝试将原始单元格标准化为规范日期
///
/// - 时间值: 取其日历日
/// - 整数/浮点: 十进制形式恰为 8 位时按 YYYYMMDD 解析（浮点先向零取整）
/// - 文本: 见模块头部格式优先级
/// - 空值: 不产生日期
pub fn normalize_date(value: &RawCell) -> DateNormalization<'_> {
    let parsed = match value {
        RawCell::Temporal(dt) => Some(dt.date()),
        RawCell::Int(i) => parse_compact_date(&i.to_string()),
        RawCell::Float(f) if f.is_finite() && f.abs() < 1e18 => {
            parse_compact_date(&(f.trunc() as i64).to_string())
        }
        RawCell::Float(_) => None,
        RawCell::Text(s) => parse_text_date(s),
        RawCell::Empty => None,
    };

    match parsed {
        Some(date) => DateNormalization::Date(date),
        None => DateNormalization::Unchanged(value),
    }
}

/// 单元格展示字符串
///
/// 可识别为日期时渲染为 DD/MM/YYYY，否则为自然字符串形式（空值为空串）。
pub fn to_display(value: &RawCell) -> String {
    match normalize_date(value) {
        DateNormalization::Date(date) => date.format("%d/%m/%Y").to_string(),
        DateNormalization::Unchanged(original) => original.natural_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_compact_date_from_text_int_and_float() {
        let expected = ymd(2025, 8, 12);
        assert_eq!(normalize_date(&RawCell::Text("20250812".into())).date(), Some(expected));
        assert_eq!(normalize_date(&RawCell::Text(" 20250812 ".into())).date(), Some(expected));
        assert_eq!(normalize_date(&RawCell::Int(20250812)).date(), Some(expected));
        assert_eq!(normalize_date(&RawCell::Float(20250812.0)).date(), Some(expected));
        assert_eq!(to_display(&RawCell::Int(20250812)), "12/08/2025");
    }

    #[test]
    fn test_invalid_compact_date_falls_back_to_original() {
        let cell = RawCell::Int(20251301);
        assert_eq!(normalize_date(&cell), DateNormalization::Unchanged(&cell));
        assert_eq!(to_display(&cell), "20251301");

        // 非 8 位数字原样保留
        let amount = RawCell::Int(500);
        assert_eq!(normalize_date(&amount), DateNormalization::Unchanged(&amount));
        assert_eq!(to_display(&amount), "500");
        assert_eq!(to_display(&RawCell::Float(500.0)), "500");
        assert_eq!(to_display(&RawCell::Float(1234.5)), "1234.5");
    }

    #[test]
    fn test_fractional_compact_float_is_truncated() {
        let cell = RawCell::Float(20250812.7);
        assert_eq!(normalize_date(&cell).date(), Some(ymd(2025, 8, 12)));
        assert_eq!(to_display(&cell), "12/08/2025");

        // 负数取整后不是 8 位
        let negative = RawCell::Float(-20250812.0);
        assert_eq!(normalize_date(&negative), DateNormalization::Unchanged(&negative));
    }

    #[test]
    fn test_invalid_compact_float_falls_back() {
        let cell = RawCell::Float(20251301.0);
        assert_eq!(normalize_date(&cell), DateNormalization::Unchanged(&cell));
        assert_eq!(to_display(&cell), "20251301");
    }

    #[test]
    fn test_non_finite_float_is_never_a_date() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let cell = RawCell::Float(value);
            assert!(matches!(normalize_date(&cell), DateNormalization::Unchanged(RawCell::Float(_))));
        }
        assert_eq!(to_display(&RawCell::Float(f64::NAN)), "NaN");
        assert_eq!(to_display(&RawCell::Float(f64::INFINITY)), "inf");
    }

    #[test]
    fn test_text_patterns_in_priority_order() {
        // 日在前优先：03/04/2025 按 DD/MM 解析为 4 月 3 日
        assert_eq!(parse_text_date("03/04/2025"), Some(ymd(2025, 4, 3)));
        // DD/MM 失败后回落到 MM/DD
        assert_eq!(parse_text_date("04/25/2025"), Some(ymd(2025, 4, 25)));
        assert_eq!(parse_text_date("2025-08-12"), Some(ymd(2025, 8, 12)));
        assert_eq!(parse_text_date("12-08-2025"), Some(ymd(2025, 8, 12)));
        assert_eq!(parse_text_date("12.08.2025"), Some(ymd(2025, 8, 12)));
        assert_eq!(parse_text_date("1/8/2025"), Some(ymd(2025, 8, 1)));
    }

    #[test]
    fn test_text_that_is_not_a_date() {
        assert_eq!(parse_text_date("Acme Motors"), None);
        assert_eq!(parse_text_date("12/08/25"), None);
        assert_eq!(parse_text_date("12/08/2025 10:30"), None);
        assert_eq!(parse_text_date("31/02/2025"), None);
        assert_eq!(parse_text_date(""), None);

        let cell = RawCell::Text("  Acme Motors ".into());
        assert_eq!(to_display(&cell), "  Acme Motors ");
    }

    #[test]
    fn test_temporal_and_empty() {
        let dt = ymd(2024, 1, 5).and_hms_opt(13, 45, 0).unwrap();
        assert_eq!(normalize_date(&RawCell::Temporal(dt)).date(), Some(ymd(2024, 1, 5)));
        assert_eq!(to_display(&RawCell::Temporal(dt)), "05/01/2024");

        assert_eq!(normalize_date(&RawCell::Empty).date(), None);
        assert_eq!(to_display(&RawCell::Empty), "");
    }

    #[test]
    fn test_every_valid_compact_date_round_trips_to_display() {
        let mut date = ymd(2023, 12, 25);
        for _ in 0..800 {
            let digits = date.format("%Y%m%d").to_string();
            let cell = RawCell::Text(digits);
            assert_eq!(normalize_date(&cell).date(), Some(date));
            assert_eq!(to_display(&cell), date.format("%d/%m/%Y").to_string());
            date = date.succ_opt().unwrap();
        }
    }
}
