// ==========================================
// 经销商销售报表系统 - 领域类型定义
// ==========================================
// 职责: 列角色、月份名称等基础枚举
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// 列角色 (Column Role)
// ==========================================
// 每种角色最多对应一列，可为空（未识别）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    DealerName, // 经销商名称
    DealerCode, // 经销商代码
    Month,      // 月份/日期
}

// ==========================================
// 月份名称表
// ==========================================
// 顺序即日历顺序（January … December）
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// 月份序号（1-12）→ 英文全称
pub fn month_name(month: u32) -> Option<&'static str> {
    month
        .checked_sub(1)
        .and_then(|idx| MONTH_NAMES.get(idx as usize).copied())
}

/// 月份全称 → 日历序号（0-11），用于排序
pub fn month_index(name: &str) -> Option<usize> {
    MONTH_NAMES.iter().position(|m| *m == name)
}

// ==========================================
// 查询常量
// ==========================================

/// 月份筛选哨兵值：不过滤
pub const ALL_MONTHS_SENTINEL: &str = "ALL";

/// 未按月份过滤时的生效标签
pub const ALL_MONTHS_LABEL: &str = "All";
