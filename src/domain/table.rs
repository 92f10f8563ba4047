// ==========================================
// 经销商销售报表系统 - 表格结构
// ==========================================
// 职责: 原始表（表头 + 行）与列角色映射
// 红线: 行按列位置对齐，不含解析逻辑
// ==========================================

use crate::domain::cell::RawCell;
use crate::domain::types::ColumnRole;
use serde::{Deserialize, Serialize};

// ==========================================
// RawTable - 外部读取器交付的原始表
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    /// 表头单元格（None = 空表头）
    pub headers: Vec<Option<String>>,
    /// 数据行（按列位置对齐，长度可能与表头不一致）
    pub rows: Vec<Vec<RawCell>>,
}

impl RawTable {
    pub fn new(headers: Vec<Option<String>>, rows: Vec<Vec<RawCell>>) -> Self {
        Self { headers, rows }
    }

    /// 由非空表头构造（测试与 CSV 读取常用）
    pub fn with_headers<S: AsRef<str>>(headers: &[S], rows: Vec<Vec<RawCell>>) -> Self {
        Self {
            headers: headers
                .iter()
                .map(|h| Some(h.as_ref().to_string()))
                .collect(),
            rows,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// 展示行：与表头按位置对齐的展示字符串
pub type DisplayRow = Vec<String>;

/// 表头标准化：去首尾空白，空表头 → 空字符串
pub fn normalize_headers(headers: &[Option<String>]) -> Vec<String> {
    headers
        .iter()
        .map(|h| h.as_deref().map(str::trim).unwrap_or("").to_string())
        .collect()
}

/// 行对齐：不足补 Empty，多余截断
pub fn align_row(mut row: Vec<RawCell>, width: usize) -> Vec<RawCell> {
    row.resize(width, RawCell::Empty);
    row
}

// ==========================================
// ColumnRoles - 列角色映射
// ==========================================
// 每个角色最多一列；导入时计算一次，之后不可变
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRoles {
    pub dealer_name: Option<String>,
    pub dealer_code: Option<String>,
    pub month: Option<String>,
}

impl ColumnRoles {
    pub fn get(&self, role: ColumnRole) -> Option<&str> {
        match role {
            ColumnRole::DealerName => self.dealer_name.as_deref(),
            ColumnRole::DealerCode => self.dealer_code.as_deref(),
            ColumnRole::Month => self.month.as_deref(),
        }
    }

    /// 是否为经销商名称/代码列（报表正文需剔除）
    pub fn is_dealer_column(&self, header: &str) -> bool {
        self.dealer_name.as_deref() == Some(header) || self.dealer_code.as_deref() == Some(header)
    }

    pub fn is_unassigned(&self) -> bool {
        self.dealer_name.is_none() && self.dealer_code.is_none() && self.month.is_none()
    }
}

// ==========================================
// RoleIndexes - 角色列位置
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleIndexes {
    pub dealer_name: Option<usize>,
    pub dealer_code: Option<usize>,
    pub month: Option<usize>,
}

impl RoleIndexes {
    /// 在表头中定位角色列（同名表头取第一列）
    pub fn locate(roles: &ColumnRoles, headers: &[String]) -> Self {
        let position = |name: Option<&str>| name.and_then(|n| headers.iter().position(|h| h == n));
        Self {
            dealer_name: position(roles.dealer_name.as_deref()),
            dealer_code: position(roles.dealer_code.as_deref()),
            month: position(roles.month.as_deref()),
        }
    }

    pub fn get(&self, role: ColumnRole) -> Option<usize> {
        match role {
            ColumnRole::DealerName => self.dealer_name,
            ColumnRole::DealerCode => self.dealer_code,
            ColumnRole::Month => self.month,
        }
    }
}
