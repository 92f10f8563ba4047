// ==========================================
// 经销商销售报表系统 - 导入会话
// ==========================================
// 职责: 一次上传对应的不可变数据集
// 内容: 表头 / 原始行 / 展示行 / 列角色 / 下拉选项
// 红线: 导入后只读，并发查询无需加锁
// ==========================================

use crate::domain::cell::RawCell;
use crate::domain::table::{ColumnRoles, DisplayRow, RoleIndexes};
use crate::domain::types::ColumnRole;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ==========================================
// SessionId - 不透明会话句柄
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// 生成新句柄（32 位十六进制）
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self(value.trim().to_string())
    }
}

impl From<String> for SessionId {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

// ==========================================
// Session - 导入会话
// ==========================================
#[derive(Debug, Clone)]
pub struct Session {
    headers: Vec<String>,
    raw_rows: Vec<Vec<RawCell>>,
    display_rows: Vec<DisplayRow>,
    roles: ColumnRoles,
    indexes: RoleIndexes,
    dealers: Vec<String>,
    months: Vec<String>,
}

impl Session {
    /// 由构建器组装（仅限 crate 内部，保证各部分一致）
    pub(crate) fn from_parts(
        headers: Vec<String>,
        raw_rows: Vec<Vec<RawCell>>,
        display_rows: Vec<DisplayRow>,
        roles: ColumnRoles,
        indexes: RoleIndexes,
        dealers: Vec<String>,
        months: Vec<String>,
    ) -> Self {
        Self {
            headers,
            raw_rows,
            display_rows,
            roles,
            indexes,
            dealers,
            months,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn raw_rows(&self) -> &[Vec<RawCell>] {
        &self.raw_rows
    }

    pub fn display_rows(&self) -> &[DisplayRow] {
        &self.display_rows
    }

    pub fn roles(&self) -> &ColumnRoles {
        &self.roles
    }

    /// 已排序的经销商名称列表
    pub fn dealers(&self) -> &[String] {
        &self.dealers
    }

    /// 按日历顺序的月份列表
    pub fn months(&self) -> &[String] {
        &self.months
    }

    pub fn row_count(&self) -> usize {
        self.raw_rows.len()
    }

    /// 角色列的位置（同名表头取第一列）
    pub fn role_index(&self, role: ColumnRole) -> Option<usize> {
        self.indexes.get(role)
    }
}
