// ==========================================
// 经销商销售报表系统 - 查询引擎
// ==========================================
// 职责: 按经销商 / 月份筛选会话数据
// 规则:
//   - 经销商: 展示值去空白后与筛选值精确比较（区分大小写）
//   - 经销商代码: 经销商筛选后、月份筛选前的首行原始值
//   - 月份: 对原始值做月份识别后精确比较，展示行由筛选后的原始行重算
// 红线: 只读会话；结果保持原始行序
// ==========================================

use crate::domain::session::Session;
use crate::domain::table::DisplayRow;
use crate::domain::types::{ColumnRole, ALL_MONTHS_LABEL, ALL_MONTHS_SENTINEL};
use crate::engine::ingestion::display_row;
use crate::engine::month_classifier::month_of;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// 查询条件
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryFilter {
    /// 经销商名称（空 = 不过滤）
    #[serde(default)]
    pub dealer: Option<String>,
    /// 月份全称或 "ALL"（空 = 不过滤）
    #[serde(default)]
    pub month: Option<String>,
}

impl QueryFilter {
    pub fn new(dealer: Option<&str>, month: Option<&str>) -> Self {
        Self {
            dealer: dealer.map(str::to_string),
            month: month.map(str::to_string),
        }
    }

    /// 不过滤
    pub fn all() -> Self {
        Self::default()
    }

    fn dealer_value(&self) -> Option<&str> {
        self.dealer.as_deref().filter(|d| !d.is_empty())
    }

    fn month_value(&self) -> Option<&str> {
        self.month
            .as_deref()
            .filter(|m| !m.is_empty() && *m != ALL_MONTHS_SENTINEL)
    }
}

/// 查询结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// 筛选后的展示行
    pub rows: Vec<DisplayRow>,
    /// 行数
    pub total: usize,
    /// 经销商代码（未识别代码列或无结果时为 None）
    pub dealer_code: Option<String>,
    /// 生效月份标签（未过滤时为 "All"）
    pub month_label: String,
}

// ==========================================
// QueryEngine - 查询引擎
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct QueryEngine;

impl QueryEngine {
    pub fn new() -> Self {
        Self
    }

    /// 执行筛选
    #[instrument(skip(self, session), fields(dealer = ?filter.dealer, month = ?filter.month))]
    pub fn run(&self, session: &Session, filter: &QueryFilter) -> QueryResult {
        let display_rows = session.display_rows();
        let raw_rows = session.raw_rows();

        // === 步骤 1: 经销商过滤（展示值） ===
        let mut selected: Vec<usize> = (0..session.row_count()).collect();
        if let Some(dealer) = filter.dealer_value() {
            let column = session.role_index(ColumnRole::DealerName);
            selected.retain(|&i| {
                column
                    .and_then(|c| display_rows[i].get(c))
                    .is_some_and(|v| v.trim() == dealer)
            });
        }

        // === 步骤 2: 经销商代码（月份过滤前的首行） ===
        let dealer_code = session
            .role_index(ColumnRole::DealerCode)
            .and_then(|c| selected.first().map(|&i| raw_rows[i][c].natural_string()));

        // === 步骤 3: 月份过滤（原始值） ===
        let (rows, month_label) = match filter.month_value() {
            None => (
                selected.iter().map(|&i| display_rows[i].clone()).collect(),
                ALL_MONTHS_LABEL.to_string(),
            ),
            Some(month) => {
                let column = session.role_index(ColumnRole::Month);
                let rows: Vec<DisplayRow> = selected
                    .iter()
                    .map(|&i| &raw_rows[i])
                    .filter(|raw| column.and_then(|c| month_of(&raw[c])) == Some(month))
                    .map(|raw| display_row(raw))
                    .collect();
                (rows, month.to_string())
            }
        };

        debug!(total = rows.len(), dealer_code = ?dealer_code, "查询完成");
        QueryResult {
            total: rows.len(),
            rows,
            dealer_code,
            month_label,
        }
    }
}
