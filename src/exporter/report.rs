// ==========================================
// 经销商销售报表系统 - 报表文档模型
// ==========================================
// 职责: 组织可打印报表（标题、元信息行、正文表格）
// 规则: 正文剔除经销商名称列与代码列；其余列保持原顺序
// ==========================================

use crate::domain::session::Session;
use crate::domain::table::DisplayRow;
use crate::engine::query::QueryResult;
use serde::{Deserialize, Serialize};

/// 下载文件名: dealer_data_{经销商（空格→下划线）或 all}.{扩展名}
pub fn export_file_name(dealer: Option<&str>, extension: &str) -> String {
    let dealer = dealer.filter(|d| !d.is_empty()).unwrap_or("all");
    format!("dealer_data_{}.{}", dealer.replace(' ', "_"), extension)
}

/// 报表文档
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealerReport {
    pub title: String,
    /// 经销商代码（无值时为 "-"）
    pub dealer_code: String,
    pub month_label: String,
    pub headers: Vec<String>,
    pub rows: Vec<DisplayRow>,
}

impl DealerReport {
    /// 由查询结果构建报表
    pub fn build(session: &Session, dealer: Option<&str>, result: &QueryResult) -> Self {
        let dealer = dealer.filter(|d| !d.is_empty());
        let roles = session.roles();

        let body_columns: Vec<usize> = session
            .headers()
            .iter()
            .enumerate()
            .filter(|(_, h)| !roles.is_dealer_column(h))
            .map(|(i, _)| i)
            .collect();

        let headers = body_columns
            .iter()
            .map(|&i| session.headers()[i].clone())
            .collect();
        let rows = result
            .rows
            .iter()
            .map(|row| {
                body_columns
                    .iter()
                    .map(|&i| row.get(i).cloned().unwrap_or_default())
                    .collect()
            })
            .collect();

        Self {
            title: format!("Dealer Report - {}", dealer.unwrap_or("All Dealers")),
            dealer_code: result
                .dealer_code
                .clone()
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| "-".to_string()),
            month_label: result.month_label.clone(),
            headers,
            rows,
        }
    }

    pub fn meta_line(&self) -> String {
        format!("Dealer Code: {}    Month: {}", self.dealer_code, self.month_label)
    }

    /// 纯文本渲染（制表符分隔）
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.title);
        out.push('\n');
        out.push_str(&self.meta_line());
        out.push_str("\n\n");
        out.push_str(&self.headers.join("\t"));
        out.push('\n');
        for row in &self.rows {
            out.push_str(&row.join("\t"));
            out.push('\n');
        }
        out
    }
}
