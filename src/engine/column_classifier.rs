// ==========================================
// 经销商销售报表系统 - 列角色识别
// ==========================================
// 职责: 仅凭表头文本识别 经销商名称 / 经销商代码 / 月份 三种角色
// 规则: 每个角色一组有序规则，逐条扫描全部表头，首个命中即采用
// 说明: 精确匹配使用"清洗后"文本（小写、_/- 换空格、去首尾空白）
//       子串匹配使用小写原文
// ==========================================

use crate::domain::table::ColumnRoles;
use tracing::debug;

/// 表头的比较视图
struct HeaderKey<'a> {
    original: &'a str,
    lower: String,
    cleaned: String,
}

impl<'a> HeaderKey<'a> {
    fn new(original: &'a str) -> Self {
        let lower = original.to_lowercase();
        let cleaned = lower.replace(['_', '-'], " ").trim().to_string();
        Self {
            original,
            lower,
            cleaned,
        }
    }

    fn contains_all(&self, needles: &[&str]) -> bool {
        needles.iter().all(|n| self.lower.contains(n))
    }
}

type HeaderRule = fn(&HeaderKey<'_>) -> bool;

// ===== 经销商名称 =====
fn is_exact_dealer_name(h: &HeaderKey<'_>) -> bool {
    h.cleaned == "dealer name"
}

fn has_dealer_and_name(h: &HeaderKey<'_>) -> bool {
    h.contains_all(&["dealer", "name"])
}

fn has_party_and_name(h: &HeaderKey<'_>) -> bool {
    h.contains_all(&["party", "name"])
}

const DEALER_NAME_RULES: &[HeaderRule] =
    &[is_exact_dealer_name, has_dealer_and_name, has_party_and_name];

// ===== 经销商代码 =====
fn is_exact_dealer_code(h: &HeaderKey<'_>) -> bool {
    matches!(h.cleaned.as_str(), "dealer code" | "dealercode" | "code")
}

fn has_dealer_and_code(h: &HeaderKey<'_>) -> bool {
    h.contains_all(&["dealer", "code"])
}

const DEALER_CODE_RULES: &[HeaderRule] = &[is_exact_dealer_code, has_dealer_and_code];

// ===== 月份 =====
// 先按候选顺序精确匹配月份列，再退回到任意日期类列
fn is_month(h: &HeaderKey<'_>) -> bool {
    h.lower == "month"
}

fn is_mnth(h: &HeaderKey<'_>) -> bool {
    h.lower == "mnth"
}

fn is_billing_month(h: &HeaderKey<'_>) -> bool {
    h.lower == "billing month"
}

fn is_bill_month(h: &HeaderKey<'_>) -> bool {
    h.lower == "bill month"
}

fn is_date_like(h: &HeaderKey<'_>) -> bool {
    ["sale_date", "sale date", "date", "invoice", "bill"]
        .iter()
        .any(|n| h.lower.contains(n))
}

const MONTH_RULES: &[HeaderRule] = &[
    is_month,
    is_mnth,
    is_billing_month,
    is_bill_month,
    is_date_like,
];

/// 按有序规则查找：规则优先，表头顺序次之
fn detect(keys: &[HeaderKey<'_>], rules: &[HeaderRule]) -> Option<String> {
    rules.iter().find_map(|rule| {
        keys.iter()
            .find(|key| rule(key))
            .map(|key| key.original.to_string())
    })
}

/// 识别列角色
///
/// 同一表头列表总是得到同一结果。
pub fn classify<S: AsRef<str>>(headers: &[S]) -> ColumnRoles {
    let keys: Vec<HeaderKey<'_>> = headers.iter().map(|h| HeaderKey::new(h.as_ref())).collect();

    let roles = ColumnRoles {
        dealer_name: detect(&keys, DEALER_NAME_RULES),
        dealer_code: detect(&keys, DEALER_CODE_RULES),
        month: detect(&keys, MONTH_RULES),
    };

    debug!(
        dealer_name = ?roles.dealer_name,
        dealer_code = ?roles.dealer_code,
        month = ?roles.month,
        "列角色识别完成"
    );
    roles
}
