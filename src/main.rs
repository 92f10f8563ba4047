// ==========================================
// 经销商销售报表系统 - 命令行入口
// ==========================================
// 用法: dealer-report <文件> [经销商] [月份] [导出.csv|导出.xlsx]
// 输出: 上传结果与查询结果（JSON，stdout）
// ==========================================

use anyhow::Context;
use clap::Parser;
use dealer_report::config::config_keys;
use dealer_report::{logging, AppState};
use serde_json::json;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(author, version, about = "经销商销售报表：导入表格并按经销商/月份筛选", long_about = None)]
struct Cli {
    /// 报表文件（.xlsx/.xlsm/.xlsb/.xls/.ods/.csv）
    file: PathBuf,
    /// 经销商名称（留空 = 全部）
    dealer: Option<String>,
    /// 月份全称，如 August（ALL = 全部）
    month: Option<String>,
    /// 导出路径，.xlsx 结尾导出 Excel，否则导出 CSV（相对路径落在配置的导出目录下）
    export: Option<PathBuf>,
    /// 额外打印纯文本报表
    #[arg(long)]
    report: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    match std::env::var(config_keys::ENV_LOG_FORMAT).as_deref() {
        Ok("json") => logging::init_json(),
        _ => logging::init(),
    }

    let cli = Cli::parse();
    tracing::info!("{} v{}", dealer_report::APP_NAME, dealer_report::VERSION);

    let state = AppState::from_env().context("配置加载失败")?;
    let api = &state.dealer_api;

    let file = cli.file.to_string_lossy().to_string();
    let upload = api.upload_file(&file).await?;

    let dealer = cli.dealer.as_deref().filter(|d| !d.is_empty());
    let month = cli.month.as_deref();
    let data = api.dealer_data(&upload.upload_id, dealer, month)?;

    let output = json!({ "upload": upload, "data": data });
    println!("{}", serde_json::to_string_pretty(&output)?);

    if cli.report {
        let report = api.report(&upload.upload_id, dealer, month)?;
        eprintln!("{}", report.to_text());
    }

    if let Some(export) = cli.export {
        let path = if export.is_absolute() {
            export
        } else {
            state.config.export_path(&export.to_string_lossy())
        };
        let is_xlsx = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"));
        let file = if is_xlsx {
            api.export_xlsx(&upload.upload_id, dealer, month)?
        } else {
            api.export_csv(&upload.upload_id, dealer, month)?
        };
        std::fs::write(&path, &file.content)
            .with_context(|| format!("写入导出文件失败: {}", path.display()))?;
        tracing::info!(path = %path.display(), "已导出 {}", file.file_name);
    }

    api.release(&upload.upload_id)?;
    Ok(())
}
