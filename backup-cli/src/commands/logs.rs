use super::{finish, load_failure};
use crate::app::CliApp;
use client_core::error::Result;
use client_core::format::{capitalize, format_size, format_timestamp};
use client_core::models::BackupLog;
use client_core::views::{DetailView, LogsView};
use tracing::{info, warn};

/// 查看备份日志；指定 `log_id` 时显示单条详情
pub async fn run_logs(app: &CliApp, log_id: Option<&str>) -> Result<()> {
    let mut view = LogsView::new(app.orchestrator.clone());
    if let Err(e) = view.load().await {
        return Err(load_failure(view.error(), e));
    }

    if let Some(log_id) = log_id {
        let log = view.select(log_id)?;
        show_log_detail(log);
        return Ok(());
    }

    let summary = view.summary();
    info!("📜 备份日志");
    info!("==========");
    info!(
        "   总计: {}  ✅ 成功: {}  ❌ 失败: {}  ⏳ 进行中: {}",
        summary.total, summary.success, summary.failed, summary.pending
    );

    if view.logs().is_empty() {
        info!("   No backup logs yet");
        return Ok(());
    }

    info!(
        "{:<26} {:<20} {:<8} {:<12} {}",
        "ID", "名称", "状态", "大小", "创建时间"
    );
    info!("{}", "-".repeat(90));
    for log in view.logs() {
        info!(
            "{:<26} {:<20} {:<8} {:<12} {}",
            log.id,
            log.name,
            capitalize(log.status.as_str()),
            format_size(log.size),
            format_timestamp(&log.created_at),
        );
    }
    info!("💡 使用 'backup-cli logs --log <id>' 查看详情");
    Ok(())
}

fn show_log_detail(log: &BackupLog) {
    info!("📄 {}", log.file_name);
    info!("   ID:       {}", log.id);
    info!("   名称:     {}", log.name);
    info!("   状态:     {}", capitalize(log.status.as_str()));
    info!("   大小:     {}", format_size(log.size));
    if let Some(config_id) = log.config_id() {
        info!("   配置 ID:  {}", config_id);
    }
    if let Some(space_key) = &log.space_key {
        info!("   存储键:   {}", space_key);
    }
    if let Some(url) = &log.url {
        info!("   下载地址: {}", url);
    }
    info!("   创建时间: {}", format_timestamp(&log.created_at));
    info!("   更新时间: {}", format_timestamp(&log.updated_at));
    if let Some(message) = &log.error_message {
        warn!("   错误信息: {}", message);
    }
}

/// 从成功的备份恢复
pub async fn run_restore(app: &CliApp, config_id: &str, log_id: &str) -> Result<()> {
    let mut view = DetailView::new(
        app.orchestrator.clone(),
        config_id,
        app.config.logs.correlation,
    );
    if let Err(e) = view.load().await {
        return Err(load_failure(view.error(), e));
    }
    if let Some(message) = view.logs_error() {
        warn!("⚠️  {}", message);
    }

    info!("♻️  从 {} 恢复 {}", log_id, config_id);
    let result = view.restore(log_id).await;
    let event = finish(view.take_notice(), result)?;
    if let Some(message) = &event.reload_error {
        warn!("⚠️  {}", message);
    } else {
        info!(
            "   当前共有 {} 条相关日志，其中 {} 条可恢复",
            view.recent_logs().len(),
            view.restore_candidates().len()
        );
    }
    Ok(())
}
