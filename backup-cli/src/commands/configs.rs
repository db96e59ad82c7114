use super::{finish, load_failure};
use crate::app::CliApp;
use client_core::error::{DashboardError, Result};
use client_core::format::{
    capitalize, format_database_type, format_optional_timestamp, format_size, format_timestamp,
};
use client_core::models::{BackupLog, NewBackupConfig};
use client_core::views::{CreateView, DetailView, ListView};
use tracing::{info, warn};

/// 列出所有备份配置
pub async fn run_list(app: &CliApp) -> Result<()> {
    let mut view = ListView::new(app.orchestrator.clone());
    if let Err(e) = view.load().await {
        return Err(load_failure(view.error(), e));
    }

    if view.is_empty_state() {
        info!("📦 No backup configurations yet");
        info!("💡 使用以下命令创建备份配置:");
        info!("   backup-cli create --name <name> --database-url <url> --target-database <db>");
        return Ok(());
    }

    info!("📦 备份配置列表");
    info!("==============");
    info!(
        "{:<26} {:<24} {:<12} {:<10} {}",
        "ID", "名称", "数据库", "计划", "最近备份"
    );
    info!("{}", "-".repeat(96));

    for config in view.configs() {
        info!(
            "{:<26} {:<24} {:<12} {:<10} {}",
            config.id,
            config.name,
            format_database_type(config.database_type.as_str()),
            capitalize(config.schedule.as_str()),
            format_optional_timestamp(config.last_backup.as_ref()),
        );
    }

    info!("{}", "-".repeat(96));
    info!("共 {} 个备份配置", view.configs().len());
    Ok(())
}

/// 查看备份配置详情
pub async fn run_show(app: &CliApp, id: &str) -> Result<()> {
    let mut view = DetailView::new(app.orchestrator.clone(), id, app.config.logs.correlation);
    if let Err(e) = view.load().await {
        return Err(load_failure(view.error(), e));
    }

    let Some(config) = view.config() else {
        return Err(DashboardError::not_found("Backup configuration not found"));
    };

    info!("🗄️  {}", config.name);
    info!("==================");
    info!("   ID:         {}", config.id);
    info!("   数据库类型: {}", format_database_type(config.database_type.as_str()));
    info!("   数据库地址: {}", config.database_url);
    info!("   目标数据库: {}", config.target_database_name);
    info!("   备份计划:   {}", capitalize(config.schedule.as_str()));
    if let Some(status) = config.status {
        info!("   状态:       {}", capitalize(status.as_str()));
    }
    if let Some(created_at) = &config.created_at {
        info!("   创建时间:   {}", format_timestamp(created_at));
    }
    info!("   最近备份:   {}", format_optional_timestamp(config.last_backup.as_ref()));

    info!("📅 Recent Activity");
    if let Some(message) = view.logs_error() {
        warn!("⚠️  {}", message);
        return Ok(());
    }

    let logs = view.recent_logs();
    if logs.is_empty() {
        info!("   No recent backup activity");
        info!("   💡 运行 'backup-cli run {}' 创建第一个备份", config.id);
        return Ok(());
    }

    for log in &logs {
        for line in activity_lines(log) {
            info!("{}", line);
        }
    }

    let candidates = view.restore_candidates();
    if !candidates.is_empty() {
        info!("♻️  可恢复的备份（最新在前）:");
        for log in &candidates {
            info!("   {}  {}", log.id, format_timestamp(&log.created_at));
        }
        info!(
            "   💡 使用 'backup-cli restore {} <log-id>' 恢复",
            config.id
        );
    }
    Ok(())
}

/// 最近活动中的一行日志，带下载地址时追加一行
fn activity_lines(log: &BackupLog) -> Vec<String> {
    let mut lines = vec![format!(
        "   {:<26} {:<8} {:<32} {:<12} {}",
        log.id,
        capitalize(log.status.as_str()),
        log.file_name,
        format_size(log.size),
        format_timestamp(&log.created_at),
    )];
    if let Some(url) = &log.url {
        lines.push(format!("     ⬇️  {url}"));
    }
    lines
}

/// 新建备份配置
pub async fn run_create(app: &CliApp, form: NewBackupConfig) -> Result<()> {
    let mut view = CreateView::new(app.orchestrator.clone());
    *view.form_mut() = form;

    let result = view.submit().await;
    if let Err(DashboardError::Validation(errors)) = &result {
        for (field, message) in errors.iter() {
            warn!("   {}: {}", field, message);
        }
        return Err(DashboardError::custom(format!(
            "表单校验失败，共 {} 项",
            errors.len()
        )));
    }
    finish(view.take_notice(), result).map(|_| ())
}

/// 立即运行一次备份
pub async fn run_backup(app: &CliApp, id: &str) -> Result<()> {
    info!("🚀 运行备份: {}", id);
    let mut view = DetailView::new(app.orchestrator.clone(), id, app.config.logs.correlation);
    let result = view.run().await;
    finish(view.take_notice(), result).map(|_| ())
}
