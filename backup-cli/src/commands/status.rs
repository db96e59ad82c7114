use crate::app::CliApp;
use crate::project_info::get_version_string;
use client_core::error::Result;
use tracing::info;

/// 显示API配置信息
pub fn run_api_info(app: &CliApp) -> Result<()> {
    info!("🗄️  {}", get_version_string());
    info!("{}", app.api_client.get_config());

    let timeouts = app.api_client.timeouts();
    info!("⏱️  超时设置:");
    info!("   列表请求: {}s", app.config.api.request_timeout_secs);
    info!("   创建配置: {}s", timeouts.create.as_secs());
    info!("   运行备份: {}s", timeouts.run.as_secs());
    info!("   恢复备份: {}s", timeouts.restore.as_secs());
    info!("🔗 日志关联方式: {:?}", app.config.logs.correlation);
    Ok(())
}
