use anyhow::{Context, Result};
use client_core::config::AppConfig;
use std::path::Path;
use tracing::{info, warn};

/// 运行独立的初始化流程：写入带注释的默认配置文件
///
/// 返回是否写入了新文件。
pub async fn run_init(config_path: &Path, force: bool) -> Result<bool> {
    info!("🗄️  Backup Dashboard 初始化");
    info!("==========================");

    if !force && config_path.exists() {
        warn!("⚠️  检测到已存在的配置文件: {}", config_path.display());
        info!("如果您要重新初始化，请使用 --force 参数");
        info!("示例: backup-cli init --force");
        return Ok(false);
    }

    let config = AppConfig::default();
    config
        .save_to_file(config_path)
        .with_context(|| format!("写入配置文件失败: {}", config_path.display()))?;
    info!("   ✅ 创建配置文件: {}", config_path.display());

    info!("🎉 初始化完成！");
    info!("");
    info!("📝 接下来的步骤:");
    info!("   1️⃣  编辑 {} 中的 [api] base_url，指向备份服务", config_path.display());
    info!("       - 或者设置环境变量 BACKUP_API_URL");
    info!("   2️⃣  运行 'backup-cli login <email> <password>' 登录");
    info!("   3️⃣  运行 'backup-cli list' 查看备份配置");
    info!("");
    info!("💡 提示:");
    info!("   - 使用 'backup-cli --help' 查看所有可用命令");
    info!("   - 使用 'backup-cli api-info' 查看当前使用的服务端点");

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_init_writes_loadable_config_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        assert!(run_init(&path, false).await.unwrap());
        let loaded = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.timeouts, AppConfig::default().timeouts);

        std::fs::write(&path, "[api]\nrequest_timeout_secs = 5\n").unwrap();
        assert!(!run_init(&path, false).await.unwrap());
        assert!(std::fs::read_to_string(&path).unwrap().contains("= 5"));

        assert!(run_init(&path, true).await.unwrap());
        assert_eq!(AppConfig::load_from_file(&path).unwrap().api.request_timeout_secs, 30);
    }
}
