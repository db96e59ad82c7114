use crate::api::BackupApi;
use crate::error::{DashboardError, Result};
use crate::models::BackupConfig;
use tracing::debug;

/// 备份配置的客户端视图
///
/// 每次成功加载整体替换持有的快照，失败时保留上一次的快照。
#[derive(Debug, Clone, Default)]
pub struct ConfigRegistry {
    configs: Vec<BackupConfig>,
    loaded: bool,
}

impl ConfigRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 加载全部备份配置
    pub async fn load_all(&mut self, api: &dyn BackupApi) -> Result<&[BackupConfig]> {
        let configs = api.list_configs().await?;
        self.replace(configs);
        Ok(self.configs())
    }

    /// 整体替换快照
    pub fn replace(&mut self, configs: Vec<BackupConfig>) {
        debug!("备份配置快照已替换，共 {} 条", configs.len());
        self.configs = configs;
        self.loaded = true;
    }

    /// 按 id 查找
    pub fn get_by_id(&self, id: &str) -> Result<&BackupConfig> {
        self.configs
            .iter()
            .find(|config| config.id == id)
            .ok_or_else(|| DashboardError::not_found("Backup configuration not found"))
    }

    pub fn configs(&self) -> &[BackupConfig] {
        &self.configs
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}
