use crate::constants::api;
/// API配置模块 - 备份服务端点配置
use crate::error::{DashboardError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// 运行备份时使用的端点
///
/// 服务端同时暴露了 `backup-config/{id}/run` 与 `manual-trigger` 两个入口，
/// 客户端只使用其中一个作为 `run_backup` 的唯一契约。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RunEndpoint {
    #[default]
    ConfigRun,
    ManualTrigger,
}

/// API端点配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEndpoints {
    /// 备份配置列表端点
    pub backup_config_list: String,
    /// 创建备份配置端点
    pub backup_config_create: String,
    /// 运行备份端点（包含 {id} 占位符）
    pub backup_config_run: String,
    /// 手动触发端点
    pub manual_trigger: String,
    /// 备份文件列表端点
    pub backup_file_list: String,
    /// 恢复端点
    pub restore: String,
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        Self {
            backup_config_list: api::endpoints::BACKUP_CONFIG_LIST.to_string(),
            backup_config_create: api::endpoints::BACKUP_CONFIG_CREATE.to_string(),
            backup_config_run: api::endpoints::BACKUP_CONFIG_RUN.to_string(),
            manual_trigger: api::endpoints::MANUAL_TRIGGER.to_string(),
            backup_file_list: api::endpoints::BACKUP_FILE_LIST.to_string(),
            restore: api::endpoints::RESTORE.to_string(),
        }
    }
}

/// API配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// 基础URL
    pub base_url: String,
    /// API端点
    pub endpoints: ApiEndpoints,
    /// 运行备份所用端点
    pub run_endpoint: RunEndpoint,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: api::DEFAULT_BASE_URL.to_string(),
            endpoints: ApiEndpoints::default(),
            run_endpoint: RunEndpoint::default(),
        }
    }
}

impl ApiConfig {
    /// 使用指定基础地址创建配置，地址必须是合法的 http(s) URL
    pub fn new(base_url: &str, run_endpoint: RunEndpoint) -> Result<Self> {
        let parsed = Url::parse(base_url)?;
        if parsed.cannot_be_a_base() {
            return Err(DashboardError::custom(format!(
                "API 基础地址无效: {base_url}"
            )));
        }

        Ok(Self {
            base_url: base_url.to_string(),
            endpoints: ApiEndpoints::default(),
            run_endpoint,
        })
    }

    /// 获取完整的端点URL
    pub fn get_endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    pub fn get_config_list_url(&self) -> String {
        self.get_endpoint_url(&self.endpoints.backup_config_list)
    }

    pub fn get_config_create_url(&self) -> String {
        self.get_endpoint_url(&self.endpoints.backup_config_create)
    }

    /// 获取运行备份完整URL（替换id占位符）
    ///
    /// id 作为单个路径段写入并做百分号编码，空 id 与 `.`/`..` 会被拒绝。
    pub fn get_config_run_url(&self, config_id: &str) -> Result<String> {
        if matches!(config_id.trim(), "" | "." | "..") {
            return Err(DashboardError::custom(format!(
                "备份配置 id 无效: {config_id:?}"
            )));
        }

        let template = &self.endpoints.backup_config_run;
        let (prefix, suffix) = template.split_once("{id}").ok_or_else(|| {
            DashboardError::custom(format!("运行备份端点缺少 {{id}} 占位符: {template}"))
        })?;

        let mut url = Url::parse(&self.get_endpoint_url(prefix))?;
        url.path_segments_mut()
            .map_err(|_| DashboardError::custom(format!("API 基础地址无效: {}", self.base_url)))?
            .pop_if_empty()
            .push(config_id)
            .extend(suffix.split('/').filter(|segment| !segment.is_empty()));
        Ok(url.into())
    }

    pub fn get_manual_trigger_url(&self) -> String {
        self.get_endpoint_url(&self.endpoints.manual_trigger)
    }

    pub fn get_file_list_url(&self) -> String {
        self.get_endpoint_url(&self.endpoints.backup_file_list)
    }

    pub fn get_restore_url(&self) -> String {
        self.get_endpoint_url(&self.endpoints.restore)
    }

    /// 获取所有端点信息，用于CLI帮助显示
    pub fn get_endpoints_info(&self) -> Vec<(&str, String)> {
        let run = match self.run_endpoint {
            RunEndpoint::ConfigRun => self.get_endpoint_url(&self.endpoints.backup_config_run),
            RunEndpoint::ManualTrigger => self.get_manual_trigger_url(),
        };
        vec![
            ("服务器地址", self.base_url.clone()),
            ("备份配置列表", self.get_config_list_url()),
            ("创建备份配置", self.get_config_create_url()),
            ("运行备份", run),
            ("备份日志列表", self.get_file_list_url()),
            ("恢复备份", self.get_restore_url()),
        ]
    }
}

impl fmt::Display for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "当前API配置:")?;
        writeln!(f, "服务器地址: {}", self.base_url)?;
        writeln!(f, "\n主要端点:")?;
        for (name, url) in self.get_endpoints_info() {
            writeln!(f, "  {name}: {url}")?;
        }
        Ok(())
    }
}
