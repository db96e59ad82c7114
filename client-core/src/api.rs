use crate::api_config::{ApiConfig, RunEndpoint};
use crate::config::{AppConfig, TimeoutsConfig};
use crate::error::{GatewayError, Result};
use crate::gateway::HttpGateway;
use crate::models::{
    BackupConfig, BackupConfigsResponse, BackupFilesResponse, BackupLog, ManualTriggerRequest,
    NewBackupConfig, RestoreRequest,
};
use async_trait::async_trait;
use reqwest::Method;
use std::time::Duration;
use tracing::info;

type GatewayResult<T> = std::result::Result<T, GatewayError>;

/// 备份服务 API
///
/// 编排器与视图只依赖这个 trait，测试中可以替换成内存实现。
#[async_trait]
pub trait BackupApi: Send + Sync {
    /// 获取全部备份配置
    async fn list_configs(&self) -> GatewayResult<Vec<BackupConfig>>;

    /// 创建备份配置
    async fn create_config(&self, config: &NewBackupConfig) -> GatewayResult<()>;

    /// 运行一次备份
    async fn run_backup(&self, config_id: &str) -> GatewayResult<()>;

    /// 获取全部备份日志
    async fn list_logs(&self) -> GatewayResult<Vec<BackupLog>>;

    /// 从备份文件恢复
    async fn restore_backup(&self, log_id: &str) -> GatewayResult<()>;
}

/// 各类动作的超时预算
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionTimeouts {
    pub create: Duration,
    pub run: Duration,
    pub restore: Duration,
}

impl Default for ActionTimeouts {
    fn default() -> Self {
        (&TimeoutsConfig::default()).into()
    }
}

impl From<&TimeoutsConfig> for ActionTimeouts {
    fn from(config: &TimeoutsConfig) -> Self {
        Self {
            create: config.create(),
            run: config.run(),
            restore: config.restore(),
        }
    }
}

/// API 客户端
#[derive(Debug, Clone)]
pub struct ApiClient {
    gateway: HttpGateway,
    config: ApiConfig,
    timeouts: ActionTimeouts,
}

impl ApiClient {
    /// 创建新的 API 客户端
    pub fn new(
        config: ApiConfig,
        default_timeout: Duration,
        timeouts: ActionTimeouts,
    ) -> Result<Self> {
        Ok(Self {
            gateway: HttpGateway::new(default_timeout)?,
            config,
            timeouts,
        })
    }

    /// 根据应用配置创建
    pub fn from_app_config(app_config: &AppConfig) -> Result<Self> {
        Self::new(
            app_config.api_config()?,
            app_config.request_timeout(),
            (&app_config.timeouts).into(),
        )
    }

    /// 获取当前API配置
    pub fn get_config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn timeouts(&self) -> ActionTimeouts {
        self.timeouts
    }
}

#[async_trait]
impl BackupApi for ApiClient {
    async fn list_configs(&self) -> GatewayResult<Vec<BackupConfig>> {
        let url = self.config.get_config_list_url();
        let payload = self
            .gateway
            .request::<()>(Method::GET, &url, None, None)
            .await?;
        let response: BackupConfigsResponse = payload.decode()?;
        info!("获取备份配置成功，共 {} 条", response.backup_configs.len());
        Ok(response.backup_configs)
    }

    async fn create_config(&self, config: &NewBackupConfig) -> GatewayResult<()> {
        let url = self.config.get_config_create_url();
        self.gateway
            .request(Method::POST, &url, Some(config), Some(self.timeouts.create))
            .await?;
        info!("备份配置创建成功: {}", config.name);
        Ok(())
    }

    async fn run_backup(&self, config_id: &str) -> GatewayResult<()> {
        match self.config.run_endpoint {
            RunEndpoint::ConfigRun => {
                let url = self
                    .config
                    .get_config_run_url(config_id)
                    .map_err(|e| GatewayError::ParseError(e.to_string()))?;
                self.gateway
                    .request::<()>(Method::POST, &url, None, Some(self.timeouts.run))
                    .await?;
            }
            RunEndpoint::ManualTrigger => {
                let url = self.config.get_manual_trigger_url();
                let body = ManualTriggerRequest {
                    backup_config_id: config_id,
                };
                self.gateway
                    .request(Method::POST, &url, Some(&body), Some(self.timeouts.run))
                    .await?;
            }
        }
        info!("备份已提交: {}", config_id);
        Ok(())
    }

    async fn list_logs(&self) -> GatewayResult<Vec<BackupLog>> {
        let url = self.config.get_file_list_url();
        let payload = self
            .gateway
            .request::<()>(Method::GET, &url, None, None)
            .await?;
        let response: BackupFilesResponse = payload.decode()?;
        info!("获取备份日志成功，共 {} 条", response.backup_files.len());
        Ok(response.backup_files)
    }

    async fn restore_backup(&self, log_id: &str) -> GatewayResult<()> {
        let url = self.config.get_restore_url();
        let body = RestoreRequest {
            backup_file_id: log_id,
        };
        self.gateway
            .request(Method::POST, &url, Some(&body), Some(self.timeouts.restore))
            .await?;
        info!("恢复请求已完成: {}", log_id);
        Ok(())
    }
}
