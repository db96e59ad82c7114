use client_core::{
    api::ApiClient,
    auth::{CredentialVerifier, DemoCredentials, Session, SessionStore},
    config::AppConfig,
    error::{DashboardError, Result},
    orchestrator::ActionOrchestrator,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use crate::cli::Commands;
use crate::commands;

#[derive(Clone)]
pub struct CliApp {
    pub config: AppConfig,
    pub api_client: ApiClient,
    pub orchestrator: ActionOrchestrator,
    pub sessions: SessionStore,
    pub verifier: Arc<dyn CredentialVerifier>,
}

impl CliApp {
    /// 查找并加载配置文件后初始化CLI应用
    pub async fn new_with_auto_config(config_path: &Path) -> Result<Self> {
        let config = AppConfig::find_and_load_config(config_path)?;
        Self::from_config(config, Arc::new(DemoCredentials::default()))
    }

    pub fn from_config(config: AppConfig, verifier: Arc<dyn CredentialVerifier>) -> Result<Self> {
        let api_client = ApiClient::from_app_config(&config)?;
        debug!("备份服务地址: {}", api_client.get_config().base_url);

        let orchestrator = ActionOrchestrator::new(Arc::new(api_client.clone()));
        let sessions = SessionStore::new(config.get_session_file());

        Ok(Self {
            config,
            api_client,
            orchestrator,
            sessions,
            verifier,
        })
    }

    /// 控制台命令需要先登录
    fn require_session(&self) -> Result<Session> {
        match self.sessions.require() {
            Ok(session) => {
                debug!("当前用户: {}", session.user.email);
                Ok(session)
            }
            Err(DashboardError::NotLoggedIn) => {
                info!("💡 请先登录: backup-cli login <email> <password>");
                Err(DashboardError::NotLoggedIn)
            }
            Err(e) => Err(e),
        }
    }

    /// 运行应用命令
    pub async fn run_command(&mut self, command: Commands) -> Result<()> {
        if !command.is_public() {
            self.require_session()?;
        }

        match command {
            Commands::Init { .. } => unreachable!(), // 已经在 main.rs 中处理
            Commands::Login { email, password } => commands::run_login(self, &email, &password),
            Commands::Logout => commands::run_logout(self),
            Commands::Whoami => commands::run_whoami(self),
            Commands::ApiInfo => commands::run_api_info(self),
            Commands::List => commands::run_list(self).await,
            Commands::Show { id } => commands::run_show(self, &id).await,
            Commands::Create {
                name,
                database_type,
                database_url,
                target_database,
                schedule,
            } => {
                info!("📝 新建备份配置: {}", name);
                commands::run_create(
                    self,
                    client_core::models::NewBackupConfig {
                        name,
                        database_type,
                        database_url,
                        target_database_name: target_database,
                        schedule,
                    },
                )
                .await
            }
            Commands::Run { id } => commands::run_backup(self, &id).await,
            Commands::Logs { log } => commands::run_logs(self, log.as_deref()).await,
            Commands::Restore { config_id, log_id } => {
                commands::run_restore(self, &config_id, &log_id).await
            }
        }
    }
}
