use super::ViewScope;
use crate::correlator::{CorrelationMode, LogCorrelator};
use crate::error::{DashboardError, Result};
use crate::models::{BackupConfig, BackupLog};
use crate::notice::{MessageContext, Notice, user_message};
use crate::orchestrator::{
    ActionOrchestrator, ActionOutcome, ActionSlot, ActionState, RestoreEvent,
};
use crate::registry::ConfigRegistry;
use tracing::{info, warn};

/// 单个备份配置的详情页
///
/// 先加载配置，拿到配置后才加载日志；日志加载失败不影响配置部分的展示。
pub struct DetailView {
    orchestrator: ActionOrchestrator,
    scope: ViewScope,
    config_id: String,
    registry: ConfigRegistry,
    correlator: LogCorrelator,
    loading: bool,
    error: Option<String>,
    logs_error: Option<String>,
    notice: Option<Notice>,
}

impl DetailView {
    pub fn new(
        orchestrator: ActionOrchestrator,
        config_id: impl Into<String>,
        correlation: CorrelationMode,
    ) -> Self {
        Self {
            orchestrator,
            scope: ViewScope::new(),
            config_id: config_id.into(),
            registry: ConfigRegistry::new(),
            correlator: LogCorrelator::new(correlation),
            loading: false,
            error: None,
            logs_error: None,
            notice: None,
        }
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    pub fn teardown(&self) {
        self.scope.teardown();
    }

    pub async fn load(&mut self) -> Result<()> {
        self.loading = true;
        let result = self
            .scope
            .run(self.orchestrator.api().list_configs())
            .await;

        let configs = match result {
            Err(DashboardError::Abandoned) => return Err(DashboardError::Abandoned),
            Ok(configs) => configs,
            Err(e) => {
                let message = user_message(&e, MessageContext::LoadConfigs);
                warn!("加载备份配置失败: {}", message);
                self.loading = false;
                self.error = Some(message);
                return Err(e);
            }
        };

        self.registry.replace(configs);
        self.loading = false;
        if let Err(e) = self.registry.get_by_id(&self.config_id) {
            warn!("备份配置不存在: {}", self.config_id);
            self.error = Some(e.to_string());
            return Err(e);
        }
        self.error = None;

        self.load_logs().await
    }

    /// 重新加载该配置的日志
    pub async fn load_logs(&mut self) -> Result<()> {
        let result = self.scope.run(self.orchestrator.api().list_logs()).await;

        match result {
            Err(DashboardError::Abandoned) => Err(DashboardError::Abandoned),
            Ok(logs) => {
                self.correlator.replace(logs);
                self.logs_error = None;
                Ok(())
            }
            Err(e) => {
                let message = user_message(&e, MessageContext::LoadLogs);
                warn!("加载备份日志失败: {}", message);
                self.logs_error = Some(message);
                // 配置部分仍然可用
                Ok(())
            }
        }
    }

    pub async fn run(&mut self) -> Result<ActionOutcome> {
        let result = self
            .scope
            .settle(self.orchestrator.run_backup(&self.config_id))
            .await;

        match result {
            Err(DashboardError::Abandoned) => Err(DashboardError::Abandoned),
            Ok(outcome) => {
                self.notice = Some(Notice::Success(outcome.message.clone()));
                Ok(outcome)
            }
            Err(e) => {
                self.notice = Some(Notice::Error(user_message(&e, MessageContext::RunBackup)));
                Err(e)
            }
        }
    }

    /// 从指定日志恢复，成功后日志已刷新
    pub async fn restore(&mut self, log_id: &str) -> Result<RestoreEvent> {
        let config = self.registry.get_by_id(&self.config_id)?.clone();
        let mut correlator = self.correlator.clone();

        let result = self
            .scope
            .settle(
                self.orchestrator
                    .restore_backup(log_id, &mut correlator, &config),
            )
            .await;

        match result {
            Err(DashboardError::Abandoned) => Err(DashboardError::Abandoned),
            Ok(event) => {
                info!("恢复完成: {}", event.log_id);
                self.correlator = correlator;
                self.logs_error = event.reload_error.clone();
                self.notice = Some(Notice::Restored(event.message.clone()));
                Ok(event)
            }
            Err(e) => {
                self.notice = Some(Notice::Error(user_message(
                    &e,
                    MessageContext::RestoreBackup,
                )));
                Err(e)
            }
        }
    }

    pub fn config_id(&self) -> &str {
        &self.config_id
    }

    pub fn config(&self) -> Option<&BackupConfig> {
        self.registry.get_by_id(&self.config_id).ok()
    }

    /// 该配置的日志，服务端顺序
    pub fn recent_logs(&self) -> Vec<&BackupLog> {
        match self.config() {
            Some(config) => self.correlator.logs_for_config(config),
            None => Vec::new(),
        }
    }

    pub fn restore_candidates(&self) -> Vec<BackupLog> {
        match self.config() {
            Some(config) => self.correlator.restore_candidates(config),
            None => Vec::new(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.orchestrator
            .slot_state(&ActionSlot::Run(self.config_id.clone()))
            == ActionState::Pending
    }

    pub fn is_restoring(&self) -> bool {
        self.orchestrator.slot_state(&ActionSlot::Restore) == ActionState::Pending
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn logs_error(&self) -> Option<&str> {
        self.logs_error.as_deref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }
}
