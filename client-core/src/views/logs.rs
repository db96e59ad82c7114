use super::ViewScope;
use crate::correlator::{LogCorrelator, LogSummary};
use crate::error::{DashboardError, Result};
use crate::models::BackupLog;
use crate::notice::{MessageContext, user_message};
use crate::orchestrator::ActionOrchestrator;
use tracing::{info, warn};

/// 全部备份日志页
pub struct LogsView {
    orchestrator: ActionOrchestrator,
    scope: ViewScope,
    correlator: LogCorrelator,
    loading: bool,
    error: Option<String>,
    selected: Option<String>,
}

impl LogsView {
    pub fn new(orchestrator: ActionOrchestrator) -> Self {
        Self {
            orchestrator,
            scope: ViewScope::new(),
            correlator: LogCorrelator::default(),
            loading: false,
            error: None,
            selected: None,
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
        let result = self.scope.run(self.orchestrator.api().list_logs()).await;

        match result {
            Err(DashboardError::Abandoned) => Err(DashboardError::Abandoned),
            Ok(logs) => {
                info!("加载到 {} 条备份日志", logs.len());
                self.correlator.replace(logs);
                self.loading = false;
                self.error = None;
                // 选中的日志已不存在时取消选中
                let vanished = self
                    .selected
                    .as_deref()
                    .is_some_and(|id| self.correlator.find_log(id).is_err());
                if vanished {
                    self.selected = None;
                }
                Ok(())
            }
            Err(e) => {
                let message = user_message(&e, MessageContext::LoadLogs);
                warn!("加载备份日志失败: {}", message);
                self.loading = false;
                self.error = Some(message);
                Err(e)
            }
        }
    }

    pub async fn refresh(&mut self) -> Result<()> {
        self.load().await
    }

    /// 选中一条日志查看详情
    pub fn select(&mut self, log_id: &str) -> Result<&BackupLog> {
        let log = self.correlator.find_log(log_id)?;
        self.selected = Some(log.id.clone());
        Ok(log)
    }

    pub fn selected(&self) -> Option<&BackupLog> {
        self.selected
            .as_deref()
            .and_then(|id| self.correlator.find_log(id).ok())
    }

    pub fn logs(&self) -> &[BackupLog] {
        self.correlator.logs()
    }

    pub fn summary(&self) -> LogSummary {
        self.correlator.summary()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
