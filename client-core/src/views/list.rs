use super::ViewScope;
use crate::error::{DashboardError, Result};
use crate::models::BackupConfig;
use crate::notice::{MessageContext, Notice, user_message};
use crate::orchestrator::{ActionOrchestrator, ActionOutcome, ActionSlot, ActionState};
use crate::registry::ConfigRegistry;
use tracing::{info, warn};

/// 备份配置列表页
pub struct ListView {
    orchestrator: ActionOrchestrator,
    scope: ViewScope,
    registry: ConfigRegistry,
    loading: bool,
    error: Option<String>,
    notice: Option<Notice>,
}

impl ListView {
    pub fn new(orchestrator: ActionOrchestrator) -> Self {
        Self {
            orchestrator,
            scope: ViewScope::new(),
            registry: ConfigRegistry::new(),
            loading: false,
            error: None,
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

        match result {
            Err(DashboardError::Abandoned) => Err(DashboardError::Abandoned),
            Ok(configs) => {
                info!("加载到 {} 个备份配置", configs.len());
                self.registry.replace(configs);
                self.loading = false;
                self.error = None;
                Ok(())
            }
            Err(e) => {
                let message = user_message(&e, MessageContext::LoadConfigs);
                warn!("加载备份配置失败: {}", message);
                self.loading = false;
                self.error = Some(message);
                Err(e)
            }
        }
    }

    /// 触发一次备份，成功后刷新列表
    pub async fn run(&mut self, config_id: &str) -> Result<ActionOutcome> {
        let result = self
            .scope
            .settle(self.orchestrator.run_backup(config_id))
            .await;

        match result {
            Err(DashboardError::Abandoned) => Err(DashboardError::Abandoned),
            Ok(outcome) => {
                self.notice = Some(Notice::Success(outcome.message.clone()));
                // 刷新失败记录在 error 上，不影响本次运行的结果
                if let Err(DashboardError::Abandoned) = self.load().await {
                    return Err(DashboardError::Abandoned);
                }
                Ok(outcome)
            }
            Err(e) => {
                self.notice = Some(Notice::Error(user_message(&e, MessageContext::RunBackup)));
                Err(e)
            }
        }
    }

    pub fn is_running(&self, config_id: &str) -> bool {
        self.orchestrator
            .slot_state(&ActionSlot::Run(config_id.to_string()))
            == ActionState::Pending
    }

    pub fn configs(&self) -> &[BackupConfig] {
        self.registry.configs()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// 加载成功但没有任何配置
    pub fn is_empty_state(&self) -> bool {
        self.registry.is_loaded() && self.registry.is_empty() && self.error.is_none()
    }

    /// 取出待展示的提示，只会返回一次
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GatewayError;
    use crate::orchestrator::RUN_STARTED_MESSAGE;
    use crate::testing::{FakeApi, config};
    use std::sync::Arc;

    fn view(api: &Arc<FakeApi>) -> ListView {
        ListView::new(ActionOrchestrator::new(api.clone()))
    }

    #[tokio::test]
    async fn test_empty_list_is_empty_state_not_error() {
        let api = Arc::new(FakeApi::new());
        let mut view = view(&api);

        view.load().await.unwrap();

        assert!(view.is_empty_state());
        assert!(view.error().is_none());
        assert!(!view.is_loading());
    }

    #[tokio::test]
    async fn test_load_failure_sets_error() {
        let api = Arc::new(FakeApi::new());
        api.fail_configs(GatewayError::NetworkUnreachable("refused".into()));
        let mut view = view(&api);

        assert!(view.load().await.is_err());

        assert_eq!(
            view.error(),
            Some(
                "Unable to connect to the backup service. Please check if the service is running and try again."
            )
        );
        assert!(!view.is_empty_state());
    }

    #[tokio::test]
    async fn test_load_twice_is_idempotent() {
        let api = Arc::new(FakeApi::with_configs(vec![
            config("c1", "orders"),
            config("c2", "billing"),
        ]));
        let mut view = view(&api);

        view.load().await.unwrap();
        let first = view.configs().to_vec();
        view.load().await.unwrap();

        assert_eq!(view.configs(), first.as_slice());
    }

    #[tokio::test]
    async fn test_run_success_reloads_list_and_notifies_once() {
        let api = Arc::new(FakeApi::with_configs(vec![config("c1", "orders")]));
        let mut view = view(&api);
        view.load().await.unwrap();

        view.run("c1").await.unwrap();

        assert_eq!(api.calls("list_configs"), 2);
        assert_eq!(
            view.take_notice(),
            Some(Notice::Success(RUN_STARTED_MESSAGE.to_string()))
        );
        assert_eq!(view.take_notice(), None);
        assert!(!view.is_running("c1"));
    }

    #[tokio::test]
    async fn test_run_failure_keeps_list() {
        let api = Arc::new(FakeApi::with_configs(vec![config("c1", "orders")]));
        api.fail("run_backup", GatewayError::server(500, "Internal Server Error"));
        let mut view = view(&api);
        view.load().await.unwrap();

        assert!(view.run("c1").await.is_err());

        assert_eq!(api.calls("list_configs"), 1);
        let notice = view.take_notice().unwrap();
        assert!(notice.is_error());
        assert_eq!(
            notice.message(),
            "Failed to start backup: Server responded with status 500: Internal Server Error"
        );
        assert_eq!(view.configs().len(), 1);
    }

    #[tokio::test]
    async fn test_teardown_abandons_load() {
        let api = Arc::new(FakeApi::with_configs(vec![config("c1", "orders")]));
        api.hold("list_configs");
        let mut view = view(&api);
        let scope = view.scope().clone();

        let task = tokio::spawn(async move {
            let result = view.load().await;
            (view, result)
        });
        while api.calls("list_configs") == 0 {
            tokio::task::yield_now().await;
        }
        scope.teardown();

        let (view, result) = task.await.unwrap();
        assert!(matches!(result, Err(DashboardError::Abandoned)));
        assert!(view.configs().is_empty());
        assert!(view.error().is_none());
    }
}
