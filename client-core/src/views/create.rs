use super::ViewScope;
use crate::error::{DashboardError, FormErrors, Result};
use crate::models::NewBackupConfig;
use crate::notice::{MessageContext, Notice, user_message};
use crate::orchestrator::{ActionOrchestrator, ActionOutcome, ActionSlot, ActionState};

/// 新建备份配置表单
pub struct CreateView {
    orchestrator: ActionOrchestrator,
    scope: ViewScope,
    form: NewBackupConfig,
    errors: FormErrors,
    notice: Option<Notice>,
}

impl CreateView {
    pub fn new(orchestrator: ActionOrchestrator) -> Self {
        Self {
            orchestrator,
            scope: ViewScope::new(),
            form: NewBackupConfig::default(),
            errors: FormErrors::new(),
            notice: None,
        }
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    pub fn teardown(&self) {
        self.scope.teardown();
    }

    pub fn form(&self) -> &NewBackupConfig {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut NewBackupConfig {
        &mut self.form
    }

    /// 用户修改某个字段后清除它的错误提示
    pub fn clear_error(&mut self, field: &str) {
        self.errors.clear_field(field);
    }

    /// 校验并提交，成功后表单恢复默认值
    pub async fn submit(&mut self) -> Result<ActionOutcome> {
        let result = self
            .scope
            .settle(self.orchestrator.create_config(&self.form))
            .await;

        match result {
            Err(DashboardError::Abandoned) => Err(DashboardError::Abandoned),
            Ok(outcome) => {
                self.form = NewBackupConfig::default();
                self.errors = FormErrors::new();
                self.notice = Some(Notice::Success(outcome.message.clone()));
                Ok(outcome)
            }
            Err(DashboardError::Validation(errors)) => {
                self.errors = errors.clone();
                Err(DashboardError::Validation(errors))
            }
            Err(e) => {
                self.notice = Some(Notice::Error(user_message(
                    &e,
                    MessageContext::CreateConfig,
                )));
                Err(e)
            }
        }
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.errors.get(field)
    }

    pub fn is_submitting(&self) -> bool {
        self.orchestrator.slot_state(&ActionSlot::Create) == ActionState::Pending
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GatewayError;
    use crate::models::{DatabaseType, Schedule};
    use crate::orchestrator::CREATED_MESSAGE;
    use crate::testing::FakeApi;
    use crate::validation::{FIELD_DATABASE_URL, FIELD_NAME};
    use std::sync::Arc;

    fn fill(view: &mut CreateView, url: &str) {
        let form = view.form_mut();
        form.name = "orders".into();
        form.database_type = DatabaseType::Mongodb;
        form.database_url = url.into();
        form.target_database_name = "orders_restore".into();
        form.schedule = Schedule::Weekly;
    }

    #[tokio::test]
    async fn test_mongodb_url_mismatch_is_local_error() {
        let api = Arc::new(FakeApi::new());
        let mut view = CreateView::new(ActionOrchestrator::new(api.clone()));
        fill(&mut view, "postgres://db.internal/orders");

        let err = view.submit().await.unwrap_err();

        assert!(matches!(err, DashboardError::Validation(_)));
        assert_eq!(
            view.field_error(FIELD_DATABASE_URL),
            Some("Please provide a valid MongoDB connection string")
        );
        assert_eq!(api.calls("create_config"), 0);
        assert!(view.take_notice().is_none());
        // 表单内容保留，方便用户修改
        assert_eq!(view.form().name, "orders");

        view.clear_error(FIELD_DATABASE_URL);
        assert!(view.errors().is_empty());
    }

    #[tokio::test]
    async fn test_successful_submit_resets_form() {
        let api = Arc::new(FakeApi::new());
        let mut view = CreateView::new(ActionOrchestrator::new(api.clone()));
        fill(&mut view, "mongodb://db.internal/orders");
        let submitted = view.form().clone();

        view.submit().await.unwrap();

        assert_eq!(api.created(), vec![submitted]);
        assert_eq!(view.form(), &NewBackupConfig::default());
        assert_eq!(
            view.take_notice(),
            Some(Notice::Success(CREATED_MESSAGE.to_string()))
        );
        assert!(!view.is_submitting());
    }

    #[tokio::test]
    async fn test_server_error_keeps_form() {
        let api = Arc::new(FakeApi::new());
        api.fail("create_config", GatewayError::server(400, "duplicate name"));
        let mut view = CreateView::new(ActionOrchestrator::new(api.clone()));
        fill(&mut view, "mongodb://db.internal/orders");

        assert!(view.submit().await.is_err());

        assert_eq!(view.form().name, "orders");
        assert!(view.field_error(FIELD_NAME).is_none());
        assert_eq!(
            view.take_notice().unwrap().message(),
            "Failed to create backup configuration: Server responded with status 400: duplicate name"
        );
    }
}
