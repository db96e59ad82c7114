use crate::error::{DashboardError, GatewayError};

/// 展示给用户的提示
///
/// 成功、失败、恢复完成分属不同通道，渲染时互不合并。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
    Restored(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Success(message) | Notice::Error(message) | Notice::Restored(message) => {
                message
            }
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

/// 出错时用户正在做的事情，决定提示语
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageContext {
    LoadConfigs,
    LoadLogs,
    RunBackup,
    RestoreBackup,
    CreateConfig,
}

impl MessageContext {
    fn failure_prefix(&self) -> &'static str {
        match self {
            MessageContext::LoadConfigs => "Failed to load backup configurations",
            MessageContext::LoadLogs => "Failed to load backup logs",
            MessageContext::RunBackup => "Failed to start backup",
            MessageContext::RestoreBackup => "Failed to restore backup",
            MessageContext::CreateConfig => "Failed to create backup configuration",
        }
    }

    /// 动作类请求（运行/恢复）可能在服务端继续执行
    fn is_long_running(&self) -> bool {
        matches!(self, MessageContext::RunBackup | MessageContext::RestoreBackup)
    }
}

/// 把错误转换成用户可读的提示
pub fn user_message(err: &DashboardError, context: MessageContext) -> String {
    match err {
        DashboardError::Gateway(GatewayError::Timeout { .. }) => match context {
            MessageContext::RunBackup => {
                "The backup request timed out. The backup may still be running in the background."
                    .to_string()
            }
            MessageContext::RestoreBackup => {
                "The restore request timed out. The restore may still be running in the background."
                    .to_string()
            }
            _ => "Request timed out. Please check your connection and try again.".to_string(),
        },
        DashboardError::Gateway(GatewayError::NetworkUnreachable(_)) => {
            if context.is_long_running() {
                "Unable to connect to the backup service. Please check if the service is running."
                    .to_string()
            } else {
                "Unable to connect to the backup service. Please check if the service is running and try again."
                    .to_string()
            }
        }
        DashboardError::Gateway(gateway) => format!("{}: {}", context.failure_prefix(), gateway),
        DashboardError::NotFound(message) => message.clone(),
        DashboardError::Validation(errors) => errors.to_string(),
        other => format!("{}: {}", context.failure_prefix(), other),
    }
}
