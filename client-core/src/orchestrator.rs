use crate::api::BackupApi;
use crate::correlator::LogCorrelator;
use crate::error::{DashboardError, Result};
use crate::models::{BackupConfig, NewBackupConfig};
use crate::notice::{MessageContext, user_message};
use crate::validation::validate_new_config;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

pub const RUN_STARTED_MESSAGE: &str =
    "Backup started successfully! You can check the status in the backup logs.";
pub const CREATED_MESSAGE: &str = "Backup configuration created successfully!";
pub const RESTORED_MESSAGE: &str =
    "Backup restored successfully! The backup logs have been refreshed.";

/// 动作槽：同一槽位同一时刻最多一个进行中的动作
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActionSlot {
    /// 按配置区分的运行备份
    Run(String),
    /// 全局唯一的恢复
    Restore,
    /// 创建表单提交
    Create,
}

impl fmt::Display for ActionSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionSlot::Run(config_id) => write!(f, "backup run for {config_id}"),
            ActionSlot::Restore => f.write_str("restore"),
            ActionSlot::Create => f.write_str("configuration submission"),
        }
    }
}

/// 槽位状态，Succeeded/Failed 在结果交给调用方后立即回到 Idle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionState {
    Idle,
    Pending,
}

/// 动作成功后的确认
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    pub slot: ActionSlot,
    pub message: String,
}

/// 恢复成功事件，与普通成功提示分开渲染
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreEvent {
    pub log_id: String,
    pub message: String,
    /// 恢复已成功，但随后的日志刷新失败
    pub reload_error: Option<String>,
}

/// 占用槽位的守卫，drop 时释放（包括 future 被丢弃的情况）
struct SlotGuard {
    slots: Arc<DashMap<ActionSlot, Instant>>,
    slot: ActionSlot,
}

impl Drop for SlotGuard {
    fn drop(&mut self) {
        if let Some((slot, started)) = self.slots.remove(&self.slot) {
            info!("动作结束: {} (耗时 {}ms)", slot, started.elapsed().as_millis());
        }
    }
}

/// 动作编排器：运行、恢复、创建
#[derive(Clone)]
pub struct ActionOrchestrator {
    api: Arc<dyn BackupApi>,
    slots: Arc<DashMap<ActionSlot, Instant>>,
}

impl ActionOrchestrator {
    pub fn new(api: Arc<dyn BackupApi>) -> Self {
        Self {
            api,
            slots: Arc::new(DashMap::new()),
        }
    }

    pub fn api(&self) -> &dyn BackupApi {
        self.api.as_ref()
    }

    /// 查询槽位状态
    pub fn slot_state(&self, slot: &ActionSlot) -> ActionState {
        if self.slots.contains_key(slot) {
            ActionState::Pending
        } else {
            ActionState::Idle
        }
    }

    /// 当前所有进行中的槽位
    pub fn pending_slots(&self) -> Vec<ActionSlot> {
        self.slots.iter().map(|entry| entry.key().clone()).collect()
    }

    /// 在发请求之前原子地占用槽位
    fn claim(&self, slot: ActionSlot) -> Result<SlotGuard> {
        match self.slots.entry(slot.clone()) {
            Entry::Occupied(_) => {
                warn!("拒绝重复提交: {} 仍在进行中", slot);
                Err(DashboardError::ConcurrentActionRejected {
                    action: slot.to_string(),
                })
            }
            Entry::Vacant(vacant) => {
                vacant.insert(Instant::now());
                Ok(SlotGuard {
                    slots: Arc::clone(&self.slots),
                    slot,
                })
            }
        }
    }

    /// 运行一次备份
    ///
    /// 运行状态在服务端异步推进，成功只代表请求被接受，不会刷新任何列表。
    pub async fn run_backup(&self, config_id: &str) -> Result<ActionOutcome> {
        let slot = ActionSlot::Run(config_id.to_string());
        let _guard = self.claim(slot.clone())?;

        info!("开始运行备份: {}", config_id);
        match self.api.run_backup(config_id).await {
            Ok(()) => Ok(ActionOutcome {
                slot,
                message: RUN_STARTED_MESSAGE.to_string(),
            }),
            Err(e) => {
                let err = DashboardError::from(e);
                warn!("运行备份失败: {}", user_message(&err, MessageContext::RunBackup));
                Err(err)
            }
        }
    }

    /// 从备份日志恢复
    ///
    /// `log_id` 必须是该配置的可恢复日志。成功后重新加载日志。
    pub async fn restore_backup(
        &self,
        log_id: &str,
        correlator: &mut LogCorrelator,
        config: &BackupConfig,
    ) -> Result<RestoreEvent> {
        let eligible = correlator
            .restore_candidates(config)
            .iter()
            .any(|candidate| candidate.id == log_id);
        if !eligible {
            warn!("日志 {} 不是 {} 的可恢复备份", log_id, config.name);
            return Err(DashboardError::NotRestorable(log_id.to_string()));
        }

        let _guard = self.claim(ActionSlot::Restore)?;

        info!("开始恢复备份: {} ({})", log_id, config.name);
        if let Err(e) = self.api.restore_backup(log_id).await {
            let err = DashboardError::from(e);
            warn!("恢复失败: {}", user_message(&err, MessageContext::RestoreBackup));
            return Err(err);
        }

        let reload_error = match correlator.load_all_logs(self.api.as_ref()).await {
            Ok(_) => None,
            Err(e) => {
                let message = user_message(&e, MessageContext::LoadLogs);
                warn!("恢复成功，但刷新日志失败: {}", message);
                Some(message)
            }
        };

        Ok(RestoreEvent {
            log_id: log_id.to_string(),
            message: RESTORED_MESSAGE.to_string(),
            reload_error,
        })
    }

    /// 提交创建表单，本地校验失败时不会发出请求
    pub async fn create_config(&self, form: &NewBackupConfig) -> Result<ActionOutcome> {
        validate_new_config(form).map_err(DashboardError::Validation)?;

        let _guard = self.claim(ActionSlot::Create)?;

        info!("创建备份配置: {}", form.name);
        match self.api.create_config(form).await {
            Ok(()) => Ok(ActionOutcome {
                slot: ActionSlot::Create,
                message: CREATED_MESSAGE.to_string(),
            }),
            Err(e) => {
                let err = DashboardError::from(e);
                warn!("创建失败: {}", user_message(&err, MessageContext::CreateConfig));
                Err(err)
            }
        }
    }

    /// 删除备份配置
    ///
    /// 服务端没有删除端点，这里明确返回不支持。
    pub async fn delete_config(&self, config_id: &str) -> Result<ActionOutcome> {
        warn!("删除备份配置 {} 不受支持", config_id);
        Err(DashboardError::Unsupported(
            "Deleting backup configurations".to_string(),
        ))
    }
}
