use crate::api::BackupApi;
use crate::error::{DashboardError, Result};
use crate::models::{BackupConfig, BackupLog, LogStatus};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// 日志与备份配置的关联方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CorrelationMode {
    /// 按 `backupConfigId` 关联；日志缺少外键时退回按名称匹配
    #[default]
    BackupConfigId,
    /// 仅按名称关联（旧版行为）
    Name,
}

/// 一组日志的状态统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogSummary {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    pub pending: usize,
}

impl LogSummary {
    pub fn of<'a>(logs: impl IntoIterator<Item = &'a BackupLog>) -> Self {
        logs.into_iter().fold(Self::default(), |mut summary, log| {
            summary.total += 1;
            match log.status {
                LogStatus::Success => summary.success += 1,
                LogStatus::Failed => summary.failed += 1,
                LogStatus::Pending => summary.pending += 1,
            }
            summary
        })
    }
}

/// 筛选可恢复的日志：仅保留成功的记录，按创建时间倒序
///
/// 创建时间相同的日志保持原有相对顺序。
pub fn restore_candidates<'a>(logs: impl IntoIterator<Item = &'a BackupLog>) -> Vec<BackupLog> {
    let mut candidates: Vec<BackupLog> = logs
        .into_iter()
        .filter(|log| log.is_success())
        .cloned()
        .collect();
    // sort_by 是稳定排序
    candidates.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    candidates
}

/// 备份日志关联器
#[derive(Debug, Clone, Default)]
pub struct LogCorrelator {
    logs: Arc<Vec<BackupLog>>,
    mode: CorrelationMode,
    loaded: bool,
}

impl LogCorrelator {
    pub fn new(mode: CorrelationMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// 加载全部日志，成功时整体替换快照
    pub async fn load_all_logs(&mut self, api: &dyn BackupApi) -> Result<&[BackupLog]> {
        let logs = api.list_logs().await?;
        self.replace(logs);
        Ok(self.logs())
    }

    pub fn replace(&mut self, logs: Vec<BackupLog>) {
        debug!("备份日志快照已替换，共 {} 条", logs.len());
        self.logs = Arc::new(logs);
        self.loaded = true;
    }

    pub fn logs(&self) -> &[BackupLog] {
        &self.logs
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn find_log(&self, log_id: &str) -> Result<&BackupLog> {
        self.logs
            .iter()
            .find(|log| log.id == log_id)
            .ok_or_else(|| DashboardError::not_found(format!("Backup log {log_id} not found")))
    }

    /// 名称完全相等（区分大小写）的日志，保持服务端顺序
    pub fn logs_for_name(&self, name: &str) -> Vec<&BackupLog> {
        self.logs.iter().filter(|log| log.name == name).collect()
    }

    /// 属于某个备份配置的日志，保持服务端顺序
    pub fn logs_for_config(&self, config: &BackupConfig) -> Vec<&BackupLog> {
        match self.mode {
            CorrelationMode::Name => self.logs_for_name(&config.name),
            CorrelationMode::BackupConfigId => self
                .logs
                .iter()
                .filter(|log| belongs_to(log, config))
                .collect(),
        }
    }

    /// 某个备份配置的可恢复日志
    pub fn restore_candidates(&self, config: &BackupConfig) -> Vec<BackupLog> {
        restore_candidates(self.logs_for_config(config))
    }

    pub fn summary(&self) -> LogSummary {
        LogSummary::of(self.logs.iter())
    }
}

fn belongs_to(log: &BackupLog, config: &BackupConfig) -> bool {
    match log.config_id() {
        Some(config_id) => config_id == config.id,
        None => {
            let matched = log.name == config.name;
            if matched {
                debug!("日志 {} 缺少 backupConfigId，按名称关联到 {}", log.id, config.id);
            }
            matched
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GatewayError;
    use crate::testing::{FakeApi, config, log};

    fn sample_logs() -> Vec<BackupLog> {
        vec![
            log("l1", Some("c1"), "orders", LogStatus::Success, "2025-03-01T10:00:00Z"),
            log("l2", Some("c2"), "Orders", LogStatus::Success, "2025-03-02T10:00:00Z"),
            log("l3", Some("c1"), "orders", LogStatus::Failed, "2025-03-03T10:00:00Z"),
            log("l4", None, "orders", LogStatus::Success, "2025-03-04T10:00:00Z"),
            log("l5", Some("c9"), "orders", LogStatus::Pending, "2025-03-05T10:00:00Z"),
        ]
    }

    #[test]
    fn test_logs_for_name_is_exact_match() {
        let mut correlator = LogCorrelator::new(CorrelationMode::Name);
        correlator.replace(sample_logs());

        let orders = config("c1", "orders");
        let ids: Vec<&str> = correlator
            .logs_for_name(&orders.name)
            .iter()
            .map(|l| l.id.as_str())
            .collect();

        // l2 的名称大小写不同，不应出现
        assert_eq!(ids, vec!["l1", "l3", "l4", "l5"]);
        for log in correlator.logs() {
            let included = ids.contains(&log.id.as_str());
            assert_eq!(included, log.name == orders.name);
        }
    }

    #[test]
    fn test_logs_for_config_by_id_with_name_fallback() {
        let mut correlator = LogCorrelator::new(CorrelationMode::BackupConfigId);
        correlator.replace(sample_logs());

        let ids: Vec<&str> = correlator
            .logs_for_config(&config("c1", "orders"))
            .iter()
            .map(|l| l.id.as_str())
            .collect();

        // l5 同名但外键指向其他配置；l4 没有外键，按名称兜底
        assert_eq!(ids, vec!["l1", "l3", "l4"]);
    }

    #[test]
    fn test_legacy_mode_matches_by_name_only() {
        let mut correlator = LogCorrelator::new(CorrelationMode::Name);
        correlator.replace(sample_logs());

        assert_eq!(correlator.logs_for_config(&config("c1", "orders")).len(), 4);
    }

    #[test]
    fn test_restore_candidates_success_only_newest_first() {
        let logs = sample_logs();
        let ids: Vec<String> = restore_candidates(&logs).into_iter().map(|l| l.id).collect();
        assert_eq!(ids, vec!["l4", "l2", "l1"]);
    }

    #[test]
    fn test_restore_candidates_keeps_order_for_equal_timestamps() {
        let logs = vec![
            log("a", Some("c1"), "orders", LogStatus::Success, "2025-03-01T10:00:00Z"),
            log("b", Some("c1"), "orders", LogStatus::Success, "2025-03-02T10:00:00Z"),
            log("c", Some("c1"), "orders", LogStatus::Success, "2025-03-01T10:00:00Z"),
            log("d", Some("c1"), "orders", LogStatus::Success, "2025-03-01T10:00:00Z"),
        ];
        let ids: Vec<String> = restore_candidates(&logs).into_iter().map(|l| l.id).collect();
        assert_eq!(ids, vec!["b", "a", "c", "d"]);
    }

    #[test]
    fn test_summary_counts_statuses() {
        let summary = LogSummary::of(&sample_logs());
        assert_eq!(
            summary,
            LogSummary {
                total: 5,
                success: 3,
                failed: 1,
                pending: 1
            }
        );
    }

    #[tokio::test]
    async fn test_load_failure_is_surfaced_without_retry() {
        let api = FakeApi::with_data(vec![], sample_logs());
        api.fail(
            "list_logs",
            GatewayError::Timeout {
                endpoint: "api/v1/backup-file/all".into(),
                timeout: std::time::Duration::from_secs(30),
            },
        );
        let mut correlator = LogCorrelator::default();

        let err = correlator.load_all_logs(&api).await.unwrap_err();

        assert!(err.gateway().is_some_and(GatewayError::is_timeout));
        assert_eq!(api.calls("list_logs"), 1);
        assert!(!correlator.is_loaded());
    }

    #[tokio::test]
    async fn test_find_log() {
        let api = FakeApi::with_data(vec![], sample_logs());
        let mut correlator = LogCorrelator::default();
        correlator.load_all_logs(&api).await.unwrap();

        assert_eq!(correlator.find_log("l3").unwrap().status, LogStatus::Failed);
        assert!(matches!(
            correlator.find_log("nope"),
            Err(DashboardError::NotFound(_))
        ));
    }
}
