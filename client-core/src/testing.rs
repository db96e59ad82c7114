//! 测试用的内存 BackupApi 实现

use crate::api::BackupApi;
use crate::error::GatewayError;
use crate::models::{BackupConfig, BackupLog, DatabaseType, LogStatus, NewBackupConfig, Schedule};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

type GatewayResult<T> = std::result::Result<T, GatewayError>;

pub fn config(id: &str, name: &str) -> BackupConfig {
    BackupConfig {
        id: id.to_string(),
        name: name.to_string(),
        database_type: DatabaseType::Mongodb,
        database_url: format!("mongodb://localhost/{name}"),
        target_database_name: name.to_string(),
        schedule: Schedule::Daily,
        status: None,
        last_backup: None,
        created_at: None,
    }
}

pub fn log(
    id: &str,
    config_id: Option<&str>,
    name: &str,
    status: LogStatus,
    created_at: &str,
) -> BackupLog {
    let created_at: DateTime<Utc> = created_at.parse().unwrap();
    BackupLog {
        id: id.to_string(),
        backup_config_id: config_id.map(str::to_string),
        name: name.to_string(),
        file_name: format!("{id}.gz"),
        url: None,
        space_key: None,
        size: 2048,
        status,
        error_message: None,
        created_at,
        updated_at: created_at,
    }
}

#[derive(Default)]
struct FakeState {
    configs: Vec<BackupConfig>,
    logs: Vec<BackupLog>,
    errors: HashMap<&'static str, GatewayError>,
    calls: HashMap<&'static str, usize>,
    created: Vec<NewBackupConfig>,
    logs_after_restore: Option<Vec<BackupLog>>,
}

/// 可编程的假服务：预置数据、注入错误、挂起指定调用
#[derive(Default)]
pub struct FakeApi {
    state: Mutex<FakeState>,
    gates: Mutex<HashMap<&'static str, Arc<Semaphore>>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_configs(configs: Vec<BackupConfig>) -> Self {
        let api = Self::default();
        api.set_configs(configs);
        api
    }

    pub fn with_data(configs: Vec<BackupConfig>, logs: Vec<BackupLog>) -> Self {
        let api = Self::with_configs(configs);
        api.set_logs(logs);
        api
    }

    pub fn set_configs(&self, configs: Vec<BackupConfig>) {
        let mut state = self.state.lock().unwrap();
        state.configs = configs;
        state.errors.remove("list_configs");
    }

    pub fn set_logs(&self, logs: Vec<BackupLog>) {
        let mut state = self.state.lock().unwrap();
        state.logs = logs;
        state.errors.remove("list_logs");
    }

    pub fn logs_snapshot(&self) -> Vec<BackupLog> {
        self.state.lock().unwrap().logs.clone()
    }

    /// 恢复成功后服务端日志变为给定内容
    pub fn logs_after_restore(&self, logs: Vec<BackupLog>) {
        self.state.lock().unwrap().logs_after_restore = Some(logs);
    }

    pub fn fail(&self, call: &'static str, error: GatewayError) {
        self.state.lock().unwrap().errors.insert(call, error);
    }

    pub fn fail_configs(&self, error: GatewayError) {
        self.fail("list_configs", error);
    }

    pub fn calls(&self, call: &str) -> usize {
        self.state.lock().unwrap().calls.get(call).copied().unwrap_or(0)
    }

    pub fn created(&self) -> Vec<NewBackupConfig> {
        self.state.lock().unwrap().created.clone()
    }

    /// 让指定调用挂起，直到 `release`
    pub fn hold(&self, call: &'static str) {
        self.gates
            .lock()
            .unwrap()
            .insert(call, Arc::new(Semaphore::new(0)));
    }

    pub fn release(&self, call: &'static str) {
        if let Some(gate) = self.gates.lock().unwrap().get(call) {
            gate.add_permits(1);
        }
    }

    async fn enter(&self, call: &'static str) -> GatewayResult<()> {
        *self.state.lock().unwrap().calls.entry(call).or_default() += 1;

        let gate = self.gates.lock().unwrap().get(call).cloned();
        if let Some(gate) = gate {
            gate.acquire().await.unwrap().forget();
        }

        match self.state.lock().unwrap().errors.get(call) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl BackupApi for FakeApi {
    async fn list_configs(&self) -> GatewayResult<Vec<BackupConfig>> {
        self.enter("list_configs").await?;
        Ok(self.state.lock().unwrap().configs.clone())
    }

    async fn create_config(&self, config: &NewBackupConfig) -> GatewayResult<()> {
        self.enter("create_config").await?;
        self.state.lock().unwrap().created.push(config.clone());
        Ok(())
    }

    async fn run_backup(&self, _config_id: &str) -> GatewayResult<()> {
        self.enter("run_backup").await
    }

    async fn list_logs(&self) -> GatewayResult<Vec<BackupLog>> {
        self.enter("list_logs").await?;
        Ok(self.state.lock().unwrap().logs.clone())
    }

    async fn restore_backup(&self, _log_id: &str) -> GatewayResult<()> {
        self.enter("restore_backup").await?;
        let mut state = self.state.lock().unwrap();
        if let Some(logs) = state.logs_after_restore.take() {
            state.logs = logs;
        }
        Ok(())
    }
}
