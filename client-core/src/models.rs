use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 数据库类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseType {
    #[default]
    Mongodb,
    Mysql,
    Postgresql,
    Redis,
}

impl DatabaseType {
    pub const ALL: [DatabaseType; 4] = [
        DatabaseType::Mongodb,
        DatabaseType::Mysql,
        DatabaseType::Postgresql,
        DatabaseType::Redis,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseType::Mongodb => "mongodb",
            DatabaseType::Mysql => "mysql",
            DatabaseType::Postgresql => "postgresql",
            DatabaseType::Redis => "redis",
        }
    }
}

impl fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatabaseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DatabaseType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown database type: {s}"))
    }
}

/// 备份计划
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Schedule {
    #[default]
    Manual,
    Daily,
    Weekly,
    Monthly,
}

impl Schedule {
    pub const ALL: [Schedule; 4] = [
        Schedule::Manual,
        Schedule::Daily,
        Schedule::Weekly,
        Schedule::Monthly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Schedule::Manual => "manual",
            Schedule::Daily => "daily",
            Schedule::Weekly => "weekly",
            Schedule::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Schedule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Schedule::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown schedule: {s}"))
    }
}

/// 备份配置状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigStatus {
    Active,
    Inactive,
    Error,
}

impl ConfigStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigStatus::Active => "active",
            ConfigStatus::Inactive => "inactive",
            ConfigStatus::Error => "error",
        }
    }
}

/// 备份日志状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogStatus {
    Success,
    Failed,
    Pending,
}

impl LogStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogStatus::Success => "success",
            LogStatus::Failed => "failed",
            LogStatus::Pending => "pending",
        }
    }
}

impl fmt::Display for LogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 服务端返回的备份配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "WireBackupConfig")]
pub struct BackupConfig {
    pub id: String,
    pub name: String,
    pub database_type: DatabaseType,
    pub database_url: String,
    pub target_database_name: String,
    pub schedule: Schedule,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ConfigStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_backup: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// 线上格式：服务端可能返回 `id`、`_id` 或两者同时存在
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireBackupConfig {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "_id")]
    mongo_id: Option<String>,
    name: String,
    database_type: DatabaseType,
    database_url: String,
    target_database_name: String,
    schedule: Schedule,
    #[serde(default)]
    status: Option<ConfigStatus>,
    #[serde(default)]
    last_backup: Option<DateTime<Utc>>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

impl TryFrom<WireBackupConfig> for BackupConfig {
    type Error = String;

    fn try_from(wire: WireBackupConfig) -> Result<Self, Self::Error> {
        let id = wire
            .id
            .filter(|id| !id.is_empty())
            .or(wire.mongo_id)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| format!("backup config '{}' has no id", wire.name))?;

        Ok(Self {
            id,
            name: wire.name,
            database_type: wire.database_type,
            database_url: wire.database_url,
            target_database_name: wire.target_database_name,
            schedule: wire.schedule,
            status: wire.status,
            last_backup: wire.last_backup,
            created_at: wire.created_at,
        })
    }
}

/// 创建备份配置的请求体（不含服务端分配的字段）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewBackupConfig {
    pub name: String,
    pub database_type: DatabaseType,
    pub database_url: String,
    pub target_database_name: String,
    pub schedule: Schedule,
}

/// 备份日志（即服务端的 backup file 记录）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupLog {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub backup_config_id: Option<String>,
    pub name: String,
    pub file_name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub space_key: Option<String>,
    #[serde(default)]
    pub size: u64,
    pub status: LogStatus,
    #[serde(default)]
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BackupLog {
    pub fn is_success(&self) -> bool {
        self.status == LogStatus::Success
    }

    /// 日志是否携带了有效的配置外键
    pub fn config_id(&self) -> Option<&str> {
        self.backup_config_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

/// 备份配置列表响应
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupConfigsResponse {
    pub backup_configs: Vec<BackupConfig>,
}

/// 备份文件列表响应
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupFilesResponse {
    pub backup_files: Vec<BackupLog>,
}

/// 手动触发请求
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualTriggerRequest<'a> {
    pub backup_config_id: &'a str,
}

/// 恢复请求
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreRequest<'a> {
    pub backup_file_id: &'a str,
}
