use crate::api_config::{ApiConfig, RunEndpoint};
use crate::constants::{api, config, session};
use crate::correlator::CorrelationMode;
use crate::error::{DashboardError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 应用配置结构
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiSection,
    pub timeouts: TimeoutsConfig,
    pub logs: LogsConfig,
    pub session: SessionConfig,
}

/// 备份服务连接配置
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ApiSection {
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub run_endpoint: RunEndpoint,
}

/// 各类动作的超时配置
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TimeoutsConfig {
    pub create_secs: u64,
    pub run_secs: u64,
    pub restore_secs: u64,
}

/// 日志关联配置
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct LogsConfig {
    pub correlation: CorrelationMode,
}

/// 会话配置
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    pub file: String,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: api::DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: api::http::DEFAULT_TIMEOUT,
            run_endpoint: RunEndpoint::default(),
        }
    }
}

impl Default for TimeoutsConfig {
    fn default() -> Self {
        Self {
            create_secs: api::http::CREATE_TIMEOUT,
            run_secs: api::http::RUN_TIMEOUT,
            restore_secs: api::http::RESTORE_TIMEOUT,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            file: session::DEFAULT_SESSION_FILE.to_string(),
        }
    }
}

impl TimeoutsConfig {
    pub fn create(&self) -> Duration {
        Duration::from_secs(self.create_secs)
    }

    pub fn run(&self) -> Duration {
        Duration::from_secs(self.run_secs)
    }

    pub fn restore(&self) -> Duration {
        Duration::from_secs(self.restore_secs)
    }
}

impl AppConfig {
    /// 加载配置文件
    ///
    /// 优先使用指定路径；不存在时按 config.toml -> backup-dashboard.toml ->
    /// .backup-dashboard.toml 的顺序查找，都找不到则返回 `ConfigNotFound`。
    pub fn find_and_load_config(preferred: &Path) -> Result<Self> {
        Self::find_in_candidates(preferred, config::CONFIG_FILE_CANDIDATES)
    }

    fn find_in_candidates<P: AsRef<Path>>(preferred: &Path, candidates: &[P]) -> Result<Self> {
        if preferred.exists() {
            tracing::info!("找到配置文件: {}", preferred.display());
            return Self::load_from_file(preferred);
        }

        for candidate in candidates {
            let candidate = candidate.as_ref();
            if candidate.exists() {
                tracing::info!("找到配置文件: {}", candidate.display());
                return Self::load_from_file(candidate);
            }
        }

        tracing::warn!("未找到配置文件: {}", preferred.display());
        Err(DashboardError::ConfigNotFound)
    }

    /// 从指定文件加载配置，并应用环境变量覆盖
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)?;
        let mut config: AppConfig = toml::from_str(&content)?;
        config.apply_env_overrides();

        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = self.to_toml_with_comments()?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// 生成带注释的TOML配置
    fn to_toml_with_comments(&self) -> Result<String> {
        const TEMPLATE: &str = include_str!("../templates/config.toml.template");

        let run_endpoint = toml::Value::try_from(self.api.run_endpoint)?;
        let correlation = toml::Value::try_from(self.logs.correlation)?;

        Ok(TEMPLATE
            .replace("{base_url}", &self.api.base_url)
            .replace(
                "{request_timeout_secs}",
                &self.api.request_timeout_secs.to_string(),
            )
            .replace("{run_endpoint}", run_endpoint.as_str().unwrap_or_default())
            .replace("{create_secs}", &self.timeouts.create_secs.to_string())
            .replace("{run_secs}", &self.timeouts.run_secs.to_string())
            .replace("{restore_secs}", &self.timeouts.restore_secs.to_string())
            .replace("{correlation}", correlation.as_str().unwrap_or_default())
            .replace("{session_file}", &self.session.file))
    }

    /// BACKUP_API_URL 环境变量优先于配置文件
    fn apply_env_overrides(&mut self) {
        if let Ok(base_url) = std::env::var(api::BASE_URL_ENV) {
            if !base_url.trim().is_empty() {
                tracing::debug!("使用环境变量 {} 覆盖服务地址", api::BASE_URL_ENV);
                self.api.base_url = base_url.trim().to_string();
            }
        }
    }

    /// 生成API配置（校验基础地址）
    pub fn api_config(&self) -> Result<ApiConfig> {
        ApiConfig::new(&self.api.base_url, self.api.run_endpoint)
    }

    /// 列表/读取类请求的默认超时
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.request_timeout_secs)
    }

    /// 获取会话文件路径
    pub fn get_session_file(&self) -> PathBuf {
        PathBuf::from(&self.session.file)
    }
}
