use crate::error::{DashboardError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// 已登录用户
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// 凭据校验能力，可替换为真实的身份提供方
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, email: &str, password: &str) -> Option<User>;
}

/// 演示用的固定账号
#[derive(Debug, Clone)]
pub struct DemoCredentials {
    accounts: Vec<(String, String)>,
}

impl Default for DemoCredentials {
    fn default() -> Self {
        let accounts = [
            ("admin@backup.com", "admin123"),
            ("user@backup.com", "user123"),
            ("demo@backup.com", "demo123"),
        ];
        Self {
            accounts: accounts
                .iter()
                .map(|(email, password)| (email.to_string(), password.to_string()))
                .collect(),
        }
    }
}

impl CredentialVerifier for DemoCredentials {
    fn verify(&self, email: &str, password: &str) -> Option<User> {
        self.accounts
            .iter()
            .any(|(e, p)| e == email && p == password)
            .then(|| User {
                id: "1".to_string(),
                email: email.to_string(),
                name: display_name(email),
            })
    }
}

fn display_name(email: &str) -> String {
    match email.split('@').next() {
        Some(local) if !local.is_empty() => local.to_string(),
        _ => "User".to_string(),
    }
}

/// 持久化的会话内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user: User,
    pub logged_in_at: DateTime<Utc>,
}

/// 基于 JSON 文件的会话存储
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取会话；文件损坏时删除并视为未登录
    pub fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        match serde_json::from_str::<Session>(&content) {
            Ok(session) => {
                debug!("读取会话: {}", session.user.email);
                Ok(Some(session))
            }
            Err(e) => {
                warn!("会话文件已损坏，将被删除: {} ({})", self.path.display(), e);
                fs::remove_file(&self.path)?;
                Ok(None)
            }
        }
    }

    /// 读取会话，未登录时返回 `NotLoggedIn`
    pub fn require(&self) -> Result<Session> {
        self.load()?.ok_or(DashboardError::NotLoggedIn)
    }

    pub fn save(&self, user: &User) -> Result<Session> {
        let session = Session {
            user: user.clone(),
            logged_in_at: Utc::now(),
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(&session)?)?;
        info!("会话已保存: {}", self.path.display());
        Ok(session)
    }

    /// 清除会话，返回之前是否存在
    pub fn clear(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)?;
        info!("会话已清除: {}", self.path.display());
        Ok(true)
    }
}
