use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashboardError>;

/// 网关层错误：对外部备份服务的一次调用失败后的分类
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("request to {endpoint} timed out after {}s", timeout.as_secs())]
    Timeout { endpoint: String, timeout: Duration },

    #[error("backup service unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("Server responded with status {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("invalid payload: {0}")]
    ParseError(String),
}

impl GatewayError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    pub fn server(status: u16, body: impl Into<String>) -> Self {
        Self::ServerError {
            status,
            body: body.into(),
        }
    }
}

/// 表单字段错误集合（字段名 -> 提示信息）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<&'static str, String>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn clear_field(&mut self, field: &str) {
        self.0.remove(field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.values().map(String::as_str).collect();
        write!(f, "{}", messages.join("; "))
    }
}

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("{0}")]
    NotFound(String),

    #[error("another {action} is already in progress")]
    ConcurrentActionRejected { action: String },

    #[error("backup log {0} is not a restore candidate")]
    NotRestorable(String),

    #[error("{0}")]
    Validation(FormErrors),

    #[error("{0} is not supported by the backup service")]
    Unsupported(String),

    #[error("view was closed before the request completed")]
    Abandoned,

    #[error("配置错误: {0}")]
    Config(#[from] toml::de::Error),

    #[error("配置序列化错误: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("序列化错误: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("URL 错误: {0}")]
    Url(#[from] url::ParseError),

    #[error("HTTP 客户端错误: {0}")]
    Http(#[from] reqwest::Error),

    #[error("配置文件未找到")]
    ConfigNotFound,

    #[error("尚未登录")]
    NotLoggedIn,

    #[error("{0}")]
    Custom(String),
}

impl DashboardError {
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn gateway(&self) -> Option<&GatewayError> {
        match self {
            Self::Gateway(err) => Some(err),
            _ => None,
        }
    }
}
