use crate::constants::api::http;
use crate::error::{GatewayError, Result};
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// 一次成功调用（2xx）返回的原始载荷
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    status: u16,
    body: String,
}

impl Payload {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn text(&self) -> &str {
        &self.body
    }

    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }

    /// 按调用方期望的结构解码，结构不符时归类为 ParseError
    pub fn decode<T: DeserializeOwned>(&self) -> std::result::Result<T, GatewayError> {
        serde_json::from_str(&self.body).map_err(|e| GatewayError::ParseError(e.to_string()))
    }
}

/// HTTP 网关：对备份服务的唯一出站通道
///
/// 只负责发请求、套超时、把失败归类成 [`GatewayError`]，不关心载荷结构。
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    default_timeout: Duration,
}

impl HttpGateway {
    /// 创建网关，`default_timeout` 用于未指定超时的列表/读取类请求
    pub fn new(default_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(http::USER_AGENT)
            .timeout(default_timeout)
            .build()?;

        Ok(Self {
            client,
            default_timeout,
        })
    }

    /// 发送请求
    ///
    /// `timeout` 为 `None` 时使用传输层默认超时。
    pub async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
        timeout: Option<Duration>,
    ) -> std::result::Result<Payload, GatewayError> {
        let budget = timeout.unwrap_or(self.default_timeout);
        debug!("➡️  {} {} (超时 {}ms)", method, url, budget.as_millis());

        let mut builder = self.client.request(method.clone(), url).timeout(budget);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| classify_transport_error(e, url, budget))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| classify_transport_error(e, url, budget))?;

        if status.is_success() {
            debug!("⬅️  {} {} -> {}", method, url, status);
            return Ok(Payload::new(status.as_u16(), text));
        }

        let body = if text.trim().is_empty() {
            canonical_reason(status)
        } else {
            text
        };
        warn!("服务端返回错误: {} {} -> {} - {}", method, url, status, body);
        Err(GatewayError::server(status.as_u16(), body))
    }
}

fn canonical_reason(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string())
}

/// 把 reqwest 传输层错误归类
fn classify_transport_error(err: reqwest::Error, url: &str, budget: Duration) -> GatewayError {
    if err.is_timeout() {
        warn!("请求超时: {} ({}ms)", url, budget.as_millis());
        return GatewayError::Timeout {
            endpoint: url.to_string(),
            timeout: budget,
        };
    }

    if err.is_decode() || err.is_body() {
        warn!("响应读取失败: {} - {}", url, err);
        return GatewayError::ParseError(err.to_string());
    }

    warn!("无法连接备份服务: {} - {}", url, err);
    GatewayError::NetworkUnreachable(err.to_string())
}
