use crate::error::{DashboardError, Result};
use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// 视图生命周期
///
/// `teardown` 之后，仍在进行的请求结果一律以 `Abandoned` 结束，不再写回视图状态。
#[derive(Debug, Clone, Default)]
pub struct ViewScope {
    token: CancellationToken,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn teardown(&self) {
        debug!("视图已关闭，丢弃未完成的请求");
        self.token.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }

    /// 运行加载类请求，视图关闭时立即中止
    pub async fn run<T, E, F>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = std::result::Result<T, E>>,
        E: Into<DashboardError>,
    {
        if self.is_closed() {
            return Err(DashboardError::Abandoned);
        }

        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(DashboardError::Abandoned),
            result = fut => {
                if self.is_closed() {
                    return Err(DashboardError::Abandoned);
                }
                result.map_err(Into::into)
            }
        }
    }

    /// 运行动作类请求
    ///
    /// 请求已发出就等它完成（服务端可能已在执行），视图关闭时只丢弃结果。
    pub async fn settle<T, E, F>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = std::result::Result<T, E>>,
        E: Into<DashboardError>,
    {
        if self.is_closed() {
            return Err(DashboardError::Abandoned);
        }

        let result = fut.await;
        if self.is_closed() {
            debug!("视图已关闭，动作结果被丢弃");
            return Err(DashboardError::Abandoned);
        }
        result.map_err(Into::into)
    }
}
