mod configs;
mod logs;
mod session;
mod status;

use client_core::error::{DashboardError, Result};
use client_core::notice::Notice;
use tracing::{info, warn};

// Session commands
pub use session::{run_login, run_logout, run_whoami};

// Status commands
pub use status::run_api_info;

// Backup configuration commands
pub use configs::{run_backup, run_create, run_list, run_show};

// Backup log commands
pub use logs::{run_logs, run_restore};

/// 输出视图产生的提示
///
/// 失败提示不在这里输出，而是替换原始错误交给 main 统一输出一次。
fn finish<T>(notice: Option<Notice>, result: Result<T>) -> Result<T> {
    match notice {
        Some(Notice::Success(message)) => info!("✅ {}", message),
        Some(Notice::Restored(message)) => info!("♻️  {}", message),
        Some(Notice::Error(message)) if result.is_err() => {
            return Err(DashboardError::custom(message));
        }
        Some(Notice::Error(message)) => warn!("⚠️  {}", message),
        None => {}
    }
    result
}

/// 加载失败时改用视图给出的提示
fn load_failure(message: Option<&str>, err: DashboardError) -> DashboardError {
    match message {
        Some(message) => DashboardError::custom(message),
        None => err,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_core::error::GatewayError;

    #[test]
    fn test_error_notice_replaces_raw_error() {
        let raw: Result<()> = Err(GatewayError::server(500, "boom").into());
        let err = finish(Some(Notice::Error("Failed to start backup: boom".into())), raw)
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to start backup: boom");

        let ok = finish(Some(Notice::Success("started".into())), Ok(1)).unwrap();
        assert_eq!(ok, 1);
    }

    #[test]
    fn test_load_failure_prefers_view_message() {
        let err = load_failure(
            Some("Failed to load backup logs: bad"),
            GatewayError::ParseError("bad".into()).into(),
        );
        assert_eq!(err.to_string(), "Failed to load backup logs: bad");

        let err = load_failure(None, DashboardError::Abandoned);
        assert!(matches!(err, DashboardError::Abandoned));
    }
}
