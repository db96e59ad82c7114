use crate::app::CliApp;
use client_core::error::{DashboardError, Result};
use client_core::format::format_timestamp;
use tracing::{info, warn};

pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// 登录并保存会话
pub fn run_login(app: &CliApp, email: &str, password: &str) -> Result<()> {
    let Some(user) = app.verifier.verify(email.trim(), password) else {
        return Err(DashboardError::custom(INVALID_CREDENTIALS));
    };

    app.sessions.save(&user)?;
    info!("✅ 欢迎, {} ({})", user.name, user.email);
    Ok(())
}

pub fn run_logout(app: &CliApp) -> Result<()> {
    if app.sessions.clear()? {
        info!("👋 已退出登录");
    } else {
        warn!("⚠️  当前没有登录");
    }
    Ok(())
}

pub fn run_whoami(app: &CliApp) -> Result<()> {
    match app.sessions.load()? {
        Some(session) => {
            info!("👤 当前用户: {} <{}>", session.user.name, session.user.email);
            info!("   登录时间: {}", format_timestamp(&session.logged_in_at));
        }
        None => {
            info!("🔒 尚未登录");
            info!("💡 使用 'backup-cli login <email> <password>' 登录");
        }
    }
    Ok(())
}
