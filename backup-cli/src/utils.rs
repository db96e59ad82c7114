use client_core::constants::logging::LOG_FILE_ENV;
use tracing_subscriber::{EnvFilter, fmt};

/// 设置日志记录系统
///
/// - 库代码只使用 tracing 宏记录日志，在应用入口配置输出行为
/// - 支持 RUST_LOG 环境变量控制日志级别
/// - 设置 BACKUP_DASHBOARD_LOG_FILE 时输出到文件（详细格式），否则输出到终端（简洁格式）
pub fn setup_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if let Ok(log_file) = std::env::var(LOG_FILE_ENV) {
        match std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
        {
            Ok(file) => {
                let _ = fmt()
                    .with_env_filter(env_filter)
                    .with_writer(file)
                    .with_ansi(false)
                    .with_target(true)
                    .with_thread_names(true)
                    .with_line_number(true)
                    .try_init();
                return;
            }
            Err(e) => {
                eprintln!("无法打开日志文件 {log_file}: {e}，改为输出到终端");
            }
        }
    }

    // 终端输出：不显示模块路径、线程名、行号和时间戳
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_thread_names(false)
        .with_line_number(false)
        .without_time()
        .compact()
        .try_init();
}
