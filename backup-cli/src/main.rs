use backup_cli::{Cli, CliApp, Commands, run_init, setup_logging};
use clap::Parser;
use client_core::DashboardError;
use tracing::error;

#[tokio::main]
async fn main() {
    // 解析命令行参数
    let cli = Cli::parse();

    // 设置日志记录
    setup_logging(cli.verbose);

    // `init` 命令是特例，它不需要预先加载配置
    if let Commands::Init { force } = cli.command {
        if let Err(e) = run_init(&cli.config, force).await {
            error!("❌ 初始化失败: {:#}", e);
            std::process::exit(1);
        }
        return;
    }

    // 对于其他所有命令，我们需要加载配置并初始化App
    let mut app = match CliApp::new_with_auto_config(&cli.config).await {
        Ok(app) => app,
        Err(DashboardError::ConfigNotFound) => {
            error!("❌ 配置文件 '{}' 未找到。", cli.config.display());
            error!("👉 请先运行 'backup-cli init' 命令来创建配置文件。");
            std::process::exit(1);
        }
        Err(e) => {
            error!("❌ 应用初始化失败: {}", e);
            std::process::exit(1);
        }
    };

    // 运行命令
    if let Err(e) = app.run_command(cli.command).await {
        error!("❌ 操作失败: {}", e);
        std::process::exit(1);
    }
}
