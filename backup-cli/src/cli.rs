use crate::project_info::{metadata, version_info};
use clap::{Parser, Subcommand};
use client_core::models::{DatabaseType, Schedule};
use std::path::PathBuf;

/// Backup Dashboard CLI - 数据库备份服务的命令行控制台
#[derive(Parser)]
#[command(name = "backup-cli")]
#[command(about = metadata::PROJECT_DESCRIPTION)]
#[command(version = version_info::CLI_VERSION)]
#[command(long_about = metadata::display::DESCRIPTION_LONG)]
#[command(author = metadata::PROJECT_AUTHORS)]
pub struct Cli {
    /// 配置文件路径
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// 详细输出
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 创建配置文件
    Init {
        /// 如果配置文件已存在，强制覆盖
        #[arg(long)]
        force: bool,
    },
    /// 使用演示账号登录
    Login {
        email: String,
        password: String,
    },
    /// 退出登录
    Logout,
    /// 显示当前登录用户
    Whoami,
    /// 显示当前API配置信息
    ApiInfo,
    /// 列出所有备份配置
    List,
    /// 查看备份配置详情和最近的备份记录
    Show {
        /// 备份配置 ID
        id: String,
    },
    /// 新建备份配置
    Create {
        /// 配置名称
        #[arg(long)]
        name: String,
        /// 数据库类型: mongodb, mysql, postgresql, redis
        #[arg(long, default_value_t = DatabaseType::Mongodb)]
        database_type: DatabaseType,
        /// 源数据库连接地址
        #[arg(long)]
        database_url: String,
        /// 目标数据库名称
        #[arg(long = "target-database")]
        target_database: String,
        /// 备份计划: manual, daily, weekly, monthly
        #[arg(long, default_value_t = Schedule::Manual)]
        schedule: Schedule,
    },
    /// 立即运行一次备份
    Run {
        /// 备份配置 ID
        id: String,
    },
    /// 查看备份日志
    Logs {
        /// 显示单条日志的详细信息
        #[arg(long)]
        log: Option<String>,
    },
    /// 从备份日志恢复
    Restore {
        /// 备份配置 ID
        config_id: String,
        /// 备份日志 ID（必须是成功的备份）
        log_id: String,
    },
}

impl Commands {
    /// 不需要登录即可执行的命令
    pub fn is_public(&self) -> bool {
        matches!(
            self,
            Commands::Init { .. }
                | Commands::Login { .. }
                | Commands::Logout
                | Commands::Whoami
                | Commands::ApiInfo
        )
    }
}
