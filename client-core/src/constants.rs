/// API服务相关常量
pub mod api {
    /// 默认API服务器地址
    pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000/";

    /// 覆盖API服务器地址的环境变量
    pub const BASE_URL_ENV: &str = "BACKUP_API_URL";

    /// API端点路径（相对于基础地址）
    pub mod endpoints {
        /// 备份配置列表端点
        pub const BACKUP_CONFIG_LIST: &str = "api/v1/backup-config/all";

        /// 创建备份配置端点
        pub const BACKUP_CONFIG_CREATE: &str = "api/v1/backup-config";

        /// 运行备份端点（包含占位符）
        pub const BACKUP_CONFIG_RUN: &str = "api/v1/backup-config/{id}/run";

        /// 手动触发备份端点
        pub const MANUAL_TRIGGER: &str = "api/v1/manual-trigger";

        /// 备份文件（日志）列表端点
        pub const BACKUP_FILE_LIST: &str = "api/v1/backup-file/all";

        /// 恢复备份端点
        pub const RESTORE: &str = "api/v1/restore";
    }

    /// HTTP相关常量
    pub mod http {
        /// 默认请求超时时间（秒），用于列表/读取类请求
        pub const DEFAULT_TIMEOUT: u64 = 30;

        /// 创建备份配置超时时间（秒）
        pub const CREATE_TIMEOUT: u64 = 10;

        /// 运行备份超时时间（秒）
        pub const RUN_TIMEOUT: u64 = 30;

        /// 恢复备份超时时间（秒）
        pub const RESTORE_TIMEOUT: u64 = 60;

        /// User-Agent头
        pub const USER_AGENT: &str = concat!("backup-dashboard/", env!("CARGO_PKG_VERSION"));
    }
}

/// 配置文件相关常量
pub mod config {
    /// 配置文件名
    pub const CONFIG_FILE_NAME: &str = "config.toml";

    /// 按优先级查找的配置文件
    pub const CONFIG_FILE_CANDIDATES: &[&str] = &[
        CONFIG_FILE_NAME,
        "backup-dashboard.toml",
        ".backup-dashboard.toml",
    ];
}

/// 会话相关常量
pub mod session {
    /// 默认会话文件
    pub const DEFAULT_SESSION_FILE: &str = ".backup-dashboard-session.json";
}

/// 日志相关常量
pub mod logging {
    /// 设置后日志写入该文件而非终端
    pub const LOG_FILE_ENV: &str = "BACKUP_DASHBOARD_LOG_FILE";
}
