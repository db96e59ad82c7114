/// Backup CLI 项目信息模块
///
/// backup-cli 是面向用户的主程序，项目元数据统一在这里定义，
/// client-core 作为内部库只提供技术性常量

/// 项目元数据（自动从 backup-cli 的 Cargo.toml 同步）
pub mod metadata {
    pub const PROJECT_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

    pub const PROJECT_AUTHORS: &str = env!("CARGO_PKG_AUTHORS");

    /// 用户友好的显示名称（手动维护，用于 UI 显示）
    pub mod display {
        pub const FRIENDLY_NAME: &str = "Backup Dashboard";

        /// 项目详细描述（比 Cargo.toml 中的描述更详细）
        pub const DESCRIPTION_LONG: &str = "数据库备份服务的命令行控制台：管理备份配置、触发备份、查看备份日志并从成功的备份中恢复";
    }
}

/// 版本信息
pub mod version_info {
    /// CLI 版本（自动从 Cargo.toml 同步）
    pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");
}

/// 获取版本信息字符串
pub fn get_version_string() -> String {
    format!(
        "{} v{}",
        metadata::display::FRIENDLY_NAME,
        version_info::CLI_VERSION
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_string() {
        assert_eq!(
            get_version_string(),
            format!("Backup Dashboard v{}", env!("CARGO_PKG_VERSION"))
        );
    }
}
