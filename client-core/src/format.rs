//! 展示用的格式化函数

use chrono::{DateTime, Local, Utc};

/// 文件大小，以 KB 显示；为 0 时显示 N/A
pub fn format_size(size: u64) -> String {
    if size > 0 {
        format!("{:.2} KB", size as f64 / 1024.0)
    } else {
        "N/A".to_string()
    }
}

/// 首字母大写
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn format_database_type(value: &str) -> String {
    value.to_uppercase()
}

/// 本地时区的日期与时间
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

pub fn format_optional_timestamp(value: Option<&DateTime<Utc>>) -> String {
    value.map(format_timestamp).unwrap_or_else(|| "Never".to_string())
}
