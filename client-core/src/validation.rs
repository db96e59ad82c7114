use crate::error::FormErrors;
use crate::models::{DatabaseType, NewBackupConfig};

pub const FIELD_NAME: &str = "name";
pub const FIELD_DATABASE_URL: &str = "databaseUrl";
pub const FIELD_TARGET_DATABASE_NAME: &str = "targetDatabaseName";

/// 校验创建表单，收集所有字段错误
pub fn validate_new_config(config: &NewBackupConfig) -> Result<(), FormErrors> {
    let mut errors = FormErrors::new();

    if config.name.trim().is_empty() {
        errors.insert(FIELD_NAME, "Configuration name is required");
    }

    if config.database_url.trim().is_empty() {
        errors.insert(FIELD_DATABASE_URL, "Database URL is required");
    } else if config.database_type == DatabaseType::Mongodb
        && !config.database_url.contains("mongodb")
    {
        errors.insert(
            FIELD_DATABASE_URL,
            "Please provide a valid MongoDB connection string",
        );
    }

    if config.target_database_name.trim().is_empty() {
        errors.insert(
            FIELD_TARGET_DATABASE_NAME,
            "Target database name is required",
        );
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Schedule;

    fn form(database_type: DatabaseType, url: &str) -> NewBackupConfig {
        NewBackupConfig {
            name: "orders".into(),
            database_type,
            database_url: url.into(),
            target_database_name: "orders".into(),
            schedule: Schedule::Manual,
        }
    }

    #[test]
    fn test_valid_form_passes() {
        let atlas = form(DatabaseType::Mongodb, "mongodb+srv://cluster/db");
        assert!(validate_new_config(&atlas).is_ok());
        assert!(validate_new_config(&form(DatabaseType::Postgresql, "postgres://db")).is_ok());
    }

    #[test]
    fn test_mongodb_requires_mongodb_url() {
        let errors =
            validate_new_config(&form(DatabaseType::Mongodb, "postgres://db")).unwrap_err();
        assert_eq!(
            errors.get(FIELD_DATABASE_URL),
            Some("Please provide a valid MongoDB connection string")
        );
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_all_missing_fields_are_reported() {
        let errors = validate_new_config(&NewBackupConfig {
            name: "  ".into(),
            database_url: String::new(),
            target_database_name: "\t".into(),
            ..NewBackupConfig::default()
        })
        .unwrap_err();

        assert_eq!(errors.get(FIELD_NAME), Some("Configuration name is required"));
        assert_eq!(errors.get(FIELD_DATABASE_URL), Some("Database URL is required"));
        assert_eq!(
            errors.get(FIELD_TARGET_DATABASE_NAME),
            Some("Target database name is required")
        );
    }
}
