use crate::error::{AppError, AppResult, ConfigError, FileError};
use serde::Deserialize;
use std::path::Path;

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    // --- 题库 API 配置 ---
    pub api_base_url: String,
    pub api_token: String,
    /// 遇到频率限制时的最大重试次数
    pub max_retries: usize,
    pub request_timeout_secs: u64,
    /// 题集 TOML 文件
    pub question_set_file: String,
    /// 远端题集 ID，设置后从接口读取题集
    pub question_set_id: String,
    /// 本次会话使用的搜索词（为空则不搜索）
    pub search_term: String,
    /// 最多加载的候选页数
    pub max_pages: u32,
    /// 是否同时保存到远端
    pub save_remote: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- 拖拽配置 ---
    pub drag_activation_distance: f32,
    pub row_height: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000".to_string(),
            api_token: String::new(),
            max_retries: 3,
            request_timeout_secs: 30,
            question_set_file: "question_set.toml".to_string(),
            question_set_id: String::new(),
            search_term: String::new(),
            max_pages: 1,
            save_remote: false,
            verbose_logging: false,
            drag_activation_distance: 10.0,
            row_height: 64.0,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 先读取 `COMPOSER_CONFIG` 指向的 TOML 文件（若设置），
    /// 再应用环境变量覆盖
    pub fn load() -> AppResult<Self> {
        let base = match std::env::var("COMPOSER_CONFIG") {
            Ok(path) if !path.trim().is_empty() => Self::from_toml_file(Path::new(&path))?,
            _ => Self::default(),
        };
        let config = base.with_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 从 TOML 文件读取配置，缺失的字段使用默认值
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Err(FileError::NotFound {
                path: path.display().to_string(),
            }
            .into());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        Self::from_toml_str(&content)
            .map_err(|e| AppError::toml_parse_failed(path.display().to_string(), e))
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    fn with_env_overrides(self) -> Self {
        let env = |name: &str| std::env::var(name).ok();
        Self {
            api_base_url: env("API_BASE_URL").unwrap_or(self.api_base_url),
            api_token: env("API_TOKEN").unwrap_or(self.api_token),
            max_retries: env("MAX_RETRIES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.max_retries),
            request_timeout_secs: env("REQUEST_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.request_timeout_secs),
            question_set_file: env("QUESTION_SET_FILE").unwrap_or(self.question_set_file),
            question_set_id: env("QUESTION_SET_ID").unwrap_or(self.question_set_id),
            search_term: env("SEARCH_TERM").unwrap_or(self.search_term),
            max_pages: env("MAX_PAGES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.max_pages),
            save_remote: env("SAVE_REMOTE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.save_remote),
            verbose_logging: env("VERBOSE_LOGGING")
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.verbose_logging),
            drag_activation_distance: env("DRAG_ACTIVATION_DISTANCE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.drag_activation_distance),
            row_height: env("ROW_HEIGHT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.row_height),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.row_height <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "row_height".to_string(),
                reason: format!("必须大于 0，当前为 {}", self.row_height),
            });
        }
        if self.drag_activation_distance < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "drag_activation_distance".to_string(),
                reason: format!("不能为负数，当前为 {}", self.drag_activation_distance),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = Config::from_toml_str(
            r#"
            api_base_url = "https://api.example.org"
            max_pages = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.api_base_url, "https://api.example.org");
        assert_eq!(config.max_pages, 3);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.drag_activation_distance, 10.0);
    }

    #[test]
    fn test_validate_rejects_zero_row_height() {
        let config = Config {
            row_height: 0.0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_missing_config_file() {
        let result = Config::from_toml_file(Path::new("/nonexistent/composer.toml"));
        assert!(matches!(result, Err(AppError::File(FileError::NotFound { .. }))));
    }
}
