use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// 程序配置文件
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// 作文分析接口（POST）
    pub analysis_endpoint: Option<String>,
    /// 请求超时（秒），不设置则不限制
    pub request_timeout_secs: Option<u64>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Config {
    /// 从环境变量加载
    ///
    /// - `ANALYSIS_ENDPOINT`
    /// - `REQUEST_TIMEOUT_SECS`
    /// - `VERBOSE_LOGGING`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 从 TOML 文件加载
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.display().to_string(),
            source,
        })
    }

    /// 设置分析接口
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.analysis_endpoint = Some(endpoint.into());
        self
    }

    /// 设置请求超时
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = Some(secs);
        self
    }

    /// 已配置的接口地址，空字符串视为未配置
    pub fn endpoint(&self) -> Option<&str> {
        self.analysis_endpoint
            .as_deref()
            .map(str::trim)
            .filter(|endpoint| !endpoint.is_empty())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let default = Self::default();
        Ok(Self {
            analysis_endpoint: lookup("ANALYSIS_ENDPOINT").or(default.analysis_endpoint),
            request_timeout_secs: match lookup("REQUEST_TIMEOUT_SECS") {
                Some(value) => Some(parse_var("REQUEST_TIMEOUT_SECS", &value, "u64")?),
                None => default.request_timeout_secs,
            },
            verbose_logging: match lookup("VERBOSE_LOGGING") {
                Some(value) => parse_var("VERBOSE_LOGGING", &value, "bool")?,
                None => default.verbose_logging,
            },
        })
    }
}

fn parse_var<T: FromStr>(var_name: &str, value: &str, expected_type: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::EnvVarParseFailed {
            var_name: var_name.to_string(),
            value: value.to_string(),
            expected_type: expected_type.to_string(),
        })
}
