use thiserror::Error;

/// 作文分析错误
///
/// 只有三类：配置、网络传输、响应。响应内容格式不规范不属于错误，
/// 由 `ResponseNormalizer` 的分层回退吸收。
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// 未配置或配置了无效的接口地址，需要修改部署配置，不可重试
    #[error("配置错误: {reason}")]
    Configuration { reason: String },

    /// 网络请求未能完成（DNS、超时、连接重置等），可重试
    #[error("网络请求失败 ({endpoint}): {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// 接口可达，但返回了错误状态或缺少 `response` 字段
    #[error("接口返回错误响应 ({endpoint}): status={status:?}, detail={detail:?}")]
    Response {
        endpoint: String,
        status: Option<u16>,
        detail: Option<String>,
    },
}

impl AnalysisError {
    /// 只有网络层失败值得重试
    pub fn is_retryable(&self) -> bool {
        matches!(self, AnalysisError::Transport { .. })
    }

    // ========== 便捷构造函数 ==========

    /// 创建配置错误
    pub fn configuration(reason: impl Into<String>) -> Self {
        AnalysisError::Configuration {
            reason: reason.into(),
        }
    }

    /// 创建网络传输错误
    pub fn transport(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        AnalysisError::Transport {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// 创建响应错误
    pub fn response(
        endpoint: impl Into<String>,
        status: Option<u16>,
        detail: Option<String>,
    ) -> Self {
        AnalysisError::Response {
            endpoint: endpoint.into(),
            status,
            detail,
        }
    }
}

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

/// 作文分析结果类型
pub type AnalysisResult<T> = Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_transport_is_retryable() {
        assert!(!AnalysisError::configuration("missing").is_retryable());
        assert!(!AnalysisError::response("http://x", Some(500), None).is_retryable());
    }

    #[test]
    fn test_display_includes_detail() {
        let err = AnalysisError::response("http://x/api", Some(502), Some("bad gateway".into()));
        let text = err.to_string();
        assert!(text.contains("http://x/api"));
        assert!(text.contains("502"));
        assert!(text.contains("bad gateway"));
    }
}
