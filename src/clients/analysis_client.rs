/// 作文分析 API 客户端
///
/// 构建提示词 → 调用一次分析接口 → 把返回文本交给 `ResponseNormalizer`。
/// 不做重试、不做去重，超时由配置决定。
use reqwest::{StatusCode, Url};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{AnalysisError, AnalysisResult};
use crate::models::{EssayText, FeedbackSummary};
use crate::services::{ExtractionOutcome, PromptBuilder, ResponseNormalizer};
use crate::utils::logging::truncate_text;

/// 错误详情的最大长度
const DETAIL_LEN: usize = 300;

/// 作文分析客户端
#[derive(Clone, Debug)]
pub struct AnalysisClient {
    http: reqwest::Client,
    endpoint: Option<String>,
}

impl AnalysisClient {
    /// 创建新的分析客户端
    pub fn new(config: &Config) -> AnalysisResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        let http = builder
            .build()
            .map_err(|e| AnalysisError::configuration(format!("无法创建 HTTP 客户端: {}", e)))?;

        Ok(Self::with_http_client(http, config))
    }

    /// 使用已有的 HTTP 客户端
    pub fn with_http_client(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            endpoint: config.endpoint().map(str::to_owned),
        }
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// 分析一篇作文
    ///
    /// # 返回
    /// 返回结构化反馈；响应格式不规范不会报错，只有配置、网络、接口错误会返回 `Err`
    pub async fn analyze(&self, essay: EssayText<'_>) -> AnalysisResult<FeedbackSummary> {
        let endpoint = self.resolve_endpoint()?;

        info!("📝 开始分析作文 ({} 字符)", essay.char_count());
        let prompt = PromptBuilder::build(essay);
        debug!("提示词长度: {} 字符", prompt.len());

        let response = self
            .http
            .post(endpoint.clone())
            .json(&json!({
                "message": prompt,
                "history": [],
            }))
            .send()
            .await
            .map_err(|e| {
                warn!("分析接口请求失败: {}", e);
                AnalysisError::transport(endpoint.as_str(), e)
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AnalysisError::transport(endpoint.as_str(), e))?;

        let raw = read_response_text(endpoint.as_str(), status, &body)?;
        debug!("原始响应: {}", truncate_text(&raw, 200));

        let outcome = ResponseNormalizer::extract(&raw);
        match &outcome {
            ExtractionOutcome::Structured { source, .. } => info!("✓ 分析完成（{}）", source),
            ExtractionOutcome::Heuristic(_) => info!("✓ 分析完成（启发式）"),
            ExtractionOutcome::Failed(reason) => warn!("⚠️ 响应无可用内容: {}", reason),
        }

        Ok(outcome.into_summary())
    }

    /// 未配置时不发起任何网络请求
    fn resolve_endpoint(&self) -> AnalysisResult<Url> {
        let endpoint = self
            .endpoint
            .as_deref()
            .ok_or_else(|| AnalysisError::configuration("未配置分析接口 (ANALYSIS_ENDPOINT)"))?;

        let url = Url::parse(endpoint).map_err(|e| {
            AnalysisError::configuration(format!("分析接口地址无效 '{}': {}", endpoint, e))
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(AnalysisError::configuration(format!(
                "分析接口地址必须是 http(s)，实际为 '{}'",
                scheme
            ))),
        }
    }
}

/// 从接口响应中取出 `response` 字段
fn read_response_text(endpoint: &str, status: StatusCode, body: &str) -> AnalysisResult<String> {
    if !status.is_success() {
        warn!("分析接口返回错误状态: {}", status);
        return Err(AnalysisError::response(
            endpoint,
            Some(status.as_u16()),
            error_detail(body),
        ));
    }

    let envelope: Value = serde_json::from_str(body).map_err(|e| {
        AnalysisError::response(
            endpoint,
            Some(status.as_u16()),
            Some(format!(
                "响应不是合法的 JSON: {} ({})",
                e,
                truncate_text(body.trim(), DETAIL_LEN)
            )),
        )
    })?;

    match envelope.get("response").and_then(Value::as_str) {
        Some(text) => Ok(text.to_string()),
        None => Err(AnalysisError::response(
            endpoint,
            Some(status.as_u16()),
            detail_from_value(&envelope).or_else(|| Some("响应缺少 response 字段".to_string())),
        )),
    }
}

/// 错误响应体中的诊断信息
fn error_detail(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| detail_from_value(&value))
        .or_else(|| Some(truncate_text(body, DETAIL_LEN)))
}

fn detail_from_value(value: &Value) -> Option<String> {
    let error = value.get("error");
    error
        .and_then(Value::as_str)
        .or_else(|| error.and_then(|e| e.get("message")).and_then(Value::as_str))
        .or_else(|| value.get("message").and_then(Value::as_str))
        .or_else(|| value.get("detail").and_then(Value::as_str))
        .map(str::to_owned)
}
