//! 响应归一化 - 业务能力层
//!
//! 把生成服务返回的自由文本转换为 [`FeedbackSummary`]。
//!
//! 上游不是可靠的结构化输出源：它可能完全遵守格式、输出了 JSON 但位置或代码块不对、
//! 或者干脆只返回散文。因此按顺序尝试三层策略，第一层成功即停止：
//!
//! 1. 标记定位：在 `JSON_SUMMARY:` / `JSON_SUMMARY=` 之后截取 JSON
//! 2. 整体解析：把整个响应当作一个 JSON 对象
//! 3. 启发式：逐行分类为优点 / 不足
//!
//! 整个过程不会失败，最坏情况是把原文作为唯一一条优点返回。

use std::fmt::Display;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{FeedbackSummary, GrammarIssue, GrammarReport};
use crate::utils::logging::truncate_text;

static MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)JSON_SUMMARY[ \t]*[:=]").expect("marker regex"));

static STRENGTH_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:positive[a-z]*[ \t]*:|\+)[ \t]*").expect("strength label regex")
});

static WEAKNESS_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:negative[a-z]*[ \t]*:|-)[ \t]*").expect("weakness label regex")
});

/// `sections` 中建议的拼接顺序
const SECTION_ORDER: [&str; 4] = ["Introduction", "Body", "Conclusion", "GrammarEditing"];

/// 日志中原文预览的最大长度
const PREVIEW_LEN: usize = 120;

/// 结构化 JSON 的来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonSource {
    /// 第一层：标记之后的 JSON
    Marker,
    /// 第二层：整个响应就是 JSON
    WholeResponse,
}

impl Display for JsonSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JsonSource::Marker => write!(f, "标记定位"),
            JsonSource::WholeResponse => write!(f, "整体解析"),
        }
    }
}

/// 单层策略失败的原因
#[derive(Debug, Error)]
pub enum ExtractionFailure {
    #[error("未找到 JSON_SUMMARY 标记")]
    MarkerNotFound,
    #[error("JSON 解析失败: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("JSON 顶层不是对象")]
    NotAnObject,
    #[error("响应不包含任何文本")]
    EmptyResponse,
}

/// 记录是哪一层产生了结果
#[derive(Debug)]
pub enum ExtractionOutcome {
    Structured {
        source: JsonSource,
        summary: FeedbackSummary,
    },
    Heuristic(FeedbackSummary),
    Failed(ExtractionFailure),
}

impl ExtractionOutcome {
    /// 取出摘要；失败时返回空摘要
    pub fn into_summary(self) -> FeedbackSummary {
        match self {
            ExtractionOutcome::Structured { summary, .. } | ExtractionOutcome::Heuristic(summary) => {
                summary
            }
            ExtractionOutcome::Failed(_) => FeedbackSummary::default(),
        }
    }
}

type StructuredTier = fn(&str) -> Result<FeedbackSummary, ExtractionFailure>;

const STRUCTURED_TIERS: [(JsonSource, StructuredTier); 2] = [
    (JsonSource::Marker, from_marker as StructuredTier),
    (JsonSource::WholeResponse, from_whole_response as StructuredTier),
];

/// 响应归一化器
pub struct ResponseNormalizer;

impl ResponseNormalizer {
    /// 原始响应 → 反馈摘要，永不失败
    pub fn normalize(raw: &str) -> FeedbackSummary {
        Self::extract(raw).into_summary()
    }

    /// 依次尝试各层策略，并保留是哪一层成功的信息
    pub fn extract(raw: &str) -> ExtractionOutcome {
        for (source, tier) in STRUCTURED_TIERS {
            match tier(raw) {
                Ok(summary) => {
                    debug!("✓ {}成功", source);
                    return ExtractionOutcome::Structured { source, summary };
                }
                Err(e) => debug!("{}未成功: {}", source, e),
            }
        }

        warn!(
            "⚠️ 响应中没有可用的 JSON，改用逐行启发式: {}",
            truncate_text(raw.trim(), PREVIEW_LEN)
        );

        match from_lines(raw) {
            Ok(summary) => ExtractionOutcome::Heuristic(summary),
            Err(e) => ExtractionOutcome::Failed(e),
        }
    }
}

// ========== 第一层：标记定位 ==========

fn from_marker(raw: &str) -> Result<FeedbackSummary, ExtractionFailure> {
    let marker = MARKER.find(raw).ok_or(ExtractionFailure::MarkerNotFound)?;
    let candidate = brace_span(strip_code_fence(&raw[marker.end()..]));
    parse_object(candidate)
}

// ========== 第二层：整体解析 ==========

fn from_whole_response(raw: &str) -> Result<FeedbackSummary, ExtractionFailure> {
    parse_object(strip_code_fence(raw))
}

fn parse_object(text: &str) -> Result<FeedbackSummary, ExtractionFailure> {
    let parsed: Value = serde_json::from_str(text)?;
    let object = parsed.as_object().ok_or(ExtractionFailure::NotAnObject)?;
    Ok(reconcile(object))
}

/// 去掉首尾的 ``` 代码块标记（可带 json 语言标签）
fn strip_code_fence(text: &str) -> &str {
    let mut text = text.trim();

    if let Some(rest) = text.strip_prefix("```") {
        text = match rest.get(..4) {
            Some(tag) if tag.eq_ignore_ascii_case("json") => &rest[4..],
            _ => rest,
        };
    }
    if let Some(rest) = text.trim_end().strip_suffix("```") {
        text = rest;
    }

    text.trim()
}

/// 截取第一个 `{` 到最后一个 `}`，丢弃 JSON 之后多余的文字
///
/// 找不到合法的区间时原样返回。
fn brace_span(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if end > start => &text[start..=end],
        _ => text,
    }
}

// ========== 字段对齐 ==========

/// 宽松 JSON → 严格摘要，形状不对的字段视为缺失
fn reconcile(parsed: &Map<String, Value>) -> FeedbackSummary {
    let strengths = string_list(parsed.get("strengths"))
        .or_else(|| string_list(parsed.get("positiveFeedback")))
        .unwrap_or_default();

    let weaknesses = string_list(parsed.get("weaknesses"))
        .or_else(|| string_list(parsed.get("negativeFeedback")))
        .unwrap_or_default();

    let suggestions = string_list(parsed.get("suggestions"))
        .or_else(|| section_suggestions(parsed.get("sections")))
        .unwrap_or_default();

    let grammar = parsed.get("grammar").and_then(grammar_report);

    FeedbackSummary {
        strengths,
        weaknesses,
        suggestions,
        grammar,
    }
}

/// 非数组视为缺失；数组中只保留字符串
fn string_list(value: Option<&Value>) -> Option<Vec<String>> {
    let items = value?.as_array()?;
    Some(
        items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect(),
    )
}

fn section_suggestions(sections: Option<&Value>) -> Option<Vec<String>> {
    let sections = sections?.as_object()?;

    let mut found = false;
    let mut suggestions = Vec::new();
    for name in SECTION_ORDER {
        if let Some(list) = sections
            .get(name)
            .and_then(|section| string_list(section.get("suggestions")))
        {
            found = true;
            suggestions.extend(list);
        }
    }

    found.then_some(suggestions)
}

fn grammar_report(value: &Value) -> Option<GrammarReport> {
    let grammar = value.as_object()?;

    let overall_score = grammar.get("overallScore").and_then(score);
    let issues = grammar
        .get("issues")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(grammar_issue).collect())
        .unwrap_or_default();

    Some(GrammarReport {
        overall_score,
        issues,
    })
}

/// 0-100 的整数分；小数四舍五入，越界视为缺失
fn score(value: &Value) -> Option<u8> {
    let rounded = value.as_f64()?.round();
    (0.0..=100.0)
        .contains(&rounded)
        .then_some(rounded as u8)
}

fn grammar_issue(value: &Value) -> Option<GrammarIssue> {
    let issue = value.as_object()?;
    let text = |key: &str| issue.get(key).and_then(Value::as_str).map(str::to_owned);

    Some(GrammarIssue {
        kind: text("type"),
        message: text("message"),
        sentence: text("sentence"),
        suggestion: text("suggestion"),
    })
}

// ========== 第三层：逐行启发式 ==========

fn from_lines(raw: &str) -> Result<FeedbackSummary, ExtractionFailure> {
    if raw.trim().is_empty() {
        return Err(ExtractionFailure::EmptyResponse);
    }

    let mut strengths = Vec::new();
    let mut weaknesses = Vec::new();

    for line in raw.lines().map(str::trim).filter(|line| !line.is_empty()) {
        let lower = line.to_lowercase();

        if lower.starts_with("positive") || lower.starts_with('+') || lower.contains("strength") {
            push_stripped(&mut strengths, &STRENGTH_LABEL, line);
        } else if lower.starts_with("negative")
            || lower.starts_with('-')
            || lower.contains("improv")
            || lower.contains("weak")
        {
            push_stripped(&mut weaknesses, &WEAKNESS_LABEL, line);
        }
    }

    if strengths.is_empty() && weaknesses.is_empty() {
        strengths.push(raw.to_string());
    }

    Ok(FeedbackSummary {
        strengths,
        weaknesses,
        ..Default::default()
    })
}

fn push_stripped(target: &mut Vec<String>, label: &Regex, line: &str) {
    let text = label.replace(line, "");
    let text = text.trim();
    if !text.is_empty() {
        target.push(text.to_string());
    }
}
