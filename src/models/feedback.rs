//! 作文反馈数据结构
//!
//! 上游生成服务返回的 JSON 形状不可信，这里只定义严格的输出类型。
//! 宽松 JSON 到严格类型的转换在 `services::response_normalizer` 中完成。

use serde::{Deserialize, Serialize};

/// 结构化的作文反馈
///
/// 始终是完整的值：缺失的数据用空列表 / `None` 表示，而不是缺少字段。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackSummary {
    /// 优点（保持原有顺序）
    #[serde(default)]
    pub strengths: Vec<String>,
    /// 不足
    #[serde(default)]
    pub weaknesses: Vec<String>,
    /// 修改建议
    #[serde(default)]
    pub suggestions: Vec<String>,
    /// 语法报告（上游未给出时为 None）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grammar: Option<GrammarReport>,
}

impl FeedbackSummary {
    /// 没有任何可展示的内容
    pub fn is_empty(&self) -> bool {
        self.strengths.is_empty()
            && self.weaknesses.is_empty()
            && self.suggestions.is_empty()
            && self.grammar.is_none()
    }
}

/// 语法 / 编辑报告
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarReport {
    /// 0-100 的总分
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_score: Option<u8>,
    #[serde(default)]
    pub issues: Vec<GrammarIssue>,
}

/// 单条语法问题，任意字段都可能缺失
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarIssue {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}
