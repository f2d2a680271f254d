//! 提示词构建 - 业务能力层
//!
//! 纯函数：作文文本 → 发送给生成服务的完整指令。无状态、无 I/O。

use crate::models::EssayText;

/// 结构化摘要行的标记，生成服务必须在其后紧跟一个 JSON 对象
pub const SUMMARY_MARKER: &str = "JSON_SUMMARY=";

/// 评价框架（四个维度）
const FRAMEWORK: &str = r#"You are an experienced writing tutor. Evaluate the essay below using four dimensions:

1. Introduction - does it engage the reader and state a clear thesis?
2. Body - are the paragraphs organised, developed and supported with evidence?
3. Conclusion - does it resolve the argument and leave a lasting impression?
4. Grammar & Editing - spelling, punctuation, tense, agreement and word choice.

Write all feedback in the same language as the essay. If the essay is not written in English, do not answer in English."#;

/// 输出格式约定
const OUTPUT_CONTRACT: &str = r#"OUTPUT FORMAT (mandatory):
First write your narrative feedback as plain prose.
Then, on a new final line, write the literal marker JSON_SUMMARY= immediately followed by a single JSON object.
Do not wrap the JSON in a code fence and do not write anything after it.
The JSON object must contain exactly these keys:
{
  "strengths": ["..."],
  "weaknesses": ["..."],
  "suggestions": ["..."],
  "positiveFeedback": ["..."],
  "negativeFeedback": ["..."],
  "sections": {
    "Introduction": {"strengths": ["..."], "weaknesses": ["..."], "suggestions": ["..."]},
    "Body": {"strengths": ["..."], "weaknesses": ["..."], "suggestions": ["..."]},
    "Conclusion": {"strengths": ["..."], "weaknesses": ["..."], "suggestions": ["..."]},
    "GrammarEditing": {"strengths": ["..."], "weaknesses": ["..."], "suggestions": ["..."]}
  },
  "grammar": {
    "overallScore": 0,
    "issues": [{"type": "...", "message": "...", "sentence": "...", "suggestion": "..."}]
  },
  "language": "..."
}
"overallScore" is an integer from 0 to 100. Use empty arrays when there is nothing to report."#;

/// 提示词构建器
pub struct PromptBuilder;

impl PromptBuilder {
    /// 构建完整指令，作文原文原样追加在末尾
    ///
    /// 相同输入总是得到相同输出。
    pub fn build(essay: EssayText<'_>) -> String {
        format!("{FRAMEWORK}\n\n{OUTPUT_CONTRACT}\n\nESSAY:\n{}", essay.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ESSAY: &str = "Cats are better than dogs.\n\nThey are quiet and clean.";

    #[test]
    fn test_build_is_deterministic() {
        let first = PromptBuilder::build(EssayText::new(ESSAY));
        let second = PromptBuilder::build(EssayText::new(ESSAY));
        assert_eq!(first, second);
    }

    #[test]
    fn test_essay_is_appended_verbatim() {
        let prompt = PromptBuilder::build(EssayText::new(ESSAY));
        assert!(prompt.ends_with(ESSAY));
    }

    #[test]
    fn test_contains_marker_and_keys() {
        let prompt = PromptBuilder::build(EssayText::new("short"));
        assert!(prompt.contains(SUMMARY_MARKER));
        for key in [
            "\"strengths\"",
            "\"weaknesses\"",
            "\"suggestions\"",
            "\"positiveFeedback\"",
            "\"negativeFeedback\"",
            "\"sections\"",
            "\"GrammarEditing\"",
            "\"overallScore\"",
            "\"issues\"",
            "\"language\"",
        ] {
            assert!(prompt.contains(key), "缺少键 {}", key);
        }
    }

    #[test]
    fn test_essay_with_braces_is_not_interpreted() {
        let essay = "Use {curly} braces and JSON_SUMMARY= inside text";
        let prompt = PromptBuilder::build(EssayText::new(essay));
        assert!(prompt.ends_with(essay));
    }
}
