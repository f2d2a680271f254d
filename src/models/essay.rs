use std::fmt::Display;

/// 待分析的作文文本
///
/// 核心不做长度限制；截断或拒绝由调用方决定。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EssayText<'a>(&'a str);

impl<'a> EssayText<'a> {
    pub fn new(text: &'a str) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &'a str {
        self.0
    }

    /// 字符数（用于日志）
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl<'a> From<&'a str> for EssayText<'a> {
    fn from(text: &'a str) -> Self {
        Self(text)
    }
}

impl<'a> From<&'a String> for EssayText<'a> {
    fn from(text: &'a String) -> Self {
        Self(text.as_str())
    }
}

impl Display for EssayText<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}
