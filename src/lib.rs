//! # Essay Feedback
//!
//! 把外部文本生成服务的自由文本回复转换为可确定性渲染的结构化作文反馈
//!
//! ## 架构设计
//!
//! ### ① 数据模型（Models）
//! - `models/` - `FeedbackSummary` / `GrammarReport` / `GrammarIssue`，创建后不可变
//!
//! ### ② 业务能力层（Services）
//! - `PromptBuilder` - 纯函数：作文 → 指令
//! - `ResponseNormalizer` - 纯函数：原始回复 → 反馈摘要（标记定位 → 整体解析 → 逐行启发式）
//!
//! ### ③ 接入层（Clients）
//! - `AnalysisClient` - 构建提示词、调用一次分析接口、归一化结果
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use clients::AnalysisClient;
pub use config::Config;
pub use error::{AnalysisError, AnalysisResult, ConfigError};
pub use models::{EssayText, FeedbackSummary, GrammarIssue, GrammarReport};
pub use services::{ExtractionOutcome, PromptBuilder, ResponseNormalizer};
