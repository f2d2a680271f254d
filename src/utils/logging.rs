/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use tracing::info;

use crate::config::Config;

/// 记录程序启动信息
///
/// # 参数
/// - `config`: 当前配置
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 作文反馈分析启动");
    match config.analysis_endpoint.as_deref() {
        Some(endpoint) => info!("🌐 分析接口: {}", endpoint),
        None => info!("🌐 分析接口: 未配置"),
    }
    if let Some(secs) = config.request_timeout_secs {
        info!("⏱️ 请求超时: {} 秒", secs);
    }
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
