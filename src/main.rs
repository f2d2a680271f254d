use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use essay_feedback::utils::logging::log_startup;
use essay_feedback::{logger, AnalysisClient, Config, EssayText};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = match std::env::var("ESSAY_FEEDBACK_CONFIG") {
        Ok(path) => Config::from_toml_file(Path::new(&path))?,
        Err(_) => Config::from_env()?,
    };

    // 初始化日志
    logger::init_with_verbose(config.verbose_logging);
    log_startup(&config);

    // 读取作文：参数指定文件，否则从标准输入读取
    let essay = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("无法读取作文文件: {}", path))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("无法从标准输入读取作文")?;
            buf
        }
    };

    if essay.trim().is_empty() {
        anyhow::bail!("作文内容为空");
    }

    let client = AnalysisClient::new(&config)?;
    let summary = client.analyze(EssayText::new(&essay)).await?;

    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
