use anyhow::Result;
use question_set_composer::config::Config;
use question_set_composer::logger;
use question_set_composer::orchestrator::App;

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load()?;

    // 初始化日志
    logger::init(config.verbose_logging);

    // 初始化并运行应用
    let _order = App::initialize(config).await?.run().await?;

    Ok(())
}
