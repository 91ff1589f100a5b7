use anyhow::Context;
use gems::domain::config::ApiConfig;
use gems::kernel::config::load_config;
use gems_logger::Logger;
use gems_server::Server;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let cfg: ApiConfig = load_config(None::<&str>).context("Critical: Configuration is malformed")?;

    let logging = &cfg.logging;
    let mut logger = Logger::builder().name(env!("CARGO_PKG_NAME")).level_str(&logging.level).json(logging.json);
    if let Some(filter) = &logging.env_filter {
        logger = logger.env_filter(filter);
    }
    if let Some(directory) = &logging.directory {
        logger = logger.directory(directory);
    }
    let _log = logger.init()?;

    Server::builder().config(cfg).build()?.run().await
}
