mod catalog;
mod config;
mod web;

use config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = ServerConfig::from_env()?;
    log::info!(
        "Serving examples {:?} from {}",
        cfg.catalog.example_names(),
        cfg.base_dir.display()
    );
    if !cfg.base_dir.is_dir() {
        log::warn!("Base directory {} does not exist", cfg.base_dir.display());
    }

    web::server::run_server(cfg).await
}
