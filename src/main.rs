use tokio::net::TcpListener;

use flatwiki::logger::Logger;
use flatwiki::{build_router, AppState, Config, PageStore, TemplateComponent, WikiError};

#[tokio::main]
async fn main() -> Result<(), WikiError> {
    if let Err(e) = Logger::init() {
        eprintln!("logger already initialised: {}", e);
    }

    let config = Config::from_env()?;
    log::debug!("Configuration: {:?}", config);

    let store = PageStore::new(config.data_dir.clone());
    store.ensure_dir().await?;
    log::info!("Serving pages from {:?}", store.data_dir());

    let templates = TemplateComponent::load(&config.template_dir).inspect_err(|e| {
        log::error!("Failed to load templates from {:?}: {}", config.template_dir, e);
    })?;

    let app = build_router(AppState::new(store, templates));

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    log::info!("Wiki listening on http://{}", addr);
    axum::serve(listener, app).await.map_err(WikiError::from)
}
