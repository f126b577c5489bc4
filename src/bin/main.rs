use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wicket::backend::{Backend, InMemoryBackend};
use wicket::config::{self, FeedSettings};
use wicket::core::db::init_demo_data;
use wicket::handlers::{configure, AppState};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let backend: Arc<dyn Backend> = Arc::new(InMemoryBackend::new());
    if config::seed_demo_data() {
        init_demo_data(backend.as_ref())?;
    }

    let settings = FeedSettings::from_env();
    let state = web::Data::new(AppState::new(backend, settings));
    let addr = config::bind_addr();

    tracing::info!(%addr, ?settings, "wicket listening");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(configure)
    })
    .bind(&addr)?
    .run()
    .await?;

    Ok(())
}
