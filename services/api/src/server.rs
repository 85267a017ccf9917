use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use bnb_market::config::AppConfig;
use bnb_market::error::AppError;
use bnb_market::marketplace::Marketplace;
use bnb_market::telemetry;
use tracing::info;

use crate::cli::ServeArgs;
use crate::infra::{load_catalog, AppState, InMemoryAuthProvider, InMemoryDocumentStore};
use crate::routes::with_marketplace_routes;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(path) = args.listings_csv.take() {
        config.marketplace.listings_csv = Some(path);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let catalog = load_catalog(config.marketplace.listings_csv.as_deref())?;
    info!(listings = catalog.len(), "listing catalogue loaded");

    let marketplace = Arc::new(Marketplace::new(
        catalog,
        Arc::new(InMemoryAuthProvider::default()),
        Arc::new(InMemoryDocumentStore::default()),
        &config.marketplace,
    ));

    let app = with_marketplace_routes(marketplace)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "accommodation marketplace ready");

    axum::serve(listener, app).await?;
    Ok(())
}
