use std::net::{Ipv4Addr, SocketAddr};

use axum::Router;
use log::info;
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as ScalarServable};

mod api;
mod mime_type;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // Configure logging and environment
    civitas_config::setup_logging();

    info!(
        "Starting Civitas media service [version {}].",
        env!("CARGO_PKG_VERSION")
    );

    // Ensure the storage directory exists before accepting uploads
    let config = civitas_config::config().await;
    tokio::fs::create_dir_all(&config.files.storage_path).await?;

    // Configure API schema
    #[derive(OpenApi)]
    #[openapi(
        paths(api::root, api::upload_photo, api::fetch_photo),
        components(schemas(api::RootResponse, api::UploadPayload, api::UploadResponse))
    )]
    struct ApiDoc;

    // Configure Axum and router
    let app = Router::new()
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .merge(api::router().await);

    // Configure TCP listener and bind
    let address = SocketAddr::from((Ipv4Addr::UNSPECIFIED, 3000));
    let listener = TcpListener::bind(&address).await?;
    axum::serve(listener, app.into_make_service()).await
}
