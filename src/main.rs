use clap::Parser;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use songvault::{
    Config,
    config::BlobBackend,
    handlers::{AppState, create_router},
    storage::{BlobStore, LocalBlobStore},
    store::SongStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Create storage backend
    let blobs: Arc<dyn BlobStore> = match config.storage {
        BlobBackend::Local => Arc::new(LocalBlobStore::new(config.data_dir.clone())),
        #[cfg(feature = "s3")]
        BlobBackend::S3 => {
            use anyhow::Context;
            let bucket = config
                .s3_bucket
                .clone()
                .context("--s3-bucket is required with the s3 backend")?;
            if let Some(endpoint) = &config.s3_endpoint {
                url::Url::parse(endpoint).context("invalid --s3-endpoint url")?;
            }
            Arc::new(
                songvault::storage::S3BlobStore::new(
                    bucket,
                    config.s3_prefix.clone(),
                    config.s3_region.clone(),
                    config.s3_endpoint.clone(),
                )
                .await?,
            )
        }
        #[cfg(not(feature = "s3"))]
        BlobBackend::S3 => anyhow::bail!("this build has no s3 support"),
    };

    let songs = SongStore::open(&config.db_path)?;

    let state = AppState { songs, blobs };

    let app = create_router(state, config.max_upload);
    let app = if config.cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    };

    let addr = config.bind_addr();
    tracing::info!("Starting songvault server on {}", addr);
    tracing::info!("Metadata database: {:?}", config.db_path);
    match config.storage {
        BlobBackend::Local => tracing::info!("Blob storage: local, {:?}", config.data_dir),
        BlobBackend::S3 => tracing::info!("Blob storage: s3, bucket {:?}", config.s3_bucket),
    }

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
