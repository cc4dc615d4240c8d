mod songs;
mod stream;

pub use songs::{create_song, delete_song, get_song, list_songs};
pub use stream::stream_song;

use crate::{storage::BlobStore, store::SongStore};
use axum::{Router, extract::DefaultBodyLimit, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub songs: SongStore,
    pub blobs: Arc<dyn BlobStore>,
}

pub fn create_router(state: AppState, max_upload: usize) -> Router {
    Router::new()
        .route("/songs", get(list_songs).post(create_song))
        .route("/songs/:id", get(get_song).delete(delete_song))
        .route("/stream/:id", get(stream_song))
        .layer(DefaultBodyLimit::max(max_upload))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
