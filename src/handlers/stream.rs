use axum::{
    extract::{Path, State},
    http::{HeaderMap, header},
    response::Response,
};

use super::AppState;
use crate::{
    Error, Result,
    range::{self, RangeSpec},
    stream,
};

/// Serve a song's audio with byte-range support.
///
/// Record lookup happens before any blob access, and the 416 path never
/// opens the blob at all. Once the record resolves, failures opening or
/// sizing the blob are internal errors, not 404s.
pub async fn stream_song(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response> {
    let song = state.songs.find_by_id(&id)?.ok_or(Error::NotFound(id))?;

    let size = state.blobs.size(&song.location).await?;
    let range_header = headers.get(header::RANGE).and_then(|v| v.to_str().ok());

    match range::parse(range_header, size)? {
        RangeSpec::Unsatisfiable { start } => Err(Error::RangeNotSatisfiable { start, size }),
        RangeSpec::Full => {
            tracing::debug!("streaming {} in full ({} bytes)", song.id, size);
            let source = state.blobs.open(&song.location, None).await?;
            stream::full(size, source)
        }
        RangeSpec::Partial(span) => {
            tracing::debug!(
                "streaming {} bytes {}-{}/{}",
                song.id,
                span.start,
                span.end,
                size
            );
            let source = state.blobs.open(&song.location, Some(span)).await?;
            stream::partial(span, size, source)
        }
    }
}
