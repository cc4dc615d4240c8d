//! Full and partial-content response construction for audio streaming.
//!
//! The byte source arrives as a chunked stream opened by the blob store, so
//! a response body never holds more than one chunk in memory at a time. The
//! stream is dropped, and its read cursor released, when the response
//! finishes or the client disconnects.

use axum::{
    body::Body,
    http::{StatusCode, header},
    response::Response,
};

use crate::{Error, Result, range::ByteSpan, storage::ByteStream};

pub const AUDIO_MPEG: &str = "audio/mpeg";

/// 200 response streaming the entire resource of `size` bytes.
pub fn full(size: u64, source: ByteStream) -> Result<Response> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, AUDIO_MPEG)
        .header(header::CONTENT_LENGTH, size)
        .header(header::ACCEPT_RANGES, "bytes")
        .body(Body::from_stream(source))
        .map_err(|e| Error::Internal(e.to_string()))
}

/// 206 response streaming exactly the bytes of `span` out of `size` total.
///
/// The source must already be positioned and bounded to the span; this
/// function only shapes the headers around it.
pub fn partial(span: ByteSpan, size: u64, source: ByteStream) -> Result<Response> {
    Response::builder()
        .status(StatusCode::PARTIAL_CONTENT)
        .header(header::CONTENT_TYPE, AUDIO_MPEG)
        .header(
            header::CONTENT_RANGE,
            format!("bytes {}-{}/{}", span.start, span.end, size),
        )
        .header(header::CONTENT_LENGTH, span.len())
        .header(header::ACCEPT_RANGES, "bytes")
        .body(Body::from_stream(source))
        .map_err(|e| Error::Internal(e.to_string()))
}
