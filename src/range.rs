//! `Range` request header parsing.
//!
//! Turns a raw `bytes=<start>-<end>` header value into a concrete byte
//! interval against the known total size of the target resource. Only a
//! single `bytes` range is supported; suffix ranges (`bytes=-500`) and
//! multi-range requests are rejected.

use crate::{Error, Result};

/// An inclusive byte interval within a resource of known size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteSpan {
    pub start: u64,
    pub end: u64,
}

impl ByteSpan {
    /// Number of bytes covered by the span. Never zero; the interval is
    /// inclusive on both ends.
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }
}

/// Outcome of parsing a `Range` header against a resource of `size` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSpec {
    /// No byte range requested; serve the whole resource.
    Full,
    /// A satisfiable range, clamped to the resource size.
    Partial(ByteSpan),
    /// The requested start lies at or beyond the end of the resource.
    /// The caller must answer 416 and not open the resource.
    Unsatisfiable { start: u64 },
}

/// Parse an optional `Range` header value against a resource of `size` bytes.
///
/// An absent header, or one using a range unit other than `bytes`, selects
/// the full resource. A missing end defaults to `size - 1`; an end past the
/// resource is clamped. A start segment that is empty or non-numeric, an
/// unparseable end, or an inverted interval is an [`Error::InvalidRange`].
pub fn parse(header: Option<&str>, size: u64) -> Result<RangeSpec> {
    let Some(raw) = header else {
        return Ok(RangeSpec::Full);
    };
    let Some(rest) = raw.strip_prefix("bytes=") else {
        return Ok(RangeSpec::Full);
    };

    let (start, end) = rest
        .split_once('-')
        .ok_or_else(|| Error::InvalidRange(raw.to_string()))?;

    let start: u64 = start
        .trim()
        .parse()
        .map_err(|_| Error::InvalidRange(raw.to_string()))?;
    if start >= size {
        return Ok(RangeSpec::Unsatisfiable { start });
    }

    let end = match end.trim() {
        "" => size - 1,
        segment => segment
            .parse::<u64>()
            .map_err(|_| Error::InvalidRange(raw.to_string()))?
            .min(size - 1),
    };
    if start > end {
        return Err(Error::InvalidRange(raw.to_string()));
    }

    Ok(RangeSpec::Partial(ByteSpan { start, end }))
}
