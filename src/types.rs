use serde::{Deserialize, Serialize};

/// A song record as persisted in the metadata store and returned over HTTP.
///
/// `location` is the opaque blob reference handed back by the blob store:
/// a relative file name for local storage, an object key for bucket storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Song {
    pub id: String,
    pub title: String,
    pub artist: String,
    /// Track length in seconds.
    pub duration: f64,
    pub location: String,
}

/// Fields of a song record before the store assigns an id.
#[derive(Debug, Clone)]
pub struct NewSong {
    pub title: String,
    pub artist: String,
    pub duration: f64,
    pub location: String,
}
