use axum::{
    Json,
    extract::{Multipart, Path, State},
};
use bytes::Bytes;
use uuid::Uuid;

use super::AppState;
use crate::{
    Error, Result,
    stream::AUDIO_MPEG,
    types::{NewSong, Song},
};

pub async fn list_songs(State(state): State<AppState>) -> Result<Json<Vec<Song>>> {
    let songs = state.songs.find_all()?;
    tracing::debug!("listing {} songs", songs.len());
    Ok(Json(songs))
}

pub async fn get_song(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Song>> {
    let song = state.songs.find_by_id(&id)?.ok_or(Error::NotFound(id))?;
    Ok(Json(song))
}

/// Accept a multipart upload (audio file plus title/artist/duration fields),
/// write the blob first, then persist the metadata record. The record is
/// never created for a blob that failed to store.
pub async fn create_song(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Song>> {
    let mut title: Option<String> = None;
    let mut artist: Option<String> = None;
    let mut duration: Option<f64> = None;
    let mut file: Option<(String, String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::InvalidInput(format!("malformed multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "title" => title = Some(read_text(field).await?),
            "artist" => artist = Some(read_text(field).await?),
            "duration" => {
                let raw = read_text(field).await?;
                duration = Some(
                    raw.trim()
                        .parse()
                        .map_err(|_| Error::InvalidInput(format!("bad duration: {:?}", raw)))?,
                );
            }
            "file" => {
                let file_name = field.file_name().unwrap_or("upload.mp3").to_string();
                let content_type = field.content_type().unwrap_or(AUDIO_MPEG).to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| Error::InvalidInput(format!("failed to read upload: {}", e)))?;
                file = Some((file_name, content_type, data));
            }
            _ => {}
        }
    }

    // Validate everything before touching either store.
    let (file_name, content_type, data) =
        file.ok_or_else(|| Error::MissingInput("no audio file in upload".to_string()))?;
    let title = title.ok_or_else(|| Error::MissingInput("missing field: title".to_string()))?;
    let artist = artist.ok_or_else(|| Error::MissingInput("missing field: artist".to_string()))?;
    let duration =
        duration.ok_or_else(|| Error::MissingInput("missing field: duration".to_string()))?;

    let name = blob_name(&file_name);
    tracing::info!("uploading {} ({} bytes) as {}", file_name, data.len(), name);
    let location = state.blobs.upload(&name, data, &content_type).await?;

    let song = state.songs.create(NewSong {
        title,
        artist,
        duration,
        location,
    })?;
    tracing::info!("created song {} ({})", song.id, song.title);
    Ok(Json(song))
}

/// Remove the metadata record, then the blob behind it. The two steps are
/// not atomic: a blob-deletion failure is reported as 500 with the record
/// already gone.
pub async fn delete_song(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Song>> {
    let song = state.songs.delete_by_id(&id)?.ok_or(Error::NotFound(id))?;
    state.blobs.delete(&song.location).await?;
    tracing::info!("deleted song {} ({})", song.id, song.title);
    Ok(Json(song))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String> {
    field
        .text()
        .await
        .map_err(|e| Error::InvalidInput(format!("malformed multipart field: {}", e)))
}

/// Blob name for an upload: the client file name stripped of any directory
/// components, behind a fresh UUID so repeated uploads never collide.
fn blob_name(original: &str) -> String {
    let base = original.rsplit(['/', '\\']).next().unwrap_or(original);
    format!("{}-{}", Uuid::new_v4(), base)
}
