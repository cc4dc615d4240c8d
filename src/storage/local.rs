use super::{BlobStore, ByteStream};
use crate::{Error, Result, range::ByteSpan};
use async_trait::async_trait;
use bytes::Bytes;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio_util::io::ReaderStream;

pub struct LocalBlobStore {
    data_dir: PathBuf,
}

impl LocalBlobStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    fn blob_path(&self, reference: &str) -> PathBuf {
        self.data_dir.join(reference)
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn upload(&self, name: &str, data: Bytes, _content_type: &str) -> Result<String> {
        fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|e| Error::Storage(format!("failed to create data dir: {}", e)))?;
        let path = self.blob_path(name);
        fs::write(&path, &data)
            .await
            .map_err(|e| Error::Storage(format!("failed to write {}: {}", path.display(), e)))?;
        Ok(name.to_string())
    }

    async fn delete(&self, reference: &str) -> Result<()> {
        let path = self.blob_path(reference);
        fs::remove_file(&path)
            .await
            .map_err(|e| Error::Storage(format!("failed to delete {}: {}", path.display(), e)))?;
        Ok(())
    }

    async fn size(&self, reference: &str) -> Result<u64> {
        let metadata = fs::metadata(self.blob_path(reference)).await?;
        Ok(metadata.len())
    }

    async fn open(&self, reference: &str, span: Option<ByteSpan>) -> Result<ByteStream> {
        let mut file = fs::File::open(self.blob_path(reference)).await?;
        match span {
            Some(span) => {
                file.seek(std::io::SeekFrom::Start(span.start)).await?;
                let bounded = file.take(span.len());
                Ok(Box::pin(ReaderStream::new(bounded)))
            }
            None => Ok(Box::pin(ReaderStream::new(file))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    async fn collect(mut stream: ByteStream) -> Vec<u8> {
        let mut out = Vec::new();
        while let Some(chunk) = stream.next().await {
            out.extend_from_slice(&chunk.unwrap());
        }
        out
    }

    fn temp_store() -> (LocalBlobStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        (LocalBlobStore::new(dir.path().to_path_buf()), dir)
    }

    #[tokio::test]
    async fn upload_then_size() {
        let (store, _dir) = temp_store();
        let reference = store
            .upload("track.mp3", Bytes::from(vec![7u8; 1234]), "audio/mpeg")
            .await
            .unwrap();
        assert_eq!(reference, "track.mp3");
        assert_eq!(store.size(&reference).await.unwrap(), 1234);
    }

    #[tokio::test]
    async fn open_with_span_yields_exact_slice() {
        let (store, _dir) = temp_store();
        let data: Vec<u8> = (0..=255).cycle().take(1000).map(|b| b as u8).collect();
        store
            .upload("track.mp3", Bytes::from(data.clone()), "audio/mpeg")
            .await
            .unwrap();

        let stream = store
            .open("track.mp3", Some(ByteSpan { start: 200, end: 499 }))
            .await
            .unwrap();
        assert_eq!(collect(stream).await, &data[200..=499]);

        let stream = store.open("track.mp3", None).await.unwrap();
        assert_eq!(collect(stream).await, data);
    }

    #[tokio::test]
    async fn delete_removes_blob() {
        let (store, dir) = temp_store();
        store
            .upload("gone.mp3", Bytes::from_static(b"abc"), "audio/mpeg")
            .await
            .unwrap();
        store.delete("gone.mp3").await.unwrap();
        assert!(!dir.path().join("gone.mp3").exists());

        assert!(store.delete("gone.mp3").await.is_err());
    }

    #[tokio::test]
    async fn open_missing_blob_is_io_error() {
        let (store, _dir) = temp_store();
        assert!(matches!(
            store.open("missing.mp3", None).await,
            Err(Error::Io(_))
        ));
    }
}
