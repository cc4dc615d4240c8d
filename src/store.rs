//! Embedded document store for song metadata.
//!
//! Records are serialized as JSON documents into a single `redb` table keyed
//! by the store-assigned id. The handle is cheap to clone and is passed into
//! the routing layer explicitly; there is no module-global connection.

use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableTable, TableDefinition};
use uuid::Uuid;

use crate::types::{NewSong, Song};

const SONGS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("songs");

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("corrupt song document: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[derive(Clone)]
pub struct SongStore {
    db: Arc<Database>,
}

impl SongStore {
    /// Open (or create) the database file and ensure the songs table exists.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let db = Database::create(path)?;
        let write = db.begin_write()?;
        {
            write.open_table(SONGS_TABLE)?;
        }
        write.commit()?;
        Ok(Self { db: Arc::new(db) })
    }

    pub fn find_all(&self) -> Result<Vec<Song>, StoreError> {
        let read = self.db.begin_read()?;
        let table = read.open_table(SONGS_TABLE)?;
        let mut songs = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            songs.push(serde_json::from_slice(value.value())?);
        }
        Ok(songs)
    }

    pub fn find_by_id(&self, id: &str) -> Result<Option<Song>, StoreError> {
        let read = self.db.begin_read()?;
        let table = read.open_table(SONGS_TABLE)?;
        match table.get(id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Persist a new record under a freshly assigned id and return it.
    pub fn create(&self, new: NewSong) -> Result<Song, StoreError> {
        let song = Song {
            id: Uuid::new_v4().to_string(),
            title: new.title,
            artist: new.artist,
            duration: new.duration,
            location: new.location,
        };
        let document = serde_json::to_vec(&song)?;

        let write = self.db.begin_write()?;
        {
            let mut table = write.open_table(SONGS_TABLE)?;
            table.insert(song.id.as_str(), document.as_slice())?;
        }
        write.commit()?;
        Ok(song)
    }

    /// Remove a record, returning it if it existed.
    pub fn delete_by_id(&self, id: &str) -> Result<Option<Song>, StoreError> {
        let write = self.db.begin_write()?;
        let removed = {
            let mut table = write.open_table(SONGS_TABLE)?;
            match table.remove(id)? {
                Some(value) => Some(serde_json::from_slice(value.value())?),
                None => None,
            }
        };
        write.commit()?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (SongStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = SongStore::open(&dir.path().join("songs.redb")).unwrap();
        (store, dir)
    }

    fn sample(title: &str) -> NewSong {
        NewSong {
            title: title.to_string(),
            artist: "Some Artist".to_string(),
            duration: 215.0,
            location: "some-artist-track.mp3".to_string(),
        }
    }

    #[test]
    fn create_assigns_unique_ids() {
        let (store, _dir) = temp_store();
        let a = store.create(sample("A")).unwrap();
        let b = store.create(sample("B")).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.title, "A");
        assert_eq!(a.location, "some-artist-track.mp3");
    }

    #[test]
    fn find_by_id_roundtrip() {
        let (store, _dir) = temp_store();
        let created = store.create(sample("Findable")).unwrap();
        let found = store.find_by_id(&created.id).unwrap().unwrap();
        assert_eq!(found.title, "Findable");
        assert_eq!(found.duration, 215.0);

        assert!(store.find_by_id("no-such-id").unwrap().is_none());
    }

    #[test]
    fn find_all_lists_every_record() {
        let (store, _dir) = temp_store();
        assert!(store.find_all().unwrap().is_empty());
        store.create(sample("One")).unwrap();
        store.create(sample("Two")).unwrap();
        assert_eq!(store.find_all().unwrap().len(), 2);
    }

    #[test]
    fn delete_returns_removed_record_once() {
        let (store, _dir) = temp_store();
        let created = store.create(sample("Doomed")).unwrap();

        let removed = store.delete_by_id(&created.id).unwrap().unwrap();
        assert_eq!(removed.id, created.id);

        assert!(store.delete_by_id(&created.id).unwrap().is_none());
        assert!(store.find_by_id(&created.id).unwrap().is_none());
    }

    #[test]
    fn records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("songs.redb");
        let id = {
            let store = SongStore::open(&path).unwrap();
            store.create(sample("Durable")).unwrap().id
        };
        let store = SongStore::open(&path).unwrap();
        assert_eq!(store.find_by_id(&id).unwrap().unwrap().title, "Durable");
    }
}
