use crate::models::TeamSnapshot;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors that can occur when persisting team snapshots
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Holder for the most recently saved team assignment
///
/// The snapshot lives in memory. When a file path is configured every save
/// and clear is mirrored to disk, and the file is read back on startup.
pub struct TeamStore {
    current: RwLock<Option<TeamSnapshot>>,
    path: Option<PathBuf>,
}

impl TeamStore {
    /// Store that keeps the snapshot in memory only
    pub fn in_memory() -> Self {
        Self {
            current: RwLock::new(None),
            path: None,
        }
    }

    /// Open a file-backed store, loading an existing snapshot if present
    ///
    /// A missing or empty file starts the store empty.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let current = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => None,
            Ok(bytes) => Some(serde_json::from_slice::<TeamSnapshot>(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        if let Some(snapshot) = &current {
            tracing::info!(
                "Loaded saved teams from {} ({} teams, saved at {})",
                path.display(),
                snapshot.teams.len(),
                snapshot.saved_at
            );
        }

        Ok(Self {
            current: RwLock::new(current),
            path: Some(path),
        })
    }

    /// Current snapshot, if any
    pub async fn load(&self) -> Option<TeamSnapshot> {
        self.current.read().await.clone()
    }

    /// Replace the current snapshot
    pub async fn save(&self, snapshot: TeamSnapshot) -> Result<(), StoreError> {
        let mut current = self.current.write().await;

        if let Some(path) = &self.path {
            let json = serde_json::to_vec_pretty(&snapshot)?;
            write_file(path, &json).await?;
        }

        tracing::info!(
            "teams:updated saved_at={} saved_by={:?} teams={}",
            snapshot.saved_at,
            snapshot.saved_by,
            snapshot.teams.len()
        );
        *current = Some(snapshot);
        Ok(())
    }

    /// Drop the current snapshot
    pub async fn clear(&self) -> Result<(), StoreError> {
        let mut current = self.current.write().await;

        if let Some(path) = &self.path {
            write_file(path, b"").await?;
        }

        tracing::info!("teams:cleared");
        *current = None;
        Ok(())
    }
}

impl Default for TeamStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

/// Sibling file the snapshot is staged in before replacing the target
fn staging_path(path: &Path) -> PathBuf {
    let mut staged = path.as_os_str().to_owned();
    staged.push(".tmp");
    PathBuf::from(staged)
}

/// Write the whole file to a staging sibling, then rename it over `path`
///
/// A crash mid-write leaves the previous snapshot intact.
async fn write_file(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    let io_err = |source: std::io::Error| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
    }

    let staged = staging_path(path);
    tokio::fs::write(&staged, contents).await.map_err(io_err)?;
    tokio::fs::rename(&staged, path).await.map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> TeamSnapshot {
        TeamSnapshot {
            teams: vec![
                vec!["a".to_string(), "b".to_string()],
                vec!["c".to_string()],
            ],
            saved_at: chrono::Utc::now(),
            saved_by: Some("coordinator".to_string()),
        }
    }

    #[tokio::test]
    async fn test_in_memory_save_load_clear() {
        let store = TeamStore::in_memory();
        assert!(store.load().await.is_none());

        let snap = snapshot();
        store.save(snap.clone()).await.unwrap();
        assert_eq!(store.load().await, Some(snap));

        store.clear().await.unwrap();
        assert!(store.load().await.is_none());
    }

    #[tokio::test]
    async fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("teams.json");

        let snap = snapshot();
        {
            let store = TeamStore::open(&path).await.unwrap();
            assert!(store.load().await.is_none());
            store.save(snap.clone()).await.unwrap();
        }

        let reopened = TeamStore::open(&path).await.unwrap();
        assert_eq!(reopened.load().await, Some(snap));

        reopened.clear().await.unwrap();
        let cleared = TeamStore::open(&path).await.unwrap();
        assert!(cleared.load().await.is_none());
    }

    #[tokio::test]
    async fn test_save_replaces_file_via_staging() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("teams.json");
        let staged = staging_path(&path);
        assert_eq!(staged, dir.path().join("teams.json.tmp"));

        // Leftover from an interrupted write
        std::fs::write(&staged, "{\"teams\": [[\"a\"").unwrap();

        let store = TeamStore::open(&path).await.unwrap();
        let snap = snapshot();
        store.save(snap.clone()).await.unwrap();

        assert!(!staged.exists());
        let on_disk: TeamSnapshot = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(on_disk, snap);
    }

    #[tokio::test]
    async fn test_open_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("teams.json");
        std::fs::write(&path, "{not json").unwrap();

        let result = TeamStore::open(&path).await;
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }
}
