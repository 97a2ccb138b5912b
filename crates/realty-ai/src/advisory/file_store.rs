use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, warn};

use super::session::{AdvisorSession, AdvisoryEntry, ClientId, SessionStore, StoreError};

/// Stores each session as `<client>.json` inside one directory.
#[derive(Debug, Clone)]
pub struct JsonFileSessionStore {
    directory: PathBuf,
    writes: Arc<Mutex<()>>,
}

impl JsonFileSessionStore {
    /// Create the directory if needed and return a store rooted there.
    pub fn open<P: AsRef<Path>>(directory: P) -> Result<Self, StoreError> {
        let directory = directory.as_ref().to_path_buf();
        fs::create_dir_all(&directory)?;
        Ok(Self {
            directory,
            writes: Arc::new(Mutex::new(())),
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path_for(&self, client_id: &ClientId) -> PathBuf {
        self.directory.join(format!("{}.json", client_id.file_stem()))
    }

    fn write_lock(&self) -> Result<MutexGuard<'_, ()>, StoreError> {
        self.writes
            .lock()
            .map_err(|_| StoreError::Unavailable("session write lock poisoned".to_string()))
    }

    fn read(&self, client_id: &ClientId) -> Result<Option<AdvisorSession>, StoreError> {
        let path = self.path_for(client_id);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let session: AdvisorSession = serde_json::from_slice(&bytes)?;
        if session.client_id != *client_id {
            warn!(
                requested = %client_id,
                stored = %session.client_id,
                path = %path.display(),
                "session file belongs to another client"
            );
            return Ok(None);
        }
        Ok(Some(session))
    }

    fn write(&self, session: &AdvisorSession) -> Result<(), StoreError> {
        let path = self.path_for(&session.client_id);
        let staging = path.with_extension("json.tmp");
        let payload = serde_json::to_vec_pretty(session)?;

        fs::write(&staging, payload)?;
        if let Err(err) = fs::rename(&staging, &path) {
            let _ = fs::remove_file(&staging);
            return Err(err.into());
        }
        debug!(
            client_id = %session.client_id,
            entries = session.history.len(),
            path = %path.display(),
            "session persisted"
        );
        Ok(())
    }
}

impl SessionStore for JsonFileSessionStore {
    fn load(&self, client_id: &ClientId) -> Result<Option<AdvisorSession>, StoreError> {
        self.read(client_id)
    }

    fn save(&self, session: AdvisorSession) -> Result<(), StoreError> {
        let _guard = self.write_lock()?;
        self.write(&session)
    }

    fn append(
        &self,
        client_id: &ClientId,
        entry: AdvisoryEntry,
    ) -> Result<AdvisorSession, StoreError> {
        let _guard = self.write_lock()?;
        let mut session = self
            .read(client_id)?
            .unwrap_or_else(|| AdvisorSession::new(client_id.clone(), entry.recorded_at));
        session.record(entry);
        self.write(&session)?;
        Ok(session)
    }
}
