//! Snapshot persistence: the whole database as one JSON file.
//!
//! Writes go to a temporary sibling file that is then renamed over the target, so a
//! reader never sees a half-written snapshot.

use crate::models::{Database, LeagueError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Failure while reading or writing the snapshot.
#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "snapshot I/O failed: {}", e),
            StoreError::Json(e) => write!(f, "snapshot is not valid JSON: {}", e),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Json(e) => Some(e),
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Json(e)
    }
}

/// Outcome of a failed command: rejected by validation, or not persisted.
#[derive(Debug)]
pub enum CommitError {
    Rejected(LeagueError),
    Store(StoreError),
}

impl std::fmt::Display for CommitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommitError::Rejected(e) => write!(f, "{}", e),
            CommitError::Store(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CommitError {}

impl From<LeagueError> for CommitError {
    fn from(e: LeagueError) -> Self {
        CommitError::Rejected(e)
    }
}

impl From<StoreError> for CommitError {
    fn from(e: StoreError) -> Self {
        CommitError::Store(e)
    }
}

/// JSON snapshot file holding the [`Database`].
#[derive(Clone, Debug)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the last snapshot. A missing file yields an empty database.
    pub fn load(&self) -> Result<Database, StoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No snapshot at {}, starting empty", self.path.display());
                return Ok(Database::default());
            }
            Err(e) => return Err(e.into()),
        };
        let db: Database = serde_json::from_str(&json)?;
        log::info!(
            "Loaded snapshot from {} ({} league teams, {} tournaments)",
            self.path.display(),
            db.league.teams.len(),
            db.tournaments.len()
        );
        Ok(db)
    }

    /// Replace the snapshot with `db`.
    pub fn save(&self, db: &Database) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(db)?;
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }

    /// Run `command` on a copy of `db`, persist the copy, then swap it in.
    ///
    /// On any error `db` is left exactly as it was.
    pub fn commit<T>(
        &self,
        db: &mut Database,
        command: impl FnOnce(&mut Database) -> Result<T, LeagueError>,
    ) -> Result<T, CommitError> {
        let (next, out) = stage(db, command)?;
        self.save(&next)?;
        *db = next;
        Ok(out)
    }
}

/// Run `command` on a copy of `db` and hand the changed copy back. `db` is never touched.
pub fn stage<T>(
    db: &Database,
    command: impl FnOnce(&mut Database) -> Result<T, LeagueError>,
) -> Result<(Database, T), LeagueError> {
    let mut next = db.clone();
    let out = command(&mut next)?;
    Ok((next, out))
}
