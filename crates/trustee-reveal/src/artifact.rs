//! The session file.
//!
//! While a session runs, its assignment and view flags live in a JSON file
//! created by `tempfile` (owner-only permissions on unix). The file is
//! removed by [`SessionArtifact::close`] on the normal path and by `Drop`
//! on every other path that unwinds.

use std::fs::File;
use std::io::{Seek, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::{Builder, NamedTempFile};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::RevealResult;
use crate::session::RevealSession;

const FILE_PREFIX: &str = "secret_santa_";
const FILE_SUFFIX: &str = ".json";

/// Contents of the session file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactDocument {
    /// Random id for this session.
    pub session_id: Uuid,
    /// When the session started.
    pub created_at: DateTime<Utc>,
    /// Participants in roster order.
    pub participants: Vec<String>,
    /// Recipient index per participant.
    pub recipients: Vec<usize>,
    /// Whether each participant has revealed.
    pub viewed: Vec<bool>,
}

/// Owner of the session file for the lifetime of a session.
#[derive(Debug)]
pub struct SessionArtifact {
    file: Option<NamedTempFile>,
    path: PathBuf,
    session_id: Uuid,
    created_at: DateTime<Utc>,
}

impl SessionArtifact {
    /// Create the file in `dir` (or the system temp dir) and write the
    /// session's initial state into it.
    pub fn create(dir: Option<&Path>, session: &RevealSession) -> RevealResult<Self> {
        let mut builder = Builder::new();
        builder.prefix(FILE_PREFIX).suffix(FILE_SUFFIX);
        let file = match dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };

        let mut artifact = Self {
            path: file.path().to_path_buf(),
            file: Some(file),
            session_id: Uuid::new_v4(),
            created_at: Utc::now(),
        };
        artifact.record(session)?;
        debug!(
            session_id = %artifact.session_id,
            path = %artifact.path.display(),
            "session file created"
        );
        Ok(artifact)
    }

    /// Path of the session file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Id written into the session file.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Rewrite the file with the session's current view flags.
    pub fn record(&mut self, session: &RevealSession) -> RevealResult<()> {
        let doc = ArtifactDocument {
            session_id: self.session_id,
            created_at: self.created_at,
            participants: session.assignment().roster().names().to_vec(),
            recipients: session.assignment().recipients().to_vec(),
            viewed: session.viewed().to_vec(),
        };

        let Some(file) = self.file.as_mut() else {
            return Ok(());
        };
        let file: &mut File = file.as_file_mut();
        file.set_len(0)?;
        file.rewind()?;
        serde_json::to_writer_pretty(&mut *file, &doc)?;
        file.flush()?;
        Ok(())
    }

    /// Read the file back.
    pub fn load(&self) -> RevealResult<ArtifactDocument> {
        let raw = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Remove the file, reporting any failure.
    pub fn close(mut self) -> RevealResult<()> {
        if let Some(file) = self.file.take() {
            file.close()?;
            debug!(session_id = %self.session_id, "session file removed");
        }
        Ok(())
    }
}

impl Drop for SessionArtifact {
    fn drop(&mut self) {
        let Some(file) = self.file.take() else {
            return;
        };
        if let Err(e) = file.close() {
            warn!(path = %self.path.display(), error = %e, "could not remove session file");
        }
    }
}
