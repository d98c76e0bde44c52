use crate::domain::PauseState;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Session metadata stored in meta.json
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionMetadata {
    /// Start of the global pause, if the session was paused
    #[serde(default)]
    pub paused_at: Option<DateTime<Utc>>,
}

impl SessionMetadata {
    pub fn from_pause(pause: &PauseState) -> Self {
        Self {
            paused_at: pause.paused_at(),
        }
    }

    pub fn pause_state(&self) -> PauseState {
        self.paused_at
            .map_or_else(PauseState::running, PauseState::paused_since)
    }
}

/// Load session metadata, returning defaults if the file does not exist
pub fn load_metadata<P: AsRef<Path>>(path: P) -> Result<SessionMetadata> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(SessionMetadata::default());
    }

    let content = std::fs::read_to_string(path)?;
    let metadata: SessionMetadata = serde_json::from_str(&content)?;
    Ok(metadata)
}

/// Save session metadata atomically
pub fn save_metadata<P: AsRef<Path>>(path: P, metadata: &SessionMetadata) -> Result<()> {
    let json = serde_json::to_string_pretty(metadata)?;
    crate::persistence::atomic_write(path, &json)?;
    Ok(())
}
