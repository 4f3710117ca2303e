use std::fs;
use std::path::{Path, PathBuf};

use lesson_api::ProgressStore;
use lesson_core::{LearnerProfile, TutorError, LEARNER_PROFILE_SCHEMA};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{
    map_cli_state_invalid, map_cli_state_read, map_cli_state_write, SessionState,
    SESSION_STATE_SCHEMA,
};

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), TutorError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(map_cli_state_write)?;

    let payload = serde_json::to_string_pretty(value).map_err(map_cli_state_write)?;
    fs::write(path, payload).map_err(map_cli_state_write)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, TutorError> {
    if !path.exists() {
        return Err(TutorError::new(
            "CLI_STATE_NOT_FOUND",
            format!("State file does not exist: {}", path.display()),
        ));
    }

    let raw = fs::read_to_string(path).map_err(map_cli_state_read)?;
    serde_json::from_str(&raw).map_err(map_cli_state_invalid)
}

pub(crate) fn save_session_state(path: &Path, state: &SessionState) -> Result<(), TutorError> {
    write_json(path, state)
}

pub(crate) fn load_session_state(path: &Path) -> Result<SessionState, TutorError> {
    let state: SessionState = read_json(path)?;
    if state.schema_version != SESSION_STATE_SCHEMA {
        return Err(TutorError::new(
            "CLI_STATE_SCHEMA",
            format!("Unsupported session state schema: {}", state.schema_version),
        ));
    }
    Ok(state)
}

pub(crate) fn save_profile(path: &Path, profile: &LearnerProfile) -> Result<(), TutorError> {
    write_json(path, profile)?;
    tracing::info!(path = %path.display(), "profile saved");
    Ok(())
}

pub(crate) fn load_profile(path: &Path) -> Result<LearnerProfile, TutorError> {
    let profile: LearnerProfile = read_json(path)?;
    if profile.schema_version != LEARNER_PROFILE_SCHEMA {
        return Err(TutorError::new(
            "CLI_STATE_SCHEMA",
            format!("Unsupported profile schema: {}", profile.schema_version),
        ));
    }
    Ok(profile)
}

/// Profile kept as a JSON file. A missing file means the learner has not
/// signed up.
#[derive(Debug, Clone)]
pub(crate) struct FileProfileStore {
    path: PathBuf,
}

impl FileProfileStore {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressStore for FileProfileStore {
    fn load(&self) -> Result<Option<LearnerProfile>, TutorError> {
        if !self.path.exists() {
            return Ok(None);
        }
        load_profile(&self.path).map(Some)
    }

    fn save(&mut self, profile: &LearnerProfile) -> Result<(), TutorError> {
        save_profile(&self.path, profile)
    }
}
