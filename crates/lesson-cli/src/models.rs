use lesson_api::Tutor;
use lesson_runtime::LessonSession;
use serde::{Deserialize, Serialize};

use crate::TutorConfig;

pub(crate) const SESSION_STATE_SCHEMA: &str = "lesson-session.v1";

/// A lesson in flight, carried between agent invocations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SessionState {
    pub(crate) schema_version: String,
    pub(crate) session: LessonSession,
    /// Set once the completion has been applied to a profile.
    #[serde(default)]
    pub(crate) finished: bool,
}

impl SessionState {
    pub(crate) fn new(session: LessonSession) -> Self {
        Self {
            schema_version: SESSION_STATE_SCHEMA.to_string(),
            session,
            finished: false,
        }
    }
}

pub(crate) struct AppContext {
    pub(crate) config: TutorConfig,
    pub(crate) tutor: Tutor,
}

impl AppContext {
    pub(crate) fn new(config: TutorConfig) -> Self {
        let tutor = Tutor::builtin(config.tutor_options());
        Self { config, tutor }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TuiCommandAction {
    NotHandled,
    Continue,
    Quit,
}
