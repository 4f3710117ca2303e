use std::path::Path;

use chrono::{DateTime, Utc};
use lesson_api::{FinishOutcome, ProgressStore, Tutor};
use lesson_core::{InteractionEvent, LearnerProfile, TutorError};
use lesson_runtime::LessonSession;

use crate::{load_session_state, save_session_state, SessionState};

/// Parses the textual event form shared by agent and line modes:
/// `select`, `deselect`, `delete`, `shift`, `shift-up`, `move:dx,dy,dz`.
pub(crate) fn parse_event(raw: &str) -> Result<InteractionEvent, TutorError> {
    let raw = raw.trim();
    let event = match raw {
        "select" => InteractionEvent::Select,
        "deselect" => InteractionEvent::Deselect,
        "delete" | "x" => InteractionEvent::DeleteKey,
        "shift" => InteractionEvent::Modifier { pressed: true },
        "shift-up" => InteractionEvent::Modifier { pressed: false },
        _ => {
            let Some(delta) = raw.strip_prefix("move:") else {
                return Err(invalid_event(raw));
            };
            let axes = delta
                .split(',')
                .map(|axis| axis.trim().parse::<f32>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|_| invalid_event(raw))?;
            let [dx, dy, dz] = axes.as_slice() else {
                return Err(invalid_event(raw));
            };
            InteractionEvent::Move {
                dx: *dx,
                dy: *dy,
                dz: *dz,
            }
        }
    };
    Ok(event)
}

fn invalid_event(raw: &str) -> TutorError {
    TutorError::new(
        "CLI_EVENT_INVALID",
        format!(
            "Unknown event \"{}\". Expected select, deselect, delete, shift, shift-up or move:dx,dy,dz.",
            raw
        ),
    )
}

/// Opens `skill_id`, or the recommended skill when none is named.
pub(crate) fn start_session(
    tutor: &Tutor,
    profile: Option<&LearnerProfile>,
    skill_id: Option<&str>,
) -> Result<LessonSession, TutorError> {
    let progress = profile.map(|profile| &profile.progress);
    let skill_id = match skill_id {
        Some(skill_id) => skill_id.to_string(),
        None => tutor
            .recommended_skill(progress)
            .map(|skill| skill.id.clone())
            .ok_or_else(|| {
                TutorError::new(
                    "CLI_NO_SKILL_AVAILABLE",
                    "Every open skill is already complete; pick one with --skill.",
                )
            })?,
    };
    tutor.start_lesson(progress, &skill_id)
}

/// Applies a finished session to the stored profile and records the visit.
/// The session file at `state_path` is latched as finished before the
/// profile is written, so a failed profile write never leaves a file that
/// can award the points again. Returns the saved profile and the outcome.
pub(crate) fn finish_into_store(
    tutor: &Tutor,
    state_path: &Path,
    state: SessionState,
    store: &mut dyn ProgressStore,
    now: DateTime<Utc>,
) -> Result<(LearnerProfile, FinishOutcome), TutorError> {
    let profile = store.load()?;
    let outcome = tutor.finish_lesson(
        &state.session,
        profile.as_ref().map(|profile| &profile.progress),
    )?;
    let profile = profile.ok_or_else(|| TutorError::progress_missing("finishLesson"))?;

    let updated = tutor.record_visit(
        &LearnerProfile {
            progress: outcome.progress.clone(),
            ..profile
        },
        now,
    );
    mark_finished(state_path, state)?;
    store.save(&updated)?;
    tracing::debug!(skill = %outcome.summary.skill_id, "lesson applied");
    Ok((updated, outcome))
}

pub(crate) fn load_open_session(path: &Path) -> Result<SessionState, TutorError> {
    let state = load_session_state(path)?;
    if state.finished {
        return Err(TutorError::new(
            "CLI_SESSION_FINISHED",
            format!(
                "Lesson \"{}\" in {} was already applied; start a new one.",
                state.session.skill_id(),
                path.display()
            ),
        ));
    }
    Ok(state)
}

fn mark_finished(path: &Path, mut state: SessionState) -> Result<(), TutorError> {
    state.finished = true;
    save_session_state(path, &state)
}

#[cfg(test)]
mod session_ops_tests {
    use super::*;
    use crate::tests::{now, temp_path};
    use crate::FileProfileStore;
    use lesson_api::{MemoryStore, NextStep};

    #[test]
    fn parse_event_accepts_every_form() {
        assert_eq!(parse_event("select").expect("select"), InteractionEvent::Select);
        assert_eq!(
            parse_event(" deselect ").expect("deselect"),
            InteractionEvent::Deselect
        );
        assert_eq!(parse_event("delete").expect("delete"), InteractionEvent::DeleteKey);
        assert_eq!(
            parse_event("shift").expect("shift"),
            InteractionEvent::Modifier { pressed: true }
        );
        assert_eq!(
            parse_event("shift-up").expect("shift-up"),
            InteractionEvent::Modifier { pressed: false }
        );
        assert_eq!(
            parse_event("move:1.5, 0,-2").expect("move"),
            InteractionEvent::Move {
                dx: 1.5,
                dy: 0.0,
                dz: -2.0
            }
        );
    }

    #[test]
    fn parse_event_rejects_garbage() {
        for raw in ["jump", "move:1,2", "move:a,b,c", "move:1,2,3,4", ""] {
            let error = parse_event(raw).expect_err("invalid event should fail");
            assert_eq!(error.code, "CLI_EVENT_INVALID");
        }
    }

    #[test]
    fn start_session_defaults_to_recommended_skill() {
        let tutor = Tutor::default();
        let session = start_session(&tutor, None, None).expect("anonymous start");
        assert_eq!(session.skill_id(), "basics-1");

        let session = start_session(&tutor, None, Some("basics-2")).expect("explicit start");
        assert_eq!(session.skill_id(), "basics-2");

        let error = start_session(&tutor, None, Some("modeling-1"))
            .expect_err("locked skill should fail");
        assert_eq!(error.code, "SKILL_LOCKED");
    }

    #[test]
    fn finish_into_store_saves_progress_and_activity() {
        let tutor = Tutor::default();
        let state_path = temp_path("finish-store-session.json");
        let mut store = MemoryStore::new(Some(tutor.new_profile("ada", now())));
        let mut session = start_session(&tutor, None, Some("basics-2")).expect("start");
        session.dispatch(InteractionEvent::Select);
        session.dispatch(InteractionEvent::DeleteKey);

        let (profile, outcome) = finish_into_store(
            &tutor,
            &state_path,
            SessionState::new(session),
            &mut store,
            now(),
        )
        .expect("finish");
        assert_eq!(outcome.next, NextStep::Skill("modeling-1".to_string()));
        assert_eq!(profile.progress.skill_points, 20);
        assert_eq!(profile.progress.streak, 1);
        assert_eq!(store.load().expect("load"), Some(profile));

        let error = load_open_session(&state_path).expect_err("latched session should fail");
        assert_eq!(error.code, "CLI_SESSION_FINISHED");
    }

    #[test]
    fn finish_without_profile_reports_missing_progress() {
        let tutor = Tutor::default();
        let state_path = temp_path("no-profile-session.json");
        let mut store = FileProfileStore::new(temp_path("no-profile.json"));
        let mut session = start_session(&tutor, None, Some("basics-1")).expect("start");
        session.dispatch(InteractionEvent::Modifier { pressed: true });
        save_session_state(&state_path, &SessionState::new(session.clone())).expect("save");
        let error = finish_into_store(
            &tutor,
            &state_path,
            SessionState::new(session),
            &mut store,
            now(),
        )
        .expect_err("anonymous finish should fail");
        assert_eq!(error.code, "PROGRESS_MISSING");
        assert!(load_open_session(&state_path).is_ok());
    }

    #[test]
    fn session_is_latched_even_when_the_profile_write_fails() {
        let tutor = Tutor::default();
        let state_path = temp_path("latch-first-session.json");

        let mut session = start_session(&tutor, None, Some("basics-1")).expect("start");
        session.dispatch(InteractionEvent::Modifier { pressed: true });
        let mut store = MemoryStore::new(Some(tutor.new_profile("ada", now())));
        let mut failing = FailingSaveStore { inner: &mut store };
        let error = finish_into_store(
            &tutor,
            &state_path,
            SessionState::new(session),
            &mut failing,
            now(),
        )
        .expect_err("profile write should fail");
        assert_eq!(error.code, "CLI_STATE_WRITE");

        let error = load_open_session(&state_path).expect_err("retry should be refused");
        assert_eq!(error.code, "CLI_SESSION_FINISHED");
        let stored = store.load().expect("load").expect("profile exists");
        assert_eq!(stored.progress.skill_points, 0);
    }

    struct FailingSaveStore<'a> {
        inner: &'a mut MemoryStore,
    }

    impl ProgressStore for FailingSaveStore<'_> {
        fn load(&self) -> Result<Option<LearnerProfile>, TutorError> {
            self.inner.load()
        }

        fn save(&mut self, _profile: &LearnerProfile) -> Result<(), TutorError> {
            Err(TutorError::new("CLI_STATE_WRITE", "disk full"))
        }
    }

    #[test]
    fn finished_session_file_cannot_be_applied_twice() {
        let path = temp_path("finished-session.json");
        let state = SessionState::new(LessonSession::new("basics-1"));
        save_session_state(&path, &state).expect("save");
        let loaded = load_open_session(&path).expect("open session loads");
        mark_finished(&path, loaded).expect("mark finished");
        let error = load_open_session(&path).expect_err("finished session should fail");
        assert_eq!(error.code, "CLI_SESSION_FINISHED");
    }
}
