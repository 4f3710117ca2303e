use std::path::PathBuf;

use chrono::Utc;
use lesson_api::{NextStep, ProgressStore};
use lesson_core::{InteractionEvent, LearnerProfile, LockState, TutorError};
use lesson_runtime::{CompletionSummary, DispatchOutcome, LessonSession};

use crate::{
    finish_into_store, load_open_session, save_session_state, start_session, AppContext,
    FileProfileStore, SessionState,
};

pub(crate) const SIGNUP_HINT: &str =
    "sign up to keep your progress: lesson-cli profile init --username <name>";

pub(crate) struct TuiContext<'a> {
    pub(crate) app: &'a AppContext,
    pub(crate) profile_path: PathBuf,
    pub(crate) state_file: PathBuf,
}

impl TuiContext<'_> {
    pub(crate) fn store(&self) -> FileProfileStore {
        FileProfileStore::new(self.profile_path.clone())
    }

    pub(crate) fn learner(&self) -> Result<Option<LearnerProfile>, TutorError> {
        self.store().load()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CompletionPanel {
    pub(crate) summary: CompletionSummary,
    /// Filled in once the completion has been applied to the profile.
    pub(crate) next: Option<NextStep>,
}

/// The lesson screen: one session plus the stand-in scene it drives.
#[derive(Debug, Clone)]
pub(crate) struct TuiUiState {
    pub(crate) session: LessonSession,
    pub(crate) skill_name: String,
    pub(crate) lock: LockState,
    pub(crate) learner_name: Option<String>,
    pub(crate) cube_present: bool,
    pub(crate) cube_position: [f32; 3],
    pub(crate) grabbing: bool,
    pub(crate) completion: Option<CompletionPanel>,
    /// Set once the completion has been applied; carried into saved state.
    pub(crate) finished: bool,
    pub(crate) help_visible: bool,
    pub(crate) status: String,
}

impl TuiUiState {
    pub(crate) fn open(context: &TuiContext<'_>, skill_id: Option<&str>) -> Result<Self, TutorError> {
        let learner = context.learner()?;
        let session = start_session(&context.app.tutor, learner.as_ref(), skill_id)?;
        Ok(Self::for_session(context, learner.as_ref(), session))
    }

    fn for_session(
        context: &TuiContext<'_>,
        learner: Option<&LearnerProfile>,
        session: LessonSession,
    ) -> Self {
        let tutor = &context.app.tutor;
        let skill_name = tutor
            .catalog()
            .skill(session.skill_id())
            .map(|skill| skill.name.clone())
            .unwrap_or_else(|| session.skill_id().to_string());
        let lock = tutor.lock_state(learner.map(|learner| &learner.progress), session.skill_id());
        let cube_present = session
            .lesson()
            .map(|lesson| lesson.has_scene_object())
            .unwrap_or(false);
        let mut ui = Self {
            session,
            skill_name,
            lock,
            learner_name: learner.map(|learner| learner.username.clone()),
            cube_present,
            cube_position: [0.0; 3],
            grabbing: false,
            completion: None,
            finished: false,
            help_visible: false,
            status: "ready".to_string(),
        };
        ui.sync_completion(context);
        ui
    }

    pub(crate) fn messages(&self) -> Vec<String> {
        self.session.messages()
    }

    pub(crate) fn is_holding_selection(&self) -> bool {
        self.session.tracker().is_holding_selection()
    }

    /// Feeds one event to the session and mirrors it in the scene.
    pub(crate) fn apply(&mut self, context: &TuiContext<'_>, event: InteractionEvent) -> DispatchOutcome {
        match event {
            InteractionEvent::Select if !self.cube_present => {
                self.status = "nothing to select".to_string();
                return DispatchOutcome {
                    snapshot_changed: false,
                    completed_now: false,
                };
            }
            InteractionEvent::DeleteKey if self.is_holding_selection() => {
                self.cube_present = false;
                self.grabbing = false;
            }
            InteractionEvent::Move { dx, dy, dz } => {
                for (axis, delta) in self.cube_position.iter_mut().zip([dx, dy, dz]) {
                    if delta.is_finite() {
                        *axis += delta;
                    }
                }
            }
            InteractionEvent::Deselect => self.grabbing = false,
            _ => {}
        }

        let outcome = self.session.dispatch(event);
        self.status = event.label().to_string();
        if outcome.completed_now {
            self.sync_completion(context);
            self.status = "lesson complete".to_string();
        }
        outcome
    }

    pub(crate) fn tick(&mut self, seconds: u64) {
        self.session.tick(seconds);
    }

    fn sync_completion(&mut self, context: &TuiContext<'_>) {
        self.completion = self
            .session
            .summary(context.app.tutor.progress_policy())
            .map(|summary| CompletionPanel { summary, next: None });
    }

    /// Continue on the completion panel. Applies the lesson once, then moves
    /// to the next skill. Returns true when there is nothing left to open.
    pub(crate) fn continue_learning(&mut self, context: &TuiContext<'_>) -> Result<bool, TutorError> {
        let Some(panel) = self.completion.as_mut() else {
            self.status = "finish the lesson first".to_string();
            return Ok(false);
        };

        let next = match panel.next.clone() {
            Some(next) => next,
            None => {
                let mut store = context.store();
                let finished = finish_into_store(
                    &context.app.tutor,
                    &context.state_file,
                    SessionState::new(self.session.clone()),
                    &mut store,
                    Utc::now(),
                );
                let (_, outcome) = match finished {
                    Ok(done) => done,
                    Err(error) if error.code == "PROGRESS_MISSING" => {
                        self.status = SIGNUP_HINT.to_string();
                        return Ok(false);
                    }
                    Err(error) => return Err(error),
                };
                panel.next = Some(outcome.next.clone());
                self.finished = true;
                outcome.next
            }
        };

        match next {
            NextStep::Skill(skill_id) => {
                let points = panel.summary.points_earned;
                *self = Self::open(context, Some(&skill_id))?;
                self.status = format!("+{} XP, next up: {}", points, self.skill_name);
                Ok(false)
            }
            NextStep::WorldMap => {
                self.status = "track complete, back to the world map".to_string();
                Ok(true)
            }
        }
    }

    pub(crate) fn restart(&mut self, context: &TuiContext<'_>) -> Result<(), TutorError> {
        let skill_id = self.session.skill_id().to_string();
        *self = Self::open(context, Some(&skill_id))?;
        self.status = "restarted".to_string();
        Ok(())
    }

    pub(crate) fn save(&mut self, context: &TuiContext<'_>) -> Result<(), TutorError> {
        let state = SessionState {
            finished: self.finished,
            ..SessionState::new(self.session.clone())
        };
        save_session_state(&context.state_file, &state)?;
        self.status = format!("saved to {}", context.state_file.display());
        Ok(())
    }

    /// Restores the saved session. The scene is rebuilt from the snapshot, so
    /// the cube position starts over. A session already applied to the
    /// profile is refused.
    pub(crate) fn load(&mut self, context: &TuiContext<'_>) -> Result<(), TutorError> {
        let state = load_open_session(&context.state_file)?;
        let learner = context.learner()?;
        let deleted = state.session.snapshot().delete_pressed;
        let holding = state.session.tracker().is_holding_selection();
        *self = Self::for_session(context, learner.as_ref(), state.session);
        if deleted && !holding {
            self.cube_present = false;
        }
        self.status = format!("loaded from {}", context.state_file.display());
        Ok(())
    }

    /// Plain-text picture of the scene shared by both front ends.
    pub(crate) fn scene_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if self.session.is_inert() {
            lines.push("scene: no interactive exercise for this skill".to_string());
        } else if !self.cube_present && !self.session.snapshot().delete_pressed {
            lines.push("scene: empty viewport (orbit, zoom, pan)".to_string());
        } else if !self.cube_present {
            lines.push("scene: cube deleted".to_string());
        } else {
            let [x, y, z] = self.cube_position;
            let marker = if self.is_holding_selection() { "[#]" } else { "[ ]" };
            let state = if self.is_holding_selection() { "selected" } else { "idle" };
            lines.push(format!(
                "scene: {} cube {} at ({:.2}, {:.2}, {:.2})",
                marker, state, x, y, z
            ));
        }
        if self.grabbing {
            lines.push("grab: arrows/pgup/pgdn move, enter confirms, esc cancels".to_string());
        }
        lines
    }

    pub(crate) fn completion_lines(&self) -> Vec<String> {
        let Some(panel) = &self.completion else {
            return Vec::new();
        };
        let mut lines = vec![
            "Lesson Complete!".to_string(),
            format!(
                "+{} XP | time {} | accuracy {}%",
                panel.summary.points_earned, panel.summary.elapsed, panel.summary.accuracy
            ),
        ];
        match &panel.next {
            None => lines.push("continue: apply progress and open the next skill".to_string()),
            Some(NextStep::Skill(skill_id)) => lines.push(format!("next: {}", skill_id)),
            Some(NextStep::WorldMap) => lines.push("next: world map".to_string()),
        }
        lines
    }
}

#[cfg(test)]
mod tui_state_tests {
    use super::*;
    use crate::tests::{temp_path, test_context};

    #[test]
    fn selection_lesson_scene_follows_events() {
        let app = test_context();
        let context = TuiContext {
            app: &app,
            profile_path: temp_path("tui-guest-profile.json"),
            state_file: temp_path("tui-guest-session.json"),
        };
        let mut ui = TuiUiState::open(&context, Some("basics-2")).expect("lesson opens");
        assert!(ui.cube_present);
        assert_eq!(ui.learner_name, None);
        assert_eq!(ui.lock, LockState::Active);

        ui.apply(&context, InteractionEvent::Select);
        assert!(ui.scene_lines()[0].contains("selected"));

        let outcome = ui.apply(&context, InteractionEvent::DeleteKey);
        assert!(outcome.completed_now);
        assert!(!ui.cube_present);
        assert_eq!(ui.scene_lines()[0], "scene: cube deleted");
        assert_eq!(ui.completion_lines()[0], "Lesson Complete!");
    }

    #[test]
    fn navigation_lesson_has_no_cube_to_select() {
        let app = test_context();
        let context = TuiContext {
            app: &app,
            profile_path: temp_path("tui-nav-profile.json"),
            state_file: temp_path("tui-nav-session.json"),
        };
        let mut ui = TuiUiState::open(&context, Some("basics-1")).expect("lesson opens");
        let outcome = ui.apply(&context, InteractionEvent::Select);
        assert!(!outcome.snapshot_changed);
        assert_eq!(ui.status, "nothing to select");
        assert!(ui.scene_lines()[0].starts_with("scene: empty viewport"));
    }

    #[test]
    fn guest_continue_shows_signup_hint() {
        let app = test_context();
        let context = TuiContext {
            app: &app,
            profile_path: temp_path("tui-anon-profile.json"),
            state_file: temp_path("tui-anon-session.json"),
        };
        let mut ui = TuiUiState::open(&context, Some("basics-1")).expect("lesson opens");
        ui.apply(&context, InteractionEvent::Modifier { pressed: true });
        let done = ui.continue_learning(&context).expect("continue should not fail");
        assert!(!done);
        assert_eq!(ui.status, SIGNUP_HINT);
    }

    #[test]
    fn signed_in_continue_opens_next_skill_then_world_map() {
        let app = test_context();
        let profile_path = temp_path("tui-signed-profile.json");
        let mut store = FileProfileStore::new(profile_path.clone());
        store
            .save(&app.tutor.new_profile("ada", Utc::now()))
            .expect("profile saves");
        let context = TuiContext {
            app: &app,
            profile_path,
            state_file: temp_path("tui-signed-session.json"),
        };

        let mut ui = TuiUiState::open(&context, Some("basics-2")).expect("lesson opens");
        ui.apply(&context, InteractionEvent::Select);
        ui.apply(&context, InteractionEvent::DeleteKey);
        assert!(!ui.continue_learning(&context).expect("continue"));
        assert_eq!(ui.session.skill_id(), "modeling-1");
        assert!(ui.completion.is_none());

        ui.apply(&context, InteractionEvent::Select);
        ui.apply(
            &context,
            InteractionEvent::Move {
                dx: 0.5,
                dy: 0.0,
                dz: 0.0,
            },
        );
        assert_eq!(ui.cube_position, [0.5, 0.0, 0.0]);
        assert!(ui.continue_learning(&context).expect("continue"));

        let saved = store.load().expect("load").expect("profile exists");
        assert_eq!(saved.progress.skill_points, 40);
        assert!(saved.progress.is_skill_completed("modeling-1"));
    }

    #[test]
    fn save_and_load_restore_the_session() {
        let app = test_context();
        let context = TuiContext {
            app: &app,
            profile_path: temp_path("tui-save-profile.json"),
            state_file: temp_path("tui-save-session.json"),
        };
        let mut ui = TuiUiState::open(&context, Some("basics-2")).expect("lesson opens");
        ui.apply(&context, InteractionEvent::Select);
        ui.save(&context).expect("save");

        ui.restart(&context).expect("restart");
        assert!(!ui.is_holding_selection());

        ui.load(&context).expect("load");
        assert!(ui.is_holding_selection());
        assert!(ui.apply(&context, InteractionEvent::DeleteKey).completed_now);
    }

    #[test]
    fn applied_lesson_cannot_be_replayed_from_a_saved_file() {
        let app = test_context();
        let profile_path = temp_path("tui-replay-profile.json");
        let state_file = temp_path("tui-replay-session.json");
        let mut store = FileProfileStore::new(profile_path.clone());
        store
            .save(&app.tutor.new_profile("ada", Utc::now()))
            .expect("profile saves");
        let context = TuiContext {
            app: &app,
            profile_path,
            state_file: state_file.clone(),
        };

        let mut ui = TuiUiState::open(&context, Some("basics-2")).expect("lesson opens");
        ui.apply(&context, InteractionEvent::Select);
        ui.apply(&context, InteractionEvent::DeleteKey);
        ui.save(&context).expect("save");
        assert!(!ui.continue_learning(&context).expect("continue"));

        let error = load_open_session(&state_file).expect_err("agent finish should be refused");
        assert_eq!(error.code, "CLI_SESSION_FINISHED");
        let error = ui.load(&context).expect_err("tui load should be refused");
        assert_eq!(error.code, "CLI_SESSION_FINISHED");

        let saved = store.load().expect("load").expect("profile exists");
        assert_eq!(saved.progress.skill_points, 20);
    }

    #[test]
    fn saving_after_the_last_skill_keeps_the_latch() {
        let app = test_context();
        let profile_path = temp_path("tui-last-profile.json");
        let state_file = temp_path("tui-last-session.json");
        let mut store = FileProfileStore::new(profile_path.clone());
        store
            .save(&app.tutor.new_profile("ada", Utc::now()))
            .expect("profile saves");
        let context = TuiContext {
            app: &app,
            profile_path,
            state_file: state_file.clone(),
        };

        let mut ui = TuiUiState::open(&context, Some("modeling-1")).expect("lesson opens");
        ui.apply(&context, InteractionEvent::Select);
        ui.apply(
            &context,
            InteractionEvent::Move {
                dx: 0.0,
                dy: 1.0,
                dz: 0.0,
            },
        );
        assert!(ui.continue_learning(&context).expect("continue"));
        assert!(ui.finished);
        ui.save(&context).expect("save");
        assert!(load_open_session(&state_file).is_err());

        assert!(ui.continue_learning(&context).expect("continue again"));
        let saved = store.load().expect("load").expect("profile exists");
        assert_eq!(saved.progress.skill_points, 20);
    }
}
