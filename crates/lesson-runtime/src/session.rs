use lesson_core::{InteractionEvent, InteractionSnapshot, ProgressPolicy, FULL_SCORE};
use serde::{Deserialize, Serialize};

use crate::handlers::{Lesson, LessonHandler};
use crate::tracker::InteractionTracker;

/// Result of feeding one event into a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub snapshot_changed: bool,
    /// True only for the event that flipped the verdict.
    pub completed_now: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionSummary {
    pub skill_id: String,
    pub points_earned: u32,
    pub elapsed: String,
    pub accuracy: u32,
}

/// One learner working through one lesson. Dropping the session discards the
/// snapshot; nothing is persisted until the lesson is finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonSession {
    skill_id: String,
    tracker: InteractionTracker,
    completed: bool,
    elapsed_secs: u64,
}

impl LessonSession {
    pub fn new(skill_id: impl Into<String>) -> Self {
        let skill_id = skill_id.into();
        if Lesson::for_skill(&skill_id).is_none() {
            tracing::warn!(skill_id = %skill_id, "no lesson handler; session is inert");
        }
        Self {
            skill_id,
            tracker: InteractionTracker::new(),
            completed: false,
            elapsed_secs: 0,
        }
    }

    pub fn skill_id(&self) -> &str {
        &self.skill_id
    }

    pub fn lesson(&self) -> Option<Lesson> {
        Lesson::for_skill(&self.skill_id)
    }

    pub fn is_inert(&self) -> bool {
        self.lesson().is_none()
    }

    pub fn tracker(&self) -> &InteractionTracker {
        &self.tracker
    }

    pub fn snapshot(&self) -> InteractionSnapshot {
        self.tracker.snapshot()
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Applies the event, then re-checks completion against the new snapshot.
    pub fn dispatch(&mut self, event: InteractionEvent) -> DispatchOutcome {
        let snapshot_changed = self.tracker.apply(event);
        tracing::debug!(
            skill_id = %self.skill_id,
            event = event.label(),
            snapshot_changed,
            "interaction dispatched"
        );

        let mut completed_now = false;
        if !self.completed {
            if let Some(lesson) = self.lesson() {
                if lesson.check_completion(&self.tracker.snapshot()) {
                    self.completed = true;
                    completed_now = true;
                    tracing::info!(
                        skill_id = %self.skill_id,
                        elapsed = %self.elapsed_label(),
                        "lesson complete"
                    );
                }
            }
        }

        DispatchOutcome {
            snapshot_changed,
            completed_now,
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.lesson()
            .map(|lesson| lesson.messages(&self.tracker.snapshot()))
            .unwrap_or_default()
    }

    /// Display clock. Stops once the lesson is complete and never touches the
    /// snapshot.
    pub fn tick(&mut self, seconds: u64) {
        if !self.completed {
            self.elapsed_secs = self.elapsed_secs.saturating_add(seconds);
        }
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn elapsed_label(&self) -> String {
        format_elapsed(self.elapsed_secs)
    }

    pub fn summary(&self, policy: &ProgressPolicy) -> Option<CompletionSummary> {
        if !self.completed {
            return None;
        }
        Some(CompletionSummary {
            skill_id: self.skill_id.clone(),
            points_earned: policy.points_per_completion,
            elapsed: self.elapsed_label(),
            accuracy: FULL_SCORE,
        })
    }
}

pub fn format_elapsed(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
