use chrono::{DateTime, Utc};
use lesson_catalog::Catalog;
use lesson_core::{
    ExerciseKind, LearnerProfile, LockState, ProgressPolicy, ProgressionPolicy, Skill, TutorError,
    UserProgress,
};
use lesson_runtime::{
    achievement_board, next_skill, record_activity, unlock_achievement, world_summaries,
    AchievementEntry, CompletionSummary, LessonSession, ProgressAggregator, ProgressionResolver,
    SkillNode, WorldSummary,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TutorOptions {
    pub progress: ProgressPolicy,
    pub progression: ProgressionPolicy,
}

/// Where the learner goes after pressing continue on a finished lesson.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextStep {
    Skill(String),
    WorldMap,
}

impl NextStep {
    pub fn label(&self) -> &str {
        match self {
            NextStep::Skill(skill_id) => skill_id,
            NextStep::WorldMap => "world-map",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishOutcome {
    pub progress: UserProgress,
    pub summary: CompletionSummary,
    pub next: NextStep,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseEntry {
    pub exercise_id: String,
    pub title: String,
    pub kind: ExerciseKind,
    pub locked: bool,
    pub completed: bool,
}

/// Durable home of the signed-in learner's profile.
pub trait ProgressStore {
    /// `Ok(None)` means nobody is signed in.
    fn load(&self) -> Result<Option<LearnerProfile>, TutorError>;
    fn save(&mut self, profile: &LearnerProfile) -> Result<(), TutorError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    profile: Option<LearnerProfile>,
}

impl MemoryStore {
    pub fn new(profile: Option<LearnerProfile>) -> Self {
        Self { profile }
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self) -> Result<Option<LearnerProfile>, TutorError> {
        Ok(self.profile.clone())
    }

    fn save(&mut self, profile: &LearnerProfile) -> Result<(), TutorError> {
        self.profile = Some(profile.clone());
        Ok(())
    }
}

/// Catalog plus policies: everything a front end needs to run lessons.
#[derive(Debug, Clone)]
pub struct Tutor {
    catalog: Catalog,
    aggregator: ProgressAggregator,
    resolver: ProgressionResolver,
}

impl Tutor {
    pub fn new(catalog: Catalog, options: TutorOptions) -> Self {
        Self {
            catalog,
            aggregator: ProgressAggregator::new(options.progress),
            resolver: ProgressionResolver::new(options.progression),
        }
    }

    pub fn builtin(options: TutorOptions) -> Self {
        Self::new(Catalog::builtin().clone(), options)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn progress_policy(&self) -> &ProgressPolicy {
        self.aggregator.policy()
    }

    /// Opens a fresh session on a catalog skill the learner may select.
    pub fn start_lesson(
        &self,
        progress: Option<&UserProgress>,
        skill_id: &str,
    ) -> Result<LessonSession, TutorError> {
        self.catalog.require_skill(skill_id)?;
        let lock = self.resolver.lock_state_by_id(&self.catalog, progress, skill_id);
        if !lock.is_selectable() {
            return Err(TutorError::new(
                "SKILL_LOCKED",
                format!("Skill \"{}\" is locked; sign up to unlock it.", skill_id),
            ));
        }
        tracing::debug!(skill_id, lock = lock.as_str(), "lesson started");
        Ok(LessonSession::new(skill_id))
    }

    /// Applies a finished session to the learner's progress.
    ///
    /// Anonymous learners get `PROGRESS_MISSING`; the caller is expected to
    /// offer sign-up instead. The input progress is never modified.
    pub fn finish_lesson(
        &self,
        session: &LessonSession,
        progress: Option<&UserProgress>,
    ) -> Result<FinishOutcome, TutorError> {
        let Some(summary) = session.summary(self.aggregator.policy()) else {
            return Err(TutorError::new(
                "SESSION_NOT_COMPLETE",
                format!("Lesson \"{}\" is not complete yet.", session.skill_id()),
            ));
        };
        let skill = self.catalog.require_skill(session.skill_id())?;
        let progress = self
            .aggregator
            .apply_completion(progress, &skill.id, &skill.exercises)?;

        let next = match next_skill(&self.catalog, &skill.id) {
            Some(next) => NextStep::Skill(next.id.clone()),
            None => NextStep::WorldMap,
        };
        tracing::info!(skill_id = %skill.id, next = next.label(), "lesson finished");
        Ok(FinishOutcome {
            progress,
            summary,
            next,
        })
    }

    pub fn lock_state(&self, progress: Option<&UserProgress>, skill_id: &str) -> LockState {
        self.resolver.lock_state_by_id(&self.catalog, progress, skill_id)
    }

    pub fn skill_map(&self, progress: Option<&UserProgress>) -> Vec<SkillNode> {
        self.resolver.skill_map(&self.catalog, progress)
    }

    pub fn recommended_skill(&self, progress: Option<&UserProgress>) -> Option<&Skill> {
        self.resolver.recommended_skill(&self.catalog, progress)
    }

    pub fn next_skill(&self, skill_id: &str) -> Option<&Skill> {
        next_skill(&self.catalog, skill_id)
    }

    pub fn world_summaries(&self, progress: Option<&UserProgress>) -> Vec<WorldSummary> {
        world_summaries(&self.catalog, progress)
    }

    /// The lesson list of one skill with per-exercise gating.
    pub fn exercises(
        &self,
        progress: Option<&UserProgress>,
        skill_id: &str,
    ) -> Result<Vec<ExerciseEntry>, TutorError> {
        let skill = self.catalog.require_skill(skill_id)?;
        Ok(skill
            .exercises
            .iter()
            .enumerate()
            .map(|(index, exercise)| ExerciseEntry {
                exercise_id: exercise.id.clone(),
                title: exercise.title.clone(),
                kind: exercise.kind,
                locked: self.resolver.is_exercise_locked(progress, index),
                completed: progress
                    .is_some_and(|progress| progress.is_exercise_completed(skill_id, &exercise.id)),
            })
            .collect())
    }

    pub fn achievements(&self, profile: Option<&LearnerProfile>) -> Vec<AchievementEntry> {
        achievement_board(&self.catalog, profile.map(|profile| &profile.stats))
    }

    /// Starts a profile for a learner who just signed up, pointed at the
    /// first catalog skill.
    pub fn new_profile(&self, username: &str, now: DateTime<Utc>) -> LearnerProfile {
        let first = self
            .catalog
            .first_skill()
            .map(|skill| skill.id.clone())
            .unwrap_or_default();
        LearnerProfile::new(username, first, now)
    }

    pub fn record_visit(&self, profile: &LearnerProfile, now: DateTime<Utc>) -> LearnerProfile {
        let (progress, stats) = record_activity(&profile.progress, &profile.stats, now);
        LearnerProfile {
            progress,
            stats,
            ..profile.clone()
        }
    }

    pub fn unlock_achievement(
        &self,
        profile: &LearnerProfile,
        achievement_id: &str,
        now: DateTime<Utc>,
    ) -> Result<(LearnerProfile, bool), TutorError> {
        let (stats, unlocked) = unlock_achievement(&self.catalog, &profile.stats, achievement_id, now)?;
        Ok((
            LearnerProfile {
                stats,
                ..profile.clone()
            },
            unlocked,
        ))
    }
}

impl Default for Tutor {
    fn default() -> Self {
        Self::builtin(TutorOptions::default())
    }
}
