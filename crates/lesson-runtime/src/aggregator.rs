use lesson_core::{
    Exercise, ExerciseScore, ProgressPolicy, SkillProgress, TutorError, UserProgress, FULL_SCORE,
};

/// Turns a completion verdict into a new progress record.
///
/// The aggregator does not dedupe. Every call awards points again, so the
/// caller must apply a completion exactly once per finished lesson.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressAggregator {
    policy: ProgressPolicy,
}

impl ProgressAggregator {
    pub fn new(policy: ProgressPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ProgressPolicy {
        &self.policy
    }

    /// Copy-on-write: `progress` is left untouched and the updated record is
    /// returned. A missing record is refused rather than fabricated.
    pub fn apply_completion(
        &self,
        progress: Option<&UserProgress>,
        skill_id: &str,
        exercises: &[Exercise],
    ) -> Result<UserProgress, TutorError> {
        let Some(progress) = progress else {
            return Err(TutorError::progress_missing("applyCompletion"));
        };

        let mut next = progress.clone();
        let level = next
            .skills
            .get(skill_id)
            .map(|existing| existing.level)
            .unwrap_or(0)
            .max(1);

        next.skills.insert(
            skill_id.to_string(),
            SkillProgress {
                id: skill_id.to_string(),
                level,
                completed: true,
                exercises: exercises
                    .iter()
                    .map(|exercise| ExerciseScore {
                        id: exercise.id.clone(),
                        completed: true,
                        score: FULL_SCORE,
                    })
                    .collect(),
            },
        );
        next.completed_lessons.insert(skill_id.to_string());
        next.skill_points = next
            .skill_points
            .saturating_add(self.policy.points_per_completion);

        tracing::info!(
            skill_id,
            points = next.skill_points,
            awarded = self.policy.points_per_completion,
            "completion applied"
        );
        Ok(next)
    }
}

pub fn apply_completion(
    progress: Option<&UserProgress>,
    skill_id: &str,
    exercises: &[Exercise],
) -> Result<UserProgress, TutorError> {
    ProgressAggregator::default().apply_completion(progress, skill_id, exercises)
}
