use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const LEARNER_PROFILE_SCHEMA: &str = "learner-profile.v1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseScore {
    pub id: String,
    pub completed: bool,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillProgress {
    pub id: String,
    pub level: u32,
    pub completed: bool,
    pub exercises: Vec<ExerciseScore>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub current_lesson: String,
    pub completed_lessons: BTreeSet<String>,
    pub skills: BTreeMap<String, SkillProgress>,
    pub skill_points: u32,
    pub streak: u32,
    pub last_active: DateTime<Utc>,
}

impl UserProgress {
    /// Record for a learner who just signed up.
    pub fn fresh(current_lesson: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            current_lesson: current_lesson.into(),
            completed_lessons: BTreeSet::new(),
            skills: BTreeMap::new(),
            skill_points: 0,
            streak: 0,
            last_active: now,
        }
    }

    pub fn is_skill_completed(&self, skill_id: &str) -> bool {
        self.skills
            .get(skill_id)
            .map(|skill| skill.completed)
            .unwrap_or(false)
    }

    pub fn is_exercise_completed(&self, skill_id: &str, exercise_id: &str) -> bool {
        self.skills
            .get(skill_id)
            .and_then(|skill| skill.exercises.iter().find(|ex| ex.id == exercise_id))
            .map(|ex| ex.completed)
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub unlocked_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub days_active: u32,
    pub total_points: u32,
    pub longest_streak: u32,
    pub achievements: Vec<Achievement>,
}

impl UserStats {
    pub fn fresh() -> Self {
        Self {
            days_active: 1,
            ..Self::default()
        }
    }

    pub fn is_unlocked(&self, achievement_id: &str) -> bool {
        self.achievements.iter().any(|entry| entry.id == achievement_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearnerProfile {
    pub schema_version: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub progress: UserProgress,
    pub stats: UserStats,
}

impl LearnerProfile {
    pub fn new(
        username: impl Into<String>,
        first_lesson: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            schema_version: LEARNER_PROFILE_SCHEMA.to_string(),
            username: username.into(),
            created_at: now,
            progress: UserProgress::fresh(first_lesson, now),
            stats: UserStats::fresh(),
        }
    }
}
