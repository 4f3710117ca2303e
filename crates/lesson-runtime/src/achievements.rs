use chrono::{DateTime, Utc};
use lesson_catalog::Catalog;
use lesson_core::{Achievement, AchievementDef, TutorError, UserStats};
use serde::{Deserialize, Serialize};

/// One row of the achievements page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementEntry {
    pub definition: AchievementDef,
    pub unlocked: bool,
    /// Display only; older profiles may hold an unlock without a time.
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl AchievementEntry {
    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }
}

/// Catalog achievements joined with the learner's unlocked list by id.
pub fn achievement_board(catalog: &Catalog, stats: Option<&UserStats>) -> Vec<AchievementEntry> {
    catalog
        .achievements()
        .iter()
        .map(|definition| {
            let unlocked = stats.and_then(|stats| {
                stats
                    .achievements
                    .iter()
                    .find(|entry| entry.id == definition.id)
            });
            AchievementEntry {
                definition: definition.clone(),
                unlocked: unlocked.is_some(),
                unlocked_at: unlocked.and_then(|entry| entry.unlocked_at),
            }
        })
        .collect()
}

/// Unlocks `achievement_id` once. The bool is false when it was already
/// unlocked, in which case the returned stats equal the input.
pub fn unlock_achievement(
    catalog: &Catalog,
    stats: &UserStats,
    achievement_id: &str,
    now: DateTime<Utc>,
) -> Result<(UserStats, bool), TutorError> {
    let Some(definition) = catalog.achievement(achievement_id) else {
        return Err(TutorError::new(
            "ACHIEVEMENT_NOT_FOUND",
            format!("Achievement \"{}\" is not in the catalog.", achievement_id),
        ));
    };

    if stats.is_unlocked(achievement_id) {
        return Ok((stats.clone(), false));
    }

    let mut next = stats.clone();
    next.achievements.push(Achievement {
        id: definition.id.clone(),
        name: definition.name.clone(),
        description: definition.description.clone(),
        icon: definition.icon.clone(),
        unlocked_at: Some(now),
    });
    tracing::info!(achievement_id, "achievement unlocked");
    Ok((next, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 2, 10, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn new_learner_has_every_achievement_locked() {
        let board = achievement_board(Catalog::builtin(), Some(&UserStats::fresh()));
        assert_eq!(board.len(), 6);
        assert!(board.iter().all(|entry| !entry.is_unlocked()));
        assert!(achievement_board(Catalog::builtin(), None)
            .iter()
            .all(|entry| !entry.is_unlocked()));
    }

    #[test]
    fn unlock_is_one_shot() {
        let stats = UserStats::fresh();
        let (stats, unlocked) = unlock_achievement(Catalog::builtin(), &stats, "first-lesson", now())
            .expect("unlock should pass");
        assert!(unlocked);
        assert!(stats.is_unlocked("first-lesson"));

        let (again, unlocked) = unlock_achievement(Catalog::builtin(), &stats, "first-lesson", now())
            .expect("repeat unlock should pass");
        assert!(!unlocked);
        assert_eq!(again, stats);

        let board = achievement_board(Catalog::builtin(), Some(&stats));
        let first = board
            .iter()
            .find(|entry| entry.definition.id == "first-lesson")
            .expect("first-lesson entry");
        assert_eq!(first.unlocked_at, Some(now()));
    }

    #[test]
    fn unlock_without_a_timestamp_still_counts() {
        let mut stats = UserStats::fresh();
        stats.achievements.push(Achievement {
            id: "first-lesson".to_string(),
            name: "First Steps".to_string(),
            description: String::new(),
            icon: String::new(),
            unlocked_at: None,
        });
        assert!(stats.is_unlocked("first-lesson"));

        let board = achievement_board(Catalog::builtin(), Some(&stats));
        let first = board
            .iter()
            .find(|entry| entry.definition.id == "first-lesson")
            .expect("first-lesson entry");
        assert!(first.is_unlocked());
        assert_eq!(first.unlocked_at, None);
        assert_eq!(board.iter().filter(|entry| entry.is_unlocked()).count(), 1);

        let (_, unlocked) = unlock_achievement(Catalog::builtin(), &stats, "first-lesson", now())
            .expect("repeat unlock should pass");
        assert!(!unlocked);
    }

    #[test]
    fn unknown_achievement_is_rejected() {
        let error = unlock_achievement(Catalog::builtin(), &UserStats::fresh(), "night-owl", now())
            .expect_err("unknown achievement should fail");
        assert_eq!(error.code, "ACHIEVEMENT_NOT_FOUND");
    }
}
