use chrono::{DateTime, Utc};
use lesson_core::{UserProgress, UserStats};

/// Records that the learner was active at `now`.
///
/// Streaks count consecutive UTC days: a second visit on the same day keeps
/// the streak, the next day extends it, a longer gap restarts it at one.
/// Returns fresh copies; the inputs are untouched.
pub fn record_activity(
    progress: &UserProgress,
    stats: &UserStats,
    now: DateTime<Utc>,
) -> (UserProgress, UserStats) {
    let mut next_progress = progress.clone();
    let mut next_stats = stats.clone();

    let gap_days = (now.date_naive() - progress.last_active.date_naive()).num_days();
    match gap_days {
        i64::MIN..=0 => {
            next_progress.streak = next_progress.streak.max(1);
        }
        1 => {
            next_progress.streak = next_progress.streak.saturating_add(1);
            next_stats.days_active = next_stats.days_active.saturating_add(1);
        }
        _ => {
            next_progress.streak = 1;
            next_stats.days_active = next_stats.days_active.saturating_add(1);
        }
    }

    if now > next_progress.last_active {
        next_progress.last_active = now;
    }
    next_stats.longest_streak = next_stats.longest_streak.max(next_progress.streak);

    tracing::debug!(
        streak = next_progress.streak,
        days_active = next_stats.days_active,
        "activity recorded"
    );
    (next_progress, next_stats)
}
