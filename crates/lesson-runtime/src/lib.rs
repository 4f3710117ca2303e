mod achievements;
mod activity;
mod aggregator;
mod handlers;
mod progression;
mod session;
mod tracker;

pub use achievements::{achievement_board, unlock_achievement, AchievementEntry};
pub use activity::record_activity;
pub use aggregator::{apply_completion, ProgressAggregator};
pub use handlers::{check_completion, guidance_messages, Lesson, LessonHandler};
pub use progression::{
    lock_state, next_skill, world_summaries, ProgressionResolver, SkillNode, WorldSummary,
};
pub use session::{format_elapsed, CompletionSummary, DispatchOutcome, LessonSession};
pub use tracker::InteractionTracker;
