use serde::{Deserialize, Serialize};

pub const POINTS_PER_COMPLETION: u32 = 20;
pub const FULL_SCORE: u32 = 100;
pub const ANONYMOUS_UNLOCKED_SKILLS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressPolicy {
    pub points_per_completion: u32,
}

impl Default for ProgressPolicy {
    fn default() -> Self {
        Self {
            points_per_completion: POINTS_PER_COMPLETION,
        }
    }
}

/// Anonymous learners may open only the first `anonymous_unlocked` skills in
/// catalog order. Signed-in learners are not gated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionPolicy {
    pub anonymous_unlocked: usize,
}

impl Default for ProgressionPolicy {
    fn default() -> Self {
        Self {
            anonymous_unlocked: ANONYMOUS_UNLOCKED_SKILLS,
        }
    }
}
