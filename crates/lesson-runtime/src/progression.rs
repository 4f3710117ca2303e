use lesson_catalog::Catalog;
use lesson_core::{LockState, ProgressionPolicy, Skill, UserProgress};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillNode {
    pub skill_id: String,
    pub name: String,
    pub world: String,
    pub lock: LockState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldSummary {
    pub world_id: String,
    pub name: String,
    pub completed_skills: usize,
    pub total_skills: usize,
}

/// Lock states over the catalog's flat skill order.
///
/// `progress` is `None` for anonymous learners. Gating is positional: the
/// first `anonymous_unlocked` skills are open to everyone, and signing in
/// opens everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressionResolver {
    policy: ProgressionPolicy,
}

impl ProgressionResolver {
    pub fn new(policy: ProgressionPolicy) -> Self {
        Self { policy }
    }

    pub fn lock_state(
        &self,
        progress: Option<&UserProgress>,
        skill: &Skill,
        catalog_index: usize,
    ) -> LockState {
        if progress.is_some_and(|progress| progress.is_skill_completed(&skill.id)) {
            return LockState::Completed;
        }
        if catalog_index < self.policy.anonymous_unlocked || progress.is_some() {
            return LockState::Active;
        }
        LockState::Locked
    }

    /// Unknown ids are locked.
    pub fn lock_state_by_id(
        &self,
        catalog: &Catalog,
        progress: Option<&UserProgress>,
        skill_id: &str,
    ) -> LockState {
        match (catalog.skill(skill_id), catalog.skill_index(skill_id)) {
            (Some(skill), Some(index)) => self.lock_state(progress, skill, index),
            _ => LockState::Locked,
        }
    }

    pub fn skill_map(&self, catalog: &Catalog, progress: Option<&UserProgress>) -> Vec<SkillNode> {
        catalog
            .skills()
            .iter()
            .enumerate()
            .map(|(index, skill)| SkillNode {
                skill_id: skill.id.clone(),
                name: skill.name.clone(),
                world: skill.world.clone(),
                lock: self.lock_state(progress, skill, index),
            })
            .collect()
    }

    /// First skill in catalog order that is open and not yet completed.
    pub fn recommended_skill<'a>(
        &self,
        catalog: &'a Catalog,
        progress: Option<&UserProgress>,
    ) -> Option<&'a Skill> {
        catalog
            .skills()
            .iter()
            .enumerate()
            .find(|(index, skill)| self.lock_state(progress, skill, *index) == LockState::Active)
            .map(|(_, skill)| skill)
    }

    /// Exercise gating inside one skill's lesson list uses the same positional
    /// rule as skills.
    pub fn is_exercise_locked(&self, progress: Option<&UserProgress>, exercise_index: usize) -> bool {
        progress.is_none() && exercise_index >= self.policy.anonymous_unlocked
    }
}

/// Catalog entry right after `current_skill_id`, or `None` when it is the last
/// one (or unknown), which sends the learner back to world selection.
pub fn next_skill<'a>(catalog: &'a Catalog, current_skill_id: &str) -> Option<&'a Skill> {
    let index = catalog.skill_index(current_skill_id)?;
    catalog.skills().get(index + 1)
}

pub fn lock_state(progress: Option<&UserProgress>, skill: &Skill, catalog_index: usize) -> LockState {
    ProgressionResolver::default().lock_state(progress, skill, catalog_index)
}

pub fn world_summaries(catalog: &Catalog, progress: Option<&UserProgress>) -> Vec<WorldSummary> {
    catalog
        .worlds()
        .iter()
        .map(|world| {
            let skills = catalog.world_skills(&world.id).collect::<Vec<_>>();
            let completed_skills = skills
                .iter()
                .filter(|skill| progress.is_some_and(|p| p.is_skill_completed(&skill.id)))
                .count();
            WorldSummary {
                world_id: world.id.clone(),
                name: world.name.clone(),
                completed_skills,
                total_skills: skills.len(),
            }
        })
        .collect()
}
