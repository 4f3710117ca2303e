//! Static learning content: worlds, the skills inside them, their exercises
//! and the achievement catalog.
//!
//! Skill order in the catalog is meaningful. It is the unlock order used by
//! progression and the order `next_skill` walks.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use lesson_core::{AchievementDef, Exercise, Skill, TutorError, World};

mod builtin;

#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    worlds: Vec<World>,
    skills: Vec<Skill>,
    achievements: Vec<AchievementDef>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate ids and skills that point at an
    /// unknown world.
    pub fn new(
        worlds: Vec<World>,
        skills: Vec<Skill>,
        achievements: Vec<AchievementDef>,
    ) -> Result<Self, TutorError> {
        let mut world_ids = BTreeSet::new();
        for world in &worlds {
            if !world_ids.insert(world.id.as_str()) {
                return Err(TutorError::new(
                    "CATALOG_DUPLICATE_WORLD",
                    format!("World \"{}\" is defined more than once.", world.id),
                ));
            }
        }

        let mut skill_ids = BTreeSet::new();
        for skill in &skills {
            if !skill_ids.insert(skill.id.as_str()) {
                return Err(TutorError::new(
                    "CATALOG_DUPLICATE_SKILL",
                    format!("Skill \"{}\" is defined more than once.", skill.id),
                ));
            }
            if !world_ids.contains(skill.world.as_str()) {
                return Err(TutorError::new(
                    "CATALOG_WORLD_NOT_FOUND",
                    format!(
                        "Skill \"{}\" belongs to unknown world \"{}\".",
                        skill.id, skill.world
                    ),
                ));
            }
        }

        Ok(Self {
            worlds,
            skills,
            achievements,
        })
    }

    /// The catalog shipped with the application.
    pub fn builtin() -> &'static Catalog {
        static BUILTIN: OnceLock<Catalog> = OnceLock::new();
        BUILTIN.get_or_init(|| Catalog {
            worlds: builtin::builtin_worlds(),
            skills: builtin::builtin_skills(),
            achievements: builtin::builtin_achievements(),
        })
    }

    pub fn worlds(&self) -> &[World] {
        &self.worlds
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn achievements(&self) -> &[AchievementDef] {
        &self.achievements
    }

    pub fn world(&self, world_id: &str) -> Option<&World> {
        self.worlds.iter().find(|world| world.id == world_id)
    }

    pub fn skill(&self, skill_id: &str) -> Option<&Skill> {
        self.skills.iter().find(|skill| skill.id == skill_id)
    }

    pub fn skill_index(&self, skill_id: &str) -> Option<usize> {
        self.skills.iter().position(|skill| skill.id == skill_id)
    }

    pub fn first_skill(&self) -> Option<&Skill> {
        self.skills.first()
    }

    pub fn world_skills<'a>(&'a self, world_id: &'a str) -> impl Iterator<Item = &'a Skill> + 'a {
        self.skills.iter().filter(move |skill| skill.world == world_id)
    }

    pub fn exercise(&self, skill_id: &str, exercise_id: &str) -> Option<&Exercise> {
        self.skill(skill_id)?
            .exercises
            .iter()
            .find(|exercise| exercise.id == exercise_id)
    }

    pub fn achievement(&self, achievement_id: &str) -> Option<&AchievementDef> {
        self.achievements
            .iter()
            .find(|achievement| achievement.id == achievement_id)
    }

    pub fn require_skill(&self, skill_id: &str) -> Result<&Skill, TutorError> {
        self.skill(skill_id).ok_or_else(|| {
            TutorError::new(
                "CATALOG_SKILL_NOT_FOUND",
                format!("Skill \"{}\" is not in the catalog.", skill_id),
            )
        })
    }
}
