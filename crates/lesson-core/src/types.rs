use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapPosition {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldTheme {
    pub primary: String,
    pub secondary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub position: MapPosition,
    pub theme: WorldTheme,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseKind {
    Tutorial,
    Quiz,
    Practice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorialStep {
    pub instruction: String,
    pub completed: bool,
}

/// Payload of an exercise. Tutorials walk through steps, practice and quiz
/// exercises list objectives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExerciseContent {
    Steps { steps: Vec<TutorialStep> },
    Objectives { objectives: Vec<String> },
}

impl ExerciseContent {
    pub fn objectives(&self) -> &[String] {
        match self {
            Self::Objectives { objectives } => objectives,
            Self::Steps { .. } => &[],
        }
    }

    pub fn instructions(&self) -> Vec<&str> {
        match self {
            Self::Steps { steps } => steps.iter().map(|step| step.instruction.as_str()).collect(),
            Self::Objectives { objectives } => objectives.iter().map(String::as_str).collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Steps { steps } => steps.len(),
            Self::Objectives { objectives } => objectives.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ExerciseKind,
    pub title: String,
    pub description: String,
    pub content: ExerciseContent,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub world: String,
    pub exercises: Vec<Exercise>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementDef {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
}

/// Boolean view of one lesson session. Every flag only ever turns on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionSnapshot {
    pub selected: bool,
    pub has_moved: bool,
    pub delete_pressed: bool,
    pub shift_pressed: bool,
}

impl InteractionSnapshot {
    /// True when `self` is reachable from `earlier` by turning flags on only.
    pub fn extends(&self, earlier: &InteractionSnapshot) -> bool {
        (self.selected || !earlier.selected)
            && (self.has_moved || !earlier.has_moved)
            && (self.delete_pressed || !earlier.delete_pressed)
            && (self.shift_pressed || !earlier.shift_pressed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum InteractionEvent {
    Select,
    Deselect,
    Move { dx: f32, dy: f32, dz: f32 },
    DeleteKey,
    Modifier { pressed: bool },
}

impl InteractionEvent {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Deselect => "deselect",
            Self::Move { .. } => "move",
            Self::DeleteKey => "delete",
            Self::Modifier { pressed: true } => "shift",
            Self::Modifier { pressed: false } => "shift-up",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockState {
    Locked,
    Active,
    Completed,
}

impl LockState {
    pub fn is_selectable(&self) -> bool {
        !matches!(self, Self::Locked)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Locked => "locked",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}
