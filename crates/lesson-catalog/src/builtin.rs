use lesson_core::{
    AchievementDef, Difficulty, Exercise, ExerciseContent, ExerciseKind, MapPosition, Skill,
    TutorialStep, World, WorldTheme,
};

pub(crate) fn builtin_worlds() -> Vec<World> {
    vec![
        world(
            "basics",
            "Basics World",
            "Learn the fundamental controls and navigation",
            "layout-dashboard",
            (0.0, 0.0),
            ("#58CC02", "#1CB0F6"),
        ),
        world(
            "modeling",
            "Modeling World",
            "Master object creation and manipulation",
            "cube",
            (1.0, 0.0),
            ("#FF9600", "#FFB84D"),
        ),
        world(
            "shading",
            "Materials World",
            "Learn materials, textures, and shading",
            "palette",
            (2.0, 0.0),
            ("#CE82FF", "#DCA5FF"),
        ),
    ]
}

pub(crate) fn builtin_skills() -> Vec<Skill> {
    vec![
        Skill {
            id: "basics-1".to_string(),
            name: "Navigation Controls".to_string(),
            description: "Learn to navigate in the 3D viewport".to_string(),
            icon: "mouse-pointer".to_string(),
            world: "basics".to_string(),
            exercises: vec![tutorial(
                "basics-1",
                "Navigation Controls",
                "Learn how to navigate in the 3D viewport",
                &[
                    "Middle mouse button to orbit",
                    "Shift + Middle mouse to pan",
                    "Scroll wheel to zoom",
                ],
            )],
        },
        Skill {
            id: "basics-2".to_string(),
            name: "Selection & Deletion".to_string(),
            description: "Learn to select and delete objects".to_string(),
            icon: "trash-2".to_string(),
            world: "basics".to_string(),
            exercises: vec![practice(
                "basics-2",
                "Selection Practice",
                "Practice selecting and deleting objects",
                &[
                    "Select objects with right-click",
                    "Delete objects with X key",
                    "Confirm deletions",
                ],
            )],
        },
        Skill {
            id: "modeling-1".to_string(),
            name: "Basic Transformations".to_string(),
            description: "Move, rotate, and scale objects".to_string(),
            icon: "move".to_string(),
            world: "modeling".to_string(),
            exercises: vec![tutorial(
                "modeling-1",
                "Moving Objects",
                "Learn to move objects in 3D space",
                &[
                    "Press G to grab/move",
                    "Press R to rotate",
                    "Press S to scale",
                ],
            )],
        },
    ]
}

pub(crate) fn builtin_achievements() -> Vec<AchievementDef> {
    [
        ("first-lesson", "First Steps", "Complete your first lesson", "trophy"),
        (
            "perfect-score",
            "Perfect Score",
            "Complete a lesson with 100% accuracy",
            "star",
        ),
        (
            "streak-7",
            "Week Warrior",
            "Maintain a 7-day learning streak",
            "target",
        ),
        (
            "streak-30",
            "Monthly Master",
            "Maintain a 30-day learning streak",
            "calendar",
        ),
        (
            "all-basics",
            "Basics Master",
            "Complete all basic lessons",
            "award",
        ),
        (
            "speed-demon",
            "Speed Demon",
            "Complete a lesson in under 2 minutes",
            "zap",
        ),
    ]
    .into_iter()
    .map(|(id, name, description, icon)| AchievementDef {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
    })
    .collect()
}

fn world(
    id: &str,
    name: &str,
    description: &str,
    icon: &str,
    (x, y): (f32, f32),
    (primary, secondary): (&str, &str),
) -> World {
    World {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        position: MapPosition { x, y },
        theme: WorldTheme {
            primary: primary.to_string(),
            secondary: secondary.to_string(),
        },
    }
}

fn tutorial(id: &str, title: &str, description: &str, steps: &[&str]) -> Exercise {
    Exercise {
        id: id.to_string(),
        kind: ExerciseKind::Tutorial,
        title: title.to_string(),
        description: description.to_string(),
        content: ExerciseContent::Steps {
            steps: steps
                .iter()
                .map(|instruction| TutorialStep {
                    instruction: instruction.to_string(),
                    completed: false,
                })
                .collect(),
        },
        difficulty: Difficulty::Beginner,
    }
}

fn practice(id: &str, title: &str, description: &str, objectives: &[&str]) -> Exercise {
    Exercise {
        id: id.to_string(),
        kind: ExerciseKind::Practice,
        title: title.to_string(),
        description: description.to_string(),
        content: ExerciseContent::Objectives {
            objectives: objectives.iter().map(|entry| entry.to_string()).collect(),
        },
        difficulty: Difficulty::Beginner,
    }
}
