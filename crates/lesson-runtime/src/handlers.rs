use lesson_core::InteractionSnapshot;

/// Completion verdict and guidance for one interactive skill.
///
/// Both methods are pure functions of the snapshot. `check_completion` is a
/// monotone combination of flags, so once it holds it keeps holding as more
/// flags turn on.
pub trait LessonHandler {
    fn skill_id(&self) -> &'static str;
    fn check_completion(&self, snapshot: &InteractionSnapshot) -> bool;
    /// Messages front to back, most recent instruction last.
    fn messages(&self, snapshot: &InteractionSnapshot) -> Vec<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lesson {
    Navigation,
    SelectionDeletion,
    Transform,
}

impl Lesson {
    pub const ALL: [Lesson; 3] = [
        Lesson::Navigation,
        Lesson::SelectionDeletion,
        Lesson::Transform,
    ];

    pub fn for_skill(skill_id: &str) -> Option<Lesson> {
        Self::ALL
            .into_iter()
            .find(|lesson| lesson.skill_id() == skill_id)
    }

    /// Navigation practice happens on an empty scene; the other lessons put a
    /// cube in front of the learner.
    pub fn has_scene_object(&self) -> bool {
        !matches!(self, Lesson::Navigation)
    }
}

impl LessonHandler for Lesson {
    fn skill_id(&self) -> &'static str {
        match self {
            Lesson::Navigation => "basics-1",
            Lesson::SelectionDeletion => "basics-2",
            Lesson::Transform => "modeling-1",
        }
    }

    fn check_completion(&self, snapshot: &InteractionSnapshot) -> bool {
        match self {
            Lesson::Navigation => snapshot.shift_pressed,
            Lesson::SelectionDeletion => snapshot.selected && snapshot.delete_pressed,
            Lesson::Transform => snapshot.has_moved,
        }
    }

    fn messages(&self, snapshot: &InteractionSnapshot) -> Vec<String> {
        let lines: Vec<&str> = match self {
            Lesson::Navigation => navigation_messages(),
            Lesson::SelectionDeletion => selection_deletion_messages(snapshot),
            Lesson::Transform => transform_messages(snapshot),
        };
        lines.into_iter().map(str::to_string).collect()
    }
}

fn navigation_messages() -> Vec<&'static str> {
    vec![
        "Welcome to your first Blender lesson! Let's learn how to navigate in 3D space.",
        "For touchpad users:\n1. Two-finger swipe to orbit\n2. Pinch to zoom in/out\n3. Two-finger swipe while holding Shift to pan",
        "Press Shift to complete this lesson",
    ]
}

fn selection_deletion_messages(snapshot: &InteractionSnapshot) -> Vec<&'static str> {
    let next_step = if snapshot.selected {
        "Great! Now press the 'X' key to delete the selected cube."
    } else {
        "Click the cube to select it"
    };
    vec![
        "Let's learn how to select and delete objects.",
        "Click on the cube to select it. You'll see an orange outline when selected.",
        next_step,
    ]
}

fn transform_messages(snapshot: &InteractionSnapshot) -> Vec<&'static str> {
    let mut lines = vec![
        "Welcome to Basic Modeling! Let's learn how to move objects in 3D space.",
        "First, click on the cube to select it.",
    ];
    if snapshot.has_moved {
        lines.push("Perfect! You've learned how to move objects in Blender! 🎉");
    } else if snapshot.selected {
        lines.push("Great! Now press the 'G' key and move your mouse to reposition the cube. Click to confirm the new position.");
    } else {
        lines.push("Select the cube to begin");
    }
    lines
}

/// Verdict for any skill id. Skills without a handler never complete.
pub fn check_completion(skill_id: &str, snapshot: &InteractionSnapshot) -> bool {
    Lesson::for_skill(skill_id)
        .map(|lesson| lesson.check_completion(snapshot))
        .unwrap_or(false)
}

/// Guidance for any skill id. Skills without a handler have no messages.
pub fn guidance_messages(skill_id: &str, snapshot: &InteractionSnapshot) -> Vec<String> {
    Lesson::for_skill(skill_id)
        .map(|lesson| lesson.messages(snapshot))
        .unwrap_or_default()
}
