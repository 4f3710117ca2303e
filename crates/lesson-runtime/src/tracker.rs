use lesson_core::{InteractionEvent, InteractionSnapshot};
use serde::{Deserialize, Serialize};

/// Folds raw scene input into an [`InteractionSnapshot`].
///
/// `holding_selection` mirrors what the scene currently has selected and can
/// drop back to false on deselect. The snapshot flags never do: `selected`
/// records that a selection happened during this session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionTracker {
    snapshot: InteractionSnapshot,
    holding_selection: bool,
}

impl InteractionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_select(&mut self) {
        self.holding_selection = true;
        self.snapshot.selected = true;
    }

    pub fn on_deselect(&mut self) {
        self.holding_selection = false;
    }

    pub fn on_move(&mut self, delta: [f32; 3]) {
        if delta.iter().any(|axis| axis.is_finite() && *axis != 0.0) {
            self.snapshot.has_moved = true;
        }
    }

    /// Deleting requires something to be selected right now; otherwise the
    /// key press is dropped.
    pub fn on_delete_key(&mut self) {
        if self.holding_selection {
            self.snapshot.delete_pressed = true;
        }
    }

    pub fn on_modifier_change(&mut self, pressed: bool) {
        if pressed {
            self.snapshot.shift_pressed = true;
        }
    }

    /// Routes an event to its mutator and reports whether the snapshot changed.
    pub fn apply(&mut self, event: InteractionEvent) -> bool {
        let before = self.snapshot;
        match event {
            InteractionEvent::Select => self.on_select(),
            InteractionEvent::Deselect => self.on_deselect(),
            InteractionEvent::Move { dx, dy, dz } => self.on_move([dx, dy, dz]),
            InteractionEvent::DeleteKey => self.on_delete_key(),
            InteractionEvent::Modifier { pressed } => self.on_modifier_change(pressed),
        }
        before != self.snapshot
    }

    pub fn snapshot(&self) -> InteractionSnapshot {
        self.snapshot
    }

    pub fn is_holding_selection(&self) -> bool {
        self.holding_selection
    }
}
