use crate::foundation::{
    core::{ElementId, Key},
    math::wrap_index,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Left/Right arrows move (tabs, carousels).
    #[default]
    Horizontal,
    /// Up/Down arrows move (dropdown menus).
    Vertical,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Next,
    Prev,
}

impl Step {
    pub fn delta(self) -> i64 {
        match self {
            Self::Next => 1,
            Self::Prev => -1,
        }
    }
}

impl Orientation {
    pub fn step_for(self, key: Key) -> Option<Step> {
        match (self, key) {
            (Self::Horizontal, Key::ArrowRight) | (Self::Vertical, Key::ArrowDown) => {
                Some(Step::Next)
            }
            (Self::Horizontal, Key::ArrowLeft) | (Self::Vertical, Key::ArrowUp) => {
                Some(Step::Prev)
            }
            _ => None,
        }
    }
}

/// Move one step from `current` through `len` items with wraparound. With nothing current,
/// `Next` lands on the first item and `Prev` on the last.
pub fn step_index(current: Option<usize>, step: Step, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match current {
        Some(i) => wrap_index(i as i64 + step.delta(), len),
        None => match step {
            Step::Next => 0,
            Step::Prev => len - 1,
        },
    })
}

/// Arrow-key focus movement over an ordered list of focusable handles.
///
/// Library helper for hosts wiring tab lists and dropdown menus; the stage itself only has
/// carousels, which use [`Orientation::step_for`] directly.
#[derive(Clone, Debug, PartialEq)]
pub struct RovingFocus {
    items: Vec<ElementId>,
    orientation: Orientation,
    current: Option<usize>,
}

impl RovingFocus {
    pub fn new(items: Vec<ElementId>, orientation: Orientation) -> Self {
        Self {
            items,
            orientation,
            current: None,
        }
    }

    pub fn items(&self) -> &[ElementId] {
        &self.items
    }

    pub fn current(&self) -> Option<ElementId> {
        self.current.map(|i| self.items[i])
    }

    /// Record externally moved focus. Unknown handles clear the current item.
    pub fn focus(&mut self, id: ElementId) -> bool {
        self.current = self.items.iter().position(|&i| i == id);
        self.current.is_some()
    }

    pub fn blur(&mut self) {
        self.current = None;
    }

    /// Handle a key press; returns the newly focused handle if the key moved focus.
    pub fn on_key(&mut self, key: Key) -> Option<ElementId> {
        let step = self.orientation.step_for(key)?;
        let next = step_index(self.current, step, self.items.len())?;
        self.current = Some(next);
        Some(self.items[next])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/focus/roving.rs"]
mod tests;
