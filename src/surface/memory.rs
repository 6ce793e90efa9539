use std::collections::{BTreeMap, BTreeSet};

use crate::{
    foundation::core::{ElementId, Millis},
    surface::paint::{Paint, Patch, Transform},
};

/// Consumer of paints, in the order the stage produces them.
pub trait Surface {
    fn apply(&mut self, at: Millis, paint: &Paint);
}

/// Last-applied visual state of one element.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ElementState {
    pub classes: BTreeSet<String>,
    pub opacity: Option<f64>,
    pub transform: Option<Transform>,
    pub transition: Option<String>,
    pub aria_hidden: Option<bool>,
    pub tab_index: Option<i32>,
    pub text: Option<String>,
    pub width_pct: Option<f64>,
    pub children: Vec<ElementId>,
}

/// In-memory surface for tests, the CLI and debugging. Keeps the full paint log plus the
/// folded per-element state.
#[derive(Debug, Default)]
pub struct InMemorySurface {
    log: Vec<(Millis, Paint)>,
    state: BTreeMap<ElementId, ElementState>,
}

impl InMemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> &[(Millis, Paint)] {
        &self.log
    }

    pub fn paints_for(&self, id: ElementId) -> impl Iterator<Item = &(Millis, Paint)> {
        self.log.iter().filter(move |(_, p)| p.target == id)
    }

    pub fn element(&self, id: ElementId) -> Option<&ElementState> {
        self.state.get(&id)
    }

    pub fn has_class(&self, id: ElementId, name: &str) -> bool {
        self.state.get(&id).is_some_and(|s| s.classes.contains(name))
    }

    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.state.get(&id).and_then(|s| s.text.as_deref())
    }

    pub fn transform(&self, id: ElementId) -> Option<Transform> {
        self.state.get(&id).and_then(|s| s.transform)
    }

    pub fn aria_hidden(&self, id: ElementId) -> Option<bool> {
        self.state.get(&id).and_then(|s| s.aria_hidden)
    }

    /// Time at which `name` was first added to `id`.
    pub fn class_added_at(&self, id: ElementId, name: &str) -> Option<Millis> {
        self.log.iter().find_map(|(at, p)| match &p.patch {
            Patch::Class { name: n, on: true } if p.target == id && n == name => Some(*at),
            _ => None,
        })
    }
}

impl Surface for InMemorySurface {
    fn apply(&mut self, at: Millis, paint: &Paint) {
        self.log.push((at, paint.clone()));
        let st = self.state.entry(paint.target).or_default();
        match &paint.patch {
            Patch::Class { name, on: true } => {
                st.classes.insert(name.clone());
            }
            Patch::Class { name, on: false } => {
                st.classes.remove(name);
            }
            Patch::Opacity { value } => st.opacity = Some(*value),
            Patch::Transform { value } => st.transform = Some(*value),
            Patch::Transition { css } => st.transition = Some(css.clone()),
            Patch::AriaHidden { hidden } => st.aria_hidden = Some(*hidden),
            Patch::TabIndex { index } => st.tab_index = Some(*index),
            Patch::Text { text } => st.text = Some(text.clone()),
            Patch::WidthPercent { pct } => st.width_pct = Some(*pct),
            Patch::AppendChild { child, class, .. } => {
                st.children.push(*child);
                self.state
                    .entry(*child)
                    .or_default()
                    .classes
                    .insert(class.clone());
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/memory.rs"]
mod tests;
