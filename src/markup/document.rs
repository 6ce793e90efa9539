use std::collections::BTreeMap;

use crate::{
    foundation::{
        core::{ElementId, Rect, Viewport},
        error::{MotionError, MotionResult},
    },
    visibility::notifier::ViewportGeometry,
};

/// One element as supplied by the markup provider.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ElementDef {
    pub id: ElementId,
    #[serde(default)]
    pub parent: Option<ElementId>,
    #[serde(default)]
    pub classes: Vec<String>,
    /// String-valued declarative attributes (`data-apex-delay`, `data-autoplay`, ...).
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
    /// Layout box in document coordinates.
    #[serde(default)]
    pub rect: Option<Rect>,
}

impl ElementDef {
    pub fn new(id: u64) -> Self {
        Self {
            id: ElementId(id),
            parent: None,
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            rect: None,
        }
    }

    pub fn parent(mut self, parent: u64) -> Self {
        self.parent = Some(ElementId(parent));
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_owned());
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_owned(), value.to_owned());
        self
    }

    pub fn rect(mut self, x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        self.rect = Some(Rect::new(x0, y0, x1, y1));
        self
    }
}

/// Serialized page: viewport, motion preference and the element tree.
///
/// Elements are listed parents-first; sibling order in the list is document order.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneDef {
    pub viewport: Viewport,
    #[serde(default)]
    pub reduced_motion: bool,
    pub elements: Vec<ElementDef>,
}

#[derive(Clone, Debug)]
struct Node {
    def: ElementDef,
    children: Vec<ElementId>,
}

/// In-memory element tree standing in for the host DOM.
#[derive(Clone, Debug)]
pub struct Document {
    viewport: Viewport,
    reduced_motion: bool,
    nodes: BTreeMap<ElementId, Node>,
    roots: Vec<ElementId>,
    order: Vec<ElementId>,
    next_id: u64,
}

impl Document {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            reduced_motion: false,
            nodes: BTreeMap::new(),
            roots: Vec::new(),
            order: Vec::new(),
            next_id: 0,
        }
    }

    pub fn from_scene(scene: SceneDef) -> MotionResult<Self> {
        let mut doc = Self::new(scene.viewport);
        doc.reduced_motion = scene.reduced_motion;
        for def in scene.elements {
            doc.link(def)?;
        }
        doc.rebuild_order();
        Ok(doc)
    }

    pub fn from_json_str(s: &str) -> MotionResult<Self> {
        let scene: SceneDef = serde_json::from_str(s)?;
        Self::from_scene(scene)
    }

    /// Add an element. Its parent, if any, must already be present.
    pub fn insert(&mut self, def: ElementDef) -> MotionResult<()> {
        self.link(def)?;
        self.rebuild_order();
        Ok(())
    }

    fn link(&mut self, def: ElementDef) -> MotionResult<()> {
        if self.nodes.contains_key(&def.id) {
            return Err(MotionError::scene(format!("duplicate element id {}", def.id)));
        }
        let next_id = def
            .id
            .0
            .checked_add(1)
            .ok_or_else(|| MotionError::scene("element id space exhausted"))?;
        match def.parent {
            Some(parent) => {
                let node = self.nodes.get_mut(&parent).ok_or_else(|| {
                    MotionError::scene(format!(
                        "element {} references unknown parent {parent}",
                        def.id
                    ))
                })?;
                node.children.push(def.id);
            }
            None => self.roots.push(def.id),
        }
        self.next_id = self.next_id.max(next_id);
        self.nodes.insert(
            def.id,
            Node {
                def,
                children: Vec::new(),
            },
        );
        Ok(())
    }

    pub fn with(mut self, def: ElementDef) -> MotionResult<Self> {
        self.insert(def)?;
        Ok(self)
    }

    /// Create a new child element with a fresh handle, appended after existing children.
    pub fn create_element(&mut self, parent: ElementId, class: &str) -> MotionResult<ElementId> {
        let id = ElementId(self.next_id);
        self.link(ElementDef {
            id,
            parent: Some(parent),
            classes: vec![class.to_owned()],
            attrs: BTreeMap::new(),
            rect: None,
        })?;
        // Last child of `parent`: lands right after the parent's existing subtree.
        let at = self.subtree_end(parent);
        self.order.insert(at, id);
        Ok(id)
    }

    /// Index in `order` just past `id` and all of its descendants.
    fn subtree_end(&self, id: ElementId) -> usize {
        let Some(start) = self.order.iter().position(|&o| o == id) else {
            return self.order.len();
        };
        self.order[start + 1..]
            .iter()
            .position(|&o| !self.is_descendant(o, id))
            .map_or(self.order.len(), |n| start + 1 + n)
    }

    fn rebuild_order(&mut self) {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<ElementId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            if let Some(node) = self.nodes.get(&id) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        self.order = order;
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced;
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn set_scroll_y(&mut self, y: f64) {
        self.viewport.scroll_y = y.max(0.0);
    }

    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport.width = width;
        self.viewport.height = height;
    }

    pub fn attr(&self, id: ElementId, name: &str) -> Option<&str> {
        self.nodes
            .get(&id)
            .and_then(|n| n.def.attrs.get(name))
            .map(String::as_str)
    }

    pub fn has_attr(&self, id: ElementId, name: &str) -> bool {
        self.attr(id, name).is_some()
    }

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.nodes
            .get(&id)
            .is_some_and(|n| n.def.classes.iter().any(|c| c == class))
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.nodes.get(&id).map_or(&[], |n| n.children.as_slice())
    }

    fn is_descendant(&self, id: ElementId, ancestor: ElementId) -> bool {
        let mut cur = self.nodes.get(&id).and_then(|n| n.def.parent);
        while let Some(p) = cur {
            if p == ancestor {
                return true;
            }
            cur = self.nodes.get(&p).and_then(|n| n.def.parent);
        }
        false
    }

    /// Every element carrying `class`, in document order; restricted to strict descendants
    /// of `within` when given.
    pub fn query_class(&self, within: Option<ElementId>, class: &str) -> Vec<ElementId> {
        self.order
            .iter()
            .copied()
            .filter(|&id| within.is_none_or(|root| self.is_descendant(id, root)))
            .filter(|&id| self.has_class(id, class))
            .collect()
    }

    pub fn first_class(&self, within: ElementId, class: &str) -> Option<ElementId> {
        self.query_class(Some(within), class).into_iter().next()
    }

    /// Every element carrying attribute `name`, in document order.
    pub fn query_attr(&self, name: &str) -> Vec<ElementId> {
        self.order
            .iter()
            .copied()
            .filter(|&id| self.has_attr(id, name))
            .collect()
    }
}

impl ViewportGeometry for Document {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn rect(&self, id: ElementId) -> Option<Rect> {
        self.nodes.get(&id).and_then(|n| n.def.rect)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/markup/document.rs"]
mod tests;
