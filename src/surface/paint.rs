use std::fmt;

use crate::foundation::core::ElementId;

/// Positional offset applied to an element.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transform {
    None,
    /// Vertical offset in px.
    TranslateY { px: f64 },
    /// Horizontal offset as a percentage of the element's own width.
    TranslateXPercent { pct: f64 },
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::TranslateY { px } => write!(f, "translate3d(0, {px}px, 0)"),
            Self::TranslateXPercent { pct } => write!(f, "translateX({pct}%)"),
        }
    }
}

/// One visual mutation. The render step of every subsystem produces these; nothing in the
/// crate touches a display surface directly.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Patch {
    Class { name: String, on: bool },
    Opacity { value: f64 },
    Transform { value: Transform },
    Transition { css: String },
    AriaHidden { hidden: bool },
    TabIndex { index: i32 },
    Text { text: String },
    WidthPercent { pct: f64 },
    AppendChild {
        child: ElementId,
        class: String,
        label: String,
    },
}

impl fmt::Display for Patch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class { name, on: true } => write!(f, "class +{name}"),
            Self::Class { name, on: false } => write!(f, "class -{name}"),
            Self::Opacity { value } => write!(f, "opacity: {value}"),
            Self::Transform { value } => write!(f, "transform: {value}"),
            Self::Transition { css } => write!(f, "transition: {css}"),
            Self::AriaHidden { hidden } => write!(f, "aria-hidden={hidden}"),
            Self::TabIndex { index } => write!(f, "tabindex={index}"),
            Self::Text { text } => write!(f, "text {text:?}"),
            Self::WidthPercent { pct } => write!(f, "width: {pct}%"),
            Self::AppendChild {
                child,
                class,
                label,
            } => write!(f, "append {child} .{class} {label:?}"),
        }
    }
}

/// A patch addressed to one element.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Paint {
    pub target: ElementId,
    pub patch: Patch,
}

impl Paint {
    pub fn class(target: ElementId, name: &str, on: bool) -> Self {
        Self {
            target,
            patch: Patch::Class {
                name: name.to_owned(),
                on,
            },
        }
    }

    pub fn opacity(target: ElementId, value: f64) -> Self {
        Self {
            target,
            patch: Patch::Opacity { value },
        }
    }

    pub fn transform(target: ElementId, value: Transform) -> Self {
        Self {
            target,
            patch: Patch::Transform { value },
        }
    }

    pub fn text(target: ElementId, text: String) -> Self {
        Self {
            target,
            patch: Patch::Text { text },
        }
    }

    pub fn aria_hidden(target: ElementId, hidden: bool) -> Self {
        Self {
            target,
            patch: Patch::AriaHidden { hidden },
        }
    }

    pub fn with_patch(target: ElementId, patch: Patch) -> Self {
        Self { target, patch }
    }
}

impl fmt::Display for Paint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.target, self.patch)
    }
}
