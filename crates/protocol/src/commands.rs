use std::fmt;

use serde::{Deserialize, Serialize};

use crate::form::ContactFields;
use crate::shared_str::SharedStr;
use crate::theme::ThemeToken;
use crate::types::{NodeId, Point, Size};

/// A single, stateless DOM instruction.
///
/// The core emits a `Vec<DomCommand>` for every event, timer, or frame it
/// processes. Hosts apply the list sequentially; each command carries all
/// the data it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum DomCommand {
    /// Replace the element's text content.
    SetText { node: NodeId, text: SharedStr },

    AddClass { node: NodeId, class: SharedStr },
    RemoveClass { node: NodeId, class: SharedStr },

    /// Set an inline style property to a preformatted CSS value.
    SetStyle {
        node: NodeId,
        property: StyleProperty,
        value: SharedStr,
    },

    SetOpacity { node: NodeId, opacity: f64 },
    SetTransform { node: NodeId, transform: Transform },
    SetTransition { node: NodeId, transition: Transition },

    /// Drop shadow `0 <offset_y>px <blur>px <color>`.
    SetShadow {
        node: NodeId,
        color: ThemeToken,
        offset_y: f64,
        blur: f64,
    },

    SetBackground { node: NodeId, color: ThemeToken },

    /// Focus outline; `None` removes it.
    SetOutline {
        node: NodeId,
        color: Option<ThemeToken>,
        width: f64,
        offset: f64,
    },

    SetAttribute {
        node: NodeId,
        name: SharedStr,
        value: SharedStr,
    },

    SetDisabled { node: NodeId, disabled: bool },
    Focus { node: NodeId },
    ResetForm { node: NodeId },

    /// Create an element. `parent: None` appends to `<body>`.
    CreateElement {
        node: NodeId,
        parent: Option<NodeId>,
        tag: ElementTag,
        class: SharedStr,
        text: Option<SharedStr>,
    },

    RemoveElement { node: NodeId },

    /// Start reporting visibility changes for an element.
    Observe {
        node: NodeId,
        threshold: f64,
        /// Bottom root margin in pixels (negative shrinks the viewport).
        root_margin_bottom: f64,
    },
    Unobserve { node: NodeId },
    DisconnectObservers,

    ScrollTo { top: f64, smooth: bool },

    /// Lock or restore `<body>` scrolling (used while a modal is open).
    LockScroll { locked: bool },

    /// Open a URL in a new browsing context.
    OpenUrl { href: SharedStr },

    /// Hand a validated contact form to the host for delivery. The host
    /// answers with `PageEvent::SubmitSettled`.
    Deliver { fields: ContactFields },

    ResizeCanvas { node: NodeId, size: Size },
    ClearCanvas { node: NodeId },
    FillCircle {
        node: NodeId,
        center: Point,
        radius: f64,
        color: ThemeToken,
        alpha: f64,
    },
    StrokeLine {
        node: NodeId,
        from: Point,
        to: Point,
        color: ThemeToken,
        alpha: f64,
        width: f64,
    },

    /// No more animation frames are needed.
    StopFrames,
}

impl DomCommand {
    /// The element this command addresses, if any.
    pub fn node(&self) -> Option<NodeId> {
        use DomCommand::*;
        match self {
            SetText { node, .. }
            | AddClass { node, .. }
            | RemoveClass { node, .. }
            | SetStyle { node, .. }
            | SetOpacity { node, .. }
            | SetTransform { node, .. }
            | SetTransition { node, .. }
            | SetShadow { node, .. }
            | SetBackground { node, .. }
            | SetOutline { node, .. }
            | SetAttribute { node, .. }
            | SetDisabled { node, .. }
            | Focus { node }
            | ResetForm { node }
            | CreateElement { node, .. }
            | RemoveElement { node }
            | Observe { node, .. }
            | Unobserve { node }
            | ResizeCanvas { node, .. }
            | ClearCanvas { node }
            | FillCircle { node, .. }
            | StrokeLine { node, .. } => Some(*node),
            DisconnectObservers
            | ScrollTo { .. }
            | LockScroll { .. }
            | OpenUrl { .. }
            | Deliver { .. }
            | StopFrames => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementTag {
    Div,
    Span,
    Canvas,
}

impl ElementTag {
    pub fn as_str(self) -> &'static str {
        match self {
            ElementTag::Div => "div",
            ElementTag::Span => "span",
            ElementTag::Canvas => "canvas",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleProperty {
    Display,
    Left,
    Top,
    Width,
    Height,
    BorderRadius,
    /// The `--skill-width` custom property read by the skill bar stylesheet.
    SkillWidth,
}

impl StyleProperty {
    pub fn css_name(self) -> &'static str {
        match self {
            StyleProperty::Display => "display",
            StyleProperty::Left => "left",
            StyleProperty::Top => "top",
            StyleProperty::Width => "width",
            StyleProperty::Height => "height",
            StyleProperty::BorderRadius => "border-radius",
            StyleProperty::SkillWidth => "--skill-width",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", content = "value", rename_all = "kebab-case")]
pub enum Length {
    Px(f64),
    Percent(f64),
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Px(v) => write!(f, "{v}px"),
            Length::Percent(v) => write!(f, "{v}%"),
        }
    }
}

/// CSS transform. `Display` renders the `transform:` value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Transform {
    TranslateX { by: Length },
    TranslateY { by: Length },
    Scale { factor: f64 },
    RotateY { degrees: f64 },
    /// `translateY(..) scale(..)`, used by the card hover lift.
    Lift { y: f64, factor: f64 },
}

impl Transform {
    pub fn translate_x_px(px: f64) -> Self {
        Transform::TranslateX { by: Length::Px(px) }
    }

    pub fn translate_y_px(px: f64) -> Self {
        Transform::TranslateY { by: Length::Px(px) }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::TranslateX { by } => write!(f, "translateX({by})"),
            Transform::TranslateY { by } => write!(f, "translateY({by})"),
            Transform::Scale { factor } => write!(f, "scale({factor})"),
            Transform::RotateY { degrees } => write!(f, "rotateY({degrees}deg)"),
            Transform::Lift { y, factor } => write!(f, "translateY({y}px) scale({factor})"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransitionProperty {
    All,
    Transform,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimingFunction {
    /// `cubic-bezier(0.4, 0, 0.2, 1)`
    Standard,
    Ease,
    Linear,
}

impl fmt::Display for TimingFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimingFunction::Standard => f.write_str("cubic-bezier(0.4, 0, 0.2, 1)"),
            TimingFunction::Ease => f.write_str("ease"),
            TimingFunction::Linear => f.write_str("linear"),
        }
    }
}

/// CSS transition. `Display` renders the `transition:` value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub property: TransitionProperty,
    pub duration_ms: f64,
    pub timing: TimingFunction,
}

impl Transition {
    pub fn all(duration_ms: f64, timing: TimingFunction) -> Self {
        Self {
            property: TransitionProperty::All,
            duration_ms,
            timing,
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let property = match self.property {
            TransitionProperty::All => "all",
            TransitionProperty::Transform => "transform",
        };
        write!(f, "{property} {}ms {}", self.duration_ms, self.timing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transforms_render_as_css() {
        assert_eq!(Transform::translate_y_px(30.0).to_string(), "translateY(30px)");
        assert_eq!(
            Transform::TranslateX {
                by: Length::Percent(100.0)
            }
            .to_string(),
            "translateX(100%)"
        );
        assert_eq!(Transform::Scale { factor: 0.8 }.to_string(), "scale(0.8)");
        assert_eq!(Transform::RotateY { degrees: 90.0 }.to_string(), "rotateY(90deg)");
        assert_eq!(
            Transform::Lift {
                y: -10.0,
                factor: 1.02
            }
            .to_string(),
            "translateY(-10px) scale(1.02)"
        );
    }

    #[test]
    fn transition_renders_as_css() {
        let t = Transition::all(600.0, TimingFunction::Standard);
        assert_eq!(t.to_string(), "all 600ms cubic-bezier(0.4, 0, 0.2, 1)");
    }

    #[test]
    fn commands_are_tagged_by_op() {
        let cmd = DomCommand::SetText {
            node: NodeId(4),
            text: "Hi".into(),
        };
        let json = serde_json::to_string(&cmd).unwrap_or_default();
        assert_eq!(json, r#"{"op":"set-text","node":4,"text":"Hi"}"#);
    }

    #[test]
    fn node_accessor() {
        assert_eq!(DomCommand::Focus { node: NodeId(2) }.node(), Some(NodeId(2)));
        assert_eq!(DomCommand::StopFrames.node(), None);
    }
}
