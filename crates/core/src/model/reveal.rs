use vitae_protocol::{Bounds, NodeId, RevealMarkup, Transform};

use crate::config::RevealConfig;

/// Entrance animation named by `data-aos`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealKind {
    #[default]
    FadeUp,
    FadeDown,
    FadeLeft,
    FadeRight,
    ZoomIn,
    FlipLeft,
    SlideUp,
}

impl RevealKind {
    pub fn from_attr(value: &str) -> Option<Self> {
        Some(match value.trim() {
            "fade-up" => RevealKind::FadeUp,
            "fade-down" => RevealKind::FadeDown,
            "fade-left" => RevealKind::FadeLeft,
            "fade-right" => RevealKind::FadeRight,
            "zoom-in" => RevealKind::ZoomIn,
            "flip-left" => RevealKind::FlipLeft,
            "slide-up" => RevealKind::SlideUp,
            _ => return None,
        })
    }

    /// Transform applied before the element is revealed.
    pub fn hidden_transform(self) -> Transform {
        match self {
            RevealKind::FadeUp => Transform::translate_y_px(30.0),
            RevealKind::FadeDown => Transform::translate_y_px(-30.0),
            RevealKind::FadeLeft => Transform::translate_x_px(30.0),
            RevealKind::FadeRight => Transform::translate_x_px(-30.0),
            RevealKind::ZoomIn => Transform::Scale { factor: 0.8 },
            RevealKind::FlipLeft => Transform::RotateY { degrees: 90.0 },
            RevealKind::SlideUp => Transform::translate_y_px(100.0),
        }
    }

    /// The identity transform on the same axis as [`Self::hidden_transform`].
    pub fn shown_transform(self) -> Transform {
        match self {
            RevealKind::FadeUp | RevealKind::FadeDown | RevealKind::SlideUp => {
                Transform::translate_y_px(0.0)
            }
            RevealKind::FadeLeft | RevealKind::FadeRight => Transform::translate_x_px(0.0),
            RevealKind::ZoomIn => Transform::Scale { factor: 1.0 },
            RevealKind::FlipLeft => Transform::RotateY { degrees: 0.0 },
        }
    }
}

/// How one element enters the page. Built once at mount, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealRule {
    pub node: NodeId,
    pub kind: RevealKind,
    pub delay_ms: f64,
    pub duration_ms: f64,
    pub bounds: Option<Bounds>,
}

impl RevealRule {
    /// Unknown kinds fall back to [`RevealKind::FadeUp`]; a missing or
    /// unparseable delay is zero and a missing duration uses the config.
    pub fn from_markup(markup: &RevealMarkup, config: &RevealConfig) -> Self {
        Self {
            node: markup.node,
            kind: markup
                .kind
                .as_deref()
                .and_then(RevealKind::from_attr)
                .unwrap_or_default(),
            delay_ms: parse_millis(markup.delay.as_deref()).unwrap_or(0.0),
            duration_ms: parse_millis(markup.duration.as_deref()).unwrap_or(config.duration_ms),
            bounds: markup.bounds,
        }
    }
}

/// Parse a non-negative millisecond attribute such as `"200"`.
pub(crate) fn parse_millis(raw: Option<&str>) -> Option<f64> {
    raw?.trim()
        .parse::<f64>()
        .ok()
        .filter(|ms| ms.is_finite() && *ms >= 0.0)
}
