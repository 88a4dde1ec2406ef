//! Transient pointer-hover effects: card lift, button ripple, image zoom.

use vitae_protocol::{
    DomCommand, ElementTag, HoverMarkup, Length, NodeId, Point, Rect, StyleProperty,
    ThemeToken, TimingFunction, Transform, Transition, TransitionProperty,
};

use super::NodeAllocator;
use crate::config::HoverConfig;

#[derive(Debug, Clone)]
pub struct Hover {
    cards: Vec<NodeId>,
    buttons: Vec<NodeId>,
    images: Vec<NodeId>,
    config: HoverConfig,
}

impl Hover {
    pub fn new(markup: &HoverMarkup, config: HoverConfig) -> Self {
        Self {
            cards: markup.cards.clone(),
            buttons: markup.buttons.clone(),
            images: markup.images.clone(),
            config,
        }
    }

    /// Pointer entered `node`. Returns a ripple element that must be
    /// removed after [`HoverConfig::ripple_ms`].
    pub fn on_enter(
        &self,
        node: NodeId,
        pointer: Point,
        bounds: Rect,
        alloc: &mut NodeAllocator,
        out: &mut Vec<DomCommand>,
    ) -> Option<NodeId> {
        if self.cards.contains(&node) {
            out.push(DomCommand::SetTransition {
                node,
                transition: Transition::all(self.config.card_transition_ms, TimingFunction::Standard),
            });
            out.push(DomCommand::SetTransform {
                node,
                transform: Transform::Lift {
                    y: -self.config.card_lift_px,
                    factor: self.config.card_scale,
                },
            });
            out.push(DomCommand::SetShadow {
                node,
                color: ThemeToken::CardShadowRaised,
                offset_y: 20.0,
                blur: 40.0,
            });
        }
        if self.images.contains(&node) {
            out.push(DomCommand::SetTransform {
                node,
                transform: Transform::Scale {
                    factor: self.config.image_scale,
                },
            });
            out.push(DomCommand::SetTransition {
                node,
                transition: Transition {
                    property: TransitionProperty::Transform,
                    duration_ms: self.config.image_transition_ms,
                    timing: TimingFunction::Ease,
                },
            });
        }
        if self.buttons.contains(&node) {
            return Some(Self::ripple(node, pointer, bounds, alloc, out));
        }
        None
    }

    pub fn on_leave(&self, node: NodeId, out: &mut Vec<DomCommand>) {
        if self.cards.contains(&node) {
            out.push(DomCommand::SetTransform {
                node,
                transform: Transform::Lift { y: 0.0, factor: 1.0 },
            });
            out.push(DomCommand::SetShadow {
                node,
                color: ThemeToken::CardShadowResting,
                offset_y: 10.0,
                blur: 30.0,
            });
        }
        if self.images.contains(&node) {
            out.push(DomCommand::SetTransform {
                node,
                transform: Transform::Scale { factor: 1.0 },
            });
        }
    }

    fn ripple(
        button: NodeId,
        pointer: Point,
        bounds: Rect,
        alloc: &mut NodeAllocator,
        out: &mut Vec<DomCommand>,
    ) -> NodeId {
        let node = alloc.alloc();
        let size = bounds.w.max(bounds.h);
        let left = pointer.x - bounds.x - size / 2.0;
        let top = pointer.y - bounds.y - size / 2.0;
        out.push(DomCommand::CreateElement {
            node,
            parent: Some(button),
            tag: ElementTag::Span,
            class: "ripple".into(),
            text: None,
        });
        for (property, value) in [
            (StyleProperty::Width, Length::Px(size)),
            (StyleProperty::Height, Length::Px(size)),
            (StyleProperty::Left, Length::Px(left)),
            (StyleProperty::Top, Length::Px(top)),
        ] {
            out.push(DomCommand::SetStyle {
                node,
                property,
                value: value.to_string().into(),
            });
        }
        out.push(DomCommand::SetStyle {
            node,
            property: StyleProperty::BorderRadius,
            value: "50%".into(),
        });
        out.push(DomCommand::SetBackground {
            node,
            color: ThemeToken::RippleFill,
        });
        node
    }
}

pub fn remove_ripple(node: NodeId, out: &mut Vec<DomCommand>) {
    out.push(DomCommand::RemoveElement { node });
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD: NodeId = NodeId(1);
    const BUTTON: NodeId = NodeId(2);
    const IMAGE: NodeId = NodeId(3);

    fn hover() -> Hover {
        Hover::new(
            &HoverMarkup {
                cards: vec![CARD],
                buttons: vec![BUTTON],
                images: vec![IMAGE],
            },
            HoverConfig::default(),
        )
    }

    #[test]
    fn card_lifts_and_settles() {
        let hover = hover();
        let mut alloc = NodeAllocator::default();
        let mut out = Vec::new();
        let ripple = hover.on_enter(CARD, Point::default(), Rect::default(), &mut alloc, &mut out);
        assert_eq!(ripple, None);
        assert!(out.contains(&DomCommand::SetTransform {
            node: CARD,
            transform: Transform::Lift {
                y: -10.0,
                factor: 1.02
            }
        }));

        out.clear();
        hover.on_leave(CARD, &mut out);
        assert_eq!(
            out[1],
            DomCommand::SetShadow {
                node: CARD,
                color: ThemeToken::CardShadowResting,
                offset_y: 10.0,
                blur: 30.0
            }
        );
    }

    #[test]
    fn ripple_is_centered_on_pointer() {
        let hover = hover();
        let mut alloc = NodeAllocator::default();
        let mut out = Vec::new();
        let bounds = Rect::new(100.0, 50.0, 120.0, 40.0);
        let ripple = hover
            .on_enter(BUTTON, Point::new(130.0, 60.0), bounds, &mut alloc, &mut out)
            .expect("buttons ripple");
        assert!(ripple.is_dynamic());
        assert!(matches!(
            out[0],
            DomCommand::CreateElement {
                parent: Some(BUTTON),
                tag: ElementTag::Span,
                ..
            }
        ));
        // size 120; left = 130 - 100 - 60, top = 60 - 50 - 60
        assert!(out.contains(&DomCommand::SetStyle {
            node: ripple,
            property: StyleProperty::Left,
            value: "-30px".into()
        }));
        assert!(out.contains(&DomCommand::SetStyle {
            node: ripple,
            property: StyleProperty::Top,
            value: "-50px".into()
        }));
        assert!(out.contains(&DomCommand::SetStyle {
            node: ripple,
            property: StyleProperty::Width,
            value: "120px".into()
        }));
    }

    #[test]
    fn image_zooms() {
        let hover = hover();
        let mut alloc = NodeAllocator::default();
        let mut out = Vec::new();
        hover.on_enter(IMAGE, Point::default(), Rect::default(), &mut alloc, &mut out);
        hover.on_leave(IMAGE, &mut out);
        assert_eq!(
            out.iter()
                .filter_map(|c| match c {
                    DomCommand::SetTransform { transform, .. } => Some(transform.to_string()),
                    _ => None,
                })
                .collect::<Vec<_>>(),
            ["scale(1.1)", "scale(1)"]
        );
    }
}
