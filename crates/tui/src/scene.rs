//! A stand-in for the DOM: keeps whatever state the page's commands set so
//! the renderer can draw it.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use vitae_protocol::{DomCommand, NodeId, Point, Size, StyleProperty, ThemeToken};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub color: ThemeToken,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
    pub alpha: f64,
}

#[derive(Debug, Default)]
pub struct Scene {
    texts: HashMap<NodeId, String>,
    classes: HashMap<NodeId, BTreeSet<String>>,
    styles: HashMap<(NodeId, StyleProperty), String>,
    opacity: HashMap<NodeId, f64>,
    backgrounds: HashMap<NodeId, ThemeToken>,
    disabled: HashSet<NodeId>,
    /// Elements the page created, with their class list.
    created: BTreeMap<NodeId, String>,
    pub canvas_size: Option<Size>,
    pub circles: Vec<Circle>,
    pub lines: Vec<Segment>,
    pub scroll_locked: bool,
    pending_scroll: Option<(f64, bool)>,
    pending_urls: Vec<String>,
}

impl Scene {
    pub fn apply_all(&mut self, commands: &[DomCommand]) {
        for cmd in commands {
            self.apply(cmd);
        }
    }

    pub fn apply(&mut self, cmd: &DomCommand) {
        match cmd {
            DomCommand::SetText { node, text } => {
                self.texts.insert(*node, text.to_string());
            }
            DomCommand::AddClass { node, class } => {
                self.classes
                    .entry(*node)
                    .or_default()
                    .insert(class.to_string());
            }
            DomCommand::RemoveClass { node, class } => {
                if let Some(set) = self.classes.get_mut(node) {
                    set.remove(class.as_str());
                }
            }
            DomCommand::SetStyle {
                node,
                property,
                value,
            } => {
                self.styles.insert((*node, *property), value.to_string());
            }
            DomCommand::SetOpacity { node, opacity } => {
                self.opacity.insert(*node, *opacity);
            }
            DomCommand::SetBackground { node, color } => {
                self.backgrounds.insert(*node, *color);
            }
            DomCommand::SetDisabled { node, disabled } => {
                if *disabled {
                    self.disabled.insert(*node);
                } else {
                    self.disabled.remove(node);
                }
            }
            DomCommand::CreateElement {
                node, class, text, ..
            } => {
                self.created.insert(*node, class.to_string());
                if let Some(text) = text {
                    self.texts.insert(*node, text.to_string());
                }
            }
            DomCommand::RemoveElement { node } => self.forget(*node),
            DomCommand::ResetForm { .. } => {}
            DomCommand::ScrollTo { top, smooth } => self.pending_scroll = Some((*top, *smooth)),
            DomCommand::LockScroll { locked } => self.scroll_locked = *locked,
            DomCommand::OpenUrl { href } => self.pending_urls.push(href.to_string()),
            DomCommand::ResizeCanvas { size, .. } => self.canvas_size = Some(*size),
            DomCommand::ClearCanvas { .. } => {
                self.circles.clear();
                self.lines.clear();
            }
            DomCommand::FillCircle { center, color, .. } => self.circles.push(Circle {
                center: *center,
                color: *color,
            }),
            DomCommand::StrokeLine { from, to, alpha, .. } => self.lines.push(Segment {
                from: *from,
                to: *to,
                alpha: *alpha,
            }),
            // Transitions, transforms, shadows, outlines and observers have
            // no terminal equivalent.
            DomCommand::SetTransform { .. }
            | DomCommand::SetTransition { .. }
            | DomCommand::SetShadow { .. }
            | DomCommand::SetOutline { .. }
            | DomCommand::SetAttribute { .. }
            | DomCommand::Focus { .. }
            | DomCommand::Observe { .. }
            | DomCommand::Unobserve { .. }
            | DomCommand::DisconnectObservers
            | DomCommand::StopFrames
            | DomCommand::Deliver { .. } => {}
        }
    }

    fn forget(&mut self, node: NodeId) {
        self.created.remove(&node);
        self.texts.remove(&node);
        self.classes.remove(&node);
        self.opacity.remove(&node);
        self.backgrounds.remove(&node);
        self.styles.retain(|(n, _), _| *n != node);
    }

    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.texts.get(&node).map(String::as_str)
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.classes.get(&node).is_some_and(|set| set.contains(class))
    }

    pub fn style(&self, node: NodeId, property: StyleProperty) -> Option<&str> {
        self.styles.get(&(node, property)).map(String::as_str)
    }

    /// Fully opaque unless a command said otherwise.
    pub fn opacity(&self, node: NodeId) -> f64 {
        self.opacity.get(&node).copied().unwrap_or(1.0)
    }

    pub fn is_disabled(&self, node: NodeId) -> bool {
        self.disabled.contains(&node)
    }

    /// Toasts currently in the document, oldest first.
    pub fn toasts(&self) -> impl Iterator<Item = (&str, Option<ThemeToken>)> {
        self.created
            .iter()
            .filter(|(_, class)| class.starts_with("notification"))
            .map(|(node, _)| {
                (
                    self.text(*node).unwrap_or_default(),
                    self.backgrounds.get(node).copied(),
                )
            })
    }

    /// Floating shapes as `(left %, top %)`.
    pub fn floating_shapes(&self) -> Vec<(f64, f64)> {
        self.created
            .iter()
            .filter(|(_, class)| class.starts_with("floating-element"))
            .filter_map(|(node, _)| {
                let left = percent(self.style(*node, StyleProperty::Left)?)?;
                let top = percent(self.style(*node, StyleProperty::Top)?)?;
                Some((left, top))
            })
            .collect()
    }

    pub fn take_scroll_request(&mut self) -> Option<(f64, bool)> {
        self.pending_scroll.take()
    }

    pub fn take_opened_urls(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending_urls)
    }
}

/// `"42.5%"` -> `42.5`.
pub fn percent(value: &str) -> Option<f64> {
    value.trim().strip_suffix('%')?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitae_protocol::ElementTag;

    const TOAST: NodeId = NodeId(1_000_001);

    #[test]
    fn toasts_appear_and_disappear() {
        let mut scene = Scene::default();
        scene.apply_all(&[
            DomCommand::CreateElement {
                node: TOAST,
                parent: None,
                tag: ElementTag::Div,
                class: "notification notification-error".into(),
                text: Some("Name is required".into()),
            },
            DomCommand::SetBackground {
                node: TOAST,
                color: ThemeToken::ToastError,
            },
        ]);
        assert_eq!(
            scene.toasts().collect::<Vec<_>>(),
            vec![("Name is required", Some(ThemeToken::ToastError))]
        );

        scene.apply(&DomCommand::RemoveElement { node: TOAST });
        assert_eq!(scene.toasts().count(), 0);
        assert_eq!(scene.text(TOAST), None);
    }

    #[test]
    fn classes_and_disabled_flags_track_commands() {
        let node = NodeId(4);
        let mut scene = Scene::default();
        scene.apply(&DomCommand::AddClass {
            node,
            class: "active".into(),
        });
        scene.apply(&DomCommand::SetDisabled {
            node,
            disabled: true,
        });
        assert!(scene.has_class(node, "active"));
        assert!(scene.is_disabled(node));

        scene.apply(&DomCommand::RemoveClass {
            node,
            class: "active".into(),
        });
        scene.apply(&DomCommand::SetDisabled {
            node,
            disabled: false,
        });
        assert!(!scene.has_class(node, "active"));
        assert!(!scene.is_disabled(node));
    }

    #[test]
    fn canvas_clears_between_frames() {
        let canvas = NodeId(1_000_000);
        let mut scene = Scene::default();
        scene.apply(&DomCommand::FillCircle {
            node: canvas,
            center: Point::new(1.0, 2.0),
            radius: 2.0,
            color: ThemeToken::ParticleFill,
            alpha: 0.5,
        });
        assert_eq!(scene.circles.len(), 1);
        scene.apply(&DomCommand::ClearCanvas { node: canvas });
        assert!(scene.circles.is_empty());
    }

    #[test]
    fn scroll_requests_are_taken_once() {
        let mut scene = Scene::default();
        scene.apply(&DomCommand::ScrollTo {
            top: 730.0,
            smooth: true,
        });
        assert_eq!(scene.take_scroll_request(), Some((730.0, true)));
        assert_eq!(scene.take_scroll_request(), None);
    }

    #[test]
    fn parses_percent_styles() {
        assert_eq!(percent("42.5%"), Some(42.5));
        assert_eq!(percent("12px"), None);
    }
}
