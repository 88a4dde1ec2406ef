//! One-shot entrance animations for `[data-aos]` elements.

use log::debug;
use vitae_protocol::{DomCommand, NodeId, RevealMarkup, TimingFunction, Transition};

use crate::config::RevealConfig;
use crate::model::RevealRule;
use crate::util::geometry::intersection_ratio;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    Pending,
    Scheduled,
    Visible,
}

#[derive(Debug, Clone)]
pub struct RevealCoordinator {
    rules: Vec<RevealRule>,
    states: Vec<RevealState>,
    config: RevealConfig,
}

impl RevealCoordinator {
    pub fn new(markup: &[RevealMarkup], config: RevealConfig) -> Self {
        let rules: Vec<RevealRule> = markup
            .iter()
            .map(|m| RevealRule::from_markup(m, &config))
            .collect();
        Self {
            states: vec![RevealState::Pending; rules.len()],
            rules,
            config,
        }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn state(&self, node: NodeId) -> Option<RevealState> {
        self.position(node).map(|i| self.states[i])
    }

    /// Hide every element and start observing it.
    pub fn mount(&self, out: &mut Vec<DomCommand>) {
        for rule in &self.rules {
            out.push(DomCommand::SetOpacity {
                node: rule.node,
                opacity: 0.0,
            });
            out.push(DomCommand::SetTransform {
                node: rule.node,
                transform: rule.kind.hidden_transform(),
            });
            out.push(DomCommand::Observe {
                node: rule.node,
                threshold: self.config.threshold,
                root_margin_bottom: self.config.root_margin_bottom,
            });
        }
        debug!("reveal: observing {} elements", self.rules.len());
    }

    /// The element became visible. Returns the delay before [`Self::apply`]
    /// should run, or `None` if it was already scheduled or shown.
    pub fn on_visible(&mut self, node: NodeId) -> Option<f64> {
        let i = self.position(node)?;
        if self.states[i] != RevealState::Pending {
            return None;
        }
        self.states[i] = RevealState::Scheduled;
        Some(self.rules[i].delay_ms)
    }

    /// Visibility from document geometry, for hosts without an
    /// intersection observer. Returns the newly scheduled elements with
    /// their delays.
    pub fn on_scroll_geometry(&mut self, scroll_y: f64, viewport_height: f64) -> Vec<(NodeId, f64)> {
        let mut scheduled = Vec::new();
        for (rule, state) in self.rules.iter().zip(self.states.iter_mut()) {
            let Some(bounds) = rule.bounds else {
                continue;
            };
            if *state != RevealState::Pending {
                continue;
            }
            let ratio = intersection_ratio(
                bounds,
                scroll_y,
                viewport_height,
                self.config.root_margin_bottom,
            );
            if ratio > 0.0 && ratio >= self.config.threshold {
                *state = RevealState::Scheduled;
                scheduled.push((rule.node, rule.delay_ms));
            }
        }
        scheduled
    }

    /// Run the entrance transition. Returns `false` unless the element was
    /// scheduled.
    pub fn apply(&mut self, node: NodeId, out: &mut Vec<DomCommand>) -> bool {
        let Some(i) = self.position(node) else {
            return false;
        };
        if self.states[i] != RevealState::Scheduled {
            return false;
        }
        self.states[i] = RevealState::Visible;
        let rule = &self.rules[i];
        out.push(DomCommand::SetTransition {
            node,
            transition: Transition::all(rule.duration_ms, TimingFunction::Standard),
        });
        out.push(DomCommand::SetOpacity { node, opacity: 1.0 });
        out.push(DomCommand::SetTransform {
            node,
            transform: rule.kind.shown_transform(),
        });
        out.push(DomCommand::AddClass {
            node,
            class: "aos-animate".into(),
        });
        out.push(DomCommand::Unobserve { node });
        true
    }

    fn position(&self, node: NodeId) -> Option<usize> {
        self.rules.iter().position(|r| r.node == node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitae_protocol::{Bounds, Transform};

    fn markup(node: u32, kind: &str, delay: Option<&str>, bounds: Option<Bounds>) -> RevealMarkup {
        RevealMarkup {
            node: NodeId(node),
            kind: Some(kind.into()),
            delay: delay.map(String::from),
            duration: None,
            bounds,
        }
    }

    #[test]
    fn mount_hides_and_observes() {
        let coord = RevealCoordinator::new(
            &[markup(1, "fade-left", None, None)],
            RevealConfig::default(),
        );
        let mut out = Vec::new();
        coord.mount(&mut out);
        assert_eq!(
            out,
            vec![
                DomCommand::SetOpacity {
                    node: NodeId(1),
                    opacity: 0.0
                },
                DomCommand::SetTransform {
                    node: NodeId(1),
                    transform: Transform::translate_x_px(30.0)
                },
                DomCommand::Observe {
                    node: NodeId(1),
                    threshold: 0.1,
                    root_margin_bottom: -100.0
                },
            ]
        );
    }

    #[test]
    fn reveals_exactly_once() {
        let mut coord = RevealCoordinator::new(
            &[markup(1, "zoom-in", Some("200"), None)],
            RevealConfig::default(),
        );
        assert_eq!(coord.on_visible(NodeId(1)), Some(200.0));
        assert_eq!(coord.on_visible(NodeId(1)), None);

        let mut out = Vec::new();
        assert!(coord.apply(NodeId(1), &mut out));
        assert_eq!(out.len(), 5);
        assert_eq!(
            out[0],
            DomCommand::SetTransition {
                node: NodeId(1),
                transition: Transition::all(600.0, TimingFunction::Standard)
            }
        );
        assert!(out.contains(&DomCommand::Unobserve { node: NodeId(1) }));

        out.clear();
        assert!(!coord.apply(NodeId(1), &mut out));
        assert_eq!(coord.on_visible(NodeId(1)), None);
        assert!(out.is_empty());
        assert_eq!(coord.state(NodeId(1)), Some(RevealState::Visible));
    }

    #[test]
    fn apply_requires_visibility_first() {
        let mut coord =
            RevealCoordinator::new(&[markup(1, "fade-up", None, None)], RevealConfig::default());
        let mut out = Vec::new();
        assert!(!coord.apply(NodeId(1), &mut out));
        assert!(!coord.apply(NodeId(99), &mut out));
        assert_eq!(coord.state(NodeId(1)), Some(RevealState::Pending));
    }

    #[test]
    fn geometry_fallback_uses_shrunk_viewport() {
        let mut coord = RevealCoordinator::new(
            &[
                markup(1, "fade-up", None, Some(Bounds::new(1000.0, 200.0))),
                markup(2, "fade-up", None, None),
            ],
            RevealConfig::default(),
        );
        // 100..900 shrinks to 100..800: not reached yet.
        assert!(coord.on_scroll_geometry(100.0, 800.0).is_empty());
        // 500..1300 shrinks to 500..1200, which holds the whole element.
        assert_eq!(coord.on_scroll_geometry(500.0, 800.0), vec![(NodeId(1), 0.0)]);
        assert!(coord.on_scroll_geometry(600.0, 800.0).is_empty());
    }
}
