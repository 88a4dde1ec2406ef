use vitae_protocol::{DomCommand, NodeId, TimingFunction, Transform, Transition};

use crate::config::IntroConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroStep {
    HeroItem(usize),
    Navbar,
}

/// Page-load entrance of the hero text and the navbar.
#[derive(Debug, Clone)]
pub struct Intro {
    hero_items: Vec<NodeId>,
    navbar: Option<NodeId>,
    config: IntroConfig,
    played: bool,
}

impl Intro {
    pub fn new(hero_items: Vec<NodeId>, navbar: Option<NodeId>, config: IntroConfig) -> Self {
        Self {
            hero_items,
            navbar,
            config,
            played: false,
        }
    }

    fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.hero_items.iter().copied().chain(self.navbar)
    }

    /// Start every intro element hidden and pushed down.
    pub fn mount(&self, out: &mut Vec<DomCommand>) {
        for node in self.nodes() {
            out.push(DomCommand::SetOpacity { node, opacity: 0.0 });
            out.push(DomCommand::SetTransform {
                node,
                transform: Transform::translate_y_px(self.config.hidden_offset_px),
            });
        }
    }

    /// The page finished loading. Returns the steps to run and their delays;
    /// empty after the first call.
    pub fn on_loaded(&mut self) -> Vec<(IntroStep, f64)> {
        if self.played {
            return Vec::new();
        }
        self.played = true;
        let mut steps: Vec<(IntroStep, f64)> = (0..self.hero_items.len())
            .map(|i| (IntroStep::HeroItem(i), i as f64 * self.config.stagger_ms))
            .collect();
        if self.navbar.is_some() {
            steps.push((IntroStep::Navbar, self.config.navbar_delay_ms));
        }
        steps
    }

    pub fn run(&self, step: IntroStep, out: &mut Vec<DomCommand>) {
        let (node, transition) = match step {
            IntroStep::HeroItem(i) => match self.hero_items.get(i) {
                Some(&node) => (
                    node,
                    Transition::all(self.config.item_transition_ms, TimingFunction::Standard),
                ),
                None => return,
            },
            IntroStep::Navbar => match self.navbar {
                Some(node) => (
                    node,
                    Transition::all(self.config.navbar_transition_ms, TimingFunction::Ease),
                ),
                None => return,
            },
        };
        out.push(DomCommand::SetOpacity { node, opacity: 1.0 });
        out.push(DomCommand::SetTransform {
            node,
            transform: Transform::translate_y_px(0.0),
        });
        out.push(DomCommand::SetTransition { node, transition });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staggers_hero_items_and_navbar() {
        let mut intro = Intro::new(
            vec![NodeId(1), NodeId(2), NodeId(3)],
            Some(NodeId(9)),
            IntroConfig::default(),
        );
        let mut out = Vec::new();
        intro.mount(&mut out);
        assert_eq!(out.len(), 8);

        let steps = intro.on_loaded();
        assert_eq!(
            steps,
            vec![
                (IntroStep::HeroItem(0), 0.0),
                (IntroStep::HeroItem(1), 200.0),
                (IntroStep::HeroItem(2), 400.0),
                (IntroStep::Navbar, 100.0),
            ]
        );
        assert!(intro.on_loaded().is_empty());

        out.clear();
        intro.run(IntroStep::Navbar, &mut out);
        assert_eq!(
            out[2],
            DomCommand::SetTransition {
                node: NodeId(9),
                transition: Transition::all(600.0, TimingFunction::Ease)
            }
        );
    }
}
