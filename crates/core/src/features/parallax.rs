use vitae_protocol::{DomCommand, NodeId, ParallaxMarkup, Transform};

use crate::config::ParallaxConfig;
use crate::util::Throttle;

/// Scroll-linked vertical offset for `[data-parallax]` elements.
#[derive(Debug, Clone)]
pub struct Parallax {
    items: Vec<(NodeId, f64)>,
    throttle: Throttle,
}

impl Parallax {
    pub fn new(markup: &[ParallaxMarkup], config: &ParallaxConfig) -> Self {
        let items = markup
            .iter()
            .map(|m| {
                let speed = m
                    .speed
                    .as_deref()
                    .and_then(|s| s.trim().parse::<f64>().ok())
                    .filter(|s| s.is_finite() && *s != 0.0)
                    .unwrap_or(config.default_speed);
                (m.node, speed)
            })
            .collect();
        Self {
            items,
            throttle: Throttle::new(config.throttle_ms),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn on_scroll(&mut self, scroll_y: f64, now: f64, out: &mut Vec<DomCommand>) {
        if self.items.is_empty() || !self.throttle.try_acquire(now) {
            return;
        }
        for &(node, speed) in &self.items {
            out.push(DomCommand::SetTransform {
                node,
                transform: Transform::translate_y_px(-(scroll_y * speed)),
            });
        }
    }
}
