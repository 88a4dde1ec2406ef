//! Scroll-gated animations that run once: the stats count-up and the
//! skill bars.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;
use vitae_protocol::{Bounds, DomCommand, NodeId, SkillsMarkup, StatsMarkup, StyleProperty};

use crate::config::CountersConfig;
use crate::util::numbers::{clamp, lerp};

#[allow(clippy::expect_used)]
static LEADING_INT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d+").expect("valid leading integer regex"));

/// A latch that fires once.
#[derive(Debug, Clone, Default)]
pub struct OneShot {
    fired: bool,
}

impl OneShot {
    /// `true` on the first call only.
    pub fn fire(&mut self) -> bool {
        !std::mem::replace(&mut self.fired, true)
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

/// Counts every `[data-count]` stat up from zero when its section scrolls
/// into view.
#[derive(Debug, Clone)]
pub struct StatsCounter {
    section: String,
    bounds: Option<Bounds>,
    stats: Vec<(NodeId, i64)>,
    latch: OneShot,
    step: u32,
    steps: u32,
    duration_ms: f64,
}

impl StatsCounter {
    pub fn new(markup: &StatsMarkup, bounds: Option<Bounds>, config: &CountersConfig) -> Self {
        let stats = markup
            .items
            .iter()
            .map(|item| (item.node, parse_count(item.count.as_deref())))
            .collect();
        Self {
            section: markup.section.clone(),
            bounds,
            stats,
            latch: OneShot::default(),
            step: 0,
            steps: config.stats_steps.max(1),
            duration_ms: config.stats_duration_ms,
        }
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn set_bounds(&mut self, bounds: Option<Bounds>) {
        self.bounds = bounds;
    }

    pub fn step_interval(&self) -> f64 {
        self.duration_ms / f64::from(self.steps)
    }

    pub fn has_started(&self) -> bool {
        self.latch.has_fired()
    }

    /// Returns `true` when this call started the ramp.
    pub fn on_scroll(&mut self, scroll_y: f64, viewport_height: f64) -> bool {
        let Some(bounds) = self.bounds else {
            return false;
        };
        if self.latch.has_fired() {
            return false;
        }
        let visible = scroll_y + viewport_height > bounds.top && scroll_y < bounds.bottom();
        if visible && self.latch.fire() {
            debug!("stats: counting up {} values", self.stats.len());
            return true;
        }
        false
    }

    /// Show the next step. Returns whether more steps remain.
    pub fn step(&mut self, out: &mut Vec<DomCommand>) -> bool {
        if !self.latch.has_fired() || self.step >= self.steps {
            return false;
        }
        self.step += 1;
        let progress = f64::from(self.step) / f64::from(self.steps);
        for &(node, target) in &self.stats {
            let value = if self.step == self.steps {
                target
            } else {
                lerp(0.0, target as f64, progress).floor() as i64
            };
            out.push(DomCommand::SetText {
                node,
                text: value.to_string().into(),
            });
        }
        self.step < self.steps
    }
}

/// `parseInt`-style: a leading integer, fractional part dropped, 0 when
/// unparseable.
fn parse_count(raw: Option<&str>) -> i64 {
    raw.and_then(|r| LEADING_INT_RE.find(r.trim()))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

#[derive(Debug, Clone)]
struct SkillItem {
    node: NodeId,
    progress: Option<NodeId>,
    level: Option<f64>,
}

/// Fills the skill bars, one item after another, once the skills section
/// is far enough into view.
#[derive(Debug, Clone)]
pub struct SkillBars {
    section: String,
    bounds: Option<Bounds>,
    items: Vec<SkillItem>,
    latch: OneShot,
    config: CountersConfig,
}

impl SkillBars {
    pub fn new(markup: &SkillsMarkup, bounds: Option<Bounds>, config: CountersConfig) -> Self {
        let items = markup
            .items
            .iter()
            .map(|item| SkillItem {
                node: item.node,
                progress: item.progress,
                level: item
                    .level
                    .as_deref()
                    .and_then(|l| l.trim().parse::<f64>().ok())
                    .filter(|l| l.is_finite())
                    .map(|l| clamp(l, 0.0, 100.0)),
            })
            .collect();
        Self {
            section: markup.section.clone(),
            bounds,
            items,
            latch: OneShot::default(),
            config,
        }
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn set_bounds(&mut self, bounds: Option<Bounds>) {
        self.bounds = bounds;
    }

    /// Returns the per-item delays when this call triggers the bars, or an
    /// empty list.
    pub fn on_scroll(&mut self, scroll_y: f64, viewport_height: f64) -> Vec<(usize, f64)> {
        let Some(bounds) = self.bounds else {
            return Vec::new();
        };
        if self.latch.has_fired()
            || scroll_y + viewport_height <= bounds.top + self.config.skills_offset
            || !self.latch.fire()
        {
            return Vec::new();
        }
        debug!("skills: animating {} bars", self.items.len());
        (0..self.items.len())
            .map(|i| (i, i as f64 * self.config.skills_stagger_ms))
            .collect()
    }

    pub fn reveal(&self, index: usize, out: &mut Vec<DomCommand>) {
        let Some(item) = self.items.get(index) else {
            return;
        };
        out.push(DomCommand::AddClass {
            node: item.node,
            class: "animate".into(),
        });
        if let (Some(progress), Some(level)) = (item.progress, item.level) {
            let width = format!("{level}%");
            out.push(DomCommand::SetStyle {
                node: progress,
                property: StyleProperty::SkillWidth,
                value: width.clone().into(),
            });
            out.push(DomCommand::SetStyle {
                node: progress,
                property: StyleProperty::Width,
                value: width.into(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitae_protocol::{SkillMarkup, StatMarkup};

    fn stats(target: &str) -> StatsCounter {
        StatsCounter::new(
            &StatsMarkup {
                section: "about".into(),
                items: vec![StatMarkup {
                    node: NodeId(1),
                    count: Some(target.into()),
                }],
            },
            Some(Bounds::new(1000.0, 500.0)),
            &CountersConfig::default(),
        )
    }

    #[test]
    fn latch_fires_once() {
        let mut latch = OneShot::default();
        assert!(latch.fire());
        assert!(!latch.fire());
        assert!(latch.has_fired());
    }

    #[test]
    fn stats_trigger_window() {
        let mut s = stats("50");
        // Section below the fold.
        assert!(!s.on_scroll(0.0, 800.0));
        // Scrolled past it.
        assert!(!s.on_scroll(1600.0, 800.0));
        assert!(s.on_scroll(300.0, 800.0));
        for _ in 0..50 {
            assert!(!s.on_scroll(300.0, 800.0));
        }
        assert_eq!(s.step_interval(), 20.0);
    }

    #[test]
    fn ramp_ends_on_exact_target() {
        let mut s = stats("37");
        let mut out = Vec::new();
        assert!(!s.step(&mut out), "no steps before trigger");
        s.on_scroll(600.0, 800.0);

        let mut steps = 0;
        while s.step(&mut out) {
            steps += 1;
        }
        assert_eq!(steps + 1, 100);
        assert_eq!(out.len(), 100);
        assert_eq!(
            out[0],
            DomCommand::SetText {
                node: NodeId(1),
                text: "0".into()
            }
        );
        assert_eq!(
            out[49],
            DomCommand::SetText {
                node: NodeId(1),
                text: "18".into()
            }
        );
        assert_eq!(
            out.last(),
            Some(&DomCommand::SetText {
                node: NodeId(1),
                text: "37".into()
            })
        );
        assert!(!s.step(&mut out));
        assert_eq!(out.len(), 100);
    }

    #[test]
    fn unparseable_count_is_zero() {
        assert_eq!(parse_count(Some("12.9")), 12);
        assert_eq!(parse_count(Some("many")), 0);
        assert_eq!(parse_count(None), 0);
    }

    #[test]
    fn count_reads_the_leading_integer() {
        assert_eq!(parse_count(Some("50+")), 50);
        assert_eq!(parse_count(Some("12px")), 12);
        assert_eq!(parse_count(Some("1e3")), 1);
        assert_eq!(parse_count(Some(" -7 years")), -7);
        assert_eq!(parse_count(Some("abc")), 0);
        assert_eq!(parse_count(Some("+")), 0);
    }

    #[test]
    fn skills_stagger_and_clamp() {
        let mut bars = SkillBars::new(
            &SkillsMarkup {
                section: "skills".into(),
                items: vec![
                    SkillMarkup {
                        node: NodeId(1),
                        progress: Some(NodeId(11)),
                        level: Some("85".into()),
                    },
                    SkillMarkup {
                        node: NodeId(2),
                        progress: Some(NodeId(12)),
                        level: Some("140".into()),
                    },
                    SkillMarkup {
                        node: NodeId(3),
                        progress: None,
                        level: Some("60".into()),
                    },
                ],
            },
            Some(Bounds::new(2000.0, 600.0)),
            CountersConfig::default(),
        );
        // 1200 + 800 is not past 2000 + 100.
        assert!(bars.on_scroll(1200.0, 800.0).is_empty());
        assert_eq!(
            bars.on_scroll(1400.0, 800.0),
            vec![(0, 0.0), (1, 200.0), (2, 400.0)]
        );
        assert!(bars.on_scroll(1400.0, 800.0).is_empty());

        let mut out = Vec::new();
        bars.reveal(1, &mut out);
        assert!(out.contains(&DomCommand::SetStyle {
            node: NodeId(12),
            property: StyleProperty::Width,
            value: "100%".into()
        }));

        out.clear();
        bars.reveal(2, &mut out);
        assert_eq!(
            out,
            vec![DomCommand::AddClass {
                node: NodeId(3),
                class: "animate".into()
            }]
        );
    }
}
