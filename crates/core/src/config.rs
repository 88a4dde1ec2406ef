//! Tunable timings and thresholds.
//!
//! Every section deserializes with `#[serde(default)]`, so a host may pass
//! `{}` or only the handful of values it wants to change.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("`{field}` must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("`{field}` must lie in {min}..={max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub navigation: NavigationConfig,
    pub reveal: RevealConfig,
    pub parallax: ParallaxConfig,
    pub hover: HoverConfig,
    pub intro: IntroConfig,
    pub typewriter: TypewriterConfig,
    pub counters: CountersConfig,
    pub contact: ContactConfig,
    pub toast: ToastConfig,
    pub particles: ParticlesConfig,
    pub floating: FloatingConfig,
    pub resize_debounce_ms: f64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            navigation: NavigationConfig::default(),
            reveal: RevealConfig::default(),
            parallax: ParallaxConfig::default(),
            hover: HoverConfig::default(),
            intro: IntroConfig::default(),
            typewriter: TypewriterConfig::default(),
            counters: CountersConfig::default(),
            contact: ContactConfig::default(),
            toast: ToastConfig::default(),
            particles: ParticlesConfig::default(),
            floating: FloatingConfig::default(),
            resize_debounce_ms: 150.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Scroll offset past which the navbar gets `scrolled`.
    pub scrolled_after: f64,
    /// Probe offset below the top of the viewport for the active section.
    pub active_probe: f64,
    /// Height of the fixed navbar, subtracted from anchor targets.
    pub anchor_offset: f64,
    pub focus_outline_px: f64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            scrolled_after: 50.0,
            active_probe: 100.0,
            anchor_offset: 70.0,
            focus_outline_px: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub duration_ms: f64,
    pub threshold: f64,
    pub root_margin_bottom: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            duration_ms: 600.0,
            threshold: 0.1,
            root_margin_bottom: -100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    pub default_speed: f64,
    pub throttle_ms: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            default_speed: 0.5,
            throttle_ms: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoverConfig {
    pub card_lift_px: f64,
    pub card_scale: f64,
    pub card_transition_ms: f64,
    pub ripple_ms: f64,
    pub image_scale: f64,
    pub image_transition_ms: f64,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            card_lift_px: 10.0,
            card_scale: 1.02,
            card_transition_ms: 300.0,
            ripple_ms: 600.0,
            image_scale: 1.1,
            image_transition_ms: 500.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntroConfig {
    pub stagger_ms: f64,
    pub item_transition_ms: f64,
    pub navbar_delay_ms: f64,
    pub navbar_transition_ms: f64,
    /// Offset the intro elements start from before sliding in.
    pub hidden_offset_px: f64,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            stagger_ms: 200.0,
            item_transition_ms: 800.0,
            navbar_delay_ms: 100.0,
            navbar_transition_ms: 600.0,
            hidden_offset_px: 30.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypewriterConfig {
    pub type_ms: f64,
    pub delete_ms: f64,
    pub pause_full_ms: f64,
    pub pause_empty_ms: f64,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            type_ms: 100.0,
            delete_ms: 50.0,
            pause_full_ms: 1500.0,
            pause_empty_ms: 500.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountersConfig {
    pub stats_duration_ms: f64,
    pub stats_steps: u32,
    /// How far the skills section must be scrolled into view.
    pub skills_offset: f64,
    pub skills_stagger_ms: f64,
}

impl Default for CountersConfig {
    fn default() -> Self {
        Self {
            stats_duration_ms: 2000.0,
            stats_steps: 100,
            skills_offset: 100.0,
            skills_stagger_ms: 200.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub simulated_delay_ms: f64,
    pub sending_label: String,
    pub success_message: String,
    pub failure_message: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            simulated_delay_ms: 2000.0,
            sending_label: "Sending...".into(),
            success_message: "Message sent successfully!".into(),
            failure_message: "Message could not be sent. Please try again.".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastConfig {
    pub enter_delay_ms: f64,
    pub visible_ms: f64,
    pub exit_ms: f64,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            enter_delay_ms: 100.0,
            visible_ms: 5000.0,
            exit_ms: 300.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticlesConfig {
    pub count: usize,
    pub max_speed: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    pub min_opacity: f64,
    pub max_opacity: f64,
    pub link_distance: f64,
    pub link_alpha: f64,
    pub pointer_radius: f64,
    pub pointer_strength: f64,
}

impl Default for ParticlesConfig {
    fn default() -> Self {
        Self {
            count: 50,
            max_speed: 0.25,
            min_radius: 1.0,
            max_radius: 3.0,
            min_opacity: 0.2,
            max_opacity: 0.7,
            link_distance: 100.0,
            link_alpha: 0.1,
            pointer_radius: 100.0,
            pointer_strength: 0.01,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloatingConfig {
    pub count: usize,
    pub min_size: f64,
    pub max_size: f64,
    /// Per-axis speed bound in percent of the container per frame.
    pub max_speed: f64,
}

impl Default for FloatingConfig {
    fn default() -> Self {
        Self {
            count: 6,
            min_size: 10.0,
            max_size: 30.0,
            max_speed: 0.25,
        }
    }
}

impl PageConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would stall or divide by zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("reveal.duration_ms", self.reveal.duration_ms),
            ("parallax.throttle_ms", self.parallax.throttle_ms),
            ("typewriter.type_ms", self.typewriter.type_ms),
            ("typewriter.delete_ms", self.typewriter.delete_ms),
            ("typewriter.pause_full_ms", self.typewriter.pause_full_ms),
            ("typewriter.pause_empty_ms", self.typewriter.pause_empty_ms),
            ("counters.stats_duration_ms", self.counters.stats_duration_ms),
            ("counters.stats_steps", f64::from(self.counters.stats_steps)),
            ("toast.visible_ms", self.toast.visible_ms),
            ("toast.exit_ms", self.toast.exit_ms),
            ("hover.ripple_ms", self.hover.ripple_ms),
            ("resize_debounce_ms", self.resize_debounce_ms),
            ("particles.link_distance", self.particles.link_distance),
            ("particles.pointer_radius", self.particles.pointer_radius),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        check_range("reveal.threshold", self.reveal.threshold, 0.0, 1.0)?;
        check_range(
            "particles.min_radius",
            self.particles.min_radius,
            0.0,
            self.particles.max_radius,
        )?;
        check_range(
            "particles.min_opacity",
            self.particles.min_opacity,
            0.0,
            self.particles.max_opacity,
        )?;
        check_range("particles.max_opacity", self.particles.max_opacity, 0.0, 1.0)?;
        check_range(
            "floating.min_size",
            self.floating.min_size,
            0.0,
            self.floating.max_size,
        )?;
        Ok(())
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = PageConfig::from_json("{}");
        assert!(config.is_ok());
        let config = config.unwrap_or_default();
        assert_eq!(config.typewriter.pause_full_ms, 1500.0);
        assert_eq!(config.counters.stats_steps, 100);
        assert_eq!(config.contact.sending_label, "Sending...");
        assert_eq!(config.resize_debounce_ms, 150.0);
    }

    #[test]
    fn partial_sections_merge_with_defaults() {
        let config =
            PageConfig::from_json(r#"{"typewriter": {"type_ms": 80}, "particles": {"count": 10}}"#)
                .unwrap_or_default();
        assert_eq!(config.typewriter.type_ms, 80.0);
        assert_eq!(config.typewriter.delete_ms, 50.0);
        assert_eq!(config.particles.count, 10);
        assert_eq!(config.particles.link_distance, 100.0);
    }

    #[test]
    fn rejects_non_positive_steps() {
        let err = PageConfig::from_json(r#"{"counters": {"stats_steps": 0}}"#);
        assert!(matches!(
            err,
            Err(ConfigError::NotPositive {
                field: "counters.stats_steps",
                ..
            })
        ));
    }

    #[test]
    fn rejects_threshold_outside_unit_range() {
        let err = PageConfig::from_json(r#"{"reveal": {"threshold": 1.5}}"#);
        assert!(matches!(err, Err(ConfigError::OutOfRange { .. })));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            PageConfig::from_json("{not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
