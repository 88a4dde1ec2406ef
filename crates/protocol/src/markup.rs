//! The markup contract: what the host's DOM scan reports to the core.
//!
//! Attribute values are passed through as the raw strings found in the
//! document (`data-aos-delay="200"`); the core parses them into typed
//! rules once, at mount time. Every section is optional so a page that
//! lacks a feature's markup still mounts.

use serde::{Deserialize, Serialize};

use crate::types::{Bounds, NodeId, Size};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageMarkup {
    pub navigation: Option<NavigationMarkup>,
    pub sections: Vec<SectionMarkup>,
    /// In-page `a[href^="#"]` links.
    pub anchors: Vec<AnchorMarkup>,
    /// Focusable controls that get the focus ring.
    pub focusable: Vec<NodeId>,
    pub typewriter: Option<TypewriterMarkup>,
    /// Elements carrying `data-aos`.
    pub reveals: Vec<RevealMarkup>,
    /// Elements carrying `data-parallax`.
    pub parallax: Vec<ParallaxMarkup>,
    pub hover: HoverMarkup,
    pub hero: Option<HeroMarkup>,
    pub stats: Option<StatsMarkup>,
    pub skills: Option<SkillsMarkup>,
    pub contact: Option<ContactMarkup>,
    pub modal: Option<ModalMarkup>,
    pub certificates: Vec<CertificateMarkup>,
}

impl PageMarkup {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationMarkup {
    pub navbar: Option<NodeId>,
    pub hamburger: Option<NodeId>,
    pub menu: Option<NodeId>,
    #[serde(default)]
    pub links: Vec<NavLinkMarkup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavLinkMarkup {
    pub node: NodeId,
    /// `data-section`
    pub section: Option<String>,
}

/// A `section[id]` with its document geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionMarkup {
    pub id: String,
    pub bounds: Bounds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorMarkup {
    pub node: NodeId,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypewriterMarkup {
    pub node: NodeId,
    /// Raw comma-separated `data-text`.
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevealMarkup {
    pub node: NodeId,
    /// `data-aos`
    pub kind: Option<String>,
    /// `data-aos-delay`
    pub delay: Option<String>,
    /// `data-aos-duration`
    pub duration: Option<String>,
    /// Document geometry, for hosts without an intersection observer.
    #[serde(default)]
    pub bounds: Option<Bounds>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParallaxMarkup {
    pub node: NodeId,
    /// `data-parallax`
    pub speed: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoverMarkup {
    /// `.project-card, .skill-item, .timeline-content`
    pub cards: Vec<NodeId>,
    /// `.btn`
    pub buttons: Vec<NodeId>,
    /// `.project-image img, .about-img-container img`
    pub images: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroMarkup {
    pub node: NodeId,
    pub size: Size,
    /// Title, subtitle, description, and buttons, in reveal order.
    #[serde(default)]
    pub intro: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsMarkup {
    /// Id of the section whose visibility starts the counters.
    pub section: String,
    pub items: Vec<StatMarkup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatMarkup {
    pub node: NodeId,
    /// `data-count`
    pub count: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillsMarkup {
    pub section: String,
    pub items: Vec<SkillMarkup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMarkup {
    pub node: NodeId,
    /// The `.skill-progress` child.
    pub progress: Option<NodeId>,
    /// `data-level`
    pub level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMarkup {
    pub form: NodeId,
    pub submit: Option<NodeId>,
    /// Label shown on the submit button while idle.
    #[serde(default)]
    pub submit_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModalMarkup {
    pub modal: NodeId,
    pub image: Option<NodeId>,
    pub title: Option<NodeId>,
    pub close: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificateMarkup {
    pub node: NodeId,
    /// `data-cert-image`
    pub image: Option<String>,
    /// Heading of the enclosing timeline entry.
    pub title: Option<String>,
    pub href: Option<String>,
}
