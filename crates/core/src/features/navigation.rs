//! Navbar state, active-section highlighting, the mobile menu, in-page
//! anchors, and the keyboard focus ring.

use vitae_protocol::{
    AnchorMarkup, DomCommand, NavLinkMarkup, NodeId, PageMarkup, SectionMarkup, SharedStr,
    ThemeToken,
};

use crate::config::NavigationConfig;

const SCROLLED: &str = "scrolled";
const ACTIVE: &str = "active";

#[derive(Debug, Clone)]
pub struct Navigation {
    navbar: Option<NodeId>,
    hamburger: Option<NodeId>,
    menu: Option<NodeId>,
    links: Vec<NavLinkMarkup>,
    anchors: Vec<AnchorMarkup>,
    focusable: Vec<NodeId>,
    sections: Vec<SectionMarkup>,
    config: NavigationConfig,
    scrolled: bool,
    active: Option<String>,
    menu_open: bool,
}

impl Navigation {
    pub fn new(markup: &PageMarkup, config: NavigationConfig) -> Self {
        let nav = markup.navigation.as_ref();
        Self {
            navbar: nav.and_then(|n| n.navbar),
            hamburger: nav.and_then(|n| n.hamburger),
            menu: nav.and_then(|n| n.menu),
            links: nav.map(|n| n.links.clone()).unwrap_or_default(),
            anchors: markup.anchors.clone(),
            focusable: markup.focusable.clone(),
            sections: markup.sections.clone(),
            config,
            scrolled: false,
            active: None,
            menu_open: false,
        }
    }

    pub fn set_sections(&mut self, sections: Vec<SectionMarkup>) {
        self.sections = sections;
    }

    pub fn sections(&self) -> &[SectionMarkup] {
        &self.sections
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn active_section(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Update the `scrolled` navbar class and the active link. Only
    /// changes are emitted.
    pub fn on_scroll(&mut self, scroll_y: f64, out: &mut Vec<DomCommand>) {
        let scrolled = scroll_y > self.config.scrolled_after;
        if scrolled != self.scrolled {
            self.scrolled = scrolled;
            if let Some(navbar) = self.navbar {
                let class = SharedStr::from(SCROLLED);
                out.push(if scrolled {
                    DomCommand::AddClass { node: navbar, class }
                } else {
                    DomCommand::RemoveClass { node: navbar, class }
                });
            }
        }

        // Above the first section the previous highlight stays.
        let probe = scroll_y + self.config.active_probe;
        let Some(current) = self
            .sections
            .iter()
            .rev()
            .find(|s| s.bounds.contains(probe))
            .map(|s| s.id.clone())
        else {
            return;
        };
        if self.active.as_deref() == Some(current.as_str()) {
            return;
        }
        let class = SharedStr::from(ACTIVE);
        for link in &self.links {
            out.push(DomCommand::RemoveClass {
                node: link.node,
                class: class.clone(),
            });
            if link.section.as_deref() == Some(current.as_str()) {
                out.push(DomCommand::AddClass {
                    node: link.node,
                    class: class.clone(),
                });
            }
        }
        self.active = Some(current);
    }

    /// Returns whether the click landed on a navigation element.
    pub fn on_click(&mut self, node: NodeId, out: &mut Vec<DomCommand>) -> bool {
        if Some(node) == self.hamburger {
            self.set_menu(!self.menu_open, out);
            return true;
        }

        let mut handled = false;
        if self.links.iter().any(|l| l.node == node) {
            self.set_menu(false, out);
            handled = true;
        }
        if let Some(anchor) = self.anchors.iter().find(|a| a.node == node) {
            if let Some(top) = self.anchor_target(&anchor.href) {
                out.push(DomCommand::ScrollTo { top, smooth: true });
            }
            handled = true;
        }
        handled
    }

    /// Close an open menu and return focus to the hamburger.
    pub fn on_escape(&mut self, out: &mut Vec<DomCommand>) -> bool {
        if !self.menu_open {
            return false;
        }
        self.set_menu(false, out);
        if let Some(hamburger) = self.hamburger {
            out.push(DomCommand::Focus { node: hamburger });
        }
        true
    }

    pub fn on_focus(&self, node: NodeId, out: &mut Vec<DomCommand>) {
        if self.focusable.contains(&node) {
            let px = self.config.focus_outline_px;
            out.push(DomCommand::SetOutline {
                node,
                color: Some(ThemeToken::FocusRing),
                width: px,
                offset: px,
            });
        }
    }

    pub fn on_blur(&self, node: NodeId, out: &mut Vec<DomCommand>) {
        if self.focusable.contains(&node) {
            out.push(DomCommand::SetOutline {
                node,
                color: None,
                width: 0.0,
                offset: 0.0,
            });
        }
    }

    fn anchor_target(&self, href: &str) -> Option<f64> {
        let id = href.strip_prefix('#').filter(|id| !id.is_empty())?;
        let section = self.sections.iter().find(|s| s.id == id)?;
        Some(section.bounds.top - self.config.anchor_offset)
    }

    fn set_menu(&mut self, open: bool, out: &mut Vec<DomCommand>) {
        if open == self.menu_open {
            return;
        }
        self.menu_open = open;
        let class = SharedStr::from(ACTIVE);
        for node in [self.hamburger, self.menu].into_iter().flatten() {
            out.push(if open {
                DomCommand::AddClass {
                    node,
                    class: class.clone(),
                }
            } else {
                DomCommand::RemoveClass {
                    node,
                    class: class.clone(),
                }
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitae_protocol::{Bounds, NavigationMarkup};

    const NAVBAR: NodeId = NodeId(1);
    const HAMBURGER: NodeId = NodeId(2);
    const MENU: NodeId = NodeId(3);
    const HOME_LINK: NodeId = NodeId(10);
    const ABOUT_LINK: NodeId = NodeId(11);
    const BUTTON: NodeId = NodeId(20);

    fn nav() -> Navigation {
        let markup = PageMarkup {
            navigation: Some(NavigationMarkup {
                navbar: Some(NAVBAR),
                hamburger: Some(HAMBURGER),
                menu: Some(MENU),
                links: vec![
                    NavLinkMarkup {
                        node: HOME_LINK,
                        section: Some("home".into()),
                    },
                    NavLinkMarkup {
                        node: ABOUT_LINK,
                        section: Some("about".into()),
                    },
                ],
            }),
            sections: vec![
                SectionMarkup {
                    id: "home".into(),
                    bounds: Bounds::new(0.0, 800.0),
                },
                SectionMarkup {
                    id: "about".into(),
                    bounds: Bounds::new(800.0, 600.0),
                },
            ],
            anchors: vec![
                AnchorMarkup {
                    node: ABOUT_LINK,
                    href: "#about".into(),
                },
                AnchorMarkup {
                    node: NodeId(12),
                    href: "#".into(),
                },
            ],
            focusable: vec![BUTTON],
            ..PageMarkup::default()
        };
        Navigation::new(&markup, NavigationConfig::default())
    }

    #[test]
    fn scrolled_class_only_on_change() {
        let mut nav = nav();
        let mut out = Vec::new();
        nav.on_scroll(10.0, &mut out);
        assert!(!out.iter().any(|c| c.node() == Some(NAVBAR)));

        out.clear();
        nav.on_scroll(51.0, &mut out);
        assert!(out.contains(&DomCommand::AddClass {
            node: NAVBAR,
            class: "scrolled".into()
        }));

        out.clear();
        nav.on_scroll(60.0, &mut out);
        assert!(out.is_empty());

        nav.on_scroll(50.0, &mut out);
        assert!(out.contains(&DomCommand::RemoveClass {
            node: NAVBAR,
            class: "scrolled".into()
        }));
    }

    #[test]
    fn highlights_section_under_probe() {
        let mut nav = nav();
        let mut out = Vec::new();
        nav.on_scroll(0.0, &mut out);
        assert_eq!(nav.active_section(), Some("home"));

        out.clear();
        // 700 + 100 lands on the top edge of `about`.
        nav.on_scroll(700.0, &mut out);
        assert_eq!(nav.active_section(), Some("about"));
        assert!(out.contains(&DomCommand::AddClass {
            node: ABOUT_LINK,
            class: "active".into()
        }));
        assert!(!out.contains(&DomCommand::AddClass {
            node: HOME_LINK,
            class: "active".into()
        }));

        out.clear();
        nav.on_scroll(5000.0, &mut out);
        assert_eq!(nav.active_section(), Some("about"));
        assert!(out.iter().all(|c| c.node() != Some(ABOUT_LINK)));
    }

    #[test]
    fn menu_toggle_link_close_and_escape() {
        let mut nav = nav();
        let mut out = Vec::new();
        assert!(nav.on_click(HAMBURGER, &mut out));
        assert!(nav.is_menu_open());
        assert_eq!(out.len(), 2);

        out.clear();
        assert!(nav.on_click(ABOUT_LINK, &mut out));
        assert!(!nav.is_menu_open());
        assert!(out.contains(&DomCommand::ScrollTo {
            top: 730.0,
            smooth: true
        }));

        nav.on_click(HAMBURGER, &mut out);
        out.clear();
        assert!(nav.on_escape(&mut out));
        assert_eq!(out.last(), Some(&DomCommand::Focus { node: HAMBURGER }));
        assert!(!nav.on_escape(&mut out));
    }

    #[test]
    fn bare_hash_anchor_does_not_scroll() {
        let mut nav = nav();
        let mut out = Vec::new();
        assert!(nav.on_click(NodeId(12), &mut out));
        assert!(out.is_empty());
        assert!(!nav.on_click(NodeId(99), &mut out));
    }

    #[test]
    fn focus_ring() {
        let nav = nav();
        let mut out = Vec::new();
        nav.on_focus(BUTTON, &mut out);
        nav.on_blur(BUTTON, &mut out);
        nav.on_focus(NodeId(99), &mut out);
        assert_eq!(
            out,
            vec![
                DomCommand::SetOutline {
                    node: BUTTON,
                    color: Some(ThemeToken::FocusRing),
                    width: 2.0,
                    offset: 2.0
                },
                DomCommand::SetOutline {
                    node: BUTTON,
                    color: None,
                    width: 0.0,
                    offset: 0.0
                },
            ]
        );
    }
}
