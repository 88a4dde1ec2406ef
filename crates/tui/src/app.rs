use chrono::{DateTime, Utc};
use log::info;
use vitae_core::features::contact::FormState;
use vitae_core::util::strings::capitalize;
use vitae_core::util::{Easing, Tween};
use vitae_core::{Page, PageConfig, SimulatedTransport};
use vitae_protocol::{ContactFields, DomCommand, Key, NodeId, PageEvent, PageMarkup, Point, Size};

use crate::scene::Scene;

/// Document pixels represented by one terminal cell.
pub const CELL_WIDTH: f64 = 10.0;
pub const CELL_HEIGHT: f64 = 20.0;

const SCROLL_STEP: f64 = 80.0;
const SMOOTH_SCROLL_MS: f64 = 600.0;

/// Preview state: the mounted page plus everything the terminal shows.
pub struct App {
    page: Page,
    markup: PageMarkup,
    scene: Scene,
    started_at: DateTime<Utc>,
    scroll_y: f64,
    scroll_tween: Option<Tween>,
    viewport: Size,
    nav_cursor: usize,
}

impl App {
    pub fn new(
        markup: PageMarkup,
        config: PageConfig,
        viewport: Size,
        seed: u64,
        started_at: DateTime<Utc>,
    ) -> Self {
        let transport = Box::new(SimulatedTransport::new(config.contact.simulated_delay_ms));
        let (page, commands) = Page::mount(&markup, config, transport, seed, 0.0);
        let mut scene = Scene::default();
        scene.apply_all(&commands);
        Self {
            page,
            markup,
            scene,
            started_at,
            scroll_y: 0.0,
            scroll_tween: None,
            viewport,
            nav_cursor: 0,
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn markup(&self) -> &PageMarkup {
        &self.markup
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn contact_state(&self) -> Option<FormState> {
        self.page.contact_state()
    }

    pub fn send(&mut self, event: &PageEvent, now: f64) {
        let commands = self.page.handle(event, now);
        self.apply(&commands, now);
    }

    fn apply(&mut self, commands: &[DomCommand], now: f64) {
        self.scene.apply_all(commands);
        if let Some((top, smooth)) = self.scene.take_scroll_request() {
            if smooth {
                self.scroll_tween = Some(Tween::new(
                    self.scroll_y,
                    top.max(0.0),
                    now,
                    SMOOTH_SCROLL_MS,
                    Easing::EaseInOut,
                ));
            } else {
                self.scroll_to(top, now);
            }
        }
        for url in self.scene.take_opened_urls() {
            info!("open {url}");
        }
    }

    /// One frame: smooth scrolling, due timers, the background.
    pub fn tick(&mut self, now: f64) {
        if let Some(tween) = self.scroll_tween {
            self.scroll_to(tween.value_at(now), now);
            if tween.is_done(now) {
                self.scroll_tween = None;
            }
        }
        let commands = self.page.frame(now);
        self.apply(&commands, now);
    }

    fn scroll_to(&mut self, y: f64, now: f64) {
        if self.scene.scroll_locked {
            return;
        }
        self.scroll_y = y.max(0.0);
        let event = PageEvent::Scroll {
            y: self.scroll_y,
            viewport_height: self.viewport.height,
        };
        self.send(&event, now);
    }

    pub fn scroll_by(&mut self, steps: f64, now: f64) {
        self.scroll_tween = None;
        self.scroll_to(self.scroll_y + steps * SCROLL_STEP, now);
    }

    /// Click the next navigation link, wrapping around.
    pub fn next_link(&mut self, now: f64) {
        let Some(node) = self.markup.navigation.as_ref().and_then(|nav| {
            let links = &nav.links;
            (!links.is_empty()).then(|| links[self.nav_cursor % links.len()].node)
        }) else {
            return;
        };
        self.nav_cursor += 1;
        self.send(&PageEvent::Click { node }, now);
    }

    pub fn toggle_menu(&mut self, now: f64) {
        if let Some(hamburger) = self.markup.navigation.as_ref().and_then(|n| n.hamburger) {
            self.send(&PageEvent::Click { node: hamburger }, now);
        }
    }

    pub fn open_certificate(&mut self, now: f64) {
        if let Some(node) = self.markup.certificates.first().map(|c| c.node) {
            self.send(&PageEvent::Click { node }, now);
        }
    }

    pub fn escape(&mut self, now: f64) {
        self.send(&PageEvent::KeyDown { key: Key::Escape }, now);
    }

    pub fn submit(&mut self, fields: ContactFields, now: f64) {
        self.send(&PageEvent::Submit { fields }, now);
    }

    pub fn resize(&mut self, cols: u16, rows: u16, now: f64) {
        self.viewport = Size::new(
            f64::from(cols) * CELL_WIDTH,
            f64::from(rows) * CELL_HEIGHT,
        );
        let event = PageEvent::Resize {
            viewport: self.viewport,
            hero: None,
        };
        self.send(&event, now);
    }

    /// Pointer position as a fraction of the hero area.
    pub fn pointer(&mut self, fx: f64, fy: f64, now: f64) {
        let size = self.scene.canvas_size.unwrap_or(self.viewport);
        let position = Point::new(fx * size.width, fy * size.height);
        self.send(&PageEvent::PointerMove { position }, now);
    }

    pub fn nav_titles(&self) -> Vec<(NodeId, String)> {
        self.markup
            .navigation
            .iter()
            .flat_map(|nav| &nav.links)
            .map(|link| {
                let title = link
                    .section
                    .as_deref()
                    .map_or_else(|| format!("#{}", link.node.0), capitalize);
                (link.node, title)
            })
            .collect()
    }

    pub fn teardown(&mut self) {
        let commands = self.page.teardown();
        self.scene.apply_all(&commands);
    }
}

/// Contact details the `s` key submits.
pub fn sample_fields() -> ContactFields {
    ContactFields {
        name: "Jo".into(),
        email: "jo@x.com".into(),
        subject: "Hi".into(),
        message: "Hello".into(),
    }
}

/// Contact details the `x` key submits; they fail validation.
pub fn invalid_fields() -> ContactFields {
    ContactFields {
        name: String::new(),
        email: "bad".into(),
        subject: "hi".into(),
        message: "hi".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let markup = PageMarkup::from_json(include_str!("../assets/demo-page.json"))
            .expect("demo markup parses");
        App::new(
            markup,
            PageConfig::default(),
            Size::new(1200.0, 800.0),
            11,
            DateTime::<Utc>::default(),
        )
    }

    #[test]
    fn typewriter_starts_typing_on_mount() {
        let app = app();
        assert_eq!(app.scene().text(NodeId(20)), Some("F"));
        assert!(app.page().diagnostics().is_empty());
    }

    #[test]
    fn nav_link_scrolls_smoothly_to_its_section() {
        let mut app = app();
        // First link is Home at the top; the second is About at 800.
        app.next_link(0.0);
        app.next_link(0.0);
        app.tick(300.0);
        let halfway = app.scroll_y();
        assert!(halfway > 0.0 && halfway < 730.0);
        app.tick(600.0);
        assert!((app.scroll_y() - 730.0).abs() < 1e-6);
        assert_eq!(app.page().active_section(), Some("about"));
    }

    #[test]
    fn open_modal_blocks_scrolling() {
        let mut app = app();
        app.open_certificate(0.0);
        assert!(app.scene().scroll_locked);
        app.scroll_by(3.0, 10.0);
        assert_eq!(app.scroll_y(), 0.0);

        app.escape(20.0);
        app.scroll_by(3.0, 30.0);
        assert_eq!(app.scroll_y(), 240.0);
    }

    #[test]
    fn sample_submission_round_trip() {
        let mut app = app();
        app.submit(invalid_fields(), 0.0);
        assert_eq!(app.contact_state(), Some(FormState::Idle));
        assert_eq!(app.scene().toasts().count(), 1);

        app.submit(sample_fields(), 100.0);
        assert_eq!(app.contact_state(), Some(FormState::Sending));
        assert!(app.scene().is_disabled(NodeId(61)));
        app.tick(2100.0);
        assert_eq!(app.contact_state(), Some(FormState::Idle));
        assert!(!app.scene().is_disabled(NodeId(61)));
    }

    #[test]
    fn nav_titles_use_section_names() {
        let titles: Vec<String> = app().nav_titles().into_iter().map(|(_, t)| t).collect();
        assert_eq!(titles, vec!["Home", "About", "Skills", "Contact"]);
    }
}
