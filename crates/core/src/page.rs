//! The page: every feature wired to one timer queue and one event stream.

use log::{debug, info, warn};
use serde::Serialize;
use vitae_protocol::{
    Bounds, ContactFields, DomCommand, Key, NodeId, PageEvent, PageMarkup, SectionMarkup, Size,
    SubmitOutcome,
};

use crate::config::PageConfig;
use crate::features::NodeAllocator;
use crate::features::contact::{ContactForm, Delivery, FormState, SubmitStep, SubmitTransport};
use crate::features::counters::{SkillBars, StatsCounter};
use crate::features::floating::FloatingShapes;
use crate::features::hover::{self, Hover};
use crate::features::intro::{Intro, IntroStep};
use crate::features::modal::CertificateModal;
use crate::features::navigation::Navigation;
use crate::features::parallax::Parallax;
use crate::features::particles::ParticleField;
use crate::features::reveal::RevealCoordinator;
use crate::features::scramble::TextScramble;
use crate::features::toast::{ToastKind, ToastPhase, Toaster};
use crate::features::typewriter::{Typewriter, parse_phrases};
use crate::timers::{TimerId, TimerQueue};
use crate::util::Debounce;

/// A feature that could not start, reported once at mount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub feature: &'static str,
    pub message: String,
}

/// Work the page has scheduled for later.
#[derive(Debug, Clone, PartialEq)]
pub enum PageTimer {
    Typewriter,
    Reveal(NodeId),
    StatsStep,
    Skill(usize),
    Intro(IntroStep),
    Toast(NodeId, ToastPhase),
    RemoveRipple(NodeId),
    SubmitSettled(SubmitOutcome),
    Relayout,
}

/// Client-side behavior of the resume page.
///
/// The host feeds it events and the current time and applies the returned
/// commands in order. Between events, the host calls [`Page::advance`] once
/// [`Page::next_deadline`] has passed, and [`Page::frame`] on every
/// animation frame.
pub struct Page {
    config: PageConfig,
    timers: TimerQueue<PageTimer>,
    alloc: NodeAllocator,
    rng: fastrand::Rng,
    transport: Box<dyn SubmitTransport>,

    navigation: Navigation,
    typewriter: Option<Typewriter>,
    reveal: RevealCoordinator,
    parallax: Parallax,
    hover: Hover,
    intro: Intro,
    stats: Option<StatsCounter>,
    skills: Option<SkillBars>,
    contact: Option<ContactForm>,
    toaster: Toaster,
    particles: Option<ParticleField>,
    floating: Option<FloatingShapes>,
    scrambles: Vec<TextScramble>,
    modal: Option<CertificateModal>,

    relayout: Debounce,
    relayout_timer: Option<TimerId>,
    pending_hero: Option<Size>,
    pending_sections: Option<Vec<SectionMarkup>>,

    diagnostics: Vec<Diagnostic>,
    torn_down: bool,
}

fn report(diagnostics: &mut Vec<Diagnostic>, feature: &'static str, message: impl Into<String>) {
    let message = message.into();
    warn!("{feature}: {message}");
    diagnostics.push(Diagnostic { feature, message });
}

fn section_bounds(sections: &[SectionMarkup], id: &str) -> Option<Bounds> {
    sections.iter().find(|s| s.id == id).map(|s| s.bounds)
}

impl Page {
    /// Build every feature the markup supports and return the commands
    /// that put the page in its initial state.
    ///
    /// Features whose markup is missing are skipped and listed in
    /// [`Page::diagnostics`]; mounting itself never fails. A config that
    /// fails [`PageConfig::validate`] is replaced by the defaults.
    pub fn mount(
        markup: &PageMarkup,
        config: PageConfig,
        transport: Box<dyn SubmitTransport>,
        seed: u64,
        now: f64,
    ) -> (Self, Vec<DomCommand>) {
        let mut out = Vec::new();
        let mut diagnostics = Vec::new();
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                report(&mut diagnostics, "config", format!("{e}; using defaults"));
                PageConfig::default()
            }
        };
        let mut timers = TimerQueue::new();
        let mut alloc = NodeAllocator::default();
        let mut rng = fastrand::Rng::with_seed(seed);

        let navigation = Navigation::new(markup, config.navigation.clone());
        if markup.navigation.is_none() {
            report(&mut diagnostics, "navigation", "no navbar markup");
        }

        let navbar = markup.navigation.as_ref().and_then(|n| n.navbar);
        let hero_items = markup
            .hero
            .as_ref()
            .map(|h| h.intro.clone())
            .unwrap_or_default();
        let intro = Intro::new(hero_items, navbar, config.intro.clone());
        intro.mount(&mut out);

        let reveal = RevealCoordinator::new(&markup.reveals, config.reveal.clone());
        reveal.mount(&mut out);
        let parallax = Parallax::new(&markup.parallax, &config.parallax);
        let hover = Hover::new(&markup.hover, config.hover.clone());

        let (particles, floating) = match &markup.hero {
            Some(hero) => {
                let field =
                    ParticleField::new(alloc.alloc(), hero.size, config.particles.clone(), &mut rng);
                field.mount(hero.node, &mut out);
                let shapes =
                    FloatingShapes::mount(hero.node, &config.floating, &mut rng, &mut alloc, &mut out);
                (Some(field), Some(shapes))
            }
            None => {
                report(
                    &mut diagnostics,
                    "hero",
                    "no hero container; particles and floating shapes disabled",
                );
                (None, None)
            }
        };

        let stats = match &markup.stats {
            Some(stats) => {
                let bounds = section_bounds(&markup.sections, &stats.section);
                if bounds.is_none() {
                    report(
                        &mut diagnostics,
                        "stats",
                        format!("section `{}` not found", stats.section),
                    );
                }
                Some(StatsCounter::new(stats, bounds, &config.counters))
            }
            None => {
                report(&mut diagnostics, "stats", "no stats markup");
                None
            }
        };

        let skills = match &markup.skills {
            Some(skills) => {
                let bounds = section_bounds(&markup.sections, &skills.section);
                if bounds.is_none() {
                    report(
                        &mut diagnostics,
                        "skills",
                        format!("section `{}` not found", skills.section),
                    );
                }
                Some(SkillBars::new(skills, bounds, config.counters.clone()))
            }
            None => {
                report(&mut diagnostics, "skills", "no skills markup");
                None
            }
        };

        let contact = match &markup.contact {
            Some(contact) => {
                if contact.submit.is_none() {
                    report(
                        &mut diagnostics,
                        "contact",
                        "no submit button; the sending state will not be shown",
                    );
                }
                Some(ContactForm::new(
                    contact.form,
                    contact.submit,
                    contact.submit_label.clone(),
                    config.contact.clone(),
                ))
            }
            None => {
                report(&mut diagnostics, "contact", "no contact form");
                None
            }
        };

        let modal = match &markup.modal {
            Some(modal) => Some(CertificateModal::new(
                modal.clone(),
                markup.certificates.clone(),
            )),
            None => {
                if !markup.certificates.is_empty() {
                    report(
                        &mut diagnostics,
                        "modal",
                        "certificate links found but no modal",
                    );
                }
                None
            }
        };

        let mut typewriter = match &markup.typewriter {
            Some(tw) => {
                let phrases = parse_phrases(tw.text.as_deref().unwrap_or_default());
                let typewriter = Typewriter::new(tw.node, phrases, config.typewriter.clone());
                if typewriter.is_none() {
                    report(&mut diagnostics, "typewriter", "`data-text` has no phrases");
                }
                typewriter
            }
            None => {
                report(&mut diagnostics, "typewriter", "no typewriter element");
                None
            }
        };
        if let Some(delay) = typewriter.as_mut().and_then(|tw| tw.tick(&mut out)) {
            timers.schedule(now + delay, PageTimer::Typewriter);
        }

        debug!(
            "page mounted: {} reveals, {} commands, {} diagnostics",
            reveal.len(),
            out.len(),
            diagnostics.len()
        );

        let page = Self {
            toaster: Toaster::new(config.toast.clone()),
            relayout: Debounce::trailing(config.resize_debounce_ms),
            config,
            timers,
            alloc,
            rng,
            transport,
            navigation,
            typewriter,
            reveal,
            parallax,
            hover,
            intro,
            stats,
            skills,
            contact,
            particles,
            floating,
            scrambles: Vec::new(),
            modal,
            relayout_timer: None,
            pending_hero: None,
            pending_sections: None,
            diagnostics,
            torn_down: false,
        };
        (page, out)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// When [`Page::advance`] next has work to do.
    pub fn next_deadline(&self) -> Option<f64> {
        if self.torn_down {
            return None;
        }
        self.timers.next_deadline()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Whether [`Page::frame`] draws anything.
    pub fn wants_frames(&self) -> bool {
        !self.torn_down
            && (self.particles.is_some()
                || self.floating.as_ref().is_some_and(|f| !f.is_empty())
                || !self.scrambles.is_empty())
    }

    pub fn contact_state(&self) -> Option<FormState> {
        self.contact.as_ref().map(ContactForm::state)
    }

    pub fn active_section(&self) -> Option<&str> {
        self.navigation.active_section()
    }

    pub fn handle(&mut self, event: &PageEvent, now: f64) -> Vec<DomCommand> {
        let mut out = Vec::new();
        if self.torn_down {
            return out;
        }
        match event {
            PageEvent::Loaded => {
                for (step, delay) in self.intro.on_loaded() {
                    self.timers.schedule(now + delay, PageTimer::Intro(step));
                }
            }
            PageEvent::Scroll { y, viewport_height } => {
                self.on_scroll(*y, *viewport_height, now, &mut out);
            }
            PageEvent::Resize { viewport, hero } => {
                self.pending_hero = Some(hero.unwrap_or(*viewport));
                self.relayout.call(now);
                if let Some(id) = self.relayout_timer.take() {
                    self.timers.cancel(id);
                }
                if let Some(deadline) = self.relayout.deadline() {
                    self.relayout_timer = Some(self.timers.schedule(deadline, PageTimer::Relayout));
                }
            }
            PageEvent::Layout { sections } => {
                if self.relayout.deadline().is_some() {
                    self.pending_sections = Some(sections.clone());
                } else {
                    self.apply_sections(sections.clone());
                }
            }
            PageEvent::Intersect { node, intersecting } => {
                if *intersecting && let Some(delay) = self.reveal.on_visible(*node) {
                    self.timers.schedule(now + delay, PageTimer::Reveal(*node));
                }
            }
            PageEvent::PointerMove { position } => {
                if let Some(particles) = &mut self.particles {
                    particles.set_pointer(*position);
                }
            }
            PageEvent::PointerEnter {
                node,
                position,
                bounds,
            } => {
                if let Some(ripple) =
                    self.hover
                        .on_enter(*node, *position, *bounds, &mut self.alloc, &mut out)
                {
                    self.timers.schedule(
                        now + self.config.hover.ripple_ms,
                        PageTimer::RemoveRipple(ripple),
                    );
                }
            }
            PageEvent::PointerLeave { node } => self.hover.on_leave(*node, &mut out),
            PageEvent::Click { node } => {
                self.navigation.on_click(*node, &mut out);
                if let Some(modal) = &mut self.modal {
                    modal.on_click(*node, &mut out);
                }
            }
            PageEvent::KeyDown { key: Key::Escape } => {
                self.navigation.on_escape(&mut out);
                if let Some(modal) = &mut self.modal {
                    modal.on_escape(&mut out);
                }
            }
            PageEvent::KeyDown { key: Key::Other } => {}
            PageEvent::Focus { node } => self.navigation.on_focus(*node, &mut out),
            PageEvent::Blur { node } => self.navigation.on_blur(*node, &mut out),
            PageEvent::Submit { fields } => self.submit(fields, now, &mut out),
            PageEvent::SubmitSettled { outcome } => self.settle(outcome, now, &mut out),
        }
        out
    }

    /// Run every timer due at or before `now`, in deadline order.
    pub fn advance(&mut self, now: f64) -> Vec<DomCommand> {
        let mut out = Vec::new();
        if self.torn_down {
            return out;
        }
        while let Some((at, timer)) = self.timers.pop_due(now) {
            self.fire(timer, at, &mut out);
        }
        out
    }

    /// One animation frame: due timers first, then the background and any
    /// running text scrambles.
    pub fn frame(&mut self, now: f64) -> Vec<DomCommand> {
        let mut out = self.advance(now);
        if self.torn_down {
            return out;
        }
        if let Some(particles) = &mut self.particles {
            particles.frame(&mut out);
        }
        if let Some(floating) = &mut self.floating {
            floating.frame(&mut out);
        }
        for scramble in &mut self.scrambles {
            scramble.frame(&mut self.rng, &mut out);
        }
        self.scrambles.retain(|s| !s.is_done());
        out
    }

    /// Start morphing `node`'s text from `from` to `to`, replacing any
    /// scramble already running on it.
    pub fn scramble(&mut self, node: NodeId, from: &str, to: &str) -> Vec<DomCommand> {
        let mut out = Vec::new();
        if self.torn_down {
            return out;
        }
        self.scrambles.retain(|s| s.node() != node);
        let mut scramble = TextScramble::new(node, from, to, &mut self.rng);
        if !scramble.frame(&mut self.rng, &mut out) {
            self.scrambles.push(scramble);
        }
        out
    }

    /// Cancel everything and detach from the document. Later calls return
    /// no commands.
    pub fn teardown(&mut self) -> Vec<DomCommand> {
        if self.torn_down {
            return Vec::new();
        }
        self.torn_down = true;
        self.timers.clear();
        self.relayout_timer = None;
        if let Some(typewriter) = &mut self.typewriter {
            typewriter.stop();
        }
        self.scrambles.clear();
        info!("page torn down");
        vec![DomCommand::DisconnectObservers, DomCommand::StopFrames]
    }

    fn on_scroll(&mut self, y: f64, viewport_height: f64, now: f64, out: &mut Vec<DomCommand>) {
        self.navigation.on_scroll(y, out);
        self.parallax.on_scroll(y, now, out);
        for (node, delay) in self.reveal.on_scroll_geometry(y, viewport_height) {
            self.timers.schedule(now + delay, PageTimer::Reveal(node));
        }
        if let Some(stats) = &mut self.stats
            && stats.on_scroll(y, viewport_height)
        {
            self.timers
                .schedule(now + stats.step_interval(), PageTimer::StatsStep);
        }
        if let Some(skills) = &mut self.skills {
            for (index, delay) in skills.on_scroll(y, viewport_height) {
                self.timers.schedule(now + delay, PageTimer::Skill(index));
            }
        }
    }

    /// `at` is the timer's own deadline, so chained timers do not drift
    /// when the host calls in late.
    fn fire(&mut self, timer: PageTimer, at: f64, out: &mut Vec<DomCommand>) {
        match timer {
            PageTimer::Typewriter => {
                if let Some(delay) = self.typewriter.as_mut().and_then(|tw| tw.tick(out)) {
                    self.timers.schedule(at + delay, PageTimer::Typewriter);
                }
            }
            PageTimer::Reveal(node) => {
                self.reveal.apply(node, out);
            }
            PageTimer::StatsStep => {
                if let Some(stats) = &mut self.stats
                    && stats.step(out)
                {
                    self.timers
                        .schedule(at + stats.step_interval(), PageTimer::StatsStep);
                }
            }
            PageTimer::Skill(index) => {
                if let Some(skills) = &self.skills {
                    skills.reveal(index, out);
                }
            }
            PageTimer::Intro(step) => self.intro.run(step, out),
            PageTimer::Toast(node, phase) => {
                if let Some((delay, next)) = self.toaster.advance(node, phase, out) {
                    self.timers.schedule(at + delay, PageTimer::Toast(node, next));
                }
            }
            PageTimer::RemoveRipple(node) => hover::remove_ripple(node, out),
            PageTimer::SubmitSettled(outcome) => self.settle(&outcome, at, out),
            PageTimer::Relayout => {
                self.relayout_timer = None;
                if self.relayout.poll(at) {
                    self.apply_relayout(out);
                }
            }
        }
    }

    fn apply_relayout(&mut self, out: &mut Vec<DomCommand>) {
        if let Some(size) = self.pending_hero.take()
            && let Some(particles) = &mut self.particles
        {
            particles.resize(size, out);
        }
        if let Some(sections) = self.pending_sections.take() {
            self.apply_sections(sections);
        }
    }

    fn apply_sections(&mut self, sections: Vec<SectionMarkup>) {
        if let Some(stats) = &mut self.stats {
            stats.set_bounds(section_bounds(&sections, stats.section()));
        }
        if let Some(skills) = &mut self.skills {
            skills.set_bounds(section_bounds(&sections, skills.section()));
        }
        self.navigation.set_sections(sections);
    }

    fn submit(&mut self, fields: &ContactFields, now: f64, out: &mut Vec<DomCommand>) {
        let Some(contact) = &mut self.contact else {
            debug!("submit ignored: no contact form");
            return;
        };
        match contact.submit(fields, self.transport.as_mut(), out) {
            SubmitStep::Rejected(errors) => {
                self.show_toast(ToastKind::Error, &errors.to_string(), now, out);
            }
            SubmitStep::Ignored => debug!("submit ignored: already sending"),
            SubmitStep::Started(Delivery::After { delay_ms, outcome }) => {
                self.timers
                    .schedule(now + delay_ms, PageTimer::SubmitSettled(outcome));
            }
            SubmitStep::Started(Delivery::External) => {}
        }
    }

    fn settle(&mut self, outcome: &SubmitOutcome, now: f64, out: &mut Vec<DomCommand>) {
        let Some(contact) = &mut self.contact else {
            return;
        };
        if let Some(notice) = contact.settle(outcome, out) {
            self.show_toast(notice.kind, &notice.message, now, out);
        }
    }

    fn show_toast(&mut self, kind: ToastKind, message: &str, now: f64, out: &mut Vec<DomCommand>) {
        self.timers
            .cancel_where(|t| matches!(t, PageTimer::Toast(..)));
        let (node, phases) = self.toaster.show(kind, message, &mut self.alloc, out);
        for (delay, phase) in phases {
            self.timers.schedule(now + delay, PageTimer::Toast(node, phase));
        }
    }
}
