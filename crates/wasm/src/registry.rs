//! Mounted pages, addressed by handle.
//!
//! A handle packs a slot index (low 16 bits) with the slot's generation.
//! Unmounting bumps the generation and frees the slot for the next mount,
//! so the registry stays as large as the most pages ever mounted at once
//! and a stale handle fails instead of aliasing the newer page.

use std::sync::Mutex;

use serde::Serialize;
use vitae_core::{
    Diagnostic, HostTransport, Page, PageConfig, SimulatedTransport, SubmitTransport,
};
use vitae_protocol::{DomCommand, NodeId, PageEvent, PageMarkup};

use crate::error::BridgeError;

const INDEX_BITS: u32 = 16;
const INDEX_MASK: usize = (1 << INDEX_BITS) - 1;

struct Slot {
    generation: u16,
    page: Option<Page>,
}

#[derive(Default)]
struct Registry {
    slots: Vec<Slot>,
    free: Vec<usize>,
}

impl Registry {
    const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    fn slot(&mut self, handle: usize) -> Result<&mut Slot, BridgeError> {
        let slot = self
            .slots
            .get_mut(handle & INDEX_MASK)
            .ok_or(BridgeError::InvalidHandle(handle))?;
        if usize::from(slot.generation) == handle >> INDEX_BITS {
            Ok(slot)
        } else {
            Err(BridgeError::Unmounted(handle))
        }
    }

    fn get_mut(&mut self, handle: usize) -> Result<&mut Page, BridgeError> {
        self.slot(handle)?
            .page
            .as_mut()
            .ok_or(BridgeError::Unmounted(handle))
    }

    fn insert(&mut self, page: Page) -> Result<usize, BridgeError> {
        let index = match self.free.pop() {
            Some(index) => index,
            None if self.slots.len() <= INDEX_MASK => {
                self.slots.push(Slot {
                    generation: 0,
                    page: None,
                });
                self.slots.len() - 1
            }
            None => return Err(BridgeError::Full),
        };
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(BridgeError::InvalidHandle(index))?;
        slot.page = Some(page);
        Ok(index | (usize::from(slot.generation) << INDEX_BITS))
    }

    fn remove(&mut self, handle: usize) -> Result<Page, BridgeError> {
        let slot = self.slot(handle)?;
        let page = slot.page.take().ok_or(BridgeError::Unmounted(handle))?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle & INDEX_MASK);
        Ok(page)
    }
}

static PAGES: Mutex<Registry> = Mutex::new(Registry::new());

#[derive(Serialize)]
struct Mounted<'a> {
    handle: usize,
    commands: &'a [DomCommand],
    diagnostics: &'a [Diagnostic],
}

fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String, BridgeError> {
    serde_json::to_string(value).map_err(BridgeError::Encode)
}

fn with_page<T>(handle: usize, f: impl FnOnce(&mut Page) -> T) -> Result<T, BridgeError> {
    let mut pages = PAGES.lock().map_err(|_| BridgeError::Poisoned)?;
    pages.get_mut(handle).map(f)
}

/// Mount a page. An empty `config_json` means all defaults. With
/// `host_delivery`, submissions are handed to the host as `deliver`
/// commands instead of being simulated.
///
/// Returns `{"handle", "commands", "diagnostics"}`.
pub fn mount(
    markup_json: &str,
    config_json: &str,
    host_delivery: bool,
    seed: u64,
    now: f64,
) -> Result<String, BridgeError> {
    let markup = PageMarkup::from_json(markup_json).map_err(BridgeError::Markup)?;
    let config = if config_json.trim().is_empty() {
        PageConfig::default()
    } else {
        PageConfig::from_json(config_json)?
    };
    let transport: Box<dyn SubmitTransport> = if host_delivery {
        Box::new(HostTransport)
    } else {
        Box::new(SimulatedTransport::new(config.contact.simulated_delay_ms))
    };

    let (page, commands) = Page::mount(&markup, config, transport, seed, now);
    let diagnostics = page.diagnostics().to_vec();
    let handle = PAGES
        .lock()
        .map_err(|_| BridgeError::Poisoned)?
        .insert(page)?;
    log::debug!("mounted page {handle}");
    encode(&Mounted {
        handle,
        commands: &commands,
        diagnostics: &diagnostics,
    })
}

pub fn dispatch(handle: usize, event_json: &str, now: f64) -> Result<String, BridgeError> {
    let event: PageEvent = serde_json::from_str(event_json).map_err(BridgeError::Event)?;
    let commands = with_page(handle, |page| page.handle(&event, now))?;
    encode(&commands)
}

pub fn advance(handle: usize, now: f64) -> Result<String, BridgeError> {
    encode(&with_page(handle, |page| page.advance(now))?)
}

pub fn frame(handle: usize, now: f64) -> Result<String, BridgeError> {
    encode(&with_page(handle, |page| page.frame(now))?)
}

pub fn next_deadline(handle: usize) -> Result<Option<f64>, BridgeError> {
    with_page(handle, |page| page.next_deadline())
}

pub fn wants_frames(handle: usize) -> Result<bool, BridgeError> {
    with_page(handle, |page| page.wants_frames())
}

pub fn scramble(handle: usize, node: u32, from: &str, to: &str) -> Result<String, BridgeError> {
    encode(&with_page(handle, |page| page.scramble(NodeId(node), from, to))?)
}

pub fn diagnostics(handle: usize) -> Result<String, BridgeError> {
    with_page(handle, |page| encode(page.diagnostics()))?
}

/// Tear the page down and free its slot for reuse. Returns the teardown
/// commands.
pub fn unmount(handle: usize) -> Result<String, BridgeError> {
    let mut page = PAGES
        .lock()
        .map_err(|_| BridgeError::Poisoned)?
        .remove(handle)?;
    log::debug!("unmounted page {handle}");
    encode(&page.teardown())
}
