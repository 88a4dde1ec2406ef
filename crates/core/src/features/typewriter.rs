use vitae_protocol::{DomCommand, NodeId, SharedStr};

use crate::config::TypewriterConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Typing,
    PausingAtFull,
    Deleting,
    PausingAtEmpty,
}

/// Types a phrase one character at a time, deletes it, and moves on to
/// the next, forever.
#[derive(Debug, Clone)]
pub struct Typewriter {
    node: NodeId,
    phrases: Vec<SharedStr>,
    index: usize,
    chars: usize,
    phase: Phase,
    config: TypewriterConfig,
    stopped: bool,
}

/// Split a raw `data-text` value into phrases. Entries are trimmed and
/// empty ones dropped.
pub fn parse_phrases(raw: &str) -> Vec<SharedStr> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(SharedStr::from)
        .collect()
}

impl Typewriter {
    /// `None` when there is nothing to type.
    pub fn new(node: NodeId, phrases: Vec<SharedStr>, config: TypewriterConfig) -> Option<Self> {
        if phrases.is_empty() {
            return None;
        }
        Some(Self {
            node,
            phrases,
            index: 0,
            chars: 0,
            phase: Phase::Typing,
            config,
            stopped: false,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn phrase_index(&self) -> usize {
        self.index
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Advance by one character and return the delay before the next tick.
    pub fn tick(&mut self, out: &mut Vec<DomCommand>) -> Option<f64> {
        if self.stopped {
            return None;
        }
        let phrase = self.phrases.get(self.index)?.clone();
        let len = phrase.char_len();

        self.phase = match self.phase {
            Phase::Typing | Phase::PausingAtEmpty => {
                self.chars = (self.chars + 1).min(len);
                if self.chars == len {
                    Phase::PausingAtFull
                } else {
                    Phase::Typing
                }
            }
            Phase::Deleting | Phase::PausingAtFull => {
                self.chars = self.chars.saturating_sub(1);
                if self.chars == 0 {
                    self.index = (self.index + 1) % self.phrases.len();
                    Phase::PausingAtEmpty
                } else {
                    Phase::Deleting
                }
            }
        };

        out.push(DomCommand::SetText {
            node: self.node,
            text: SharedStr::from(phrase.prefix(self.chars)),
        });

        Some(match self.phase {
            Phase::Typing => self.config.type_ms,
            Phase::PausingAtFull => self.config.pause_full_ms,
            Phase::Deleting => self.config.delete_ms,
            Phase::PausingAtEmpty => self.config.pause_empty_ms,
        })
    }

    pub fn stop(&mut self) {
        self.stopped = true;
    }
}
