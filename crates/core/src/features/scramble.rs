use vitae_protocol::{DomCommand, NodeId};

const GLYPHS: &str = "!<>-_\\/[]{}—=+*^?#________";
const MAX_START: u32 = 40;
const MAX_SPAN: u32 = 40;
const REROLL_CHANCE: f64 = 0.28;

#[derive(Debug, Clone)]
struct Slot {
    from: Option<char>,
    to: Option<char>,
    start: u32,
    end: u32,
    glyph: Option<char>,
}

/// Morphs an element's text into new text through random glyphs.
#[derive(Debug, Clone)]
pub struct TextScramble {
    node: NodeId,
    slots: Vec<Slot>,
    frame: u32,
    done: bool,
}

impl TextScramble {
    pub fn new(node: NodeId, from: &str, to: &str, rng: &mut fastrand::Rng) -> Self {
        let from: Vec<char> = from.chars().collect();
        let to: Vec<char> = to.chars().collect();
        let slots = (0..from.len().max(to.len()))
            .map(|i| {
                let start = rng.u32(0..MAX_START);
                Slot {
                    from: from.get(i).copied(),
                    to: to.get(i).copied(),
                    start,
                    end: start + rng.u32(0..MAX_SPAN),
                    glyph: None,
                }
            })
            .collect();
        Self {
            node,
            slots,
            frame: 0,
            done: false,
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Render the current frame. Returns `true` once every character has
    /// settled on its new value.
    pub fn frame(&mut self, rng: &mut fastrand::Rng, out: &mut Vec<DomCommand>) -> bool {
        if self.done {
            return true;
        }
        let mut text = String::with_capacity(self.slots.len());
        let mut settled = 0;
        for slot in &mut self.slots {
            if self.frame >= slot.end {
                settled += 1;
                text.extend(slot.to);
            } else if self.frame >= slot.start {
                let glyph = match slot.glyph {
                    Some(g) if rng.f64() >= REROLL_CHANCE => g,
                    _ => random_glyph(rng),
                };
                slot.glyph = Some(glyph);
                text.push(glyph);
            } else {
                text.extend(slot.from);
            }
        }
        out.push(DomCommand::SetText {
            node: self.node,
            text: text.into(),
        });
        self.done = settled == self.slots.len();
        if !self.done {
            self.frame += 1;
        }
        self.done
    }
}

fn random_glyph(rng: &mut fastrand::Rng) -> char {
    let count = GLYPHS.chars().count();
    GLYPHS.chars().nth(rng.usize(0..count)).unwrap_or('_')
}
