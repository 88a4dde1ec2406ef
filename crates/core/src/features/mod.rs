//! One state machine per page behavior.
//!
//! Features never wait or read a clock: they push [`DomCommand`]s into the
//! caller's buffer and return the delays they need, which the
//! [`Page`](crate::page::Page) turns into timer entries.
//!
//! [`DomCommand`]: vitae_protocol::DomCommand

pub mod contact;
pub mod counters;
pub mod floating;
pub mod hover;
pub mod intro;
pub mod modal;
pub mod navigation;
pub mod parallax;
pub mod particles;
pub mod reveal;
pub mod scramble;
pub mod toast;
pub mod typewriter;

use vitae_protocol::NodeId;

/// Hands out ids for elements the core asks the host to create.
#[derive(Debug, Clone)]
pub struct NodeAllocator {
    next: u32,
}

impl Default for NodeAllocator {
    fn default() -> Self {
        Self {
            next: NodeId::DYNAMIC_BASE,
        }
    }
}

impl NodeAllocator {
    pub fn alloc(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next = self.next.wrapping_add(1).max(NodeId::DYNAMIC_BASE);
        id
    }
}
