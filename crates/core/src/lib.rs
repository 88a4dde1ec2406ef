//! Behavior of the vitae resume page, independent of any browser.
//!
//! [`Page`] owns one state machine per feature and a [`TimerQueue`]. Hosts
//! turn DOM events into [`PageEvent`](vitae_protocol::PageEvent)s and apply
//! the [`DomCommand`](vitae_protocol::DomCommand)s that come back.

pub mod config;
pub mod features;
pub mod model;
pub mod page;
pub mod timers;
pub mod util;

pub use config::{ConfigError, PageConfig};
pub use features::contact::{Delivery, HostTransport, SimulatedTransport, SubmitTransport};
pub use page::{Diagnostic, Page, PageTimer};
pub use timers::{TimerId, TimerQueue};
