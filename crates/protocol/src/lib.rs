pub mod commands;
pub mod events;
pub mod form;
pub mod markup;
pub mod shared_str;
pub mod theme;
pub mod types;

pub use commands::{
    DomCommand, ElementTag, Length, StyleProperty, TimingFunction, Transform, Transition,
    TransitionProperty,
};
pub use events::{Key, PageEvent};
pub use form::{ContactFields, SubmitOutcome};
pub use markup::*;
pub use shared_str::SharedStr;
pub use theme::ThemeToken;
pub use types::{Bounds, NodeId, Point, Rect, Size};
