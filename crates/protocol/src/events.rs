use serde::{Deserialize, Serialize};

use crate::form::{ContactFields, SubmitOutcome};
use crate::markup::SectionMarkup;
use crate::types::{NodeId, Point, Rect, Size};

/// Browser events forwarded by the host.
///
/// Pointer coordinates in `PointerMove` are relative to the hero container;
/// `PointerEnter` carries viewport coordinates plus the entered element's
/// bounding rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PageEvent {
    /// The window `load` event.
    Loaded,
    Scroll {
        y: f64,
        viewport_height: f64,
    },
    Resize {
        viewport: Size,
        #[serde(default)]
        hero: Option<Size>,
    },
    /// Section geometry changed (fonts loaded, images sized, ...).
    Layout {
        sections: Vec<SectionMarkup>,
    },
    Intersect {
        node: NodeId,
        intersecting: bool,
    },
    PointerMove {
        position: Point,
    },
    PointerEnter {
        node: NodeId,
        position: Point,
        bounds: Rect,
    },
    PointerLeave {
        node: NodeId,
    },
    Click {
        node: NodeId,
    },
    KeyDown {
        key: Key,
    },
    Focus {
        node: NodeId,
    },
    Blur {
        node: NodeId,
    },
    Submit {
        fields: ContactFields,
    },
    /// Answer to `DomCommand::Deliver`.
    SubmitSettled {
        outcome: SubmitOutcome,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Key {
    Escape,
    #[serde(other)]
    Other,
}
