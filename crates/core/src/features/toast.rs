use vitae_protocol::{
    DomCommand, ElementTag, Length, NodeId, ThemeToken, TimingFunction, Transform, Transition,
    TransitionProperty,
};

use super::NodeAllocator;
use crate::config::ToastConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    pub fn token(self) -> ThemeToken {
        match self {
            ToastKind::Success => ThemeToken::ToastSuccess,
            ToastKind::Error => ThemeToken::ToastError,
            ToastKind::Info => ThemeToken::ToastInfo,
        }
    }

    fn class(self) -> &'static str {
        match self {
            ToastKind::Success => "notification notification-success",
            ToastKind::Error => "notification notification-error",
            ToastKind::Info => "notification notification-info",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    SlideIn,
    SlideOut,
    Remove,
}

/// Single-slot notification area.
#[derive(Debug, Clone)]
pub struct Toaster {
    current: Option<NodeId>,
    config: ToastConfig,
}

impl Toaster {
    pub fn new(config: ToastConfig) -> Self {
        Self {
            current: None,
            config,
        }
    }

    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    /// Replace any visible toast with a new one. Returns its id and the
    /// phases to schedule, relative to now.
    pub fn show(
        &mut self,
        kind: ToastKind,
        message: &str,
        alloc: &mut NodeAllocator,
        out: &mut Vec<DomCommand>,
    ) -> (NodeId, [(f64, ToastPhase); 2]) {
        if let Some(previous) = self.current.take() {
            out.push(DomCommand::RemoveElement { node: previous });
        }
        let node = alloc.alloc();
        out.push(DomCommand::CreateElement {
            node,
            parent: None,
            tag: ElementTag::Div,
            class: kind.class().into(),
            text: Some(message.into()),
        });
        out.push(DomCommand::SetBackground {
            node,
            color: kind.token(),
        });
        out.push(DomCommand::SetTransform {
            node,
            transform: Transform::TranslateX {
                by: Length::Percent(100.0),
            },
        });
        out.push(DomCommand::SetTransition {
            node,
            transition: Transition {
                property: TransitionProperty::Transform,
                duration_ms: self.config.exit_ms,
                timing: TimingFunction::Ease,
            },
        });
        self.current = Some(node);
        (
            node,
            [
                (self.config.enter_delay_ms, ToastPhase::SlideIn),
                (self.config.visible_ms, ToastPhase::SlideOut),
            ],
        )
    }

    /// Run a scheduled phase. A slide-out returns the delay before removal.
    /// Phases of a replaced toast are ignored.
    pub fn advance(
        &mut self,
        node: NodeId,
        phase: ToastPhase,
        out: &mut Vec<DomCommand>,
    ) -> Option<(f64, ToastPhase)> {
        if self.current != Some(node) {
            return None;
        }
        match phase {
            ToastPhase::SlideIn => {
                out.push(DomCommand::SetTransform {
                    node,
                    transform: Transform::translate_x_px(0.0),
                });
                None
            }
            ToastPhase::SlideOut => {
                out.push(DomCommand::SetTransform {
                    node,
                    transform: Transform::TranslateX {
                        by: Length::Percent(100.0),
                    },
                });
                Some((self.config.exit_ms, ToastPhase::Remove))
            }
            ToastPhase::Remove => {
                out.push(DomCommand::RemoveElement { node });
                self.current = None;
                None
            }
        }
    }
}
