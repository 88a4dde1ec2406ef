use serde::{Deserialize, Serialize};

/// Semantic color tokens resolved by the host's active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    // Toasts
    ToastSuccess,
    ToastError,
    ToastInfo,

    // Decorative background
    ParticleFill,
    ParticleLink,
    FloatingShape,

    // Hover / focus
    CardShadowRaised,
    CardShadowResting,
    RippleFill,
    FocusRing,
}
