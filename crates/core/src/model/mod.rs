pub mod particle;
pub mod reveal;
pub mod submission;

pub use particle::Particle;
pub use reveal::{RevealKind, RevealRule};
pub use submission::{FieldError, Submission, ValidationErrors, validate};
