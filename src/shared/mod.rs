//! Geteilte Typen und Helfer für layer-übergreifende Verträge.
//!
//! Enthält Optionen und reine Geometrie-Funktionen, die zwischen `core`
//! und `app` geteilt werden, um direkte Abhängigkeiten zu vermeiden.

pub mod geometry;
pub mod options;

pub use options::HullOptions;
pub use options::{BOUNDING_BOX_WIDTH, DECK_HEIGHT, HANDLE_MIN_DIST, PRIMITIVES_PER_DECK};
