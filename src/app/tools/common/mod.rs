//! Gemeinsame Bausteine der Deck-Tools.
//!
//! Aufgeteilt in:
//! - `deck_cursor`: Gitter-Cursor mit Strich-Zustand (Ursprung/Ende)
//! - `stroke`: Wandsegmente entlang des Strich-Rechtecks

mod deck_cursor;
mod stroke;

pub use deck_cursor::{CursorEvent, DeckCursor};
pub use stroke::{stroke_wall_segments, WallSegment};
