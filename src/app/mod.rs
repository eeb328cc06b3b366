//! Application-Layer: Deck-Editor-Tools und ihr Manager.

pub mod tools;

pub use tools::{CursorInput, HullTool, ToolManager};
