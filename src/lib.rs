//! Airship Hull Editor Library.
//! Rumpfgenerierung, Deck-Daten und Editor-Tools als Library exportiert.

pub mod app;
pub mod core;
pub mod shared;

pub use app::{CursorInput, HullTool, ToolManager};
pub use core::{
    AirshipPackage, BezierCurveCollection, DeckChange, HullDataManager, HullDefinition,
    HullGeometry, HullProfiles, MeshData, ObjectBuffer, Vertex,
};
pub use shared::HullOptions;
