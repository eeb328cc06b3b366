//! Core-Domänentypen: Profilkurven, Rumpfgenerierung, Objekt-Puffer und Deck-Daten.

/// Einzelner Kurvengriff mit Tangenten
pub mod curve_handle;
/// Kubische Bezier-Sammlung eines Profils
pub mod curve_collection;
pub mod hull_data;
/// Rumpfdefinition (TOML) und die daraus gebauten Profile
pub mod hull_definition;
pub mod hull_generator;
pub mod hull_mesh;
pub mod identifiers;
/// Schlüsselbasierter Vertex-/Index-Puffer mit Slot-Verwaltung
pub mod object_buffer;
pub mod packager;
pub mod spatial;
pub mod vertex;

pub use curve_collection::{BezierCurveCollection, BezierInfo, PanelKind};
pub use curve_handle::{CurveHandle, HandleMovementRestriction};
pub use hull_data::{DeckChange, DeckData, HullDataManager, ObserverId};
pub use hull_definition::{HullDefinition, HullProfiles};
pub use hull_generator::{generate_from_profiles, generate_ship, HullGeometry};
pub use hull_mesh::{HullMesh, HullSide, SectionIdentifier, SectionKey};
pub use identifiers::{
    BoundingBox, DeckObjectKey, DeckObjectKind, DeckPlateKey, GridKey, WallSegmentKey,
};
pub use object_buffer::{ObjectBuffer, ObjectData, ObjectHandle};
pub use packager::AirshipPackage;
pub use spatial::{DeckVertexIndex, GridMatch};
pub use vertex::{MeshData, Vertex};
