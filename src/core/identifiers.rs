//! Schlüsseltypen für Objekte in `ObjectBuffer`n und Deck-Zellen.
//!
//! Positionen werden auf ganze Millimeter quantisiert, damit zwei
//! unabhängig berechnete Punkte derselben Gitterstelle identisch hashen.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Quantisierungsschritte pro Meter (1 mm).
pub const GRID_KEY_STEPS_PER_METER: f32 = 1000.0;

/// Auf Millimeter quantisierte 3D-Position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridKey {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl GridKey {
    pub fn from_vec3(v: Vec3) -> Self {
        let q = |c: f32| (c * GRID_KEY_STEPS_PER_METER).round() as i32;
        Self {
            x: q(v.x),
            y: q(v.y),
            z: q(v.z),
        }
    }

    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x as f32, self.y as f32, self.z as f32) / GRID_KEY_STEPS_PER_METER
    }
}

impl From<Vec3> for GridKey {
    fn from(v: Vec3) -> Self {
        Self::from_vec3(v)
    }
}

/// Ungeordnetes Endpunkt-Paar eines Wandsegments.
///
/// Intern immer `a <= b`, daher ist `new(p, q) == new(q, p)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WallSegmentKey {
    a: GridKey,
    b: GridKey,
}

impl WallSegmentKey {
    pub fn new(p: Vec3, q: Vec3) -> Self {
        let (p, q) = (GridKey::from_vec3(p), GridKey::from_vec3(q));
        if p <= q {
            Self { a: p, b: q }
        } else {
            Self { a: q, b: p }
        }
    }

    pub fn endpoints(&self) -> (Vec3, Vec3) {
        (self.a.to_vec3(), self.b.to_vec3())
    }
}

/// Schlüssel einer Bodenplatte.
///
/// `Filler` ist der gemeinsame Schlüssel aller Randplatten zwischen
/// Zellraster und Rumpfkontur; sie werden nie einzeln adressiert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DeckPlateKey {
    Filler,
    Board(GridKey),
}

impl DeckPlateKey {
    /// Plattenschlüssel für die Zelle mit Minimal-Ecke `min`.
    pub fn board(min: Vec3) -> Self {
        Self::Board(GridKey::from_vec3(min))
    }
}

/// Art eines platzierten Deck-Objekts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DeckObjectKind {
    Ladder,
    Cannon,
    Engine,
}

impl DeckObjectKind {
    /// Ob das Objekt beim Platzieren eine Öffnung in den Rumpf schneidet.
    pub fn cuts_hull(self) -> bool {
        matches!(self, DeckObjectKind::Cannon)
    }
}

/// Schlüssel eines platzierten Objekts: Art + Ursprung der Grundfläche.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeckObjectKey {
    pub kind: DeckObjectKind,
    pub origin: GridKey,
}

impl DeckObjectKey {
    pub fn new(kind: DeckObjectKind, origin: Vec3) -> Self {
        Self {
            kind,
            origin: GridKey::from_vec3(origin),
        }
    }
}

/// Achsenparallele Box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Liegt `p` in der XZ-Projektion der Box (Ränder inklusive)?
    pub fn contains_xz(&self, p: Vec3) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.z >= self.min.z && p.z <= self.max.z
    }

    /// Quantisierter Schlüssel der Minimal-Ecke.
    pub fn key(&self) -> GridKey {
        GridKey::from_vec3(self.min)
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}
