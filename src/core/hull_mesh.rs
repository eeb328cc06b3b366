//! Rumpfwand eines Decks als Sammlung einzeln abschaltbarer Sektionen.
//!
//! Jede Sektion ist ein Quad der Wand. Für Punkt-in-Quad-Tests werden die
//! vier Ecken in obere/untere Paare sortiert und jede Seitenkante als
//! `Hanging` oder `Building` klassifiziert; damit reduziert sich der Test
//! auf zwei Geraden-Seiten-Tests. Das gilt nur für einfache Trapeze, wie
//! sie der Generator erzeugt.
//!
//! Randkonvention (halboffen): Punkte auf der nahen Kante (kleineres X)
//! und der Unterkante liegen innen, Punkte auf der fernen Kante und der
//! Oberkante außen.

use glam::Vec3;

use crate::core::object_buffer::ObjectBuffer;
use crate::core::vertex::MeshData;
use crate::shared::geometry::trace_x;


/// Deck-lokale Nummer einer Sektion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionKey(pub u32);

/// Rumpfseite nach Vorzeichen von Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HullSide {
    /// Z >= 0
    Port,
    /// Z < 0
    Starboard,
}

impl HullSide {
    pub fn of_point(p: Vec3) -> Self {
        if p.z >= 0.0 {
            HullSide::Port
        } else {
            HullSide::Starboard
        }
    }
}

/// Neigung einer Seitenkante relativ zum Quad-Inneren.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideClass {
    /// Obere Ecke liegt weiter außen als die untere (Überhang).
    Hanging,
    /// Obere Ecke liegt weiter innen oder senkrecht darüber.
    Building,
}

/// Vorsortierte Ecken einer Sektion mit Klassifizierung der Seitenkanten.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionIdentifier {
    pub upper_left: Vec3,
    pub upper_right: Vec3,
    pub lower_left: Vec3,
    pub lower_right: Vec3,
    pub side: HullSide,
    pub near: SideClass,
    pub far: SideClass,
}

impl SectionIdentifier {
    /// Sortiert die Ecken. Die Rumpfseite kommt vom Erzeuger des Quads,
    /// nicht aus der Geometrie (Kiel-Quads liegen auf Z = ±0).
    pub fn from_corners(corners: [Vec3; 4], side: HullSide) -> Self {
        let mut by_y = corners;
        by_y.sort_by(|a, b| a.y.total_cmp(&b.y));
        let (mut lower, mut upper) = ([by_y[0], by_y[1]], [by_y[2], by_y[3]]);
        lower.sort_by(|a, b| a.x.total_cmp(&b.x));
        upper.sort_by(|a, b| a.x.total_cmp(&b.x));
        let [lower_left, lower_right] = lower;
        let [upper_left, upper_right] = upper;

        let near = if upper_left.x < lower_left.x {
            SideClass::Hanging
        } else {
            SideClass::Building
        };
        let far = if upper_right.x > lower_right.x {
            SideClass::Hanging
        } else {
            SideClass::Building
        };

        Self {
            upper_left,
            upper_right,
            lower_left,
            lower_right,
            side,
            near,
            far,
        }
    }

    fn min_x(&self) -> f32 {
        self.upper_left.x.min(self.lower_left.x)
    }

    fn max_x(&self) -> f32 {
        self.upper_right.x.max(self.lower_right.x)
    }

    fn min_y(&self) -> f32 {
        self.lower_left.y.min(self.lower_right.y)
    }

    fn max_y(&self) -> f32 {
        self.upper_left.y.max(self.upper_right.y)
    }

    /// Punkt-in-Quad-Test in der XY-Ebene (Z wird ignoriert).
    pub fn contains_point(&self, p: Vec3) -> bool {
        if p.y < self.min_y() || p.y >= self.max_y() {
            return false;
        }
        if p.x < self.min_x() || p.x >= self.max_x() {
            return false;
        }

        let near_inner = self.upper_left.x.max(self.lower_left.x);
        let far_inner = self.upper_right.x.min(self.lower_right.x);
        if p.x > near_inner && p.x < far_inner {
            return true;
        }

        self.right_of_near_side(p, near_inner) && self.left_of_far_side(p, far_inner)
    }

    fn right_of_near_side(&self, p: Vec3, near_inner: f32) -> bool {
        let (lo, hi) = (self.lower_left, self.upper_left);
        if (hi.x - lo.x).abs() <= f32::EPSILON {
            return p.x >= lo.x;
        }
        if p.x >= near_inner {
            return true;
        }
        let y_line = trace_x(lo, hi, p.x).y;
        match self.near {
            SideClass::Building => p.y <= y_line,
            SideClass::Hanging => p.y >= y_line,
        }
    }

    fn left_of_far_side(&self, p: Vec3, far_inner: f32) -> bool {
        let (lo, hi) = (self.lower_right, self.upper_right);
        if (hi.x - lo.x).abs() <= f32::EPSILON {
            return p.x < lo.x;
        }
        if p.x <= far_inner {
            return true;
        }
        let y_line = trace_x(lo, hi, p.x).y;
        match self.far {
            SideClass::Building => p.y < y_line,
            SideClass::Hanging => p.y > y_line,
        }
    }
}

/// Wand eines Decks: ein `ObjectBuffer` mit einer Sektion pro Quad.
#[derive(Debug, Clone)]
pub struct HullMesh {
    buffer: ObjectBuffer<SectionKey>,
    sections: Vec<SectionIdentifier>,
}

impl HullMesh {
    /// Zerlegt rohe Wand-Arrays (4 Vertices / 6 Indizes pro Quad) in Sektionen.
    ///
    /// Die ersten `port_quads` Quads gehören zur Backbordseite (+Z), der Rest
    /// zur Steuerbordseite.
    pub fn new(mesh: &MeshData, port_quads: usize) -> Self {
        debug_assert_eq!(mesh.vertices.len() % 4, 0, "Wand-Vertices nicht in Quads teilbar");
        debug_assert_eq!(
            mesh.indices.len(),
            mesh.vertices.len() / 4 * 6,
            "Wand-Indizes passen nicht zu den Quads"
        );

        let mut buffer = ObjectBuffer::new_manual();
        let mut sections = Vec::with_capacity(mesh.vertices.len() / 4);
        for (q, (verts, idx)) in mesh
            .vertices
            .chunks_exact(4)
            .zip(mesh.indices.chunks_exact(6))
            .enumerate()
        {
            let base = (q * 4) as u32;
            let local: Vec<u32> = idx.iter().map(|i| i - base).collect();
            let key = SectionKey(q as u32);
            buffer.add_object(key, &local, verts);
            let side = if q < port_quads {
                HullSide::Port
            } else {
                HullSide::Starboard
            };
            sections.push(SectionIdentifier::from_corners(
                [
                    verts[0].position,
                    verts[1].position,
                    verts[2].position,
                    verts[3].position,
                ],
                side,
            ));
        }
        buffer.set_update_manually(false);

        Self { buffer, sections }
    }

    pub fn buffer(&self) -> &ObjectBuffer<SectionKey> {
        &self.buffer
    }

    pub fn sections(&self) -> &[SectionIdentifier] {
        &self.sections
    }

    pub fn section(&self, key: SectionKey) -> Option<&SectionIdentifier> {
        self.sections.get(key.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Vertikaler Bereich der Wand (min, max).
    pub fn y_range(&self) -> Option<(f32, f32)> {
        self.sections.iter().fold(None, |acc, s| {
            let (lo, hi) = (s.min_y(), s.max_y());
            Some(match acc {
                None => (lo, hi),
                Some((a, b)) => (a.min(lo), b.max(hi)),
            })
        })
    }

    /// Sektionen der passenden Rumpfseite, die `p` enthalten.
    pub fn sections_containing(&self, p: Vec3) -> Vec<SectionKey> {
        let side = HullSide::of_point(p);
        self.sections
            .iter()
            .enumerate()
            .filter(|(_, s)| s.side == side && s.contains_point(p))
            .map(|(i, _)| SectionKey(i as u32))
            .collect()
    }

    fn set_sections(&mut self, keys: &[SectionKey], enabled: bool) {
        if keys.is_empty() {
            return;
        }
        self.buffer.set_update_manually(true);
        for key in keys {
            if enabled {
                self.buffer.enable_object(key);
            } else {
                self.buffer.disable_object(key);
            }
        }
        self.buffer.set_update_manually(false);
    }

    /// Schaltet alle Sektionen ab, die `p` enthalten. Gibt deren Anzahl zurück.
    pub fn cut(&mut self, p: Vec3) -> usize {
        let hits = self.sections_containing(p);
        self.set_sections(&hits, false);
        if !hits.is_empty() {
            log::debug!("Rumpf bei {:?} geschnitten: {} Sektionen", p, hits.len());
        }
        hits.len()
    }

    /// Schaltet die Sektionen an `p` wieder ein.
    pub fn restore(&mut self, p: Vec3) -> usize {
        let hits = self.sections_containing(p);
        self.set_sections(&hits, true);
        hits.len()
    }

    /// Anzahl abgeschalteter Sektionen.
    pub fn disabled_sections(&self) -> usize {
        self.buffer.len() - self.buffer.active_objects()
    }
}
