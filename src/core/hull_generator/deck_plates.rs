//! Deck-Zellen (Bounding-Boxes) und Bodenplatten eines Decks.
//!
//! Das Zellraster liegt auf ganzzahligen Vielfachen der Zellbreite. Zellen
//! entstehen nur, wo sie vollständig innerhalb der Deckkontur liegen; der
//! Rest bis zur Kontur wird mit `Filler`-Platten geschlossen.

use glam::{Vec2, Vec3};
use indexmap::IndexMap;

use crate::core::identifiers::{BoundingBox, DeckPlateKey, GridKey};
use crate::core::object_buffer::ObjectBuffer;
use crate::core::vertex::{Vertex, QUAD_TEX_COORDS, QUAD_WINDING};

const EPS: f32 = 1e-4;

/// Ergebnis für ein Deck.
pub(super) struct DeckFloor {
    pub bounding_boxes: Vec<BoundingBox>,
    pub vertices: Vec<Vec3>,
    pub plates: ObjectBuffer<DeckPlateKey>,
}

/// Lineare Deckkontur: (x, halbe Breite) aufsteigend nach x.
struct Outline<'a> {
    points: &'a [Vec2],
}

impl Outline<'_> {
    fn start(&self) -> f32 {
        self.points.first().map_or(0.0, |p| p.x)
    }

    fn end(&self) -> f32 {
        self.points.last().map_or(0.0, |p| p.x)
    }

    fn half_width(&self, x: f32) -> f32 {
        for w in self.points.windows(2) {
            let (a, b) = (w[0], w[1]);
            if x >= a.x && x <= b.x {
                let dx = b.x - a.x;
                if dx <= f32::EPSILON {
                    return a.y.max(b.y);
                }
                return a.y + (b.y - a.y) * (x - a.x) / dx;
            }
        }
        0.0
    }

    /// Stützstellen strikt zwischen `a` und `b`.
    fn breaks_between(&self, a: f32, b: f32) -> impl Iterator<Item = f32> + '_ {
        self.points
            .iter()
            .map(|p| p.x)
            .filter(move |&x| x > a + EPS && x < b - EPS)
    }

    /// Kleinste halbe Breite im Intervall (Endpunkte + Stützstellen).
    fn min_half_width(&self, a: f32, b: f32) -> f32 {
        self.breaks_between(a, b)
            .map(|x| self.half_width(x))
            .fold(self.half_width(a).min(self.half_width(b)), f32::min)
    }
}

fn plate_vertices(corners: [Vec3; 4]) -> [Vertex; 4] {
    let mut out = [Vertex::default(); 4];
    for (i, v) in out.iter_mut().enumerate() {
        *v = Vertex::new(corners[i], Vec3::Y, QUAD_TEX_COORDS[i]);
    }
    out
}

/// Baut Zellen und Platten für ein Deck auf Höhe `y`.
///
/// `outline` enthält die +Z-Hälfte des Deck-Rings (x aufsteigend, y = halbe Breite).
pub(super) fn build_deck_floor(outline: &[Vec2], y: f32, cell: f32) -> DeckFloor {
    let outline = Outline { points: outline };
    let (start, end) = (outline.start(), outline.end());

    let mut bounding_boxes = Vec::new();
    let mut fillers: Vec<[Vec3; 4]> = Vec::new();

    if end - start > EPS {
        let first_col = (start / cell).floor() as i64;
        let last_col = (end / cell).ceil() as i64;
        for col in first_col..last_col {
            let x0 = col as f32 * cell;
            let x1 = x0 + cell;
            let a = x0.max(start);
            let b = x1.min(end);
            if b - a <= EPS {
                continue;
            }

            let full = x0 >= start - EPS && x1 <= end + EPS;
            let num_z = if full {
                (outline.min_half_width(x0, x1) / cell + EPS).floor().max(0.0) as i32
            } else {
                0
            };
            for j in -num_z..num_z {
                bounding_boxes.push(BoundingBox::new(
                    Vec3::new(x0, y, j as f32 * cell),
                    Vec3::new(x1, y, (j + 1) as f32 * cell),
                ));
            }

            // Randplatten zwischen Zellraster und Kontur, an Stützstellen geteilt
            let inner = num_z as f32 * cell;
            let mut xs = vec![a];
            xs.extend(outline.breaks_between(a, b));
            xs.push(b);
            for w in xs.windows(2) {
                let (xa, xb) = (w[0], w[1]);
                let oa = outline.half_width(xa).max(inner);
                let ob = outline.half_width(xb).max(inner);
                if oa.max(ob) - inner <= EPS {
                    continue;
                }
                fillers.push([
                    Vec3::new(xa, y, inner),
                    Vec3::new(xb, y, inner),
                    Vec3::new(xb, y, ob),
                    Vec3::new(xa, y, oa),
                ]);
                fillers.push([
                    Vec3::new(xa, y, -oa),
                    Vec3::new(xb, y, -ob),
                    Vec3::new(xb, y, -inner),
                    Vec3::new(xa, y, -inner),
                ]);
            }
        }
    }

    let mut plates = ObjectBuffer::new_manual();
    for corners in &fillers {
        plates.add_object(DeckPlateKey::Filler, &QUAD_WINDING, &plate_vertices(*corners));
    }
    for bb in &bounding_boxes {
        let size = bb.max - bb.min;
        let corners = [
            bb.min,
            bb.min + Vec3::new(size.x, 0.0, 0.0),
            bb.min + Vec3::new(size.x, 0.0, size.z),
            bb.min + Vec3::new(0.0, 0.0, size.z),
        ];
        plates.add_object(DeckPlateKey::board(bb.min), &QUAD_WINDING, &plate_vertices(corners));
    }
    plates.set_update_manually(false);

    let mut unique: IndexMap<GridKey, Vec3> = IndexMap::new();
    for bb in &bounding_boxes {
        let corners = [
            bb.min,
            bb.max,
            Vec3::new(bb.max.x, bb.max.y, bb.min.z),
            Vec3::new(bb.min.x, bb.max.y, bb.max.z),
        ];
        for c in corners {
            unique.entry(GridKey::from_vec3(c)).or_insert(c);
        }
    }

    DeckFloor {
        bounding_boxes,
        vertices: unique.into_values().collect(),
        plates,
    }
}
