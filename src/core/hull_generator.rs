//! Prozedurale Rumpfgeometrie aus drei Profilkurven.
//!
//! Ablauf:
//! 1. Profile als Polylinien abtasten (Meter), Tiefgang/Länge/Breite bestimmen
//! 2. Schichttiefen: `primitives_per_deck` Schichten pro Deck, der Boden
//!    ("falsches Deck") teilt den Rest bis zum Kiel gleichmäßig auf
//! 3. Pro Schicht einen Ring aus Stationen bilden (+Z vorn→hinten, −Z hinten→vorn)
//! 4. Pro Deck Wand-Quads zwischen benachbarten Ringen, Normalen aus dem Gesamtgitter
//! 5. Pro Deck Zellen und Bodenplatten auf der obersten Schicht
//!
//! Welt-Koordinaten: X entlang des Rumpfs, Y nach oben (`y = -tiefe`), Z quer.

use glam::{Vec2, Vec3};

use crate::core::curve_collection::BezierCurveCollection;
use crate::core::hull_definition::HullProfiles;
use crate::core::identifiers::{BoundingBox, DeckPlateKey};
use crate::core::object_buffer::ObjectBuffer;
use crate::core::vertex::{MeshData, Vertex, QUAD_TEX_COORDS, QUAD_WINDING};
use crate::shared::HullOptions;

mod deck_plates;
mod profiles;

use profiles::ProfileSet;

/// Ergebnis der Rumpfgenerierung.
#[derive(Debug, Clone)]
pub struct HullGeometry {
    pub num_decks: usize,
    pub deck_height: f32,
    pub primitives_per_deck: usize,
    /// Zellbreite = Raster für Wände und Objekte
    pub wall_resolution: f32,
    pub length: f32,
    pub berth: f32,
    pub draft: f32,
    pub centroid: Vec3,
    /// Ein Ring pro Schicht, oberste Schicht zuerst
    pub layers: Vec<Vec<Vec3>>,
    /// Wand-Quads pro Deck (je 4 Vertices / 6 Indizes)
    pub hull_meshes: Vec<MeshData>,
    pub deck_plates: Vec<ObjectBuffer<DeckPlateKey>>,
    pub deck_bounding_boxes: Vec<Vec<BoundingBox>>,
    /// Eckpunkte der Zellen pro Deck, ohne Duplikate
    pub deck_vertices: Vec<Vec<Vec3>>,
    /// Maximale Zellanzahl (Länge, Breite)
    pub max_bounding_box_dims: [usize; 2],
}

impl HullGeometry {
    /// Anzahl Stationen pro Rumpfhälfte.
    pub fn stations(&self) -> usize {
        self.layers.first().map_or(0, |ring| ring.len() / 2)
    }

    /// Anzahl der +Z-Quads am Anfang von `hull_meshes[deck]`.
    /// Beide Hälften haben gleich viele Quads.
    pub fn port_quads(&self, deck: usize) -> usize {
        self.hull_meshes.get(deck).map_or(0, |m| m.vertices.len() / 8)
    }

    /// Y-Koordinate des Bodens von Deck `deck`.
    pub fn deck_floor_y(&self, deck: usize) -> f32 {
        -(deck as f32) * self.deck_height
    }
}

/// Erzeugt den Rumpf aus Heck-, Seiten- und Draufsichtprofil.
pub fn generate_ship(
    back: &BezierCurveCollection,
    side: &BezierCurveCollection,
    top: &BezierCurveCollection,
    primitives_per_deck: usize,
    options: &HullOptions,
) -> HullGeometry {
    assert!(primitives_per_deck >= 1, "primitives_per_deck muss >= 1 sein");
    debug_assert!(
        !back.has_pending_edits() && !side.has_pending_edits() && !top.has_pending_edits(),
        "generate_ship mit ausstehenden Griff-Änderungen"
    );

    let profiles = ProfileSet::sample(back, side, top, options.profile_samples);
    let deck_height = options.deck_height;
    let cell = options.bounding_box_width;
    let p = primitives_per_deck;

    let num_decks = (profiles.draft / deck_height) as usize + 1;
    let depths = layer_depths(num_decks, p, deck_height, profiles.draft);

    let stations = station_count(profiles.length, cell, options.horizontal_prim_divisor);
    let layers: Vec<Vec<Vec3>> = depths
        .iter()
        .enumerate()
        .map(|(l, &depth)| build_ring(&profiles, depth, stations, l + 1 == depths.len()))
        .collect();

    let normals = grid_normals(&layers);
    let centroid = centroid(&layers);

    let hull_meshes = (0..num_decks)
        .map(|deck| build_deck_hull(&layers, &normals, deck * p, (deck + 1) * p, stations))
        .collect();

    let mut deck_plates = Vec::with_capacity(num_decks);
    let mut deck_bounding_boxes = Vec::with_capacity(num_decks);
    let mut deck_vertices = Vec::with_capacity(num_decks);
    for deck in 0..num_decks {
        let ring = &layers[deck * p];
        let outline: Vec<Vec2> = ring[..stations].iter().map(|v| Vec2::new(v.x, v.z)).collect();
        let floor = deck_plates::build_deck_floor(&outline, ring[0].y, cell);
        deck_plates.push(floor.plates);
        deck_bounding_boxes.push(floor.bounding_boxes);
        deck_vertices.push(floor.vertices);
    }

    log::info!(
        "Rumpf generiert: {} Decks, {} Schichten, {} Stationen, {:.1} × {:.1} × {:.1} m",
        num_decks,
        layers.len(),
        stations,
        profiles.length,
        profiles.berth,
        profiles.draft
    );

    HullGeometry {
        num_decks,
        deck_height,
        primitives_per_deck: p,
        wall_resolution: cell,
        length: profiles.length,
        berth: profiles.berth,
        draft: profiles.draft,
        centroid,
        layers,
        hull_meshes,
        deck_plates,
        deck_bounding_boxes,
        deck_vertices,
        max_bounding_box_dims: [
            (profiles.length / cell) as usize,
            (profiles.berth / cell) as usize,
        ],
    }
}

/// Kurzform für bereits gebaute Profile und die Primitive aus den Optionen.
pub fn generate_from_profiles(profiles: &HullProfiles, options: &HullOptions) -> HullGeometry {
    generate_ship(
        &profiles.back,
        &profiles.side,
        &profiles.top,
        options.primitives_per_deck,
        options,
    )
}

// ── Schichten & Ringe ───────────────────────────────────────────────

/// Tiefen aller Schichten: `num_decks * p + 1` Werte, aufsteigend.
fn layer_depths(num_decks: usize, p: usize, deck_height: f32, draft: f32) -> Vec<f32> {
    let per_prim = deck_height / p as f32;
    let mut depths: Vec<f32> = (0..=(num_decks - 1) * p).map(|i| i as f32 * per_prim).collect();
    let bottom_deck = depths.last().copied().unwrap_or(0.0);
    let bottom_prim = (draft - bottom_deck) / p as f32;
    depths.extend((1..=p).map(|i| bottom_deck + i as f32 * bottom_prim));
    depths
}

/// Stationen pro Rumpfhälfte: gerade, mindestens 2.
fn station_count(length: f32, cell: f32, divisor: usize) -> usize {
    let mut n = ((length / cell + 1.0) as usize) / divisor.max(1);
    if n % 2 != 0 {
        n += 1;
    }
    n.max(2)
}

fn build_ring(profiles: &ProfileSet, depth: f32, stations: usize, is_keel: bool) -> Vec<Vec3> {
    let (fore, aft) = profiles.hull_span_at_depth(depth);
    let half: Vec<Vec3> = (0..stations)
        .map(|i| {
            let u = i as f32 / (stations - 1) as f32;
            let x = fore + u * (aft - fore);
            let z = if is_keel { 0.0 } else { profiles.half_width(x, depth) };
            Vec3::new(x, -depth, z)
        })
        .collect();

    let mut ring = half.clone();
    ring.extend(half.iter().rev().map(|v| Vec3::new(v.x, v.y, -v.z)));
    ring
}

/// Vertex-Normalen über das gesamte Schiffsgitter (Ring zyklisch, Schichten geklemmt).
fn grid_normals(layers: &[Vec<Vec3>]) -> Vec<Vec<Vec3>> {
    let rows = layers.len();
    layers
        .iter()
        .enumerate()
        .map(|(l, ring)| {
            let n = ring.len();
            let up = &layers[l.saturating_sub(1)];
            let down = &layers[(l + 1).min(rows - 1)];
            (0..n)
                .map(|r| {
                    let tu = ring[(r + 1) % n] - ring[(r + n - 1) % n];
                    let tv = down[r] - up[r];
                    let normal = tv.cross(tu);
                    if normal.length_squared() > f32::EPSILON {
                        normal.normalize()
                    } else {
                        Vec3::NEG_Y
                    }
                })
                .collect()
        })
        .collect()
}

fn centroid(layers: &[Vec<Vec3>]) -> Vec3 {
    let (sum, count) = layers
        .iter()
        .flatten()
        .fold((Vec3::ZERO, 0usize), |(s, c), v| (s + *v, c + 1));
    if count == 0 {
        Vec3::ZERO
    } else {
        sum / count as f32
    }
}

/// Wand-Quads eines Decks zwischen Schicht `top` und `bottom`.
///
/// Reihenfolge: erst die +Z-Hälfte, dann die −Z-Hälfte; je Hälfte
/// Segment für Segment, je Segment Schicht für Schicht.
fn build_deck_hull(
    layers: &[Vec<Vec3>],
    normals: &[Vec<Vec3>],
    top: usize,
    bottom: usize,
    stations: usize,
) -> MeshData {
    let quads_per_half = (stations - 1) * (bottom - top);
    let mut indices = Vec::with_capacity(quads_per_half * 2 * 6);
    let mut vertices = Vec::with_capacity(quads_per_half * 2 * 4);

    for half_start in [0, stations] {
        for s in half_start..half_start + stations - 1 {
            for l in top..bottom {
                let base = vertices.len() as u32;
                let grid = [(s, l), (s + 1, l), (s + 1, l + 1), (s, l + 1)];
                for (corner, (r, layer)) in grid.into_iter().enumerate() {
                    vertices.push(Vertex::new(
                        layers[layer][r],
                        normals[layer][r],
                        QUAD_TEX_COORDS[corner],
                    ));
                }
                indices.extend(QUAD_WINDING.iter().map(|i| base + i));
            }
        }
    }
    MeshData::new(indices, vertices)
}
