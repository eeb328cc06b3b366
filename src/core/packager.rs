//! JSON-Export und -Import eines Luftschiffs.
//!
//! Dokument: Version, Profilkurven (Meter), Deckanzahl, Schwerpunkt sowie pro
//! Deck Rumpf- und Deck-Arrays. Die Deck-Arrays entstehen durch Zusammenfassen
//! der aktiven Bodenplatten zu Streifen entlang Z; Randplatten werden danach
//! unverändert angehängt.

use std::path::Path;

use anyhow::Context;
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::core::curve_collection::{BezierCurveCollection, BezierInfo};
use crate::core::hull_data::HullDataManager;
use crate::core::hull_definition::HullProfiles;
use crate::core::identifiers::DeckPlateKey;
use crate::core::object_buffer::ObjectData;
use crate::core::vertex::{MeshData, Vertex, QUAD_TEX_COORDS, QUAD_WINDING};


/// Aktuelle Formatversion.
pub const PACKAGE_VERSION: u32 = 0;

/// Exportiertes Luftschiff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirshipPackage {
    #[serde(rename = "Version")]
    pub version: u32,
    #[serde(rename = "FrontBezierSurf", default)]
    pub back_curve: Vec<BezierInfo>,
    #[serde(rename = "SideBezierSurf", default)]
    pub side_curve: Vec<BezierInfo>,
    #[serde(rename = "TopBezierSurf", default)]
    pub top_curve: Vec<BezierInfo>,
    #[serde(rename = "NumDecks")]
    pub num_decks: usize,
    #[serde(rename = "Centroid")]
    pub centroid: Vec3,
    #[serde(rename = "HullVerticies")]
    pub hull_vertices: Vec<Vec<Vertex>>,
    #[serde(rename = "HullIndicies")]
    pub hull_indices: Vec<Vec<u32>>,
    #[serde(rename = "DeckVerticies")]
    pub deck_vertices: Vec<Vec<Vertex>>,
    #[serde(rename = "DeckIndicies")]
    pub deck_indices: Vec<Vec<u32>>,
}

impl AirshipPackage {
    /// Sammelt Rumpf- und Deck-Geometrie aller Decks.
    pub fn from_manager(manager: &HullDataManager, profiles: Option<&HullProfiles>) -> Self {
        let num_decks = manager.num_decks();
        let mut hull_vertices = Vec::with_capacity(num_decks);
        let mut hull_indices = Vec::with_capacity(num_decks);
        let mut deck_vertices = Vec::with_capacity(num_decks);
        let mut deck_indices = Vec::with_capacity(num_decks);

        for deck in manager.decks() {
            let hull = deck.hull.buffer();
            hull_vertices.push(hull.vertices().to_vec());
            hull_indices.push(hull.indices().to_vec());

            let plates =
                concat_deck_plates(&deck.plates.dump_object_data(), manager.wall_resolution());
            deck_vertices.push(plates.vertices);
            deck_indices.push(plates.indices);
        }

        let info = |curves: Option<&BezierCurveCollection>| {
            curves
                .map(|c| c.controller_info(1.0, 1.0))
                .unwrap_or_default()
        };
        Self {
            version: PACKAGE_VERSION,
            back_curve: info(profiles.map(|p| &p.back)),
            side_curve: info(profiles.map(|p| &p.side)),
            top_curve: info(profiles.map(|p| &p.top)),
            num_decks,
            centroid: calculate_center(&hull_vertices),
            hull_vertices,
            hull_indices,
            deck_vertices,
            deck_indices,
        }
    }

    /// Rumpf-Mesh von Deck `deck`.
    pub fn hull_mesh(&self, deck: usize) -> Option<MeshData> {
        Some(MeshData::new(
            self.hull_indices.get(deck)?.clone(),
            self.hull_vertices.get(deck)?.clone(),
        ))
    }

    /// Boden-Mesh von Deck `deck`.
    pub fn deck_mesh(&self, deck: usize) -> Option<MeshData> {
        Some(MeshData::new(
            self.deck_indices.get(deck)?.clone(),
            self.deck_vertices.get(deck)?.clone(),
        ))
    }

    /// Verschiebt jede Vertex-Position um `offset`. `Centroid` bleibt wie
    /// gespeichert.
    pub fn translate(&mut self, offset: Vec3) {
        for v in self
            .hull_vertices
            .iter_mut()
            .chain(self.deck_vertices.iter_mut())
            .flatten()
        {
            v.position += offset;
        }
    }
}

/// Mittelwert aller Vertex-Positionen.
pub fn calculate_center(vertex_sets: &[Vec<Vertex>]) -> Vec3 {
    let (sum, count) = vertex_sets
        .iter()
        .flatten()
        .fold((Vec3::ZERO, 0usize), |(s, c), v| (s + v.position, c + 1));
    if count == 0 {
        Vec3::ZERO
    } else {
        sum / count as f32
    }
}

/// Schreibt das Paket als eingerücktes JSON.
pub fn export(path: &Path, package: &AirshipPackage) -> anyhow::Result<()> {
    let content = serde_json::to_string_pretty(package).context("Luftschiff nicht serialisierbar")?;
    std::fs::write(path, content)
        .with_context(|| format!("Export nach {} fehlgeschlagen", path.display()))?;
    log::info!(
        "Luftschiff exportiert: {} Decks nach {}",
        package.num_decks,
        path.display()
    );
    Ok(())
}

/// Liest ein Paket und verschiebt alle Vertices um `offset`.
pub fn import(path: &Path, offset: Vec3) -> anyhow::Result<AirshipPackage> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Luftschiff {} nicht lesbar", path.display()))?;
    let mut package: AirshipPackage = serde_json::from_str(&content)
        .with_context(|| format!("Luftschiff {} fehlerhaft", path.display()))?;
    anyhow::ensure!(
        package.hull_vertices.len() == package.num_decks
            && package.deck_vertices.len() == package.num_decks,
        "Luftschiff {}: NumDecks passt nicht zu den Deck-Arrays",
        path.display()
    );
    package.translate(offset);
    log::info!("Luftschiff importiert: {} Decks", package.num_decks);
    Ok(package)
}

// ── Bodenplatten ────────────────────────────────────────────────────

/// Fasst Bodenplatten zu Streifen zusammen.
///
/// Pro Rasterspalte (X) werden zusammenhängende aktive Zellen entlang Z zu
/// einem Quad verbunden. Eine deaktivierte Zelle beendet den Streifen, die
/// Suche läuft in derselben Spalte weiter. Aktive `Filler`-Platten folgen
/// mit umbasierten Indizes.
pub fn concat_deck_plates(objects: &[ObjectData<DeckPlateKey>], plate_width: f32) -> MeshData {
    let mut mesh = MeshData::default();

    let boards: Vec<(Vec2, f32, bool)> = objects
        .iter()
        .filter(|o| o.key != DeckPlateKey::Filler && !o.vertices.is_empty())
        .map(|o| {
            let min = o.vertices.iter().fold(Vec2::splat(f32::MAX), |m, v| {
                m.min(Vec2::new(v.position.x, v.position.z))
            });
            (min, o.vertices[0].position.y, o.enabled)
        })
        .collect();

    if let Some(&(_, y, _)) = boards.first() {
        let origin = boards
            .iter()
            .fold(Vec2::splat(f32::MAX), |m, (p, _, _)| m.min(*p));
        let cell_of = |p: Vec2| ((p - origin) / plate_width).round();
        let extent = boards
            .iter()
            .fold(Vec2::ZERO, |m, (p, _, _)| m.max(cell_of(*p)));
        let (cols, rows) = (extent.x as usize + 1, extent.y as usize + 1);

        let mut enabled = vec![false; cols * rows];
        for (p, _, on) in &boards {
            let c = cell_of(*p);
            enabled[c.x as usize * rows + c.y as usize] = *on;
        }

        let to_world = |col: usize, row: usize| {
            Vec3::new(
                origin.x + col as f32 * plate_width,
                y,
                origin.y + row as f32 * plate_width,
            )
        };
        for col in 0..cols {
            let column = &enabled[col * rows..(col + 1) * rows];
            let mut row = 0;
            while row < rows {
                if !column[row] {
                    row += 1;
                    continue;
                }
                let start = row;
                while row < rows && column[row] {
                    row += 1;
                }
                let (a, b) = (to_world(col, start), to_world(col + 1, row));
                push_quad(
                    &mut mesh,
                    [a, Vec3::new(b.x, y, a.z), b, Vec3::new(a.x, y, b.z)],
                );
            }
        }
    }

    for filler in objects
        .iter()
        .filter(|o| o.key == DeckPlateKey::Filler && o.enabled)
    {
        let base = mesh.vertices.len() as u32;
        mesh.indices.extend(filler.indices.iter().map(|i| i + base));
        mesh.vertices.extend_from_slice(&filler.vertices);
    }

    mesh
}

fn push_quad(mesh: &mut MeshData, corners: [Vec3; 4]) {
    let base = mesh.vertices.len() as u32;
    mesh.vertices.extend(
        corners
            .iter()
            .zip(QUAD_TEX_COORDS)
            .map(|(&p, uv)| Vertex::new(p, Vec3::Y, uv)),
    );
    mesh.indices.extend(QUAD_WINDING.iter().map(|i| base + i));
}
