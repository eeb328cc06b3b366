//! Besitzer aller Deck-Buffer eines Schiffs und Zustand des aktuellen Decks.
//!
//! Deck 0 ist das oberste Deck. Tools bekommen den Manager pro Aufruf als
//! `&mut` und ändern Geometrie nur über die Buffer-Verträge.

use glam::{Vec2, Vec3};
use indexmap::IndexMap;

use crate::core::hull_generator::HullGeometry;
use crate::core::hull_mesh::HullMesh;
use crate::core::identifiers::{
    BoundingBox, DeckObjectKey, DeckPlateKey, GridKey, WallSegmentKey,
};
use crate::core::object_buffer::ObjectBuffer;
use crate::core::spatial::DeckVertexIndex;
use crate::core::vertex::MeshData;
use crate::shared::HullOptions;


/// Ergebnis eines erfolgreichen Deckwechsels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeckChange {
    pub old: usize,
    pub new: usize,
}

/// ID eines registrierten Deckwechsel-Beobachters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type DeckObserver = Box<dyn FnMut(DeckChange)>;

/// Alle Buffer und Rasterdaten eines Decks.
#[derive(Debug, Clone)]
pub struct DeckData {
    pub hull: HullMesh,
    pub plates: ObjectBuffer<DeckPlateKey>,
    pub walls: ObjectBuffer<WallSegmentKey>,
    /// Wand-Identifier in Einfügereihenfolge
    pub wall_keys: Vec<WallSegmentKey>,
    pub objects: ObjectBuffer<DeckObjectKey>,
    /// Grundflächen der platzierten Objekte
    pub placed: IndexMap<DeckObjectKey, BoundingBox>,
    /// Zellen nach quantisierter Minimal-Ecke
    pub bounding_boxes: IndexMap<GridKey, BoundingBox>,
    pub vertices: Vec<Vec3>,
    pub vertex_index: DeckVertexIndex,
    pub floor_y: f32,
}

impl DeckData {
    fn from_geometry(
        hull: &MeshData,
        port_quads: usize,
        plates: ObjectBuffer<DeckPlateKey>,
        boxes: &[BoundingBox],
        vertices: Vec<Vec3>,
        floor_y: f32,
    ) -> Self {
        Self {
            hull: HullMesh::new(hull, port_quads),
            plates,
            walls: ObjectBuffer::new(),
            wall_keys: Vec::new(),
            objects: ObjectBuffer::new(),
            placed: IndexMap::new(),
            bounding_boxes: boxes.iter().map(|bb| (bb.key(), *bb)).collect(),
            vertex_index: DeckVertexIndex::from_vertices(&vertices),
            vertices,
            floor_y,
        }
    }
}

/// Verwaltet Hull-, Platten-, Wand- und Objekt-Buffer aller Decks.
pub struct HullDataManager {
    decks: Vec<DeckData>,
    cur_deck: usize,
    deck_height: f32,
    wall_resolution: f32,
    centroid: Vec3,
    observers: Vec<(ObserverId, DeckObserver)>,
    next_observer: u64,
}

impl std::fmt::Debug for HullDataManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HullDataManager")
            .field("num_decks", &self.decks.len())
            .field("cur_deck", &self.cur_deck)
            .field("deck_height", &self.deck_height)
            .field("wall_resolution", &self.wall_resolution)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl HullDataManager {
    /// Übernimmt die generierte Geometrie. Startet auf Deck 0.
    pub fn new(geometry: HullGeometry, options: &HullOptions) -> Self {
        let port_quads: Vec<usize> = (0..geometry.num_decks)
            .map(|deck| geometry.port_quads(deck))
            .collect();
        let HullGeometry {
            num_decks,
            deck_height,
            primitives_per_deck,
            wall_resolution,
            centroid,
            layers,
            hull_meshes,
            deck_plates,
            deck_bounding_boxes,
            deck_vertices,
            ..
        } = geometry;

        debug_assert_eq!(hull_meshes.len(), num_decks);
        let decks: Vec<DeckData> = hull_meshes
            .iter()
            .zip(deck_plates)
            .zip(deck_bounding_boxes.iter())
            .zip(deck_vertices)
            .enumerate()
            .map(|(deck, (((hull, plates), boxes), vertices))| {
                let floor_y = layers
                    .get(deck * primitives_per_deck)
                    .and_then(|ring| ring.first())
                    .map_or(-(deck as f32) * deck_height, |v| v.y);
                DeckData::from_geometry(hull, port_quads[deck], plates, boxes, vertices, floor_y)
            })
            .collect();

        log::info!(
            "HullDataManager: {} Decks, Zellbreite {} m, Wandhöhe {:.2} m",
            decks.len(),
            wall_resolution,
            options.wall_height()
        );

        Self {
            decks,
            cur_deck: 0,
            deck_height,
            wall_resolution,
            centroid,
            observers: Vec::new(),
            next_observer: 0,
        }
    }

    // ── Zugriff ─────────────────────────────────────────────────────

    pub fn num_decks(&self) -> usize {
        self.decks.len()
    }

    pub fn current_deck(&self) -> usize {
        self.cur_deck
    }

    pub fn deck_height(&self) -> f32 {
        self.deck_height
    }

    pub fn wall_resolution(&self) -> f32 {
        self.wall_resolution
    }

    pub fn centroid(&self) -> Vec3 {
        self.centroid
    }

    pub fn decks(&self) -> &[DeckData] {
        &self.decks
    }

    pub fn deck(&self, deck: usize) -> Option<&DeckData> {
        self.decks.get(deck)
    }

    pub fn deck_mut(&mut self, deck: usize) -> Option<&mut DeckData> {
        self.decks.get_mut(deck)
    }

    pub fn current(&self) -> &DeckData {
        &self.decks[self.cur_deck]
    }

    pub fn current_mut(&mut self) -> &mut DeckData {
        &mut self.decks[self.cur_deck]
    }

    /// Sichtbar sind das aktuelle Deck und alle darunter.
    pub fn is_deck_visible(&self, deck: usize) -> bool {
        deck >= self.cur_deck && deck < self.decks.len()
    }

    // ── Deckwechsel ─────────────────────────────────────────────────

    /// Ein Deck nach oben (Index - 1). `None` am obersten Deck 0.
    pub fn move_up_one_deck(&mut self) -> Option<DeckChange> {
        let new = self.cur_deck.checked_sub(1)?;
        Some(self.change_deck(new))
    }

    /// Ein Deck nach unten (Index + 1). `None` am untersten Deck.
    pub fn move_down_one_deck(&mut self) -> Option<DeckChange> {
        let new = self.cur_deck + 1;
        if new >= self.decks.len() {
            return None;
        }
        Some(self.change_deck(new))
    }

    fn change_deck(&mut self, new: usize) -> DeckChange {
        let change = DeckChange {
            old: self.cur_deck,
            new,
        };
        self.cur_deck = new;
        log::debug!("Deckwechsel {} -> {}", change.old, change.new);
        for (_, observer) in &mut self.observers {
            observer(change);
        }
        change
    }

    /// Registriert einen Beobachter für Deckwechsel.
    pub fn subscribe(&mut self, observer: impl FnMut(DeckChange) + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Entfernt einen Beobachter. `false`, wenn die ID unbekannt ist.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        before != self.observers.len()
    }

    // ── Zellen ──────────────────────────────────────────────────────

    /// Schlüssel der Zelle, in deren XZ-Projektion `p` liegt.
    pub fn cell_key(&self, deck: usize, p: Vec3) -> Option<GridKey> {
        let floor_y = self.decks.get(deck)?.floor_y;
        let cell = self.wall_resolution;
        let min = Vec3::new(
            (p.x / cell).floor() * cell,
            floor_y,
            (p.z / cell).floor() * cell,
        );
        Some(GridKey::from_vec3(min))
    }

    /// Zelle unter `p`, falls vorhanden.
    pub fn bounding_box_at(&self, deck: usize, p: Vec3) -> Option<&BoundingBox> {
        let key = self.cell_key(deck, p)?;
        self.decks.get(deck)?.bounding_boxes.get(&key)
    }

    /// Zelle existiert und ist von keinem Objekt belegt.
    pub fn is_cell_free(&self, deck: usize, p: Vec3) -> bool {
        let Some(bb) = self.bounding_box_at(deck, p) else {
            return false;
        };
        let center = bb.center();
        self.decks[deck]
            .placed
            .values()
            .all(|footprint| !footprint.contains_xz(center))
    }

    /// Zellmittelpunkte einer rasterausgerichteten Grundfläche.
    pub fn footprint_cells(&self, footprint: &BoundingBox) -> Vec<Vec3> {
        let cell = self.wall_resolution;
        let size = footprint.max - footprint.min;
        let nx = (size.x / cell).round().max(0.0) as usize;
        let nz = (size.z / cell).round().max(0.0) as usize;
        let mut cells = Vec::with_capacity(nx * nz);
        for i in 0..nx {
            for j in 0..nz {
                let offset = Vec3::new((i as f32 + 0.5) * cell, 0.0, (j as f32 + 0.5) * cell);
                cells.push(footprint.min + offset);
            }
        }
        cells
    }

    /// Alle Zellen der Grundfläche existieren und sind frei.
    pub fn is_footprint_free(&self, deck: usize, footprint: &BoundingBox) -> bool {
        let cells = self.footprint_cells(footprint);
        !cells.is_empty() && cells.iter().all(|&c| self.is_cell_free(deck, c))
    }

    /// Entfernt eine Zelle. `false`, wenn sie nicht existiert.
    pub fn remove_bounding_box(&mut self, deck: usize, key: GridKey) -> bool {
        self.decks
            .get_mut(deck)
            .is_some_and(|d| d.bounding_boxes.shift_remove(&key).is_some())
    }

    /// Entfernt alle Zellen unter der Grundfläche. Gibt die Anzahl zurück.
    pub fn remove_bounding_boxes_in(&mut self, deck: usize, footprint: &BoundingBox) -> usize {
        let keys: Vec<GridKey> = self
            .footprint_cells(footprint)
            .into_iter()
            .filter_map(|c| self.cell_key(deck, c))
            .collect();
        keys.into_iter()
            .filter(|&key| self.remove_bounding_box(deck, key))
            .count()
    }

    /// Schaltet die Bodenplatten unter der Grundfläche ab (Randplatten bleiben).
    pub fn disable_plates_in(&mut self, deck: usize, footprint: &BoundingBox) -> usize {
        let keys: Vec<DeckPlateKey> = self
            .footprint_cells(footprint)
            .into_iter()
            .filter_map(|c| self.cell_key(deck, c))
            .map(DeckPlateKey::Board)
            .collect();
        let Some(d) = self.decks.get_mut(deck) else {
            return 0;
        };
        d.plates.set_update_manually(true);
        let disabled = keys.iter().filter(|k| d.plates.disable_object(k)).count();
        d.plates.set_update_manually(false);
        disabled
    }

    /// Nächster Gitterpunkt des Decks, aber nur wenn `p` auf einer Zelle liegt.
    pub fn snap_to_grid(&self, deck: usize, p: Vec3) -> Option<Vec3> {
        self.bounding_box_at(deck, p)?;
        let m = self.decks.get(deck)?.vertex_index.snap(p, self.wall_resolution)?;
        Some(m.position)
    }

    /// Liegt der XZ-Punkt auf einem Gitterpunkt des Decks?
    pub fn is_grid_vertex(&self, deck: usize, p: Vec2) -> bool {
        let Some(d) = self.decks.get(deck) else {
            return false;
        };
        d.vertex_index
            .snap(Vec3::new(p.x, d.floor_y, p.y), 1e-3)
            .is_some()
    }

    // ── Wände ───────────────────────────────────────────────────────

    /// Übernimmt Wände aus `walls`; bereits vorhandene Identifier werden übersprungen.
    /// Leert `walls`. Gibt die Anzahl neuer Wände zurück.
    pub fn add_walls(&mut self, deck: usize, walls: &mut ObjectBuffer<WallSegmentKey>) -> usize {
        let Some(d) = self.decks.get_mut(deck) else {
            log::warn!("add_walls: Deck {} existiert nicht", deck);
            return 0;
        };
        for key in walls.keys() {
            if !d.walls.contains(key) && !d.wall_keys.contains(key) {
                d.wall_keys.push(*key);
            }
        }
        let added = d.walls.absorb_buffer(walls, false, true);
        log::debug!("Deck {}: {} Wände hinzugefügt", deck, added);
        added
    }

    pub fn remove_wall(&mut self, deck: usize, key: &WallSegmentKey) -> bool {
        let Some(d) = self.decks.get_mut(deck) else {
            return false;
        };
        d.wall_keys.retain(|k| k != key);
        d.walls.remove_object(key) > 0
    }

    pub fn enable_wall(&mut self, deck: usize, key: &WallSegmentKey) -> bool {
        self.decks
            .get_mut(deck)
            .is_some_and(|d| d.walls.enable_object(key))
    }

    pub fn disable_wall(&mut self, deck: usize, key: &WallSegmentKey) -> bool {
        self.decks
            .get_mut(deck)
            .is_some_and(|d| d.walls.disable_object(key))
    }

    // ── Objekte ─────────────────────────────────────────────────────

    /// Platziert ein Objekt, wenn die Grundfläche frei ist.
    pub fn place_object(
        &mut self,
        deck: usize,
        key: DeckObjectKey,
        footprint: BoundingBox,
        mesh: &MeshData,
    ) -> bool {
        if !self.is_footprint_free(deck, &footprint) {
            return false;
        }
        let d = &mut self.decks[deck];
        if d.placed.contains_key(&key) {
            return false;
        }
        d.objects.add_mesh(key, mesh);
        d.placed.insert(key, footprint);
        log::debug!("Deck {}: {:?} platziert", deck, key.kind);
        true
    }

    /// Entfernt ein Objekt samt Grundfläche.
    pub fn remove_object(&mut self, deck: usize, key: &DeckObjectKey) -> bool {
        let Some(d) = self.decks.get_mut(deck) else {
            return false;
        };
        d.placed.shift_remove(key);
        d.objects.remove_object(key) > 0
    }

    pub fn placed_objects(
        &self,
        deck: usize,
    ) -> impl Iterator<Item = (&DeckObjectKey, &BoundingBox)> {
        self.decks.get(deck).into_iter().flat_map(|d| d.placed.iter())
    }

    // ── Rumpf ───────────────────────────────────────────────────────

    /// Schneidet an `p` in jede Deckwand, deren Höhenbereich `p` enthält.
    pub fn cut_hull(&mut self, p: Vec3) -> usize {
        self.decks
            .iter_mut()
            .filter(|d| d.hull.y_range().is_some_and(|(lo, hi)| p.y >= lo && p.y < hi))
            .map(|d| d.hull.cut(p))
            .sum()
    }

    /// Gegenstück zu `cut_hull`.
    pub fn restore_hull(&mut self, p: Vec3) -> usize {
        self.decks
            .iter_mut()
            .filter(|d| d.hull.y_range().is_some_and(|(lo, hi)| p.y >= lo && p.y < hi))
            .map(|d| d.hull.restore(p))
            .sum()
    }
}
