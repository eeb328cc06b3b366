//! Schlüsselbasierter Container für Objekte in gemeinsamen Vertex-/Index-Arrays.
//!
//! Jedes Objekt belegt einen zusammenhängenden Vertex- und Index-Bereich.
//! Deaktivieren setzt den Index-Bereich auf 0 (degenerierte Dreiecke), die
//! Arrays schrumpfen dabei nicht. Entfernen kompaktiert die Arrays.
//!
//! Änderungen landen zuerst in den Staging-Arrays. Der hochgeladene Stand
//! (`uploaded`) wird nach jeder Änderung erneuert, außer bei
//! `update_manually`; dann ruft der Aufrufer nach einem Stapel einmal
//! `update_buffers` auf.

use std::fmt::Debug;
use std::hash::Hash;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::vertex::{MeshData, Vertex};

#[cfg(test)]
mod tests;

/// Stabile ID eines Objekts innerhalb eines Buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectHandle(u64);

#[derive(Debug, Clone)]
struct ObjectSlot<K> {
    key: K,
    vertex_start: usize,
    vertex_count: usize,
    index_start: usize,
    /// Indizes relativ zum eigenen Vertex-Bereich
    local_indices: Vec<u32>,
    enabled: bool,
}

/// Serialisierbarer Auszug eines Objekts (lokale Indizes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectData<K> {
    pub key: K,
    pub indices: Vec<u32>,
    pub vertices: Vec<Vertex>,
    pub enabled: bool,
}

/// Zuletzt hochgeladener Stand der Arrays.
#[derive(Debug, Clone, Default)]
pub struct UploadedGeometry {
    indices: Vec<u32>,
    vertices: Vec<Vertex>,
    revision: u64,
}

impl UploadedGeometry {
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Zählt jeden Upload; 0 = noch nie hochgeladen.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Container für Objekte mit Schlüssel `K`.
///
/// Mehrere Objekte dürfen denselben Schlüssel tragen; Schlüssel-Operationen
/// wirken dann auf alle.
#[derive(Debug, Clone)]
pub struct ObjectBuffer<K> {
    slots: IndexMap<ObjectHandle, ObjectSlot<K>>,
    by_key: IndexMap<K, Vec<ObjectHandle>>,
    indices: Vec<u32>,
    vertices: Vec<Vertex>,
    next_handle: u64,
    update_manually: bool,
    uploaded: UploadedGeometry,
}

impl<K> Default for ObjectBuffer<K>
where
    K: Clone + Eq + Hash + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> ObjectBuffer<K>
where
    K: Clone + Eq + Hash + Debug,
{
    pub fn new() -> Self {
        Self {
            slots: IndexMap::new(),
            by_key: IndexMap::new(),
            indices: Vec::new(),
            vertices: Vec::new(),
            next_handle: 0,
            update_manually: false,
            uploaded: UploadedGeometry::default(),
        }
    }

    /// Neuer Buffer im manuellen Upload-Modus.
    pub fn new_manual() -> Self {
        let mut buffer = Self::new();
        buffer.update_manually = true;
        buffer
    }

    // ── Upload-Steuerung ────────────────────────────────────────────

    pub fn update_manually(&self) -> bool {
        self.update_manually
    }

    /// Schaltet den Upload-Modus um. Beim Wechsel auf automatisch wird sofort hochgeladen.
    pub fn set_update_manually(&mut self, manual: bool) {
        self.update_manually = manual;
        if !manual {
            self.upload();
        }
    }

    /// Lädt die Staging-Arrays hoch. Nur im manuellen Modus erlaubt.
    pub fn update_buffers(&mut self) {
        debug_assert!(
            self.update_manually,
            "update_buffers auf Buffer mit automatischem Upload"
        );
        self.upload();
    }

    fn upload(&mut self) {
        self.uploaded.indices.clone_from(&self.indices);
        self.uploaded.vertices.clone_from(&self.vertices);
        self.uploaded.revision += 1;
    }

    fn sync(&mut self) {
        if !self.update_manually {
            self.upload();
        }
    }

    pub fn uploaded(&self) -> &UploadedGeometry {
        &self.uploaded
    }

    // ── Objekte ─────────────────────────────────────────────────────

    /// Fügt ein Objekt an. `indices` sind relativ zu `vertices`.
    pub fn add_object(&mut self, key: K, indices: &[u32], vertices: &[Vertex]) -> ObjectHandle {
        debug_assert!(
            indices.iter().all(|&i| (i as usize) < vertices.len()),
            "Objekt {:?} referenziert Vertices außerhalb seines Bereichs",
            key
        );
        let handle = ObjectHandle(self.next_handle);
        self.next_handle += 1;

        let vertex_start = self.vertices.len();
        let index_start = self.indices.len();
        self.vertices.extend_from_slice(vertices);
        self.indices
            .extend(indices.iter().map(|&i| i + vertex_start as u32));

        self.slots.insert(
            handle,
            ObjectSlot {
                key: key.clone(),
                vertex_start,
                vertex_count: vertices.len(),
                index_start,
                local_indices: indices.to_vec(),
                enabled: true,
            },
        );
        self.by_key.entry(key).or_default().push(handle);
        self.sync();
        handle
    }

    /// Fügt ein fertiges Mesh als Objekt an.
    pub fn add_mesh(&mut self, key: K, mesh: &MeshData) -> ObjectHandle {
        self.add_object(key, &mesh.indices, &mesh.vertices)
    }

    fn write_indices(&mut self, handle: ObjectHandle, enabled: bool) -> bool {
        let Some(slot) = self.slots.get_mut(&handle) else {
            return false;
        };
        slot.enabled = enabled;
        let end = slot.index_start + slot.local_indices.len();
        let run = &mut self.indices[slot.index_start..end];
        if enabled {
            let offset = slot.vertex_start as u32;
            for (dst, &local) in run.iter_mut().zip(&slot.local_indices) {
                *dst = local + offset;
            }
        } else {
            run.fill(0);
        }
        true
    }

    fn set_enabled(&mut self, key: &K, enabled: bool) -> bool {
        let Some(handles) = self.by_key.get(key).cloned() else {
            log::warn!("Objekt {:?} nicht im Buffer", key);
            return false;
        };
        for handle in handles {
            self.write_indices(handle, enabled);
        }
        self.sync();
        true
    }

    /// Aktiviert alle Objekte mit `key`. `false`, wenn keins existiert.
    pub fn enable_object(&mut self, key: &K) -> bool {
        self.set_enabled(key, true)
    }

    /// Deaktiviert alle Objekte mit `key`. `false`, wenn keins existiert.
    pub fn disable_object(&mut self, key: &K) -> bool {
        self.set_enabled(key, false)
    }

    /// Entfernt alle Objekte mit `key` und kompaktiert die Arrays.
    /// Gibt die Anzahl entfernter Objekte zurück.
    pub fn remove_object(&mut self, key: &K) -> usize {
        let Some(handles) = self.by_key.shift_remove(key) else {
            log::warn!("Objekt {:?} nicht im Buffer, nichts entfernt", key);
            return 0;
        };
        for handle in &handles {
            self.slots.shift_remove(handle);
        }
        self.compact();
        self.sync();
        handles.len()
    }

    /// Baut die Arrays aus den verbliebenen Slots neu auf (Reihenfolge bleibt erhalten).
    fn compact(&mut self) {
        let old_vertices = std::mem::take(&mut self.vertices);
        self.indices.clear();
        for slot in self.slots.values_mut() {
            let vertex_start = self.vertices.len();
            let old_end = slot.vertex_start + slot.vertex_count;
            self.vertices
                .extend_from_slice(&old_vertices[slot.vertex_start..old_end]);
            slot.vertex_start = vertex_start;
            slot.index_start = self.indices.len();
            if slot.enabled {
                self.indices
                    .extend(slot.local_indices.iter().map(|&i| i + vertex_start as u32));
            } else {
                self.indices
                    .resize(self.indices.len() + slot.local_indices.len(), 0);
            }
        }
    }

    /// Entfernt alle Objekte.
    pub fn clear_objects(&mut self) {
        self.slots.clear();
        self.by_key.clear();
        self.indices.clear();
        self.vertices.clear();
        self.sync();
    }

    /// Übernimmt die Objekte eines anderen Buffers.
    ///
    /// Ohne `allow_duplicates` werden Schlüssel übersprungen, die hier schon
    /// existieren. Der Aktiv-Zustand bleibt erhalten. Es wird einmal am Ende
    /// hochgeladen.
    pub fn absorb_buffer(
        &mut self,
        other: &mut ObjectBuffer<K>,
        allow_duplicates: bool,
        clear_other: bool,
    ) -> usize {
        let manual = self.update_manually;
        self.update_manually = true;

        let mut absorbed = 0;
        for slot in other.slots.values() {
            if !allow_duplicates && self.contains(&slot.key) {
                continue;
            }
            let end = slot.vertex_start + slot.vertex_count;
            let vertices = &other.vertices[slot.vertex_start..end];
            let handle = self.add_object(slot.key.clone(), &slot.local_indices, vertices);
            if !slot.enabled {
                self.write_indices(handle, false);
            }
            absorbed += 1;
        }

        self.upload();
        self.update_manually = manual;
        if clear_other {
            other.clear_objects();
        }
        absorbed
    }

    /// Wendet `transform` auf jeden Vertex an.
    pub fn apply_transform(&mut self, mut transform: impl FnMut(Vertex) -> Vertex) {
        for v in &mut self.vertices {
            *v = transform(*v);
        }
        self.sync();
    }

    // ── Abfragen ────────────────────────────────────────────────────

    pub fn contains(&self, key: &K) -> bool {
        self.by_key.contains_key(key)
    }

    /// `Some(true)`, wenn mindestens ein Objekt mit `key` aktiv ist.
    pub fn is_object_enabled(&self, key: &K) -> Option<bool> {
        let handles = self.by_key.get(key)?;
        Some(
            handles
                .iter()
                .filter_map(|h| self.slots.get(h))
                .any(|s| s.enabled),
        )
    }

    /// Anzahl Objekte insgesamt.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Anzahl aktiver Objekte.
    pub fn active_objects(&self) -> usize {
        self.slots.values().filter(|s| s.enabled).count()
    }

    /// Alle Schlüssel in Einfügereihenfolge (ohne Duplikate).
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.by_key.keys()
    }

    /// Handles aller Objekte mit `key`.
    pub fn handles_for(&self, key: &K) -> &[ObjectHandle] {
        self.by_key.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Vertices des ersten Objekts mit `key`.
    pub fn object_vertices(&self, key: &K) -> Option<&[Vertex]> {
        let handle = self.by_key.get(key)?.first()?;
        let slot = self.slots.get(handle)?;
        Some(&self.vertices[slot.vertex_start..slot.vertex_start + slot.vertex_count])
    }

    /// Alle Objekte in Einfügereihenfolge: (Schlüssel, aktiv, Vertices).
    pub fn objects(&self) -> impl Iterator<Item = (&K, bool, &[Vertex])> {
        self.slots.values().map(|s| {
            (
                &s.key,
                s.enabled,
                &self.vertices[s.vertex_start..s.vertex_start + s.vertex_count],
            )
        })
    }

    /// Staging-Indizes (deaktivierte Objekte als Nullen).
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Anzahl nicht-degenerierter Dreiecke im Staging-Stand.
    pub fn drawable_triangles(&self) -> usize {
        self.indices
            .chunks_exact(3)
            .filter(|t| !(t[0] == t[1] && t[1] == t[2]))
            .count()
    }

    // ── Dump ────────────────────────────────────────────────────────

    pub fn dump_object_data(&self) -> Vec<ObjectData<K>> {
        self.slots
            .values()
            .map(|s| ObjectData {
                key: s.key.clone(),
                indices: s.local_indices.clone(),
                vertices: self.vertices[s.vertex_start..s.vertex_start + s.vertex_count].to_vec(),
                enabled: s.enabled,
            })
            .collect()
    }

    /// Baut einen Buffer aus einem Dump wieder auf.
    pub fn from_object_dump(objects: &[ObjectData<K>]) -> Self {
        let mut buffer = Self::new_manual();
        for obj in objects {
            let handle = buffer.add_object(obj.key.clone(), &obj.indices, &obj.vertices);
            if !obj.enabled {
                buffer.write_indices(handle, false);
            }
        }
        buffer.set_update_manually(false);
        buffer
    }
}
