//! Objekt-Platzierung auf dem Deckraster (Voreinstellung: Kanone).
//!
//! Das Objekt wird beim Loslassen an der Cursor-Ecke platziert, sofern alle
//! Zellen seiner Grundfläche frei sind. Rumpfschneidende Objekte öffnen
//! zusätzlich eine Stückpforte auf halber Deckhöhe der zugewandten Seite.

use glam::{Vec2, Vec3};

use super::common::{CursorEvent, DeckCursor};
use super::{CursorInput, HullTool};
use crate::core::identifiers::{BoundingBox, DeckObjectKey, DeckObjectKind};
use crate::core::vertex::generate_cube;
use crate::core::{DeckChange, HullDataManager};
use crate::shared::HullOptions;

#[cfg(test)]
mod tests;

/// Höhe des Platzhalter-Quaders einer Kanone.
const CANNON_HEIGHT: f32 = 1.0;

/// Objekt-Platzierungs-Tool
pub struct ObjectPlacementTool {
    cursor: DeckCursor,
    kind: DeckObjectKind,
    /// Grundfläche (X, Z) in Metern
    footprint: Vec2,
    height: f32,
    /// Grundfläche unter dem Cursor ist frei
    placement_valid: bool,
    enabled: bool,
}

impl ObjectPlacementTool {
    pub fn new(kind: DeckObjectKind, footprint: Vec2, height: f32) -> Self {
        Self {
            cursor: DeckCursor::new(),
            kind,
            footprint,
            height,
            placement_valid: false,
            enabled: false,
        }
    }

    /// Kanone mit Grundfläche aus den Optionen.
    pub fn cannon(options: &HullOptions) -> Self {
        Self::new(
            DeckObjectKind::Cannon,
            Vec2::from_array(options.cannon_footprint),
            CANNON_HEIGHT,
        )
    }

    pub fn kind(&self) -> DeckObjectKind {
        self.kind
    }

    pub fn placement_valid(&self) -> bool {
        self.placement_valid
    }

    /// Grundfläche mit Minimal-Ecke `origin`.
    pub fn footprint_at(&self, origin: Vec3) -> BoundingBox {
        BoundingBox::new(
            origin,
            origin + Vec3::new(self.footprint.x, 0.0, self.footprint.y),
        )
    }

    fn place(&mut self, data: &mut HullDataManager) {
        let Some(origin) = self.cursor.position() else {
            return;
        };
        let deck = data.current_deck();
        let footprint = self.footprint_at(origin);
        let key = DeckObjectKey::new(self.kind, origin);
        let mesh = generate_cube(origin, self.footprint.x, self.height, self.footprint.y);
        if !data.place_object(deck, key, footprint, &mesh) {
            log::debug!("{:?} bei {:?} nicht platzierbar", self.kind, origin);
            return;
        }

        if self.kind.cuts_hull() {
            let port = port_position(&footprint, origin.y, data.deck_height());
            let cut = data.cut_hull(port);
            log::debug!("Stückpforte bei {:?}: {} Sektionen", port, cut);
        }
        self.placement_valid = false;
    }
}

/// Mitte der Stückpforte: über der Grundflächenmitte, halbe Deckhöhe.
/// Die Rumpfseite ergibt sich aus dem Vorzeichen von Z.
pub fn port_position(footprint: &BoundingBox, floor_y: f32, deck_height: f32) -> Vec3 {
    let center = footprint.center();
    Vec3::new(center.x, floor_y + deck_height * 0.5, center.z)
}

impl HullTool for ObjectPlacementTool {
    fn name(&self) -> &str {
        match self.kind {
            DeckObjectKind::Cannon => "Kanone",
            DeckObjectKind::Engine => "Triebwerk",
            DeckObjectKind::Ladder => "Objekt",
        }
    }

    fn description(&self) -> &str {
        "Platziert ein Objekt auf freien Deckzellen"
    }

    fn status_text(&self) -> &str {
        if self.placement_valid {
            "Klicken zum Platzieren"
        } else {
            "Grundfläche belegt oder außerhalb des Decks"
        }
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool, _data: &mut HullDataManager) {
        self.enabled = enabled;
        if !enabled {
            self.reset();
        }
    }

    fn update_input(&mut self, input: &CursorInput, data: &mut HullDataManager) {
        if !self.enabled {
            return;
        }
        for event in self.cursor.update(input, data) {
            match event {
                CursorEvent::CursorChanged { .. } => {
                    self.placement_valid = self.cursor.position().is_some_and(|p| {
                        data.is_footprint_free(data.current_deck(), &self.footprint_at(p))
                    });
                }
                CursorEvent::CursorReleased => self.place(data),
                CursorEvent::CursorDown => {}
            }
        }
    }

    fn on_deck_change(&mut self, _change: DeckChange, _data: &mut HullDataManager) {
        self.reset();
    }

    fn reset(&mut self) {
        self.cursor.reset();
        self.placement_valid = false;
    }

    fn cursor(&self) -> Option<&DeckCursor> {
        Some(&self.cursor)
    }
}
