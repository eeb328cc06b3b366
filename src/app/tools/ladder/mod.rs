//! Leiter-Tool: platziert eine Leiter und öffnet die Decke darüber.
//!
//! Unter der Grundfläche werden die Zellen des aktuellen Decks entfernt;
//! auf dem Deck darüber zusätzlich die Bodenplatten abgeschaltet.

use glam::Vec3;

use super::common::{CursorEvent, DeckCursor};
use super::{CursorInput, HullTool};
use crate::core::identifiers::{BoundingBox, DeckObjectKey, DeckObjectKind};
use crate::core::vertex::generate_cube;
use crate::core::{DeckChange, HullDataManager};
use crate::shared::HullOptions;

#[cfg(test)]
mod tests;

/// Leiter-Tool
pub struct LadderBuildTool {
    cursor: DeckCursor,
    /// Kantenlänge der quadratischen Grundfläche
    width: f32,
    placement_valid: bool,
    enabled: bool,
}

impl LadderBuildTool {
    pub fn new(options: &HullOptions) -> Self {
        debug_assert!(
            (options.ladder_footprint / options.grid_resolution).fract().abs() < 1e-4,
            "Leiterbreite muss ein Vielfaches des Rasters sein"
        );
        Self {
            cursor: DeckCursor::new(),
            width: options.ladder_footprint,
            placement_valid: false,
            enabled: false,
        }
    }

    pub fn footprint_at(&self, origin: Vec3) -> BoundingBox {
        BoundingBox::new(origin, origin + Vec3::new(self.width, 0.0, self.width))
    }

    pub fn placement_valid(&self) -> bool {
        self.placement_valid
    }

    fn is_valid(&self, origin: Vec3, data: &HullDataManager) -> bool {
        let deck = data.current_deck();
        let footprint = self.footprint_at(origin);
        data.is_footprint_free(deck, &footprint)
            && (deck == 0 || data.is_footprint_free(deck - 1, &footprint))
    }

    fn place(&mut self, data: &mut HullDataManager) {
        let Some(origin) = self.cursor.position() else {
            return;
        };
        if !self.is_valid(origin, data) {
            log::debug!("Leiter bei {:?} nicht platzierbar", origin);
            return;
        }
        let deck = data.current_deck();
        let footprint = self.footprint_at(origin);
        let key = DeckObjectKey::new(DeckObjectKind::Ladder, origin);
        let mesh = generate_cube(origin, self.width, data.deck_height(), self.width);
        if !data.place_object(deck, key, footprint, &mesh) {
            return;
        }

        if deck > 0 {
            let plates = data.disable_plates_in(deck - 1, &footprint);
            let boxes = data.remove_bounding_boxes_in(deck - 1, &footprint);
            log::debug!(
                "Leiter öffnet Deck {}: {} Platten, {} Zellen",
                deck - 1,
                plates,
                boxes
            );
        }
        data.remove_bounding_boxes_in(deck, &footprint);
        self.placement_valid = false;
    }
}

impl HullTool for LadderBuildTool {
    fn name(&self) -> &str {
        "Leiter"
    }

    fn description(&self) -> &str {
        "Platziert eine Leiter und öffnet das Deck darüber"
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
                    self.placement_valid = self
                        .cursor
                        .position()
                        .is_some_and(|p| self.is_valid(p, data));
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
