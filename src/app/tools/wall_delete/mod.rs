//! Wand-Lösch-Tool: entfernt die Wände entlang eines Strich-Rechtecks.
//!
//! Während des Ziehens werden die betroffenen Wände nur ausgeblendet und
//! eine flache Markierung gezeigt; erst beim Loslassen wird gelöscht.

use super::common::{stroke_wall_segments, CursorEvent, DeckCursor};
use super::{CursorInput, HullTool};
use crate::core::identifiers::WallSegmentKey;
use crate::core::object_buffer::ObjectBuffer;
use crate::core::{DeckChange, HullDataManager};
use crate::shared::HullOptions;

#[cfg(test)]
mod tests;

/// Höhe der Boden-Markierung über dem Deck.
const MARKER_HEIGHT: f32 = 0.01;

/// Wand-Lösch-Tool
pub struct WallDeleteTool {
    cursor: DeckCursor,
    marker: ObjectBuffer<WallSegmentKey>,
    /// Ausgeblendete Wände und ihr Deck. Nach `reset` bleiben sie hier
    /// stehen, bis der nächste Aufruf mit Datenzugriff sie wieder einblendet.
    hidden: Vec<WallSegmentKey>,
    hidden_deck: usize,
    enabled: bool,
    grid: f32,
    wall_width: f32,
}

impl WallDeleteTool {
    pub fn new(options: &HullOptions) -> Self {
        Self {
            cursor: DeckCursor::new(),
            marker: ObjectBuffer::new_manual(),
            hidden: Vec::new(),
            hidden_deck: 0,
            enabled: false,
            grid: options.grid_resolution,
            wall_width: options.wall_width,
        }
    }

    pub fn marker(&self) -> &ObjectBuffer<WallSegmentKey> {
        &self.marker
    }

    pub fn hidden_walls(&self) -> &[WallSegmentKey] {
        &self.hidden
    }

    fn update_selection(&mut self, data: &mut HullDataManager) {
        let (origin, end) = self.cursor.stroke();
        let segments =
            stroke_wall_segments(origin, end, self.grid, self.wall_width, MARKER_HEIGHT);

        self.marker.clear_objects();
        for (key, mesh) in &segments {
            self.marker.add_mesh(*key, mesh);
        }
        self.marker.update_buffers();

        self.restore_hidden(data);
        let deck = data.current_deck();
        let existing: Vec<WallSegmentKey> = segments
            .into_iter()
            .map(|(key, _)| key)
            .filter(|key| data.current().walls.contains(key))
            .collect();
        for key in &existing {
            data.disable_wall(deck, key);
        }
        self.hidden = existing;
        self.hidden_deck = deck;
    }

    /// Blendet die Wände des vorigen Strichs wieder ein.
    fn restore_hidden(&mut self, data: &mut HullDataManager) {
        for key in self.hidden.drain(..) {
            data.enable_wall(self.hidden_deck, &key);
        }
    }

    fn delete_selection(&mut self, data: &mut HullDataManager) {
        let removed = self
            .hidden
            .drain(..)
            .filter(|key| data.remove_wall(self.hidden_deck, key))
            .count();
        log::debug!("Wand-Strich gelöscht: {} Segmente", removed);
        self.clear_marker();
    }

    fn clear_marker(&mut self) {
        self.marker.clear_objects();
        self.marker.update_buffers();
    }

    fn cancel(&mut self, data: &mut HullDataManager) {
        self.restore_hidden(data);
        self.clear_marker();
        self.cursor.reset();
    }
}

impl HullTool for WallDeleteTool {
    fn name(&self) -> &str {
        "Wand löschen"
    }

    fn description(&self) -> &str {
        "Entfernt Wände entlang eines Rechtecks auf dem Deckraster"
    }

    fn status_text(&self) -> &str {
        if self.cursor.is_drawing() {
            "Rechteck aufziehen, loslassen zum Löschen"
        } else {
            "Startpunkt wählen"
        }
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool, data: &mut HullDataManager) {
        self.enabled = enabled;
        if !enabled {
            self.cancel(data);
        }
    }

    fn update_input(&mut self, input: &CursorInput, data: &mut HullDataManager) {
        if !self.enabled {
            return;
        }
        if !self.cursor.is_drawing() {
            self.restore_hidden(data);
        }
        for event in self.cursor.update(input, data) {
            match event {
                CursorEvent::CursorChanged { drawing: true } => self.update_selection(data),
                CursorEvent::CursorReleased => self.delete_selection(data),
                CursorEvent::CursorDown | CursorEvent::CursorChanged { drawing: false } => {}
            }
        }
    }

    fn on_deck_change(&mut self, _change: DeckChange, data: &mut HullDataManager) {
        self.cancel(data);
    }

    fn reset(&mut self) {
        self.clear_marker();
        self.cursor.reset();
    }

    fn cursor(&self) -> Option<&DeckCursor> {
        Some(&self.cursor)
    }
}
