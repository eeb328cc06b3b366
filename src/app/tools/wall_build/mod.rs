//! Wand-Tool: zieht die Umrandung eines Strich-Rechtecks als Wände hoch.
//!
//! Während des Ziehens liegen die Segmente in einem Vorschau-Buffer mit
//! manuellem Upload; beim Loslassen übernimmt das aktuelle Deck sie.

use super::common::{stroke_wall_segments, CursorEvent, DeckCursor};
use super::{CursorInput, HullTool};
use crate::core::identifiers::WallSegmentKey;
use crate::core::object_buffer::ObjectBuffer;
use crate::core::{DeckChange, HullDataManager};
use crate::shared::HullOptions;


/// Wand-Bau-Tool
pub struct WallBuildTool {
    cursor: DeckCursor,
    /// Vorschau der Segmente des laufenden Strichs
    preview: ObjectBuffer<WallSegmentKey>,
    preview_keys: Vec<WallSegmentKey>,
    enabled: bool,
    grid: f32,
    wall_width: f32,
    wall_height: f32,
}

impl WallBuildTool {
    pub fn new(options: &HullOptions) -> Self {
        Self {
            cursor: DeckCursor::new(),
            preview: ObjectBuffer::new_manual(),
            preview_keys: Vec::new(),
            enabled: false,
            grid: options.grid_resolution,
            wall_width: options.wall_width,
            wall_height: options.wall_height(),
        }
    }

    pub fn preview(&self) -> &ObjectBuffer<WallSegmentKey> {
        &self.preview
    }

    pub fn preview_keys(&self) -> &[WallSegmentKey] {
        &self.preview_keys
    }

    fn regenerate_preview(&mut self) {
        let (origin, end) = self.cursor.stroke();
        self.preview.clear_objects();
        self.preview_keys.clear();
        let segments =
            stroke_wall_segments(origin, end, self.grid, self.wall_width, self.wall_height);
        for (key, mesh) in segments {
            self.preview.add_mesh(key, &mesh);
            self.preview_keys.push(key);
        }
        self.preview.update_buffers();
    }

    fn commit(&mut self, data: &mut HullDataManager) {
        let deck = data.current_deck();
        let added = data.add_walls(deck, &mut self.preview);
        log::debug!("Wand-Strich übernommen: {} neue Segmente", added);
        self.preview_keys.clear();
        self.preview.update_buffers();
    }

    fn discard_preview(&mut self) {
        self.preview.clear_objects();
        self.preview.update_buffers();
        self.preview_keys.clear();
    }
}

impl HullTool for WallBuildTool {
    fn name(&self) -> &str {
        "Wand bauen"
    }

    fn description(&self) -> &str {
        "Zieht Wände entlang eines Rechtecks auf dem Deckraster"
    }

    fn status_text(&self) -> &str {
        if self.cursor.is_drawing() {
            "Rechteck aufziehen, loslassen zum Bauen"
        } else {
            "Startpunkt wählen"
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
                CursorEvent::CursorChanged { drawing: true } => self.regenerate_preview(),
                CursorEvent::CursorReleased => self.commit(data),
                CursorEvent::CursorDown | CursorEvent::CursorChanged { drawing: false } => {}
            }
        }
    }

    fn on_deck_change(&mut self, _change: DeckChange, _data: &mut HullDataManager) {
        self.reset();
    }

    fn reset(&mut self) {
        self.cursor.reset();
        self.discard_preview();
    }

    fn cursor(&self) -> Option<&DeckCursor> {
        Some(&self.cursor)
    }
}
