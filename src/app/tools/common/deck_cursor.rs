//! Cursor, der auf die Gitterpunkte des aktuellen Decks einrastet.

use glam::{Vec2, Vec3};

use crate::app::tools::CursorInput;
use crate::core::HullDataManager;

/// Ereignisse eines Frames in Auftrittsreihenfolge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorEvent {
    /// Primärtaste auf gültigem Gitterpunkt gedrückt, Strich beginnt
    CursorDown,
    /// Cursor auf neuen Gitterpunkt gesprungen
    CursorChanged { drawing: bool },
    /// Primärtaste während eines Strichs losgelassen
    CursorReleased,
}

/// Gitter-Cursor mit Strich-Zustand.
///
/// Der Strich bleibt nach `CursorReleased` lesbar, bis der nächste beginnt.
#[derive(Debug, Clone, Default)]
pub struct DeckCursor {
    position: Option<Vec3>,
    stroke_origin: Vec3,
    stroke_end: Vec3,
    drawing: bool,
    ghost_active: bool,
    button_was_down: bool,
}

impl DeckCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Letzter gültiger Gitterpunkt.
    pub fn position(&self) -> Option<Vec3> {
        self.position
    }

    /// (Ursprung, Ende) des aktuellen bzw. letzten Strichs.
    pub fn stroke(&self) -> (Vec3, Vec3) {
        (self.stroke_origin, self.stroke_end)
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Steht der Cursor gerade auf einem gültigen Gitterpunkt?
    pub fn ghost_active(&self) -> bool {
        self.ghost_active
    }

    /// Verarbeitet Cursor-Position und Tastenzustand eines Frames.
    pub fn update(&mut self, input: &CursorInput, data: &HullDataManager) -> Vec<CursorEvent> {
        let mut events = Vec::new();
        let deck = data.current_deck();

        match input.world_pos.and_then(|p| data.snap_to_grid(deck, p)) {
            Some(snapped) if self.is_valid(snapped, data) => {
                self.ghost_active = true;
                if self.position != Some(snapped) {
                    self.position = Some(snapped);
                    if self.drawing {
                        self.stroke_end = snapped;
                    }
                    events.push(CursorEvent::CursorChanged {
                        drawing: self.drawing,
                    });
                }
            }
            _ => self.ghost_active = false,
        }

        let pressed = input.primary_down && !self.button_was_down;
        if pressed && self.ghost_active {
            if let Some(pos) = self.position {
                self.stroke_origin = pos;
                self.stroke_end = pos;
                self.drawing = true;
                events.push(CursorEvent::CursorDown);
            }
        }
        if self.drawing && !input.primary_down {
            self.drawing = false;
            events.push(CursorEvent::CursorReleased);
        }
        self.button_was_down = input.primary_down;

        events
    }

    /// Während eines Strichs müssen beide übrigen Rechteck-Ecken Gitterpunkte sein.
    fn is_valid(&self, candidate: Vec3, data: &HullDataManager) -> bool {
        if !self.drawing {
            return true;
        }
        let deck = data.current_deck();
        let origin = self.stroke_origin;
        data.is_grid_vertex(deck, Vec2::new(candidate.x, origin.z))
            && data.is_grid_vertex(deck, Vec2::new(origin.x, candidate.z))
    }

    /// Bricht einen laufenden Strich ab (Deckwechsel, Tool-Wechsel).
    pub fn reset(&mut self) {
        *self = Self {
            button_was_down: self.button_was_down,
            ..Self::default()
        };
    }
}
