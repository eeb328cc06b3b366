//! HullTool-Trait: Schnittstelle für alle Deck-Editor-Tools.

use crate::core::{DeckChange, HullDataManager};

use super::common::DeckCursor;
use super::CursorInput;

/// Schnittstelle für alle Deck-Tools (Wand bauen/löschen, Objekte, Leiter).
///
/// Tools sind zustandsbehaftet (Strich-Phasen) und ändern den
/// `HullDataManager` ausschließlich über dessen Buffer-Verträge.
pub trait HullTool {
    /// Anzeigename für die Toolbar
    fn name(&self) -> &str;

    /// Kurzbeschreibung / Tooltip
    fn description(&self) -> &str;

    /// Statustext (z.B. "Startpunkt wählen")
    fn status_text(&self) -> &str;

    fn is_enabled(&self) -> bool;

    /// Aktiviert/deaktiviert das Tool. Beim Deaktivieren werden
    /// Vorschau-Änderungen am Manager zurückgenommen.
    fn set_enabled(&mut self, enabled: bool, data: &mut HullDataManager);

    /// Cursor- und Tasteneingabe eines Frames verarbeiten.
    fn update_input(&mut self, input: &CursorInput, data: &mut HullDataManager);

    /// Per-Frame-Logik nach der Eingabe.
    fn update_logic(&mut self, _data: &mut HullDataManager) {}

    /// Deckwechsel: laufende Striche verwerfen.
    fn on_deck_change(&mut self, _change: DeckChange, _data: &mut HullDataManager) {}

    /// Tool-Zustand zurücksetzen (Escape / Tool-Wechsel).
    fn reset(&mut self);

    /// Gitter-Cursor des Tools, falls vorhanden.
    fn cursor(&self) -> Option<&DeckCursor> {
        None
    }
}
