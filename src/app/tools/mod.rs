//! Trait-basiertes Tool-System für den Deck-Editor.
//!
//! Jedes Tool implementiert `HullTool` und wird beim `ToolManager`
//! registriert. Der Manager aktiviert genau ein Tool, reicht Eingaben
//! weiter und meldet Deckwechsel, die er per Polling am
//! `HullDataManager` erkennt.

/// Gemeinsame Bausteine (Gitter-Cursor, Wand-Striche).
pub mod common;
/// HullTool-Trait: Schnittstelle für alle Deck-Tools.
mod hull_tool;
/// Leiter: Loch in Decke und Boden des Decks darüber.
pub mod ladder;
/// Platzierung von Deck-Objekten (Kanone schneidet Stückpforte).
pub mod object_placement;
/// Wände entlang eines Strich-Rechtecks bauen.
pub mod wall_build;
/// Wände entlang eines Strich-Rechtecks löschen.
pub mod wall_delete;

#[cfg(test)]
pub(crate) mod test_support;

pub use hull_tool::HullTool;
pub use ladder::LadderBuildTool;
pub use object_placement::ObjectPlacementTool;
pub use wall_build::WallBuildTool;
pub use wall_delete::WallDeleteTool;

use glam::Vec3;

use crate::core::{DeckChange, HullDataManager};
use crate::shared::HullOptions;

// ── Eingabe ──────────────────────────────────────────────────────

/// Eingabe eines Frames, bereits in Weltkoordinaten.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CursorInput {
    /// Schnittpunkt des Maus-Strahls mit dem Deck (`None` wenn verfehlt)
    pub world_pos: Option<Vec3>,
    /// Primärtaste gedrückt
    pub primary_down: bool,
}

impl CursorInput {
    pub fn at(world_pos: Vec3, primary_down: bool) -> Self {
        Self {
            world_pos: Some(world_pos),
            primary_down,
        }
    }
}

// ── ToolManager ──────────────────────────────────────────────────

/// Verwaltet registrierte Tools und den aktiven Tool-Index.
pub struct ToolManager {
    tools: Vec<Box<dyn HullTool>>,
    active_index: Option<usize>,
    last_deck: usize,
}

impl ToolManager {
    /// Erstellt einen ToolManager mit den Standard-Tools.
    pub fn new(options: &HullOptions) -> Self {
        let mut manager = Self::empty();
        manager.register(Box::new(WallBuildTool::new(options)));
        manager.register(Box::new(WallDeleteTool::new(options)));
        manager.register(Box::new(ObjectPlacementTool::cannon(options)));
        manager.register(Box::new(LadderBuildTool::new(options)));
        manager
    }

    /// ToolManager ohne registrierte Tools.
    pub fn empty() -> Self {
        Self {
            tools: Vec::new(),
            active_index: None,
            last_deck: 0,
        }
    }

    pub fn register(&mut self, tool: Box<dyn HullTool>) {
        self.tools.push(tool);
    }

    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }

    /// Name und Index aller registrierten Tools.
    pub fn tool_names(&self) -> Vec<(usize, &str)> {
        self.tools
            .iter()
            .enumerate()
            .map(|(i, t)| (i, t.name()))
            .collect()
    }

    /// Aktiviert das Tool `index`; das bisher aktive wird deaktiviert.
    pub fn set_active(&mut self, index: usize, data: &mut HullDataManager) {
        if index >= self.tools.len() {
            log::warn!("Tool-Index {} existiert nicht", index);
            return;
        }
        if let Some(old) = self.active_index {
            if old == index {
                return;
            }
            self.tools[old].set_enabled(false, data);
        }
        self.last_deck = data.current_deck();
        self.tools[index].set_enabled(true, data);
        self.active_index = Some(index);
        log::debug!("Tool aktiv: {}", self.tools[index].name());
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub fn active_tool(&self) -> Option<&dyn HullTool> {
        self.active_index.map(|i| self.tools[i].as_ref())
    }

    pub fn active_tool_mut(&mut self) -> Option<&mut dyn HullTool> {
        let i = self.active_index?;
        Some(self.tools[i].as_mut())
    }

    /// Verarbeitet einen Frame: Deckwechsel melden, dann Eingabe und Logik.
    pub fn update(&mut self, input: &CursorInput, data: &mut HullDataManager) {
        let Some(i) = self.active_index else {
            self.last_deck = data.current_deck();
            return;
        };
        let tool = &mut self.tools[i];

        let deck = data.current_deck();
        if deck != self.last_deck {
            tool.on_deck_change(
                DeckChange {
                    old: self.last_deck,
                    new: deck,
                },
                data,
            );
            self.last_deck = deck;
        }

        tool.update_input(input, data);
        tool.update_logic(data);
    }

    /// Deaktiviert das aktive Tool.
    pub fn deactivate(&mut self, data: &mut HullDataManager) {
        if let Some(i) = self.active_index.take() {
            self.tools[i].set_enabled(false, data);
        }
    }
}
