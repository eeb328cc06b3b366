//! Zentrale Konfiguration für den Airship-Hull-Editor.
//!
//! `HullOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use glam::Vec3;
use serde::{Deserialize, Serialize};

// ── Rumpf-Geometrie ─────────────────────────────────────────────────

/// Höhe eines Decks in Metern.
pub const DECK_HEIGHT: f32 = 2.13;
/// Vertikale Primitive (Schichten) pro Deck.
pub const PRIMITIVES_PER_DECK: usize = 5;
/// Teiler für die Anzahl horizontaler Stationen entlang des Rumpfs.
pub const HORIZONTAL_PRIM_DIVISOR: usize = 2;
/// Kantenlänge einer Deck-Zelle (Bounding-Box) in Metern.
pub const BOUNDING_BOX_WIDTH: f32 = 0.5;
/// Stützpunkte pro Profilkurve beim Abtasten als Polylinie.
pub const PROFILE_SAMPLES: usize = 200;

// ── Kurven-Editor ───────────────────────────────────────────────────

/// Minimaler Abstand eines Tangentengriffs vom Zentrum (Pixel).
pub const HANDLE_MIN_DIST: f32 = 20.0;

// ── Editor-Tools ────────────────────────────────────────────────────

/// Raster der Platzierungs-Tools in Metern.
pub const GRID_RESOLUTION: f32 = 0.5;
/// Wandstärke in Metern.
pub const WALL_WIDTH: f32 = 0.1;
/// Luft zwischen Wandoberkante und darüberliegendem Deck.
pub const WALL_HEIGHT_CLEARANCE: f32 = 0.01;
/// Kantenlänge der Leiter-Grundfläche in Metern.
pub const LADDER_FOOTPRINT: f32 = 1.0;
/// Grundfläche einer Kanone (X, Z) in Metern.
pub const CANNON_FOOTPRINT: [f32; 2] = [1.0, 1.0];

// ── Persistenz ──────────────────────────────────────────────────────

/// Versatz, der beim Import auf jede Vertex-Position addiert wird.
pub const IMPORT_OFFSET: [f32; 3] = [0.0, 1000.0, 0.0];

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Editor-Optionen.
/// Wird als `airship_hull_editor.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HullOptions {
    // ── Rumpf ───────────────────────────────────────────────────
    /// Deckhöhe in Metern
    pub deck_height: f32,
    /// Vertikale Primitive pro Deck
    pub primitives_per_deck: usize,
    /// Teiler für horizontale Stationen
    pub horizontal_prim_divisor: usize,
    /// Kantenlänge einer Deck-Zelle
    pub bounding_box_width: f32,
    /// Stützpunkte pro Profilkurve
    #[serde(default = "default_profile_samples")]
    pub profile_samples: usize,

    // ── Kurven ──────────────────────────────────────────────────
    /// Minimaler Tangenten-Abstand in Pixeln
    #[serde(default = "default_handle_min_dist")]
    pub handle_min_dist: f32,

    // ── Tools ────────────────────────────────────────────────────
    /// Raster der Platzierungs-Tools
    pub grid_resolution: f32,
    /// Wandstärke
    pub wall_width: f32,
    /// Abstand Wandoberkante zu Deck darüber
    #[serde(default = "default_wall_height_clearance")]
    pub wall_height_clearance: f32,
    /// Kantenlänge der Leiter-Grundfläche
    pub ladder_footprint: f32,
    /// Grundfläche einer Kanone (X, Z)
    pub cannon_footprint: [f32; 2],

    // ── Persistenz ──────────────────────────────────────────────
    /// Import-Versatz (X, Y, Z)
    #[serde(default = "default_import_offset")]
    pub import_offset: [f32; 3],
}

impl Default for HullOptions {
    fn default() -> Self {
        Self {
            deck_height: DECK_HEIGHT,
            primitives_per_deck: PRIMITIVES_PER_DECK,
            horizontal_prim_divisor: HORIZONTAL_PRIM_DIVISOR,
            bounding_box_width: BOUNDING_BOX_WIDTH,
            profile_samples: PROFILE_SAMPLES,

            handle_min_dist: HANDLE_MIN_DIST,

            grid_resolution: GRID_RESOLUTION,
            wall_width: WALL_WIDTH,
            wall_height_clearance: WALL_HEIGHT_CLEARANCE,
            ladder_footprint: LADDER_FOOTPRINT,
            cannon_footprint: CANNON_FOOTPRINT,

            import_offset: IMPORT_OFFSET,
        }
    }
}

/// Serde-Default für `profile_samples` (Abwärtskompatibilität bestehender TOML-Dateien).
fn default_profile_samples() -> usize {
    PROFILE_SAMPLES
}

fn default_handle_min_dist() -> f32 {
    HANDLE_MIN_DIST
}

fn default_wall_height_clearance() -> f32 {
    WALL_HEIGHT_CLEARANCE
}

fn default_import_offset() -> [f32; 3] {
    IMPORT_OFFSET
}

impl HullOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("airship_hull_editor"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("airship_hull_editor.toml")
    }

    /// Höhe einer gebauten Wand: Deckhöhe abzüglich Luft zur Decke.
    pub fn wall_height(&self) -> f32 {
        self.deck_height - self.wall_height_clearance
    }

    /// Import-Versatz als Vektor.
    pub fn import_offset_vec(&self) -> Vec3 {
        Vec3::from_array(self.import_offset)
    }
}
