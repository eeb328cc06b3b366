//! Rumpfdefinition: die drei Profilkurven eines Luftschiffs als TOML.

use std::f32::consts::PI;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::core::curve_collection::{
    BezierCurveCollection, CurveCollectionConfig, HandleConfig, PanelKind,
};
use crate::shared::HullOptions;

/// Seiten-, Drauf- und Heckprofil in Metern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HullDefinition {
    pub side: CurveCollectionConfig,
    pub top: CurveCollectionConfig,
    pub back: CurveCollectionConfig,
}

/// Die drei editierbaren Kurvensammlungen eines Rumpfs.
#[derive(Debug, Clone)]
pub struct HullProfiles {
    pub side: BezierCurveCollection,
    pub top: BezierCurveCollection,
    pub back: BezierCurveCollection,
}

fn handle(pos_x: f32, pos_y: f32, angle: f32, prev_length: f32, next_length: f32) -> HandleConfig {
    HandleConfig {
        pos_x,
        pos_y,
        angle,
        prev_length,
        next_length,
    }
}

fn collection(handles: Vec<HandleConfig>) -> CurveCollectionConfig {
    CurveCollectionConfig {
        area: [0.0, 0.0, 500.0, 200.0],
        num_controllers: handles.len(),
        handles,
    }
}

impl Default for HullDefinition {
    /// Standard-Luftschiff: 50 m lang, 10 m breit, 8 m Tiefgang.
    fn default() -> Self {
        Self {
            side: collection(vec![
                handle(0.0, 0.0, -3.0 * PI / 4.0, 10.0, 10.0),
                handle(25.0, 8.0, PI, 15.0, 15.0),
                handle(50.0, 0.0, 3.0 * PI / 4.0, 10.0, 10.0),
            ]),
            top: collection(vec![
                handle(50.0, 0.0, 0.0, 10.0, 20.0),
                handle(0.0, 5.0, -PI / 2.0, 5.0, 5.0),
                handle(50.0, 10.0, PI, 20.0, 10.0),
            ]),
            back: collection(vec![
                handle(0.0, 0.0, -PI / 2.0, 4.0, 4.0),
                handle(5.0, 8.0, PI, 3.0, 3.0),
                handle(10.0, 0.0, PI / 2.0, 4.0, 4.0),
            ]),
        }
    }
}

impl HullDefinition {
    /// Lädt eine Rumpfdefinition. Fehlerhafte Dateien sind ein harter Fehler.
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Rumpfdefinition nicht lesbar: {}", path.display()))?;
        let definition: Self = toml::from_str(&content)
            .with_context(|| format!("Rumpfdefinition fehlerhaft: {}", path.display()))?;
        log::info!("Rumpfdefinition geladen aus: {}", path.display());
        Ok(definition)
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Rumpfdefinition nicht schreibbar: {}", path.display()))?;
        log::info!("Rumpfdefinition gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Baut die drei Kurvensammlungen.
    pub fn build(&self, options: &HullOptions) -> anyhow::Result<HullProfiles> {
        let build = |config: &CurveCollectionConfig, panel: PanelKind| {
            BezierCurveCollection::from_config(config, panel)
                .map(|c| c.with_handle_min_dist(options.handle_min_dist))
                .with_context(|| format!("Profil {:?} ungültig", panel))
        };
        Ok(HullProfiles {
            side: build(&self.side, PanelKind::Side)?,
            top: build(&self.top, PanelKind::Top)?,
            back: build(&self.back, PanelKind::Back)?,
        })
    }
}

impl HullProfiles {
    /// Zurück in eine speicherbare Definition.
    pub fn to_definition(&self) -> HullDefinition {
        HullDefinition {
            side: self.side.to_config(),
            top: self.top.to_config(),
            back: self.back.to_config(),
        }
    }
}
