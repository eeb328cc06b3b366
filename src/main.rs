//! Airship Hull Editor.
//!
//! Erzeugt aus einer Rumpfdefinition (TOML) die Rumpf- und Deckgeometrie
//! eines Luftschiffs und exportiert sie als JSON-Paket.
//!
//! Aufruf: `airship-hull-editor [rumpf.toml] [ausgabe.json]`

use std::path::PathBuf;

use airship_hull_editor::core::{generate_from_profiles, packager};
use airship_hull_editor::{AirshipPackage, HullDataManager, HullDefinition, HullOptions};

fn main() -> anyhow::Result<()> {
    AppRunner::run()
}

struct AppRunner;

impl AppRunner {
    fn run() -> anyhow::Result<()> {
        // Logger initialisieren
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();

        log::info!(
            "Airship Hull Editor v{} startet...",
            env!("CARGO_PKG_VERSION")
        );

        let mut args = std::env::args().skip(1);
        let definition_path = args.next().map(PathBuf::from);
        let output_path = args
            .next()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("airship.json"));

        // Optionen aus TOML laden (oder Standardwerte)
        let options = HullOptions::load_from_file(&HullOptions::config_path());

        let definition = match &definition_path {
            Some(path) => HullDefinition::load_from_file(path)?,
            None => {
                log::info!("Keine Rumpfdefinition angegeben, verwende Standard-Luftschiff");
                HullDefinition::default()
            }
        };

        let profiles = definition.build(&options)?;
        let geometry = generate_from_profiles(&profiles, &options);
        let manager = HullDataManager::new(geometry, &options);
        for (i, deck) in manager.decks().iter().enumerate() {
            log::info!(
                "Deck {}: {} Rumpfsektionen, {} Bodenplatten, {} Zellen",
                i,
                deck.hull.len(),
                deck.plates.len(),
                deck.bounding_boxes.len()
            );
        }

        let package = AirshipPackage::from_manager(&manager, Some(&profiles));
        packager::export(&output_path, &package)?;
        Ok(())
    }
}
