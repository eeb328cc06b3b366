use super::*;
use crate::app::tools::test_support::{click, default_manager, near};
use crate::core::identifiers::DeckPlateKey;

fn enabled_tool(data: &mut HullDataManager, options: &HullOptions) -> LadderBuildTool {
    let mut tool = LadderBuildTool::new(options);
    tool.set_enabled(true, data);
    tool
}

fn cell_mins(x: f32, z: f32) -> Vec<(f32, f32)> {
    vec![(x, z), (x + 0.5, z), (x, z + 0.5), (x + 0.5, z + 0.5)]
}

#[test]
fn test_leiter_oeffnet_deck_darueber() {
    let (mut data, options) = default_manager();
    data.move_down_one_deck();
    let mut tool = enabled_tool(&mut data, &options);

    click(&mut tool, &mut data, near(25.0, 0.0));
    assert_eq!(data.deck(1).map(|d| d.objects.len()), Some(1));

    let upper_floor = data.deck(0).map(|d| d.floor_y).unwrap_or_default();
    for (x, z) in cell_mins(25.0, 0.0) {
        let plate = DeckPlateKey::board(Vec3::new(x, upper_floor, z));
        assert_eq!(
            data.deck(0).and_then(|d| d.plates.is_object_enabled(&plate)),
            Some(false)
        );
        let center = Vec3::new(x + 0.25, 0.0, z + 0.25);
        assert!(data.bounding_box_at(0, center).is_none());
        assert!(data.bounding_box_at(1, center).is_none());
    }
    // Nachbarzelle bleibt
    assert!(data.bounding_box_at(1, Vec3::new(24.75, 0.0, 0.25)).is_some());
}

#[test]
fn test_leiter_auf_oberstem_deck() {
    let (mut data, options) = default_manager();
    let mut tool = enabled_tool(&mut data, &options);
    let plates_before = data.deck(0).map(|d| d.plates.active_objects());

    click(&mut tool, &mut data, near(25.0, 0.0));
    assert_eq!(data.current().objects.len(), 1);
    assert_eq!(data.deck(0).map(|d| d.plates.active_objects()), plates_before);
    assert!(data.bounding_box_at(0, Vec3::new(25.25, 0.0, 0.25)).is_none());
}

#[test]
fn test_entfernte_zellen_sind_nicht_mehr_anwaehlbar() {
    let (mut data, options) = default_manager();
    let mut tool = enabled_tool(&mut data, &options);

    click(&mut tool, &mut data, near(25.0, 0.0));
    assert!(data.snap_to_grid(0, Vec3::new(25.25, 0.0, 0.25)).is_none());
    click(&mut tool, &mut data, near(25.5, 0.5));
    assert_eq!(data.current().objects.len(), 1);
}
