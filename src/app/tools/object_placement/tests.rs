use super::*;
use crate::app::tools::test_support::{click, default_manager, near};
use crate::core::hull_mesh::{HullSide, SectionKey};

fn enabled_cannon(data: &mut HullDataManager, options: &HullOptions) -> ObjectPlacementTool {
    let mut tool = ObjectPlacementTool::cannon(options);
    tool.set_enabled(true, data);
    tool
}

fn disabled_sides(data: &HullDataManager, deck: usize) -> Vec<HullSide> {
    let hull = &data.deck(deck).expect("Deck existiert").hull;
    (0..hull.len() as u32)
        .filter(|&i| hull.buffer().is_object_enabled(&SectionKey(i)) == Some(false))
        .filter_map(|i| hull.section(SectionKey(i)).map(|s| s.side))
        .collect()
}

#[test]
fn test_port_position_halbe_deckhoehe() {
    let footprint = BoundingBox::new(Vec3::new(2.0, -2.0, 1.0), Vec3::new(3.0, -2.0, 2.0));
    assert_eq!(port_position(&footprint, -2.0, 2.0), Vec3::new(2.5, -1.0, 1.5));
}

#[test]
fn test_kanone_schneidet_rumpf_des_decks_darueber() {
    let (mut data, options) = default_manager();
    data.move_down_one_deck();
    let mut tool = enabled_cannon(&mut data, &options);

    tool.update_input(&CursorInput::at(near(25.0, 0.0), false), &mut data);
    assert!(tool.placement_valid());
    click(&mut tool, &mut data, near(25.0, 0.0));

    assert_eq!(data.current().objects.len(), 1);
    assert_eq!(data.placed_objects(1).count(), 1);
    let sides = disabled_sides(&data, 0);
    assert!(!sides.is_empty());
    assert!(sides.iter().all(|&s| s == HullSide::Port));
    assert_eq!(data.deck(1).map(|d| d.hull.disabled_sections()), Some(0));
}

#[test]
fn test_kanone_steuerbord() {
    let (mut data, options) = default_manager();
    data.move_down_one_deck();
    let mut tool = enabled_cannon(&mut data, &options);

    click(&mut tool, &mut data, near(25.0, -1.0));
    let sides = disabled_sides(&data, 0);
    assert!(!sides.is_empty());
    assert!(sides.iter().all(|&s| s == HullSide::Starboard));
}

#[test]
fn test_belegte_grundflaeche_wird_abgelehnt() {
    let (mut data, options) = default_manager();
    let mut tool = enabled_cannon(&mut data, &options);

    click(&mut tool, &mut data, near(25.0, 0.0));
    click(&mut tool, &mut data, near(25.5, 0.5));
    assert_eq!(data.current().objects.len(), 1);
    assert!(!tool.placement_valid());

    click(&mut tool, &mut data, near(26.0, 0.0));
    assert_eq!(data.current().objects.len(), 2);
}

#[test]
fn test_oberstes_deck_schneidet_nicht() {
    let (mut data, options) = default_manager();
    let mut tool = enabled_cannon(&mut data, &options);

    click(&mut tool, &mut data, near(25.0, 0.0));
    assert_eq!(data.current().objects.len(), 1);
    assert!(data.decks().iter().all(|d| d.hull.disabled_sections() == 0));
}

#[test]
fn test_cursor_ausserhalb_des_decks() {
    let (mut data, options) = default_manager();
    let mut tool = enabled_cannon(&mut data, &options);

    click(&mut tool, &mut data, Vec3::new(-100.0, 0.0, 0.0));
    assert!(data.current().objects.is_empty());
    assert!(tool.cursor.position().is_none());
}
