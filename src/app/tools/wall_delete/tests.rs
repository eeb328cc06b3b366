use super::*;
use crate::app::tools::test_support::{begin_stroke, default_manager, near, stroke};
use crate::app::tools::WallBuildTool;

/// Manager mit einem 1 m × 1 m Wand-Rechteck auf Deck 0.
fn manager_with_walls() -> (HullDataManager, HullOptions) {
    let (mut data, options) = default_manager();
    let mut builder = WallBuildTool::new(&options);
    builder.set_enabled(true, &mut data);
    stroke(&mut builder, &mut data, near(25.0, 0.0), near(26.0, 1.0));
    assert_eq!(data.current().walls.len(), 8);
    (data, options)
}

fn enabled_tool(data: &mut HullDataManager, options: &HullOptions) -> WallDeleteTool {
    let mut tool = WallDeleteTool::new(options);
    tool.set_enabled(true, data);
    tool
}

#[test]
fn test_ziehen_blendet_aus_loslassen_loescht() {
    let (mut data, options) = manager_with_walls();
    let mut tool = enabled_tool(&mut data, &options);

    begin_stroke(&mut tool, &mut data, near(25.0, 0.0), near(26.0, 1.0));
    assert_eq!(tool.hidden_walls().len(), 8);
    assert_eq!(tool.marker().len(), 8);
    assert_eq!(data.current().walls.len(), 8);
    assert_eq!(data.current().walls.drawable_triangles(), 0);

    tool.update_input(&CursorInput::at(near(26.0, 1.0), false), &mut data);
    assert!(data.current().walls.is_empty());
    assert!(data.current().wall_keys.is_empty());
    assert!(tool.marker().is_empty());
}

#[test]
fn test_teilstrich_loescht_nur_eine_kante() {
    let (mut data, options) = manager_with_walls();
    let mut tool = enabled_tool(&mut data, &options);

    stroke(&mut tool, &mut data, near(25.0, 0.0), near(26.0, 0.0));
    assert_eq!(data.current().walls.len(), 6);
    assert_eq!(data.current().walls.drawable_triangles(), 60);
}

#[test]
fn test_verkleinerter_strich_blendet_wieder_ein() {
    let (mut data, options) = manager_with_walls();
    let mut tool = enabled_tool(&mut data, &options);

    begin_stroke(&mut tool, &mut data, near(25.0, 0.0), near(26.0, 0.0));
    assert_eq!(data.current().walls.drawable_triangles(), 60);

    tool.update_input(&CursorInput::at(near(25.5, 0.0), true), &mut data);
    assert_eq!(tool.hidden_walls().len(), 1);
    assert_eq!(data.current().walls.drawable_triangles(), 70);
}

#[test]
fn test_deaktivieren_stellt_wande_wieder_her() {
    let (mut data, options) = manager_with_walls();
    let mut tool = enabled_tool(&mut data, &options);

    begin_stroke(&mut tool, &mut data, near(25.0, 0.0), near(26.0, 1.0));
    assert_eq!(data.current().walls.drawable_triangles(), 0);

    tool.set_enabled(false, &mut data);
    assert_eq!(data.current().walls.drawable_triangles(), 80);
    assert!(tool.hidden_walls().is_empty());
    assert!(!tool.cursor.is_drawing());
}

#[test]
fn test_reset_und_deaktivieren_blendet_wieder_ein() {
    let (mut data, options) = manager_with_walls();
    let mut tool = enabled_tool(&mut data, &options);

    begin_stroke(&mut tool, &mut data, near(25.0, 0.0), near(26.0, 1.0));
    tool.reset();
    assert!(!tool.cursor.is_drawing());
    assert_eq!(tool.hidden_walls().len(), 8);

    tool.set_enabled(false, &mut data);
    assert_eq!(data.current().walls.len(), 8);
    assert_eq!(data.current().walls.drawable_triangles(), 80);
    assert!(tool.hidden_walls().is_empty());
}

#[test]
fn test_reset_naechste_eingabe_blendet_wieder_ein() {
    let (mut data, options) = manager_with_walls();
    let mut tool = enabled_tool(&mut data, &options);

    begin_stroke(&mut tool, &mut data, near(25.0, 0.0), near(26.0, 0.0));
    tool.reset();
    tool.update_input(&CursorInput::at(near(25.0, 0.0), false), &mut data);
    assert_eq!(data.current().walls.drawable_triangles(), 80);
    assert!(tool.hidden_walls().is_empty());
}

#[test]
fn test_nur_vorhandene_waende_werden_ausgeblendet() {
    let (mut data, options) = manager_with_walls();
    let mut tool = enabled_tool(&mut data, &options);

    // Mittellinie des Rechtecks: markiert, aber keine Wand darunter.
    begin_stroke(&mut tool, &mut data, near(25.0, 0.5), near(26.0, 0.5));
    assert_eq!(tool.marker().len(), 2);
    assert!(tool.hidden_walls().is_empty());
    assert_eq!(data.current().walls.drawable_triangles(), 80);
}
