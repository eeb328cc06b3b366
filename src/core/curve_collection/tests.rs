use super::*;
use crate::core::hull_definition::HullDefinition;
use std::f32::consts::PI;

const EPS: f32 = 1e-3;

fn default_collection(panel: PanelKind) -> BezierCurveCollection {
    let def = HullDefinition::default();
    let config = match panel {
        PanelKind::Side => &def.side,
        PanelKind::Top => &def.top,
        PanelKind::Back => &def.back,
    };
    BezierCurveCollection::from_config(config, panel).expect("gültige Standardkurve")
}

// ── Parametrisierung ──

#[test]
fn test_parameter_null_und_eins_liefern_endgriffe() {
    let mut side = default_collection(PanelKind::Side);
    let first = side.to_meters(side.curves()[0].handle.center);
    let last = side.to_meters(side.curves()[2].handle.center);

    let p0 = side.get_parameterized_point(0.0, true);
    let p1 = side.get_parameterized_point(1.0, false);
    assert!((p0 - first).length() < EPS, "p0 = {:?}", p0);
    assert!((p1 - last).length() < EPS, "p1 = {:?}", p1);
    assert!((p1 - Vec2::new(50.0, 0.0)).length() < EPS);
}

#[test]
fn test_gerade_ohne_tangenten_halbiert_sich_in_metern() {
    let handles = vec![
        CurveHandle::new(Vec2::new(0.0, 0.0), 0.0, 0.0, 0.0),
        CurveHandle::new(Vec2::new(100.0, 0.0), 0.0, 0.0, 0.0),
    ];
    let mut c = BezierCurveCollection::from_pixel_handles(handles, 10.0, PanelKind::Side);
    let mid = c.get_parameterized_point(0.5, true);
    assert!((mid - Vec2::new(5.0, 0.0)).length() < EPS, "mid = {:?}", mid);
}

#[test]
fn test_tiefster_punkt_des_seitenprofils() {
    let mut side = default_collection(PanelKind::Side);
    assert_eq!(side.max_y_curve(), 1);
    assert!((side.extent_meters() - Vec2::new(50.0, 8.0)).length() < EPS);
    // Gleich lange Segmente: t = 0.5 liegt genau auf dem Mittelgriff
    let mid = side.get_parameterized_point(0.5, true);
    assert!((mid - Vec2::new(25.0, 8.0)).length() < EPS, "mid = {:?}", mid);
}

#[test]
fn test_sample_polyline_endpunkte_und_anzahl() {
    let back = default_collection(PanelKind::Back);
    let pts = back.sample_polyline(50);
    assert_eq!(pts.len(), 50);
    assert!((pts[0] - Vec2::new(0.0, 0.0)).length() < EPS);
    assert!((pts[49] - Vec2::new(10.0, 0.0)).length() < EPS);
    let deepest = pts.iter().fold(0.0f32, |m, p| m.max(p.y));
    assert!((deepest - 8.0).abs() < 0.05);
}

#[test]
fn test_meter_pixel_umrechnung() {
    let side = default_collection(PanelKind::Side);
    let p = Vec2::new(12.5, 3.0);
    assert!((side.to_meters(side.to_pixels(p)) - p).length() < EPS);
    assert!((side.to_pixels(Vec2::ZERO) - side.min()).length() < EPS);
}

// ── Symmetrie ──

#[test]
fn test_heckprofil_spiegelt_partner_an_mittelachse() {
    let mut back = default_collection(PanelKind::Back);
    let axis_x = (back.curves()[0].handle.center.x + back.curves()[2].handle.center.x) * 0.5;

    assert!(back.queue_drag(0, HandlePart::Center, Vec2::new(-10.0, 6.0)));
    assert!(back.has_pending_edits());
    back.update();
    assert!(!back.has_pending_edits());

    let a = back.curves()[0].handle.center;
    let b = back.curves()[2].handle.center;
    assert!((b.x - (2.0 * axis_x - a.x)).abs() < EPS);
    assert!((b.y - a.y).abs() < EPS);
}

#[test]
fn test_draufsicht_spiegelt_tangenten() {
    let mut top = default_collection(PanelKind::Top);
    let axis_y = (top.curves()[0].handle.center.y + top.curves()[2].handle.center.y) * 0.5;

    top.queue_drag(0, HandlePart::Next, Vec2::new(20.0, 40.0));
    top.update();

    let a = top.curves()[0].handle;
    let b = top.curves()[2].handle;
    // next von A entspricht prev von B, an der Horizontalen gespiegelt
    let a_next = a.next_pos();
    let b_prev = b.prev_pos();
    assert!((a_next.x - b_prev.x).abs() < EPS);
    assert!((b_prev.y - (2.0 * axis_y - a_next.y)).abs() < EPS);
    assert!((a.prev_length - b.next_length).abs() < EPS);
}

#[test]
fn test_seitenprofil_koppelt_nur_hoehe_der_enden() {
    let mut side = default_collection(PanelKind::Side);
    let last_x = side.curves()[2].handle.center.x;

    side.queue_drag(0, HandlePart::Center, Vec2::new(15.0, -7.0));
    side.update();

    let a = side.curves()[0].handle.center;
    let b = side.curves()[2].handle.center;
    assert!((a.y - b.y).abs() < EPS);
    assert!((b.x - last_x).abs() < EPS);
}

#[test]
fn test_mittelgriff_der_draufsicht_bewegt_sich_nur_entlang_x() {
    let mut top = default_collection(PanelKind::Top);
    let before = top.curves()[1].handle.center;
    top.queue_drag(1, HandlePart::Center, Vec2::new(-5.0, 30.0));
    top.update();
    let after = top.curves()[1].handle.center;
    assert!((after.y - before.y).abs() < EPS);
    assert!((after.x - (before.x - 5.0)).abs() < EPS);
    // Mittelgriff bleibt senkrecht
    assert!((top.curves()[1].handle.angle + PI / 2.0).abs() < EPS);
}

#[test]
fn test_update_erneuert_ausdehnung() {
    let mut side = default_collection(PanelKind::Side);
    let old_max = side.max();
    side.queue_drag(1, HandlePart::Center, Vec2::new(0.0, 20.0));
    side.update();
    assert!((side.max().y - (old_max.y + 20.0)).abs() < EPS);
    assert_eq!(side.max_y_curve(), 1);
}

#[test]
fn test_unbekannte_kurve_wird_ignoriert() {
    let mut side = default_collection(PanelKind::Side);
    assert!(!side.queue_drag(99, HandlePart::Center, Vec2::ONE));
    assert!(!side.has_pending_edits());
}

// ── Konfiguration ──

#[test]
fn test_konfiguration_mit_einem_griff_wird_abgelehnt() {
    let config = CurveCollectionConfig {
        area: [0.0, 0.0, 100.0, 100.0],
        num_controllers: 1,
        handles: vec![HandleConfig {
            pos_x: 1.0,
            pos_y: 1.0,
            angle: 0.0,
            prev_length: 1.0,
            next_length: 1.0,
        }],
    };
    assert!(BezierCurveCollection::from_config(&config, PanelKind::Side).is_err());
}

#[test]
fn test_konfiguration_skaliert_und_zentriert() {
    let side = default_collection(PanelKind::Side);
    // 500/50 = 10, 200/8 = 25 → 10 px/m, vertikal zentriert
    assert!((side.pixels_per_meter() - 10.0).abs() < EPS);
    assert!((side.min() - Vec2::new(0.0, 60.0)).length() < EPS);
    assert!((side.curves()[1].handle.prev_length - 150.0).abs() < EPS);
}

#[test]
fn test_controller_info_in_metern() {
    let side = default_collection(PanelKind::Side);
    let info = side.controller_info(1.0, 1.0);
    assert_eq!(info.len(), 3);
    assert!((info[1].pos - Vec2::new(25.0, 8.0)).length() < EPS);
    assert!((info[1].prev - Vec2::new(10.0, 8.0)).length() < EPS);
    assert!((info[1].next - Vec2::new(40.0, 8.0)).length() < EPS);
}
