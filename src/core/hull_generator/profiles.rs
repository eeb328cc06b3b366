//! Abgetastete Profilkurven und die daraus abgeleiteten Rumpfmaße.

use glam::Vec2;

use crate::core::curve_collection::BezierCurveCollection;
use crate::shared::geometry::{polyline_crossings_at_x, polyline_crossings_at_y};

/// Die drei Profile als Polylinien in Metern, plus Kennwerte.
#[derive(Debug, Clone)]
pub(super) struct ProfileSet {
    side: Vec<Vec2>,
    top: Vec<Vec2>,
    back: Vec<Vec2>,
    pub draft: f32,
    pub length: f32,
    pub berth: f32,
    side_min_x: f32,
    side_keel_x: f32,
    top_min_x: f32,
    top_length: f32,
    top_axis_y: f32,
    back_axis_x: f32,
    back_depth: f32,
    back_half_max: f32,
}

/// Spiegelachse einer Sammlung: Mitte zwischen erstem und letztem Griff (Meter).
fn mirror_axis(collection: &BezierCurveCollection) -> Vec2 {
    let curves = collection.curves();
    let first = collection.to_meters(curves[0].handle.center);
    let last = collection.to_meters(curves[curves.len() - 1].handle.center);
    (first + last) * 0.5
}

impl ProfileSet {
    pub fn sample(
        back: &BezierCurveCollection,
        side: &BezierCurveCollection,
        top: &BezierCurveCollection,
        samples: usize,
    ) -> Self {
        let side_pts = side.sample_polyline(samples);
        let top_pts = top.sample_polyline(samples);
        let back_pts = back.sample_polyline(samples);

        let (side_min_x, side_max_x) = x_range(&side_pts);
        let deepest = side_pts
            .iter()
            .copied()
            .fold(Vec2::new(side_min_x, f32::MIN), |best, p| if p.y > best.y { p } else { best });
        let draft = deepest.y.max(0.0);

        let (top_min_x, top_max_x) = x_range(&top_pts);
        let top_axis_y = mirror_axis(top).y;
        let top_half_max = top_pts
            .iter()
            .fold(0.0f32, |m, p| m.max((p.y - top_axis_y).abs()));

        let back_axis_x = mirror_axis(back).x;
        let back_depth = back_pts.iter().fold(0.0f32, |m, p| m.max(p.y));
        let back_half_max = back_pts
            .iter()
            .fold(0.0f32, |m, p| m.max((p.x - back_axis_x).abs()));

        Self {
            side: side_pts,
            top: top_pts,
            back: back_pts,
            draft,
            length: side_max_x - side_min_x,
            berth: 2.0 * top_half_max,
            side_min_x,
            side_keel_x: deepest.x,
            top_min_x,
            top_length: top_max_x - top_min_x,
            top_axis_y,
            back_axis_x,
            back_depth,
            back_half_max,
        }
    }

    /// Vorderer und hinterer Schnittpunkt des Seitenprofils in Tiefe `depth`.
    pub fn hull_span_at_depth(&self, depth: f32) -> (f32, f32) {
        let xs = polyline_crossings_at_y(&self.side, depth);
        match (xs.first(), xs.last()) {
            (Some(&fore), Some(&aft)) => (fore, aft),
            _ => (self.side_keel_x, self.side_keel_x),
        }
    }

    /// Kieltiefe an Längsposition `x` (0 außerhalb des Rumpfs).
    pub fn keel_depth(&self, x: f32) -> f32 {
        polyline_crossings_at_x(&self.side, x)
            .last()
            .copied()
            .unwrap_or(0.0)
            .max(0.0)
    }

    /// Halbe Breite der Draufsicht an Längsposition `x` (Seitenprofil-Koordinaten).
    pub fn top_half_width(&self, x: f32) -> f32 {
        let u = if self.length > f32::EPSILON {
            (x - self.side_min_x) / self.length
        } else {
            0.0
        };
        let x_top = self.top_min_x + u.clamp(0.0, 1.0) * self.top_length;
        polyline_crossings_at_x(&self.top, x_top)
            .iter()
            .fold(0.0f32, |m, y| m.max((y - self.top_axis_y).abs()))
    }

    /// Normierte Heckprofil-Breite (0..1) bei relativer Tiefe `dn` (0 = Deck, 1 = Kiel).
    pub fn back_width_normalized(&self, dn: f32) -> f32 {
        if self.back_half_max <= f32::EPSILON {
            return 0.0;
        }
        let y = dn.clamp(0.0, 1.0) * self.back_depth;
        let half = polyline_crossings_at_y(&self.back, y)
            .iter()
            .fold(0.0f32, |m, x| m.max((x - self.back_axis_x).abs()));
        (half / self.back_half_max).min(1.0)
    }

    /// Halbe Rumpfbreite (Z) an Position `x` in Tiefe `depth`.
    pub fn half_width(&self, x: f32, depth: f32) -> f32 {
        let keel = self.keel_depth(x);
        if keel <= f32::EPSILON {
            return 0.0;
        }
        let dn = (depth / keel).clamp(0.0, 1.0);
        self.top_half_width(x) * self.back_width_normalized(dn)
    }
}

fn x_range(points: &[Vec2]) -> (f32, f32) {
    points
        .iter()
        .fold((f32::MAX, f32::MIN), |(lo, hi), p| (lo.min(p.x), hi.max(p.x)))
}
