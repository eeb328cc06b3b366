//! Reine Geometrie-Helfer: Bézier-Auswertung und lineare Spurverfolgung.
//!
//! Wird sowohl vom Kurvenmodell (Profilraum, `Vec2`) als auch vom
//! Rumpf-Generator und den Sektions-Tests (`Vec3`) genutzt.

use glam::{Vec2, Vec3};

/// B(t) = (1-t)³·P0 + 3(1-t)²t·P1 + 3(1-t)t²·P2 + t³·P3
pub fn cubic_bezier(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let inv = 1.0 - t;
    inv * inv * inv * p0 + 3.0 * inv * inv * t * p1 + 3.0 * inv * t * t * p2 + t * t * t * p3
}

/// Punkt auf der Geraden durch `a` und `b` mit der X-Koordinate `x`.
///
/// Bei senkrechter Linie (gleiches X) wird `a` zurückgegeben.
pub fn trace_x(a: Vec3, b: Vec3, x: f32) -> Vec3 {
    let dx = b.x - a.x;
    if dx.abs() < f32::EPSILON {
        return a;
    }
    let t = (x - a.x) / dx;
    a + (b - a) * t
}

/// Punkt auf der Geraden durch `a` und `b` mit der Y-Koordinate `y`.
pub fn trace_y(a: Vec3, b: Vec3, y: f32) -> Vec3 {
    let dy = b.y - a.y;
    if dy.abs() < f32::EPSILON {
        return a;
    }
    let t = (y - a.y) / dy;
    a + (b - a) * t
}

/// Schnittpunkte einer Polylinie mit der Horizontalen `y`, nach X sortiert.
pub fn polyline_crossings_at_y(points: &[Vec2], y: f32) -> Vec<f32> {
    let mut xs = Vec::new();
    for w in points.windows(2) {
        let (a, b) = (w[0], w[1]);
        let (lo, hi) = if a.y <= b.y { (a, b) } else { (b, a) };
        if y < lo.y || y > hi.y {
            continue;
        }
        if (hi.y - lo.y).abs() < f32::EPSILON {
            xs.push(lo.x);
            xs.push(hi.x);
            continue;
        }
        let t = (y - lo.y) / (hi.y - lo.y);
        xs.push(lo.x + (hi.x - lo.x) * t);
    }
    xs.sort_by(f32::total_cmp);
    xs
}

/// Schnittpunkte einer Polylinie mit der Senkrechten `x`, nach Y sortiert.
pub fn polyline_crossings_at_x(points: &[Vec2], x: f32) -> Vec<f32> {
    let swapped: Vec<Vec2> = points.iter().map(|p| Vec2::new(p.y, p.x)).collect();
    polyline_crossings_at_y(&swapped, x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cubic_bezier_endpunkte_und_gerade() {
        let p0 = Vec2::new(0.0, 0.0);
        let p3 = Vec2::new(9.0, 0.0);
        let mid = cubic_bezier(p0, Vec2::new(3.0, 0.0), Vec2::new(6.0, 0.0), p3, 0.5);
        assert!((cubic_bezier(p0, p0, p3, p3, 0.0) - p0).length() < 1e-6);
        assert!((cubic_bezier(p0, p0, p3, p3, 1.0) - p3).length() < 1e-6);
        assert!((mid - Vec2::new(4.5, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_trace_x_auf_schraeger_linie() {
        let a = Vec3::new(0.0, 0.0, 1.0);
        let b = Vec3::new(2.0, 4.0, 1.0);
        let p = trace_x(a, b, 1.0);
        assert!((p - Vec3::new(1.0, 2.0, 1.0)).length() < 1e-6);
        let q = trace_y(a, b, 1.0);
        assert!((q - Vec3::new(0.5, 1.0, 1.0)).length() < 1e-6);
    }

    #[test]
    fn test_polyline_schnitte_einer_wanne() {
        // U-Form: zwei Schnitte auf halber Höhe
        let pts = [
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 4.0),
            Vec2::new(8.0, 4.0),
            Vec2::new(10.0, 0.0),
        ];
        let xs = polyline_crossings_at_y(&pts, 2.0);
        assert_eq!(xs.len(), 2);
        assert!((xs[0] - 1.0).abs() < 1e-5);
        assert!((xs[1] - 9.0).abs() < 1e-5);

        let ys = polyline_crossings_at_x(&pts, 5.0);
        assert_eq!(ys.len(), 1);
        assert!((ys[0] - 4.0).abs() < 1e-5);
    }
}
