//! Bézier-Kontrollgriff: Zentrum, Drehwinkel und zwei Tangentenlängen.
//!
//! Ein Griff speichert nur Winkel und Längen; die Tangentenpunkte werden
//! abgeleitet (`prev = center + dir(angle) * prev_length`,
//! `next = center + dir(angle + π) * next_length`). Dadurch bleiben beide
//! Tangenten immer kollinear.

use std::f32::consts::PI;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Einschränkung, wie ein Griff bewegt werden darf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HandleMovementRestriction {
    #[default]
    Free,
    /// Tangentengriffe dürfen die X-Koordinate des Zentrums nicht überqueren.
    Vertical,
    /// Tangentengriffe dürfen die Y-Koordinate des Zentrums nicht überqueren.
    Horizontal,
    /// `Vertical` und `Horizontal` zugleich.
    Quadrant,
    /// Zentrum nur entlang X, Tangenten nur entlang Y.
    NoRotationOnX,
    /// Zentrum nur entlang Y, Tangenten nur entlang X.
    NoRotationOnY,
}

impl HandleMovementRestriction {
    fn locks_x_crossing(self) -> bool {
        matches!(self, Self::Vertical | Self::Quadrant)
    }

    fn locks_y_crossing(self) -> bool {
        matches!(self, Self::Horizontal | Self::Quadrant)
    }
}

/// Welcher Teil eines Griffs gezogen wird.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlePart {
    Center,
    Prev,
    Next,
}

/// Kontrollgriff einer Bézier-Kurve (Pixelraum).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveHandle {
    pub center: Vec2,
    pub angle: f32,
    pub prev_length: f32,
    pub next_length: f32,
    pub restriction: HandleMovementRestriction,
    /// Griff ist zu sich selbst symmetrisch (Mittelgriff): beide Tangenten gleich lang.
    pub public_symmetry: bool,
}

/// Einheitsvektor zum Winkel `angle`.
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

impl CurveHandle {
    pub fn new(center: Vec2, angle: f32, prev_length: f32, next_length: f32) -> Self {
        Self {
            center,
            angle,
            prev_length,
            next_length,
            restriction: HandleMovementRestriction::Free,
            public_symmetry: false,
        }
    }

    /// Baut einen Griff aus absoluten Tangentenpunkten.
    ///
    /// Der Winkel wird aus der `prev`-Tangente abgeleitet; ist diese
    /// entartet, aus der `next`-Tangente.
    pub fn from_points(center: Vec2, prev: Vec2, next: Vec2) -> Self {
        let prev_off = prev - center;
        let next_off = next - center;
        let angle = if prev_off.length_squared() > f32::EPSILON {
            prev_off.y.atan2(prev_off.x)
        } else if next_off.length_squared() > f32::EPSILON {
            next_off.y.atan2(next_off.x) - PI
        } else {
            0.0
        };
        Self::new(center, angle, prev_off.length(), next_off.length())
    }

    pub fn prev_pos(&self) -> Vec2 {
        self.center + direction(self.angle) * self.prev_length
    }

    pub fn next_pos(&self) -> Vec2 {
        self.center + direction(self.angle + PI) * self.next_length
    }

    /// Position eines Griffteils.
    pub fn part_pos(&self, part: HandlePart) -> Vec2 {
        match part {
            HandlePart::Center => self.center,
            HandlePart::Prev => self.prev_pos(),
            HandlePart::Next => self.next_pos(),
        }
    }

    /// Verschiebt das Zentrum unter Beachtung der Einschränkung.
    /// Die Tangenten wandern mit.
    pub fn translate_center(&mut self, delta: Vec2) {
        let mut d = delta;
        match self.restriction {
            HandleMovementRestriction::NoRotationOnX => d.y = 0.0,
            HandleMovementRestriction::NoRotationOnY => d.x = 0.0,
            _ => {}
        }
        self.center += d;
    }

    /// Zieht einen Tangentengriff um `delta`.
    ///
    /// Die Gegentangente behält ihre Länge und folgt dem Winkel (balanciert).
    /// Bei `public_symmetry` übernimmt sie zusätzlich die neue Länge.
    pub fn move_tangent(&mut self, part: HandlePart, delta: Vec2, min_dist: f32) {
        debug_assert!(part != HandlePart::Center, "move_tangent mit Center aufgerufen");
        let old = self.part_pos(part);
        let mut target = old + delta;

        match self.restriction {
            HandleMovementRestriction::NoRotationOnX => target.x = self.center.x,
            HandleMovementRestriction::NoRotationOnY => target.y = self.center.y,
            _ => {}
        }
        if self.restriction.locks_x_crossing() {
            target.x = clamp_same_side(old.x, target.x, self.center.x);
        }
        if self.restriction.locks_y_crossing() {
            target.y = clamp_same_side(old.y, target.y, self.center.y);
        }

        let mut offset = target - self.center;
        if offset.length_squared() <= f32::EPSILON {
            // Entartet: Richtung der bisherigen Tangente beibehalten
            offset = old - self.center;
            if offset.length_squared() <= f32::EPSILON {
                return;
            }
        }
        let length = offset.length().max(min_dist);
        let offset_angle = offset.y.atan2(offset.x);

        match part {
            HandlePart::Prev => {
                self.angle = offset_angle;
                self.prev_length = length;
                if self.public_symmetry {
                    self.next_length = length;
                }
            }
            HandlePart::Next => {
                self.angle = offset_angle - PI;
                self.next_length = length;
                if self.public_symmetry {
                    self.prev_length = length;
                }
            }
            HandlePart::Center => {}
        }
    }

    /// Wendet eine Zieh-Bewegung auf den angegebenen Teil an.
    pub fn apply_drag(&mut self, part: HandlePart, delta: Vec2, min_dist: f32) {
        match part {
            HandlePart::Center => self.translate_center(delta),
            HandlePart::Prev | HandlePart::Next => self.move_tangent(part, delta, min_dist),
        }
    }
}

/// Hält `target` auf derselben Seite von `pivot` wie `old`.
fn clamp_same_side(old: f32, target: f32, pivot: f32) -> f32 {
    let side = old - pivot;
    if side > 0.0 && target < pivot || side < 0.0 && target > pivot {
        pivot
    } else {
        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_tangentenpunkte_sind_kollinear() {
        let h = CurveHandle::new(Vec2::new(10.0, 10.0), 0.0, 5.0, 7.0);
        assert!((h.prev_pos() - Vec2::new(15.0, 10.0)).length() < EPS);
        assert!((h.next_pos() - Vec2::new(3.0, 10.0)).length() < EPS);
    }

    #[test]
    fn test_from_points_stellt_griff_wieder_her() {
        let h = CurveHandle::new(Vec2::new(1.0, 2.0), 0.7, 30.0, 40.0);
        let rebuilt = CurveHandle::from_points(h.center, h.prev_pos(), h.next_pos());
        assert!((rebuilt.prev_pos() - h.prev_pos()).length() < EPS);
        assert!((rebuilt.next_pos() - h.next_pos()).length() < EPS);
    }

    #[test]
    fn test_balancierte_tangente_folgt_winkel() {
        let mut h = CurveHandle::new(Vec2::ZERO, 0.0, 50.0, 30.0);
        // prev von (50,0) nach (0,50) ziehen
        h.move_tangent(HandlePart::Prev, Vec2::new(-50.0, 50.0), 20.0);
        assert!((h.prev_pos() - Vec2::new(0.0, 50.0)).length() < EPS);
        // next bleibt 30 lang und zeigt entgegengesetzt
        assert!((h.next_pos() - Vec2::new(0.0, -30.0)).length() < EPS);
    }

    #[test]
    fn test_mindestabstand_der_tangente() {
        let mut h = CurveHandle::new(Vec2::ZERO, 0.0, 50.0, 50.0);
        h.move_tangent(HandlePart::Prev, Vec2::new(-45.0, 0.0), 20.0);
        assert!((h.prev_length - 20.0).abs() < EPS);
    }

    #[test]
    fn test_no_rotation_on_x_sperrt_achsen() {
        let mut h = CurveHandle::new(Vec2::new(0.0, 50.0), -PI / 2.0, 40.0, 40.0);
        h.restriction = HandleMovementRestriction::NoRotationOnX;
        h.public_symmetry = true;

        h.translate_center(Vec2::new(5.0, 9.0));
        assert!((h.center - Vec2::new(5.0, 50.0)).length() < EPS);

        // Tangente seitlich ziehen: nur Y-Anteil wirkt, Tangente bleibt senkrecht
        h.move_tangent(HandlePart::Prev, Vec2::new(30.0, -20.0), 20.0);
        assert!((h.prev_pos().x - h.center.x).abs() < EPS);
        assert!((h.prev_length - 60.0).abs() < EPS);
        assert!((h.next_length - 60.0).abs() < EPS);
    }

    #[test]
    fn test_vertical_verhindert_ueberqueren_der_mitte() {
        let mut h = CurveHandle::new(Vec2::ZERO, 0.0, 50.0, 50.0);
        h.restriction = HandleMovementRestriction::Vertical;
        h.move_tangent(HandlePart::Prev, Vec2::new(-80.0, 40.0), 20.0);
        assert!(h.prev_pos().x >= -EPS);
        assert!((h.prev_pos() - Vec2::new(0.0, 40.0)).length() < EPS);
    }
}
