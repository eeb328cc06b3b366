//! Kurvensammlung eines Profils (Seite, Draufsicht, Heck).
//!
//! Die Kurven liegen in einer Arena (`Vec<BezierCurve>`); Nachbarn und
//! Symmetriepartner werden über Indizes referenziert. Zieh-Bewegungen werden
//! mit `queue_drag` gesammelt und in `update` angewendet. Erst danach sind
//! Ausdehnung und Bogenlängen-Tabelle wieder gültig.

use anyhow::{bail, ensure};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::curve_handle::{CurveHandle, HandleMovementRestriction, HandlePart};
use crate::shared::geometry::cubic_bezier;
use crate::shared::HANDLE_MIN_DIST;

#[cfg(test)]
mod tests;

// ── Panel & Symmetrie ───────────────────────────────────────────────

/// Welches Profil eine Sammlung beschreibt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PanelKind {
    Side,
    Top,
    Back,
}

/// Spiegelverhalten einer Achse zwischen zwei Partnergriffen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisReflection {
    /// Achse bleibt unabhängig.
    Free,
    /// Partner übernimmt die Koordinate.
    Same,
    /// Partner wird an der gemeinsamen Mittelachse gespiegelt.
    Mirror,
}

/// Symmetrieregel eines Panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymmetryRule {
    pub x: AxisReflection,
    pub y: AxisReflection,
    /// Tangenten des Partners mitspiegeln (Seitenprofil: nein).
    pub mirror_tangents: bool,
}

impl PanelKind {
    pub fn symmetry(self) -> SymmetryRule {
        match self {
            PanelKind::Side => SymmetryRule {
                x: AxisReflection::Free,
                y: AxisReflection::Same,
                mirror_tangents: false,
            },
            PanelKind::Top => SymmetryRule {
                x: AxisReflection::Same,
                y: AxisReflection::Mirror,
                mirror_tangents: true,
            },
            PanelKind::Back => SymmetryRule {
                x: AxisReflection::Mirror,
                y: AxisReflection::Same,
                mirror_tangents: true,
            },
        }
    }
}

// ── Kurven & Konfiguration ──────────────────────────────────────────

/// Ein Knoten der Kurvenkette: Griff + Nachbarn + Symmetriepartner.
#[derive(Debug, Clone, PartialEq)]
pub struct BezierCurve {
    pub handle: CurveHandle,
    pub prev: Option<usize>,
    pub next: Option<usize>,
    pub partner: Option<usize>,
}

/// Griffdaten in Metern (Konfigurationsdatei).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandleConfig {
    pub pos_x: f32,
    pub pos_y: f32,
    pub angle: f32,
    pub prev_length: f32,
    pub next_length: f32,
}

/// Serialisierte Kurvensammlung.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveCollectionConfig {
    /// Zielfläche im Pixelraum: `[x, y, breite, höhe]`.
    #[serde(default = "default_area")]
    pub area: [f32; 4],
    pub num_controllers: usize,
    pub handles: Vec<HandleConfig>,
}

fn default_area() -> [f32; 4] {
    [0.0, 0.0, 500.0, 200.0]
}

/// Griff in Metern, wie er an Geometrie-Generator und Export geht.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BezierInfo {
    pub pos: Vec2,
    pub prev: Vec2,
    pub next: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingDrag {
    curve: usize,
    part: HandlePart,
    delta: Vec2,
}

// ── Sammlung ────────────────────────────────────────────────────────

/// Geordnete Bézier-Kette eines Profils im Pixelraum.
#[derive(Debug, Clone)]
pub struct BezierCurveCollection {
    curves: Vec<BezierCurve>,
    panel: PanelKind,
    pixels_per_meter: f32,
    handle_min_dist: f32,
    min: Vec2,
    max: Vec2,
    max_y_curve: usize,
    pending: Vec<PendingDrag>,
    /// Segmentlängen + Gesamtlänge; `None` = ungültig
    arc_table: Option<(Vec<f32>, f32)>,
}

impl BezierCurveCollection {
    /// Baut eine Sammlung aus einer Meter-Konfiguration und skaliert sie in `config.area`.
    pub fn from_config(config: &CurveCollectionConfig, panel: PanelKind) -> anyhow::Result<Self> {
        ensure!(
            config.handles.len() >= 2,
            "Kurvensammlung {:?} braucht mindestens 2 Griffe, gefunden: {}",
            panel,
            config.handles.len()
        );
        ensure!(
            config.num_controllers == config.handles.len(),
            "num_controllers ({}) passt nicht zur Anzahl Griffe ({})",
            config.num_controllers,
            config.handles.len()
        );
        for (i, h) in config.handles.iter().enumerate() {
            let values = [h.pos_x, h.pos_y, h.angle, h.prev_length, h.next_length];
            if values.iter().any(|v| !v.is_finite()) {
                bail!("Griff {} von {:?} enthält ungültige Werte", i, panel);
            }
        }

        let [area_x, area_y, area_w, area_h] = config.area;
        let max_x = config.handles.iter().fold(0.0f32, |m, h| m.max(h.pos_x));
        let max_y = config.handles.iter().fold(0.0f32, |m, h| m.max(h.pos_y));
        let scale = match (max_x > 0.0, max_y > 0.0) {
            (true, true) => (area_w / max_x).min(area_h / max_y),
            (true, false) => area_w / max_x,
            (false, true) => area_h / max_y,
            (false, false) => bail!("Kurvensammlung {:?} hat keine Ausdehnung", panel),
        };
        let offset = Vec2::new(
            area_x + (area_w - max_x * scale) / 2.0,
            area_y + (area_h - max_y * scale) / 2.0,
        );

        let handles = config
            .handles
            .iter()
            .map(|h| {
                CurveHandle::new(
                    Vec2::new(h.pos_x, h.pos_y) * scale + offset,
                    h.angle,
                    h.prev_length * scale,
                    h.next_length * scale,
                )
            })
            .collect();

        let collection = Self::from_pixel_handles(handles, scale, panel);
        log::debug!(
            "Kurvensammlung {:?} geladen: {} Griffe, {:.2} px/m",
            panel,
            collection.len(),
            scale
        );
        Ok(collection)
    }

    /// Baut eine Sammlung direkt aus Griffen im Pixelraum.
    pub fn from_pixel_handles(
        handles: Vec<CurveHandle>,
        pixels_per_meter: f32,
        panel: PanelKind,
    ) -> Self {
        assert!(handles.len() >= 2, "Kurvensammlung braucht mindestens 2 Griffe");
        let n = handles.len();
        let curves = handles
            .into_iter()
            .enumerate()
            .map(|(i, handle)| BezierCurve {
                handle,
                prev: i.checked_sub(1),
                next: (i + 1 < n).then_some(i + 1),
                partner: None,
            })
            .collect();

        let mut collection = Self {
            curves,
            panel,
            pixels_per_meter,
            handle_min_dist: HANDLE_MIN_DIST,
            min: Vec2::ZERO,
            max: Vec2::ZERO,
            max_y_curve: 0,
            pending: Vec::new(),
            arc_table: None,
        };
        collection.setup_symmetry();
        collection.recompute_extents();
        collection
    }

    /// Setzt den minimalen Tangentenabstand (Pixel).
    pub fn with_handle_min_dist(mut self, min_dist: f32) -> Self {
        self.handle_min_dist = min_dist;
        self
    }

    fn setup_symmetry(&mut self) {
        use HandleMovementRestriction as R;
        let n = self.curves.len();
        let last = n - 1;
        match self.panel {
            PanelKind::Side => {
                for c in &mut self.curves {
                    c.handle.restriction = R::Vertical;
                }
                self.curves[0].handle.restriction = R::Quadrant;
                self.curves[last].handle.restriction = R::Quadrant;
                self.curves[0].partner = Some(last);
                self.curves[last].partner = Some(0);
            }
            PanelKind::Top | PanelKind::Back => {
                for i in 0..n / 2 {
                    self.curves[i].partner = Some(last - i);
                    self.curves[last - i].partner = Some(i);
                    self.curves[i].handle.restriction = R::Vertical;
                    self.curves[last - i].handle.restriction = R::Vertical;
                }
                if n % 2 == 1 {
                    let mid = &mut self.curves[n / 2].handle;
                    mid.public_symmetry = true;
                    mid.restriction = if self.panel == PanelKind::Top {
                        R::NoRotationOnX
                    } else {
                        R::NoRotationOnY
                    };
                }
                if self.panel == PanelKind::Back {
                    self.curves[0].handle.restriction = R::Quadrant;
                    self.curves[last].handle.restriction = R::Quadrant;
                }
            }
        }
    }

    // ── Abfragen ────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    pub fn panel(&self) -> PanelKind {
        self.panel
    }

    pub fn curves(&self) -> &[BezierCurve] {
        &self.curves
    }

    pub fn curve(&self, index: usize) -> Option<&BezierCurve> {
        self.curves.get(index)
    }

    pub fn pixels_per_meter(&self) -> f32 {
        self.pixels_per_meter
    }

    /// Minimal-Ecke der Griffzentren (Pixel).
    pub fn min(&self) -> Vec2 {
        self.min
    }

    /// Maximal-Ecke der Griffzentren (Pixel).
    pub fn max(&self) -> Vec2 {
        self.max
    }

    /// Index der Kurve mit dem größten Y (tiefster Punkt).
    pub fn max_y_curve(&self) -> usize {
        self.max_y_curve
    }

    /// Ausdehnung der Griffzentren in Metern.
    pub fn extent_meters(&self) -> Vec2 {
        (self.max - self.min) / self.pixels_per_meter
    }

    pub fn has_pending_edits(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn to_meters(&self, point: Vec2) -> Vec2 {
        (point - self.min) / self.pixels_per_meter
    }

    pub fn to_pixels(&self, point: Vec2) -> Vec2 {
        point * self.pixels_per_meter + self.min
    }

    /// Griffe in Metern, optional achsweise skaliert.
    pub fn controller_info(&self, scale_x: f32, scale_y: f32) -> Vec<BezierInfo> {
        let scale = Vec2::new(scale_x, scale_y);
        self.curves
            .iter()
            .map(|c| BezierInfo {
                pos: self.to_meters(c.handle.center) * scale,
                prev: self.to_meters(c.handle.prev_pos()) * scale,
                next: self.to_meters(c.handle.next_pos()) * scale,
            })
            .collect()
    }

    /// Serialisierbare Konfiguration in Metern (Gegenstück zu `from_config`).
    pub fn to_config(&self) -> CurveCollectionConfig {
        let handles: Vec<HandleConfig> = self
            .curves
            .iter()
            .map(|c| {
                let pos = self.to_meters(c.handle.center);
                HandleConfig {
                    pos_x: pos.x,
                    pos_y: pos.y,
                    angle: c.handle.angle,
                    prev_length: c.handle.prev_length / self.pixels_per_meter,
                    next_length: c.handle.next_length / self.pixels_per_meter,
                }
            })
            .collect();
        let size = self.max - self.min;
        CurveCollectionConfig {
            area: [self.min.x, self.min.y, size.x, size.y],
            num_controllers: handles.len(),
            handles,
        }
    }

    // ── Bearbeitung ─────────────────────────────────────────────────

    /// Merkt eine Zieh-Bewegung für das nächste `update` vor.
    pub fn queue_drag(&mut self, curve: usize, part: HandlePart, delta: Vec2) -> bool {
        if curve >= self.curves.len() {
            log::warn!("queue_drag auf unbekannte Kurve {} ignoriert", curve);
            return false;
        }
        self.pending.push(PendingDrag { curve, part, delta });
        true
    }

    /// Wendet alle vorgemerkten Bewegungen an und erneuert die abgeleiteten Werte.
    pub fn update(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        for drag in &pending {
            self.apply_drag(drag.curve, drag.part, drag.delta);
        }
        self.recompute_extents();
        self.arc_table = None;
    }

    /// Bewegt einen Griffteil sofort und zieht den Symmetriepartner nach.
    ///
    /// Extents und Bogenlängen werden erst mit `update` erneuert.
    pub fn apply_drag(&mut self, curve: usize, part: HandlePart, delta: Vec2) {
        let Some(partner) = self.curves.get(curve).map(|c| c.partner) else {
            return;
        };
        let axis = partner
            .map(|p| (self.curves[curve].handle.center + self.curves[p].handle.center) * 0.5);

        let min_dist = self.handle_min_dist;
        self.curves[curve].handle.apply_drag(part, delta, min_dist);

        if let (Some(p), Some(axis)) = (partner, axis) {
            if p != curve {
                self.propagate_symmetry(curve, p, axis);
            }
        }
        self.arc_table = None;
    }

    fn propagate_symmetry(&mut self, source: usize, target: usize, axis: Vec2) {
        let rule = self.panel.symmetry();
        let src = self.curves[source].handle;
        let dst = &mut self.curves[target].handle;

        let reflect = |value: f32, axis: f32, mode: AxisReflection, current: f32| match mode {
            AxisReflection::Free => current,
            AxisReflection::Same => value,
            AxisReflection::Mirror => 2.0 * axis - value,
        };
        dst.center.x = reflect(src.center.x, axis.x, rule.x, dst.center.x);
        dst.center.y = reflect(src.center.y, axis.y, rule.y, dst.center.y);

        if rule.mirror_tangents {
            // Die Kette läuft beim Partner rückwärts: prev ↔ next
            let flip = Vec2::new(
                if rule.x == AxisReflection::Mirror { -1.0 } else { 1.0 },
                if rule.y == AxisReflection::Mirror { -1.0 } else { 1.0 },
            );
            let prev_offset = (src.next_pos() - src.center) * flip;
            dst.angle = prev_offset.y.atan2(prev_offset.x);
            dst.prev_length = src.next_length;
            dst.next_length = src.prev_length;
            if prev_offset.length_squared() <= f32::EPSILON {
                let next_offset = (src.prev_pos() - src.center) * flip;
                dst.angle = next_offset.y.atan2(next_offset.x) - std::f32::consts::PI;
            }
        }
    }

    fn recompute_extents(&mut self) {
        let first = self.curves[0].handle.center;
        let mut min = first;
        let mut max = first;
        let mut max_y_curve = 0;
        for (i, c) in self.curves.iter().enumerate() {
            let p = c.handle.center;
            min = min.min(p);
            if p.x > max.x {
                max.x = p.x;
            }
            if p.y > max.y {
                max.y = p.y;
                max_y_curve = i;
            }
        }
        self.min = min;
        self.max = max;
        self.max_y_curve = max_y_curve;
    }

    // ── Parametrisierung ────────────────────────────────────────────

    fn segment_length(&self, i: usize) -> f32 {
        let a = &self.curves[i].handle;
        let b = &self.curves[i + 1].handle;
        let tangents = a.next_length + b.prev_length;
        if tangents > f32::EPSILON {
            tangents
        } else {
            a.center.distance(b.center)
        }
    }

    fn build_arc_table(&self) -> (Vec<f32>, f32) {
        let lengths: Vec<f32> = (0..self.curves.len() - 1)
            .map(|i| self.segment_length(i))
            .collect();
        let total = lengths.iter().sum();
        (lengths, total)
    }

    /// Punkt bei Bogenlängen-Parameter `t` (0..1) in Metern.
    ///
    /// Die Segmentlänge wird über die Tangentenlängen angenähert.
    pub fn get_parameterized_point(&mut self, t: f32, regenerate_cache: bool) -> Vec2 {
        debug_assert!(
            self.pending.is_empty(),
            "get_parameterized_point mit ausstehenden Griff-Änderungen"
        );
        if regenerate_cache || self.arc_table.is_none() {
            self.arc_table = Some(self.build_arc_table());
        }
        let (segment, local_t) = match &self.arc_table {
            Some((lengths, total)) => locate_segment(lengths, *total, t),
            None => (0, 0.0),
        };
        self.to_meters(self.evaluate_segment(segment, local_t))
    }

    /// Wie `get_parameterized_point`, ohne den Cache zu berühren.
    pub fn parameterized_point(&self, t: f32) -> Vec2 {
        let fresh;
        let (lengths, total) = match &self.arc_table {
            Some((l, tot)) => (l.as_slice(), *tot),
            None => {
                fresh = self.build_arc_table();
                (fresh.0.as_slice(), fresh.1)
            }
        };
        let (segment, local_t) = locate_segment(lengths, total, t);
        self.to_meters(self.evaluate_segment(segment, local_t))
    }

    fn evaluate_segment(&self, segment: usize, t: f32) -> Vec2 {
        let a = &self.curves[segment].handle;
        let b = &self.curves[segment + 1].handle;
        cubic_bezier(a.center, a.next_pos(), b.prev_pos(), b.center, t)
    }

    /// `samples` gleichverteilte Punkte (Bogenlänge) in Metern, inklusive Endpunkte.
    pub fn sample_polyline(&self, samples: usize) -> Vec<Vec2> {
        let samples = samples.max(2);
        let (lengths, total) = self.build_arc_table();
        (0..samples)
            .map(|i| {
                let t = i as f32 / (samples - 1) as f32;
                let (segment, local_t) = locate_segment(&lengths, total, t);
                self.to_meters(self.evaluate_segment(segment, local_t))
            })
            .collect()
    }
}

/// Sucht das Segment zu `t` und den lokalen Parameter darin.
fn locate_segment(lengths: &[f32], total: f32, t: f32) -> (usize, f32) {
    let mut remaining = total * t;
    for (i, &len) in lengths.iter().enumerate() {
        if remaining - len < 0.0 {
            let local = if len > f32::EPSILON { remaining / len } else { 0.0 };
            return (i, local.max(0.0));
        }
        remaining -= len;
    }
    (lengths.len().saturating_sub(1), 1.0)
}
