//! Wandsegmente entlang des Rechtecks zwischen Strich-Ursprung und -Ende.

use glam::Vec3;
use indexmap::IndexMap;

use crate::core::identifiers::WallSegmentKey;
use crate::core::vertex::{generate_cube, MeshData};

/// Ein Segment: Schlüssel + Quader-Mesh.
pub type WallSegment = (WallSegmentKey, MeshData);

/// Erzeugt die Umrandung des Strich-Rechtecks als Wandsegmente.
///
/// Ein Segment pro Rasterschritt, mittig auf der Gitterlinie, `thickness`
/// dick und `height` hoch. Doppelte Segmente (Strich ohne Ausdehnung in
/// einer Achse) werden nur einmal geliefert.
pub fn stroke_wall_segments(
    origin: Vec3,
    end: Vec3,
    grid: f32,
    thickness: f32,
    height: f32,
) -> Vec<WallSegment> {
    let steps_z = ((end.z - origin.z) / grid).round() as i32;
    let steps_x = ((end.x - origin.x) / grid).round() as i32;
    let (dir_z, dir_x) = (steps_z.signum() as f32, steps_x.signum() as f32);
    let half = thickness * 0.5;
    let y = origin.y;

    let mut segments: IndexMap<WallSegmentKey, MeshData> = IndexMap::new();

    // Wände entlang Z an beiden X-Kanten
    for x in [origin.x, end.x] {
        for i in 0..steps_z.abs() {
            let a = Vec3::new(x, y, origin.z + grid * i as f32 * dir_z);
            let b = Vec3::new(x, y, a.z + grid * dir_z);
            let min_z = a.z.min(b.z);
            segments.entry(WallSegmentKey::new(a, b)).or_insert_with(|| {
                generate_cube(Vec3::new(x - half, y, min_z), thickness, height, grid)
            });
        }
    }

    // Wände entlang X an beiden Z-Kanten
    for z in [origin.z, end.z] {
        for i in 0..steps_x.abs() {
            let a = Vec3::new(origin.x + grid * i as f32 * dir_x, y, z);
            let b = Vec3::new(a.x + grid * dir_x, y, z);
            let min_x = a.x.min(b.x);
            segments.entry(WallSegmentKey::new(a, b)).or_insert_with(|| {
                generate_cube(Vec3::new(min_x, y, z - half), grid, height, thickness)
            });
        }
    }

    segments.into_iter().collect()
}
