//! Vertex-Layout und Mesh-Primitive (Würfel, flaches Quad).
//!
//! `Vertex` ist `Pod`, damit hochgeladene Snapshots ohne Kopie als Bytes an
//! einen externen Renderer weitergereicht werden können.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Vertex mit Position, Normale und Texturkoordinate.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vertex {
    #[serde(rename = "Position")]
    pub position: Vec3,
    #[serde(rename = "Normal")]
    pub normal: Vec3,
    #[serde(rename = "TextureCoordinate")]
    pub tex_coord: Vec2,
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3, tex_coord: Vec2) -> Self {
        Self {
            position,
            normal,
            tex_coord,
        }
    }
}

/// Indiziertes Dreiecksnetz: Indizes + Vertices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshData {
    pub indices: Vec<u32>,
    pub vertices: Vec<Vertex>,
}

impl MeshData {
    pub fn new(indices: Vec<u32>, vertices: Vec<Vertex>) -> Self {
        Self { indices, vertices }
    }

    /// Anzahl Dreiecke.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Windung eines Quads mit Vertex-Reihenfolge (min, +X, +X+Z, +Z).
pub const QUAD_WINDING: [u32; 6] = [0, 2, 1, 0, 3, 2];

/// Texturkoordinaten eines Quads in Vertex-Reihenfolge.
pub const QUAD_TEX_COORDS: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 1.0),
];

/// Flaches, nach oben zeigendes Quad mit Ursprung `origin` und Ausdehnung in X/Z.
pub fn generate_flat_quad(origin: Vec3, x_size: f32, z_size: f32) -> MeshData {
    let x = Vec3::new(x_size, 0.0, 0.0);
    let z = Vec3::new(0.0, 0.0, z_size);
    let corners = [origin, origin + x, origin + x + z, origin + z];
    let vertices = corners
        .iter()
        .zip(QUAD_TEX_COORDS)
        .map(|(&p, uv)| Vertex::new(p, Vec3::Y, uv))
        .collect();
    MeshData::new(QUAD_WINDING.to_vec(), vertices)
}

/// Quader ohne Boden: 5 Seiten × 4 Vertices, 30 Indizes.
///
/// Seitenreihenfolge: -Z, +X, +Z, -X, Deckel.
pub fn generate_cube(origin: Vec3, x_size: f32, y_size: f32, z_size: f32) -> MeshData {
    let x = Vec3::new(x_size, 0.0, 0.0);
    let y = Vec3::new(0.0, y_size, 0.0);
    let z = Vec3::new(0.0, 0.0, z_size);
    let o = origin;

    let faces: [([Vec3; 4], Vec3); 5] = [
        ([o, o + y, o + x + y, o + x], Vec3::NEG_Z),
        ([o + x, o + x + y, o + x + y + z, o + x + z], Vec3::X),
        ([o + x + z, o + x + y + z, o + y + z, o + z], Vec3::Z),
        ([o + z, o + y + z, o + y, o], Vec3::NEG_X),
        ([o + y, o + x + y, o + x + y + z, o + y + z], Vec3::Y),
    ];

    let mut vertices = Vec::with_capacity(20);
    let mut indices = Vec::with_capacity(30);
    for (face, (corners, normal)) in faces.iter().enumerate() {
        let base = (face * 4) as u32;
        if face == 4 {
            // Deckel mit umgekehrter Windung, damit die Oberseite nach außen zeigt
            indices.extend([0, 3, 2, 2, 1, 0].map(|i| base + i));
        } else {
            indices.extend([0, 1, 2, 2, 3, 0].map(|i| base + i));
        }
        for (p, uv) in corners.iter().zip(QUAD_TEX_COORDS) {
            vertices.push(Vertex::new(*p, *normal, uv));
        }
    }
    MeshData::new(indices, vertices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_ist_32_bytes_ohne_padding() {
        assert_eq!(std::mem::size_of::<Vertex>(), 32);
        let v = [Vertex::new(Vec3::ONE, Vec3::Y, Vec2::ZERO)];
        let bytes: &[u8] = bytemuck::cast_slice(&v);
        assert_eq!(bytes.len(), 32);
    }

    #[test]
    fn test_wuerfel_hat_fuenf_seiten() {
        let cube = generate_cube(Vec3::ZERO, 1.0, 2.0, 0.1);
        assert_eq!(cube.vertices.len(), 20);
        assert_eq!(cube.indices.len(), 30);
        assert_eq!(&cube.indices[24..], &[16, 19, 18, 18, 17, 16]);
        assert!(cube.indices.iter().all(|&i| i < 20));
        let top_y = cube.vertices[16..].iter().map(|v| v.position.y);
        assert!(top_y.clone().all(|y| (y - 2.0).abs() < 1e-6));
    }

    #[test]
    fn test_flaches_quad_zeigt_nach_oben() {
        let quad = generate_flat_quad(Vec3::new(1.0, 0.0, 1.0), 0.5, 0.5);
        assert_eq!(quad.indices, QUAD_WINDING.to_vec());
        assert!(quad.vertices.iter().all(|v| v.normal == Vec3::Y));
        assert_eq!(quad.vertices[2].position, Vec3::new(1.5, 0.0, 1.5));

        // Windung (0,2,1): Normale der Fläche zeigt nach +Y
        let p: Vec<Vec3> = quad.vertices.iter().map(|v| v.position).collect();
        let n = (p[2] - p[0]).cross(p[1] - p[0]);
        assert!(n.y > 0.0);
    }
}
