//! Spatial-Index (KD-Tree) über die Gitterpunkte eines Decks.
//!
//! Abfragen laufen in der XZ-Ebene; die Deckhöhe steckt im gespeicherten Punkt.

use glam::Vec3;
use kiddo::{KdTree, SquaredEuclidean};

/// Treffer einer Abfrage gegen den Gitterpunkt-Index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMatch {
    /// Index in die Vertex-Liste des Decks
    pub vertex_index: usize,
    /// Gefundener Gitterpunkt
    pub position: Vec3,
    /// Euklidische Distanz in XZ
    pub distance: f32,
}

/// Read-only Index über die eindeutigen Zellecken eines Decks.
#[derive(Debug, Clone)]
pub struct DeckVertexIndex {
    tree: KdTree<f64, 2>,
    vertices: Vec<Vec3>,
}

fn xz(p: Vec3) -> [f64; 2] {
    [p.x as f64, p.z as f64]
}

impl DeckVertexIndex {
    /// Baut den Index aus den Deck-Vertices (Reihenfolge bleibt als Index erhalten).
    pub fn from_vertices(vertices: &[Vec3]) -> Self {
        let entries: Vec<[f64; 2]> = vertices.iter().map(|&v| xz(v)).collect();
        let tree: KdTree<f64, 2> = (&entries).into();
        Self {
            tree,
            vertices: vertices.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    fn to_match(&self, item: u64, distance_sq: f64) -> Option<GridMatch> {
        let vertex_index = item as usize;
        let position = *self.vertices.get(vertex_index)?;
        Some(GridMatch {
            vertex_index,
            position,
            distance: (distance_sq as f32).sqrt(),
        })
    }

    /// Nächster Gitterpunkt zur Weltposition (Y wird ignoriert).
    pub fn nearest(&self, query: Vec3) -> Option<GridMatch> {
        if self.is_empty() {
            return None;
        }
        let result = self.tree.nearest_one::<SquaredEuclidean>(&xz(query));
        self.to_match(result.item, result.distance)
    }

    /// Nächster Gitterpunkt, aber nur innerhalb von `max_distance`.
    pub fn snap(&self, query: Vec3, max_distance: f32) -> Option<GridMatch> {
        self.nearest(query).filter(|m| m.distance <= max_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_vertices() -> Vec<Vec3> {
        vec![
            Vec3::new(0.0, -2.0, 0.0),
            Vec3::new(10.0, -2.0, 0.0),
            Vec3::new(4.0, -2.0, 3.0),
        ]
    }

    #[test]
    fn test_nearest_liefert_erwarteten_punkt() {
        let index = DeckVertexIndex::from_vertices(&sample_vertices());
        let nearest = index
            .nearest(Vec3::new(3.9, 100.0, 2.9))
            .expect("Treffer erwartet");

        assert_eq!(nearest.vertex_index, 2);
        assert_eq!(nearest.position, Vec3::new(4.0, -2.0, 3.0));
        assert!(nearest.distance < 0.2);
    }

    #[test]
    fn test_snap_respektiert_maximalabstand() {
        let index = DeckVertexIndex::from_vertices(&sample_vertices());
        assert!(index.snap(Vec3::new(5.0, 0.0, 0.0), 1.0).is_none());
        assert_eq!(
            index.snap(Vec3::new(9.5, 0.0, 0.0), 1.0).map(|m| m.vertex_index),
            Some(1)
        );
    }

    #[test]
    fn test_leerer_index() {
        let index = DeckVertexIndex::from_vertices(&[]);
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert!(index.nearest(Vec3::ZERO).is_none());
        assert!(index.snap(Vec3::ZERO, 1.0).is_none());
    }
}
