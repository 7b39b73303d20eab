//! Texture coordinate deduplication.

use crate::types::Texcoord;
use std::collections::HashMap;

/// Bit pattern key for exact coordinate equality. `-0.0` and `0.0` compare
/// equal and therefore share a key.
fn key(texcoord: Texcoord) -> (u32, u32) {
    let canonical = |v: f32| if v == 0.0 { 0.0f32 } else { v };
    (canonical(texcoord.x).to_bits(), canonical(texcoord.y).to_bits())
}

/// Split per-face-vertex texture coordinates into a table of unique values
/// (in order of first occurrence) and one index per input entry.
///
/// Coordinates are merged on exact equality only.
pub fn merge_texcoords(texcoords: &[Texcoord]) -> (Vec<Texcoord>, Vec<usize>) {
    let mut unique = Vec::new();
    let mut ids = Vec::with_capacity(texcoords.len());
    let mut lookup: HashMap<(u32, u32), usize> = HashMap::new();

    for &texcoord in texcoords {
        let id = *lookup.entry(key(texcoord)).or_insert_with(|| {
            unique.push(texcoord);
            unique.len() - 1
        });
        ids.push(id);
    }

    (unique, ids)
}

/// Rebuild the per-face-vertex sequence from a merged table.
pub fn expand_texcoords(unique: &[Texcoord], ids: &[usize]) -> Vec<Texcoord> {
    ids.iter().map(|&id| unique[id]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_merge_shared_corners() {
        // Two triangles sharing an edge
        let texcoords = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(0.5, 0.0),
            Vec2::new(0.0, 0.5),
            Vec2::new(0.5, 0.0),
            Vec2::new(0.5, 0.5),
            Vec2::new(0.0, 0.5),
        ];

        let (unique, ids) = merge_texcoords(&texcoords);

        assert_eq!(unique.len(), 4);
        assert_eq!(ids, vec![0, 1, 2, 1, 3, 2]);
        assert_eq!(expand_texcoords(&unique, &ids), texcoords);
    }

    #[test]
    fn test_merge_properties() {
        let texcoords: Vec<Texcoord> = (0..300)
            .map(|i| Vec2::new((i % 7) as f32 / 7.0, (i % 5) as f32 / 5.0))
            .collect();

        let (unique, ids) = merge_texcoords(&texcoords);

        assert_eq!(unique.len(), 35);
        assert_eq!(ids.len(), texcoords.len());
        assert!(ids.iter().all(|&id| id < unique.len()));
        assert_eq!(expand_texcoords(&unique, &ids), texcoords);
    }

    #[test]
    fn test_exact_equality_only() {
        let a = Vec2::new(0.1, 0.2);
        let b = Vec2::new(0.1 + f32::EPSILON, 0.2);
        let (unique, ids) = merge_texcoords(&[a, b, a]);
        assert_eq!(unique.len(), 2);
        assert_eq!(ids, vec![0, 1, 0]);
    }

    #[test]
    fn test_signed_zero_merged() {
        let (unique, ids) = merge_texcoords(&[Vec2::new(0.0, 1.0), Vec2::new(-0.0, 1.0)]);
        assert_eq!(unique.len(), 1);
        assert_eq!(ids, vec![0, 0]);
    }

    #[test]
    fn test_empty() {
        let (unique, ids) = merge_texcoords(&[]);
        assert!(unique.is_empty());
        assert!(ids.is_empty());
    }
}
