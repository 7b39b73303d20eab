//! Raw atlas data export for custom consumers.

use crate::atlas::FinalizedAtlas;
use crate::types::FaceId;

/// Raw atlas data for custom use.
#[derive(Debug)]
pub struct RawAtlasData {
    /// Faces textured by the atlas.
    pub faces: Vec<FaceId>,
    /// Unique texture coordinates (2 floats each).
    pub texcoords: Vec<[f32; 2]>,
    /// Texture coordinate index per face vertex (3 per face).
    pub texcoord_ids: Vec<u32>,
    /// Texture atlas RGB data.
    pub texture_rgb: Vec<u8>,
    /// Texture atlas width and height.
    pub texture_size: u32,
}

/// Export an atlas as raw data.
pub fn export_raw(atlas: &FinalizedAtlas) -> RawAtlasData {
    RawAtlasData {
        faces: atlas.faces().to_vec(),
        texcoords: atlas.texcoords().iter().map(|tc| tc.to_array()).collect(),
        texcoord_ids: atlas.texcoord_ids().iter().map(|&id| id as u32).collect(),
        texture_rgb: atlas.image().as_raw().clone(),
        texture_size: atlas.size(),
    }
}

impl RawAtlasData {
    /// Get texture coordinates as a flat array.
    pub fn texcoords_flat(&self) -> Vec<f32> {
        self.texcoords.iter().flat_map(|tc| tc.iter().copied()).collect()
    }

    /// Get the texture coordinate of every face vertex as a flat array.
    pub fn face_texcoords_flat(&self) -> Vec<f32> {
        self.texcoord_ids
            .iter()
            .flat_map(|&id| self.texcoords[id as usize].iter().copied())
            .collect()
    }

    /// Get the number of faces.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Get the number of unique texture coordinates.
    pub fn texcoord_count(&self) -> usize {
        self.texcoords.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::TextureAtlas;
    use crate::luminance::ToneMapping;
    use crate::patch::TexturePatch;
    use glam::Vec2;

    #[test]
    fn test_export_raw() {
        let patch = TexturePatch::fully_valid(
            4,
            4,
            vec![0.2; 4 * 4 * 3],
            vec![10, 11],
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(4.0, 0.0),
                Vec2::new(0.0, 4.0),
                Vec2::new(4.0, 0.0),
                Vec2::new(4.0, 4.0),
                Vec2::new(0.0, 4.0),
            ],
        )
        .unwrap();
        let tone = ToneMapping::new(0.18, 1.0).unwrap();

        let mut atlas: TextureAtlas = TextureAtlas::new(256);
        assert!(atlas.insert(&patch, &tone));
        let atlas = atlas.finalize();

        let raw = export_raw(&atlas);

        assert_eq!(raw.face_count(), 2);
        assert_eq!(raw.texcoord_count(), 4);
        assert_eq!(raw.texcoord_ids, vec![0, 1, 2, 1, 3, 2]);
        assert_eq!(raw.texcoords_flat().len(), 8);
        assert_eq!(raw.face_texcoords_flat().len(), 12);
        assert_eq!(raw.texture_rgb.len(), 256 * 256 * 3);
    }
}
