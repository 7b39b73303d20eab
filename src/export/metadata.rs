//! JSON description of an atlas layout.

use crate::atlas::FinalizedAtlas;
use crate::error::Result;
use crate::types::{FaceId, Texcoord};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything a consumer needs besides the raster to texture the mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtlasMetadata {
    pub size: u32,
    pub padding: u32,
    /// Image file the layout refers to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub faces: Vec<FaceId>,
    pub texcoords: Vec<Texcoord>,
    pub texcoord_ids: Vec<usize>,
}

impl AtlasMetadata {
    pub fn from_atlas(atlas: &FinalizedAtlas) -> Self {
        Self {
            size: atlas.size(),
            padding: atlas.padding(),
            image: None,
            faces: atlas.faces().to_vec(),
            texcoords: atlas.texcoords().to_vec(),
            texcoord_ids: atlas.texcoord_ids().to_vec(),
        }
    }

    /// Reference the image file the atlas raster is stored in.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::TextureAtlas;

    #[test]
    fn test_metadata_file() {
        let atlas: TextureAtlas = TextureAtlas::new(256);
        let metadata = AtlasMetadata::from_atlas(&atlas.finalize()).with_image("atlas.png");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("atlas.json");
        metadata.save(&path).unwrap();

        let json = std::fs::read_to_string(&path).unwrap();
        assert!(json.contains("\"image\": \"atlas.png\""));
        let loaded = AtlasMetadata::from_json(&json).unwrap();
        assert_eq!(loaded.size, 256);
        assert_eq!(loaded.padding, 2);
        assert_eq!(loaded.image.as_deref(), Some("atlas.png"));
    }
}
