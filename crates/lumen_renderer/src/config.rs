//! Render settings that live outside the scene file.

use serde::{Deserialize, Serialize};

use crate::{Window, DEFAULT_BUCKET_SIZE};

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Edge length of the square buckets the image is drawn in
    pub bucket_size: u32,
    /// Distance from the eye to the virtual image plane
    pub image_plane_distance: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            bucket_size: DEFAULT_BUCKET_SIZE,
            image_plane_distance: Window::DEFAULT_DISTANCE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RenderConfig::default();
        assert_eq!(config.bucket_size, 64);
        assert_eq!(config.image_plane_distance, 5.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: RenderConfig = serde_json::from_str(r#"{ "bucket_size": 16 }"#).unwrap();
        assert_eq!(config.bucket_size, 16);
        assert_eq!(config.image_plane_distance, 5.0);
    }

    #[test]
    fn test_wrong_field_type_rejected() {
        let result: Result<RenderConfig, _> =
            serde_json::from_str(r#"{ "bucket_size": "large" }"#);
        assert!(result.is_err());
    }
}
