use serde::{Deserialize, Serialize};

use crate::error::GridConfigError;

pub const DEFAULT_TILE_SIZE: u32 = 48;
pub const DEFAULT_GRID_WIDTH: i32 = 20;
pub const DEFAULT_GRID_HEIGHT: i32 = 15;

/// Number of `(action, result)` pairs kept by [`crate::actions::PlacementResultLog`].
pub const MAX_RESULT_LOG_ENTRIES: usize = 64;

/// The ledger audit runs once every this many `FixedUpdate` ticks.
pub const AUDIT_INTERVAL_TICKS: u32 = 100;

/// Grid geometry the engine is built with: pixels per tile side and the grid
/// extents in tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    pub tile_size: u32,
    pub width: i32,
    pub height: i32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
        }
    }
}

impl GridConfig {
    pub fn new(tile_size: u32, width: i32, height: i32) -> Self {
        Self {
            tile_size,
            width,
            height,
        }
    }

    /// Reject geometry that can only come from a programming error.
    pub fn validate(&self) -> Result<(), GridConfigError> {
        if self.tile_size == 0 {
            return Err(GridConfigError::ZeroTileSize);
        }
        if self.width <= 0 {
            return Err(GridConfigError::NonPositiveWidth(self.width));
        }
        if self.height <= 0 {
            return Err(GridConfigError::NonPositiveHeight(self.height));
        }
        Ok(())
    }

    pub fn tile_count(&self) -> usize {
        self.width.max(0) as usize * self.height.max(0) as usize
    }

    /// World extents in pixels.
    pub fn pixel_extent(&self) -> (f32, f32) {
        (
            self.width as f32 * self.tile_size as f32,
            self.height as f32 * self.tile_size as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GridConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.tile_count(), 300);
        assert_eq!(config.pixel_extent(), (960.0, 720.0));
    }

    #[test]
    fn test_rejects_non_positive_geometry() {
        assert_eq!(
            GridConfig::new(0, 20, 15).validate(),
            Err(GridConfigError::ZeroTileSize)
        );
        assert_eq!(
            GridConfig::new(48, 0, 15).validate(),
            Err(GridConfigError::NonPositiveWidth(0))
        );
        assert_eq!(
            GridConfig::new(48, 20, -1).validate(),
            Err(GridConfigError::NonPositiveHeight(-1))
        );
    }

    #[test]
    fn test_config_json_roundtrip() {
        let config = GridConfig::new(32, 40, 30);
        let json = serde_json::to_string(&config).expect("serialize");
        let back: GridConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, config);
    }

    #[test]
    fn test_tile_size_is_whole_pixels() {
        let fractional = r#"{"tile_size":47.5,"width":20,"height":15}"#;
        assert!(serde_json::from_str::<GridConfig>(fractional).is_err());
        let negative = r#"{"tile_size":-48,"width":20,"height":15}"#;
        assert!(serde_json::from_str::<GridConfig>(negative).is_err());
        let whole: GridConfig =
            serde_json::from_str(r#"{"tile_size":48,"width":20,"height":15}"#).expect("deserialize");
        assert_eq!(whole, GridConfig::default());
    }
}
