//! Error types for the occupancy engine.
//!
//! Placement failures are ordinary outcomes and are reported through
//! [`PlacementError`]; only grid misconfiguration ([`GridConfigError`]) is
//! treated as a programming error.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::coords::GridPosition;
use crate::layers::ZLayer;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementError {
    /// Object ids must be non-empty.
    EmptyId,
    /// Some footprint tile falls outside the grid.
    OutOfBounds,
    /// A footprint tile is held by an object on a conflicting layer.
    Collision {
        tile: GridPosition,
        blocking_id: String,
        blocking_layer: ZLayer,
    },
    /// No object with the given id is placed.
    NotFound,
    /// Resize dimensions must both be positive.
    InvalidDimensions { width: i32, height: i32 },
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::EmptyId => write!(f, "object id is empty"),
            PlacementError::OutOfBounds => write!(f, "footprint leaves the grid"),
            PlacementError::Collision {
                tile,
                blocking_id,
                blocking_layer,
            } => write!(
                f,
                "tile ({}, {}) is blocked by '{}' on layer {:?}",
                tile.x, tile.y, blocking_id, blocking_layer
            ),
            PlacementError::NotFound => write!(f, "no such object"),
            PlacementError::InvalidDimensions { width, height } => {
                write!(f, "grid dimensions {}x{} are not positive", width, height)
            }
        }
    }
}

impl std::error::Error for PlacementError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridConfigError {
    ZeroTileSize,
    NonPositiveWidth(i32),
    NonPositiveHeight(i32),
}

impl fmt::Display for GridConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridConfigError::ZeroTileSize => write!(f, "tile size must be at least 1 pixel"),
            GridConfigError::NonPositiveWidth(w) => {
                write!(f, "grid width must be positive, got {}", w)
            }
            GridConfigError::NonPositiveHeight(h) => {
                write!(f, "grid height must be positive, got {}", h)
            }
        }
    }
}

impl std::error::Error for GridConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_message_names_blocker() {
        let err = PlacementError::Collision {
            tile: GridPosition::new(3, 4),
            blocking_id: "v1".to_string(),
            blocking_layer: ZLayer::Vehicles,
        };
        assert_eq!(
            err.to_string(),
            "tile (3, 4) is blocked by 'v1' on layer Vehicles"
        );
    }
}
