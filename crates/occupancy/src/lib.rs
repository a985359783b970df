//! Tile occupancy and z-layer collision engine.
//!
//! Objects of any rectangular size are placed on a fixed tile grid. Each
//! object sits on a [`ZLayer`] band, and [`CollisionPolicy`] decides which
//! bands may share a tile. [`SpatialEngine`] owns the canonical
//! [`ObjectRegistry`] together with the derived [`OccupancyLedger`] and keeps
//! them in agreement across place, move, remove, clear, and resize.
//!
//! Apps that drive the engine through the ECS add [`OccupancyPlugin`] and push
//! [`PlacementAction`]s onto the [`ActionQueue`].

pub mod actions;
pub mod collision;
pub mod config;
pub mod coords;
pub mod engine;
pub mod error;
pub mod invariants;
pub mod layers;
pub mod ledger;
pub mod registry;

pub use actions::{
    ActionQueue, ActionResult, ObjectsEvicted, OccupancyPlugin, OccupancySet, PlacementAction,
    PlacementResultLog, ResultLogEntry,
};
pub use collision::CollisionPolicy;
pub use config::GridConfig;
pub use coords::{CoordinateTransform, GridPosition, ObjectSize};
pub use engine::{EngineStats, GridSize, SpatialEngine};
pub use error::{GridConfigError, PlacementError};
pub use layers::{ObjectCategory, ZLayer};
pub use ledger::{OccupancyEntry, OccupancyLedger};
pub use registry::{ObjectId, ObjectRecord, ObjectRegistry};
