//! `SpatialEngine`: the object registry and occupancy ledger kept in lockstep.
//!
//! Every mutation validates first and only then touches both stores, so a
//! failed `place`/`move` leaves no trace. The boolean operations are thin
//! wrappers over the `try_*` variants, which report why a request failed.

mod lifecycle;
mod queries;

use bevy::prelude::*;

use crate::config::GridConfig;
use crate::coords::{CoordinateTransform, GridPosition, ObjectSize};
use crate::error::{GridConfigError, PlacementError};
use crate::layers::{ObjectCategory, ZLayer};
use crate::ledger::{OccupancyEntry, OccupancyLedger};
use crate::registry::{ObjectId, ObjectRecord, ObjectRegistry};

pub use queries::{EngineStats, GridSize};

#[derive(Resource, Debug, Clone)]
pub struct SpatialEngine {
    transform: CoordinateTransform,
    ledger: OccupancyLedger,
    registry: ObjectRegistry,
}

impl Default for SpatialEngine {
    fn default() -> Self {
        Self::new(GridConfig::default())
    }
}

impl SpatialEngine {
    pub fn try_new(config: GridConfig) -> Result<Self, GridConfigError> {
        config.validate()?;
        Ok(Self {
            transform: CoordinateTransform::new(&config),
            ledger: OccupancyLedger::default(),
            registry: ObjectRegistry::default(),
        })
    }

    /// # Panics
    ///
    /// Panics if `config` has a non-positive tile size or extent.
    pub fn new(config: GridConfig) -> Self {
        match Self::try_new(config) {
            Ok(engine) => engine,
            Err(err) => panic!("invalid grid config {:?}: {}", config, err),
        }
    }

    /// Current geometry, reflecting any resize.
    pub fn config(&self) -> GridConfig {
        GridConfig::new(
            self.transform.tile_size(),
            self.transform.width(),
            self.transform.height(),
        )
    }

    pub fn transform(&self) -> &CoordinateTransform {
        &self.transform
    }

    pub fn ledger(&self) -> &OccupancyLedger {
        &self.ledger
    }

    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    // -----------------------------------------------------------------------
    // Coordinate pass-throughs
    // -----------------------------------------------------------------------

    pub fn pixel_to_grid(&self, px: f32, py: f32) -> GridPosition {
        self.transform.pixel_to_grid(px, py)
    }

    pub fn checked_pixel_to_grid(&self, px: f32, py: f32) -> Option<GridPosition> {
        self.transform.checked_pixel_to_grid(px, py)
    }

    pub fn grid_to_pixel(&self, x: i32, y: i32) -> (f32, f32) {
        self.transform.grid_to_pixel(x, y)
    }

    pub fn grid_to_pixel_center(&self, x: i32, y: i32) -> (f32, f32) {
        self.transform.grid_to_pixel_center(x, y)
    }

    pub fn snap_to_grid(&self, px: f32, py: f32) -> (f32, f32) {
        self.transform.snap_to_grid(px, py)
    }

    pub fn is_valid_position(&self, pos: GridPosition) -> bool {
        self.transform.is_valid_position(pos)
    }

    pub fn is_valid_area(&self, pos: GridPosition, size: ObjectSize) -> bool {
        self.transform.is_valid_area(pos, size)
    }

    // -----------------------------------------------------------------------
    // Placement checks
    // -----------------------------------------------------------------------

    /// Why a `size` object on `z_layer` could not go at `pos`, ignoring any
    /// entries owned by `exclude`.
    pub fn check_placement(
        &self,
        pos: GridPosition,
        size: ObjectSize,
        z_layer: ZLayer,
        exclude: Option<&str>,
    ) -> Result<(), PlacementError> {
        if !self.transform.is_valid_area(pos, size) {
            return Err(PlacementError::OutOfBounds);
        }
        let footprint = self.transform.footprint_of(pos, size);
        match self.ledger.first_conflict(&footprint, z_layer, exclude) {
            Some(blocker) => Err(PlacementError::Collision {
                tile: blocker.tile,
                blocking_id: blocker.entry.object_id.to_string(),
                blocking_layer: blocker.entry.z_layer,
            }),
            None => Ok(()),
        }
    }

    pub fn can_place(
        &self,
        pos: GridPosition,
        size: ObjectSize,
        z_layer: ZLayer,
        exclude: Option<&str>,
    ) -> bool {
        self.check_placement(pos, size, z_layer, exclude).is_ok()
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Place `id`, relocating it if it already exists.
    ///
    /// An existing object is removed before the new spot is checked, so a
    /// failed re-placement leaves it removed. Clone the engine beforehand if
    /// the caller needs to roll back.
    pub fn try_place(
        &mut self,
        id: &str,
        pos: GridPosition,
        size: ObjectSize,
        z_layer: ZLayer,
        category: ObjectCategory,
    ) -> Result<(), PlacementError> {
        let object_id = ObjectId::new(id).ok_or(PlacementError::EmptyId)?;
        if self.registry.contains(id) {
            debug!("place '{}': replacing existing placement", id);
            self.try_remove(id)?;
        }
        self.check_placement(pos, size, z_layer, None)?;

        let record = ObjectRecord {
            id: object_id,
            position: pos,
            size,
            z_layer,
            category,
        };
        self.attach(&record);
        debug!(
            "placed '{}' at ({}, {}) size {}x{} on {:?}",
            id, pos.x, pos.y, size.width, size.height, z_layer
        );
        self.registry.insert(record);
        Ok(())
    }

    pub fn place(
        &mut self,
        id: &str,
        pos: GridPosition,
        size: ObjectSize,
        z_layer: ZLayer,
        category: ObjectCategory,
    ) -> bool {
        self.try_place(id, pos, size, z_layer, category).is_ok()
    }

    /// Remove `id`, returning its final record.
    pub fn try_remove(&mut self, id: &str) -> Result<ObjectRecord, PlacementError> {
        let record = self.registry.remove(id).ok_or(PlacementError::NotFound)?;
        self.detach(&record);
        debug!("removed '{}'", id);
        Ok(record)
    }

    pub fn remove(&mut self, id: &str) -> bool {
        self.try_remove(id).is_ok()
    }

    /// Move `id` to `new_pos`. On failure the object stays where it was.
    pub fn try_move(&mut self, id: &str, new_pos: GridPosition) -> Result<(), PlacementError> {
        let record = self.registry.get(id).ok_or(PlacementError::NotFound)?;
        self.check_placement(new_pos, record.size, record.z_layer, Some(id))?;

        let old = record.clone();
        let from = old.position;
        self.detach(&old);
        let moved = ObjectRecord {
            position: new_pos,
            ..old
        };
        self.attach(&moved);
        debug!(
            "moved '{}' from ({}, {}) to ({}, {})",
            id, from.x, from.y, new_pos.x, new_pos.y
        );
        self.registry.insert(moved);
        Ok(())
    }

    pub fn move_object(&mut self, id: &str, new_pos: GridPosition) -> bool {
        self.try_move(id, new_pos).is_ok()
    }

    fn attach(&mut self, record: &ObjectRecord) {
        for tile in self.transform.footprint_of(record.position, record.size) {
            self.ledger.insert(
                tile,
                OccupancyEntry {
                    object_id: record.id.clone(),
                    z_layer: record.z_layer,
                    category: record.category,
                },
            );
        }
    }

    fn detach(&mut self, record: &ObjectRecord) {
        for tile in self.transform.footprint_of(record.position, record.size) {
            self.ledger.remove(tile, record.id.as_str());
        }
    }
}
