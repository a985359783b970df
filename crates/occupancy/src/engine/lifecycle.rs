use bevy::prelude::*;

use super::SpatialEngine;
use crate::error::PlacementError;
use crate::registry::ObjectId;

impl SpatialEngine {
    pub fn clear_all(&mut self) {
        let count = self.registry.len();
        self.ledger.clear();
        self.registry.clear();
        info!("cleared {} objects from the grid", count);
    }

    /// Change the grid extents and evict every object whose footprint no
    /// longer fits. Returns the evicted ids, ascending.
    pub fn try_resize(
        &mut self,
        width: i32,
        height: i32,
    ) -> Result<Vec<ObjectId>, PlacementError> {
        if width <= 0 || height <= 0 {
            return Err(PlacementError::InvalidDimensions { width, height });
        }
        self.transform = self.transform.resized(width, height);

        let mut evicted: Vec<ObjectId> = self
            .registry
            .iter()
            .filter(|r| !self.transform.is_valid_area(r.position, r.size))
            .map(|r| r.id.clone())
            .collect();
        evicted.sort();
        for id in &evicted {
            self.remove(id.as_str());
        }

        info!(
            "grid resized to {}x{}, evicted {} objects",
            width,
            height,
            evicted.len()
        );
        Ok(evicted)
    }

    /// Infallible form of [`Self::try_resize`]: invalid dimensions are
    /// logged and ignored.
    pub fn handle_resize(&mut self, width: i32, height: i32) -> Vec<ObjectId> {
        match self.try_resize(width, height) {
            Ok(evicted) => evicted,
            Err(err) => {
                warn!("ignoring resize: {}", err);
                Vec::new()
            }
        }
    }
}
