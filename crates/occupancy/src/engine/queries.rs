use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::SpatialEngine;
use crate::coords::{GridPosition, ObjectSize};
use crate::layers::ZLayer;
use crate::registry::{ObjectId, ObjectRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: i32,
    pub height: i32,
}

/// Snapshot counters for status bars and diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStats {
    pub total_objects: usize,
    pub occupied_tile_count: usize,
    pub grid_size: GridSize,
    /// Object count per layer, layers with no objects omitted.
    pub objects_per_layer: Vec<(ZLayer, usize)>,
}

impl SpatialEngine {
    /// Topmost object covering `pos`. Equal layers resolve to whichever
    /// object was placed on the tile first (a move counts as a new placement).
    pub fn object_at(&self, pos: GridPosition) -> Option<ObjectRecord> {
        let top = self.ledger.top_at(pos)?;
        self.registry.get(top.object_id.as_str()).cloned()
    }

    /// Every object covering `pos`, in tile insertion order.
    pub fn all_at(&self, pos: GridPosition) -> Vec<ObjectRecord> {
        self.ledger
            .entries_at(pos)
            .iter()
            .filter_map(|e| self.registry.get(e.object_id.as_str()).cloned())
            .collect()
    }

    /// Objects touching the rectangle spanned by `a` and `b` (corners in any
    /// order, clipped to the grid), each reported once.
    pub fn objects_in_area(&self, a: GridPosition, b: GridPosition) -> Vec<ObjectRecord> {
        self.collect_unique(self.transform.positions_in_rectangle(a, b))
    }

    /// Objects touching any valid tile within `radius` of `center`.
    pub fn objects_in_radius(&self, center: GridPosition, radius: f32) -> Vec<ObjectRecord> {
        self.collect_unique(self.transform.positions_in_radius(center, radius))
    }

    fn collect_unique(&self, tiles: Vec<GridPosition>) -> Vec<ObjectRecord> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut found = Vec::new();
        for tile in tiles {
            for entry in self.ledger.entries_at(tile) {
                let id = entry.object_id.as_str();
                if !seen.insert(id) {
                    continue;
                }
                if let Some(record) = self.registry.get(id) {
                    found.push(record.clone());
                }
            }
        }
        found
    }

    pub fn object(&self, id: &str) -> Option<&ObjectRecord> {
        self.registry.get(id)
    }

    pub fn object_position(&self, id: &str) -> Option<GridPosition> {
        self.registry.get(id).map(|r| r.position)
    }

    pub fn object_size(&self, id: &str) -> Option<ObjectSize> {
        self.registry.get(id).map(|r| r.size)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.registry.contains(id)
    }

    /// Ids of every placed object, ascending.
    pub fn ids(&self) -> Vec<ObjectId> {
        self.registry.sorted_ids()
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn stats(&self) -> EngineStats {
        let mut counts = [0usize; ZLayer::COUNT];
        for record in self.registry.iter() {
            counts[record.z_layer.index()] += 1;
        }
        let objects_per_layer = ZLayer::ALL
            .iter()
            .zip(counts)
            .filter(|(_, n)| *n > 0)
            .map(|(layer, n)| (*layer, n))
            .collect();

        EngineStats {
            total_objects: self.registry.len(),
            occupied_tile_count: self.ledger.occupied_tile_count(),
            grid_size: GridSize {
                width: self.transform.width(),
                height: self.transform.height(),
            },
            objects_per_layer,
        }
    }
}
