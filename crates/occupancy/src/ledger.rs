use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::collision::CollisionPolicy;
use crate::coords::GridPosition;
use crate::layers::{ObjectCategory, ZLayer};
use crate::registry::ObjectId;

/// One object's claim on one tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancyEntry {
    pub object_id: ObjectId,
    pub z_layer: ZLayer,
    pub category: ObjectCategory,
}

/// A tile entry blocking a candidate placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blocker<'a> {
    pub tile: GridPosition,
    pub entry: &'a OccupancyEntry,
}

/// Per-tile occupancy, derived from the object registry. Each tile keeps its
/// entries in insertion order; tiles with no entries have no key.
#[derive(Debug, Clone, Default)]
pub struct OccupancyLedger {
    tiles: HashMap<GridPosition, Vec<OccupancyEntry>>,
}

impl OccupancyLedger {
    pub fn insert(&mut self, tile: GridPosition, entry: OccupancyEntry) {
        self.tiles.entry(tile).or_default().push(entry);
    }

    /// Drop `id`'s entry from `tile`, removing the tile key once it empties.
    /// Returns whether an entry was removed.
    pub fn remove(&mut self, tile: GridPosition, id: &str) -> bool {
        let Some(entries) = self.tiles.get_mut(&tile) else {
            return false;
        };
        let before = entries.len();
        entries.retain(|e| e.object_id.as_str() != id);
        let removed = entries.len() != before;
        if entries.is_empty() {
            self.tiles.remove(&tile);
        }
        removed
    }

    pub fn entries_at(&self, tile: GridPosition) -> &[OccupancyEntry] {
        self.tiles.get(&tile).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Highest layer at `tile`; among equals the earliest inserted wins.
    pub fn top_at(&self, tile: GridPosition) -> Option<&OccupancyEntry> {
        let mut top: Option<&OccupancyEntry> = None;
        for entry in self.entries_at(tile) {
            match top {
                Some(current) if entry.z_layer <= current.z_layer => {}
                _ => top = Some(entry),
            }
        }
        top
    }

    /// First entry on any of `tiles` whose layer conflicts with `layer`,
    /// ignoring entries owned by `exclude`.
    pub fn first_conflict<'a>(
        &'a self,
        tiles: &[GridPosition],
        layer: ZLayer,
        exclude: Option<&str>,
    ) -> Option<Blocker<'a>> {
        tiles.iter().find_map(|tile| {
            self.entries_at(*tile)
                .iter()
                .filter(|e| exclude != Some(e.object_id.as_str()))
                .find(|e| CollisionPolicy::conflicts(layer, e.z_layer))
                .map(|entry| Blocker { tile: *tile, entry })
        })
    }

    pub fn occupied_tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Total number of entries across all tiles.
    pub fn entry_count(&self) -> usize {
        self.tiles.values().map(Vec::len).sum()
    }

    pub fn clear(&mut self) {
        self.tiles.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GridPosition, &Vec<OccupancyEntry>)> {
        self.tiles.iter()
    }
}
