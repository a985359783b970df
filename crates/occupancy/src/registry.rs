use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::coords::{GridPosition, ObjectSize};
use crate::layers::{ObjectCategory, ZLayer};

/// Caller-chosen object identifier. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        (!id.is_empty()).then_some(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ObjectId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for ObjectId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ObjectId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Canonical state of one placed object. Position changes on move; the rest
/// is fixed at placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRecord {
    pub id: ObjectId,
    pub position: GridPosition,
    pub size: ObjectSize,
    pub z_layer: ZLayer,
    pub category: ObjectCategory,
}

impl ObjectRecord {
    /// Whether `tile` lies inside this object's rectangle.
    pub fn covers(&self, tile: GridPosition) -> bool {
        let dx = tile.x as i64 - self.position.x as i64;
        let dy = tile.y as i64 - self.position.y as i64;
        dx >= 0 && dy >= 0 && dx < self.size.width as i64 && dy < self.size.height as i64
    }
}

/// One record per live object, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct ObjectRegistry {
    records: HashMap<ObjectId, ObjectRecord>,
}

impl ObjectRegistry {
    pub fn get(&self, id: &str) -> Option<&ObjectRecord> {
        self.records.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut ObjectRecord> {
        self.records.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    /// Insert or replace the record for `record.id`.
    pub fn insert(&mut self, record: ObjectRecord) -> Option<ObjectRecord> {
        self.records.insert(record.id.clone(), record)
    }

    pub fn remove(&mut self, id: &str) -> Option<ObjectRecord> {
        self.records.remove(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &ObjectRecord> {
        self.records.values()
    }

    /// Ids in ascending order.
    pub fn sorted_ids(&self) -> Vec<ObjectId> {
        let mut ids: Vec<ObjectId> = self.records.keys().cloned().collect();
        ids.sort();
        ids
    }
}
