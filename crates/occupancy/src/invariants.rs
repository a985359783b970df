//! Consistency audit for the registry and ledger.
//!
//! [`audit`] checks the four structural invariants of a [`SpatialEngine`]:
//! footprints stay inside the grid, ledger entries mirror footprints exactly,
//! no tile holds two conflicting layers, and no empty tile lists linger.
//! [`audit_ledger`] runs it every [`AUDIT_INTERVAL_TICKS`] fixed ticks and
//! logs anything it finds.

use std::collections::HashMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::collision::CollisionPolicy;
use crate::config::AUDIT_INTERVAL_TICKS;
use crate::coords::GridPosition;
use crate::engine::SpatialEngine;
use crate::registry::ObjectId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvariantViolation {
    /// A record's footprint leaves the grid.
    OutOfBounds { id: ObjectId },
    /// A footprint tile has no entry for the object.
    MissingEntry { id: ObjectId, tile: GridPosition },
    /// A tile lists the same object more than once.
    DuplicateEntry { id: ObjectId, tile: GridPosition },
    /// A tile lists an object that has no record or does not cover it.
    StrayEntry { id: ObjectId, tile: GridPosition },
    /// An entry's layer or category disagrees with the record.
    StaleEntry { id: ObjectId, tile: GridPosition },
    /// Two entries on one tile have conflicting layers.
    Conflict {
        tile: GridPosition,
        first: ObjectId,
        second: ObjectId,
    },
    /// A tile key with no entries.
    EmptyTile { tile: GridPosition },
}

pub fn audit(engine: &SpatialEngine) -> Vec<InvariantViolation> {
    let transform = engine.transform();
    let ledger = engine.ledger();
    let registry = engine.registry();
    let mut violations = Vec::new();

    for record in registry.iter() {
        if !transform.is_valid_area(record.position, record.size) {
            violations.push(InvariantViolation::OutOfBounds {
                id: record.id.clone(),
            });
        }
        for tile in transform.footprint_of(record.position, record.size) {
            let held = ledger
                .entries_at(tile)
                .iter()
                .filter(|e| e.object_id == record.id)
                .count();
            if held == 0 {
                violations.push(InvariantViolation::MissingEntry {
                    id: record.id.clone(),
                    tile,
                });
            }
        }
    }

    for (tile, entries) in ledger.iter() {
        let tile = *tile;
        if entries.is_empty() {
            violations.push(InvariantViolation::EmptyTile { tile });
            continue;
        }

        let mut seen: HashMap<&str, usize> = HashMap::new();
        for entry in entries {
            let id = entry.object_id.as_str();
            *seen.entry(id).or_default() += 1;
            if seen[id] == 2 {
                violations.push(InvariantViolation::DuplicateEntry {
                    id: entry.object_id.clone(),
                    tile,
                });
            }
            match registry.get(id) {
                Some(record) if record.covers(tile) => {
                    if record.z_layer != entry.z_layer || record.category != entry.category {
                        violations.push(InvariantViolation::StaleEntry {
                            id: entry.object_id.clone(),
                            tile,
                        });
                    }
                }
                _ => violations.push(InvariantViolation::StrayEntry {
                    id: entry.object_id.clone(),
                    tile,
                }),
            }
        }

        for (i, a) in entries.iter().enumerate() {
            for b in &entries[i + 1..] {
                if a.object_id != b.object_id && CollisionPolicy::conflicts(a.z_layer, b.z_layer) {
                    violations.push(InvariantViolation::Conflict {
                        tile,
                        first: a.object_id.clone(),
                        second: b.object_id.clone(),
                    });
                }
            }
        }
    }

    violations
}

/// Violation count from the most recent audit pass.
#[derive(Resource, Default, Debug)]
pub struct LedgerInvariantViolations {
    pub last_pass: usize,
    pub passes: u64,
}

/// Counts fixed ticks so the audit only runs every [`AUDIT_INTERVAL_TICKS`].
#[derive(Resource, Default, Debug)]
pub struct AuditTimer {
    pub counter: u32,
}

impl AuditTimer {
    pub fn tick(&mut self) {
        self.counter = self.counter.wrapping_add(1);
    }

    pub fn should_run(&self) -> bool {
        self.counter % AUDIT_INTERVAL_TICKS == 0
    }
}

pub fn audit_ledger(
    mut timer: ResMut<AuditTimer>,
    engine: Res<SpatialEngine>,
    mut violations: ResMut<LedgerInvariantViolations>,
) {
    timer.tick();
    if !timer.should_run() {
        return;
    }
    let found = audit(&engine);
    for violation in &found {
        warn!("Occupancy invariant violation: {:?}", violation);
    }
    violations.last_pass = found.len();
    violations.passes += 1;
}
