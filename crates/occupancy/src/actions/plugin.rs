use bevy::prelude::*;

use super::executor::execute_queued_actions;
use super::{ActionQueue, ObjectsEvicted, PlacementResultLog};
use crate::config::GridConfig;
use crate::engine::SpatialEngine;
use crate::invariants::{audit_ledger, AuditTimer, LedgerInvariantViolations};

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum OccupancySet {
    /// Queued placement actions are applied.
    Actions,
    /// Ledger consistency is audited.
    Audit,
}

/// Registers the engine resource, the action queue and its executor, and the
/// periodic ledger audit.
///
/// # Panics
///
/// Building the plugin panics if `config` is invalid.
#[derive(Default)]
pub struct OccupancyPlugin {
    pub config: GridConfig,
}

impl Plugin for OccupancyPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SpatialEngine::new(self.config))
            .init_resource::<ActionQueue>()
            .init_resource::<PlacementResultLog>()
            .init_resource::<LedgerInvariantViolations>()
            .init_resource::<AuditTimer>()
            .add_event::<ObjectsEvicted>()
            .configure_sets(
                FixedUpdate,
                (OccupancySet::Actions, OccupancySet::Audit).chain(),
            )
            .add_systems(
                FixedUpdate,
                (
                    execute_queued_actions.in_set(OccupancySet::Actions),
                    audit_ledger.in_set(OccupancySet::Audit),
                ),
            );
    }
}
