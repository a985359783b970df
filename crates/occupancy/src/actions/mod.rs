//! Queued placement commands for callers that drive the engine through the
//! ECS (tools, agents, scripted scenes) rather than holding `&mut SpatialEngine`.

pub mod executor;
pub mod plugin;
pub mod result_log;

#[cfg(test)]
mod tests;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::coords::{GridPosition, ObjectSize};
use crate::error::PlacementError;
use crate::layers::{ObjectCategory, ZLayer};
use crate::registry::ObjectId;

pub use executor::execute_queued_actions;
pub use plugin::{OccupancyPlugin, OccupancySet};
pub use result_log::{PlacementResultLog, ResultLogEntry};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlacementAction {
    Place {
        id: String,
        pos: GridPosition,
        size: ObjectSize,
        z_layer: ZLayer,
        category: ObjectCategory,
    },
    Remove {
        id: String,
    },
    Move {
        id: String,
        to: GridPosition,
    },
    Resize {
        width: i32,
        height: i32,
    },
    ClearAll,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionResult {
    Success,
    /// A resize succeeded and pushed these objects off the grid.
    Evicted(Vec<ObjectId>),
    Error(PlacementError),
}

impl ActionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ActionResult::Success | ActionResult::Evicted(_))
    }
}

/// FIFO of actions waiting for the next executor run.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct ActionQueue {
    pending: Vec<PlacementAction>,
}

impl ActionQueue {
    pub fn push(&mut self, action: PlacementAction) {
        self.pending.push(action);
    }

    pub fn drain(&mut self) -> Vec<PlacementAction> {
        self.pending.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

/// Sent when a resize pushes objects off the grid, so whoever draws them can
/// drop their visuals.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct ObjectsEvicted {
    pub ids: Vec<ObjectId>,
}
