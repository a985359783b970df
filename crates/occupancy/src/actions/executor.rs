use bevy::prelude::*;

use super::{ActionQueue, ActionResult, ObjectsEvicted, PlacementAction, PlacementResultLog};
use crate::engine::SpatialEngine;

/// Apply one action to the engine. Resize evictions are returned in the
/// result rather than signalled here.
pub fn apply_action(engine: &mut SpatialEngine, action: &PlacementAction) -> ActionResult {
    let outcome = match action {
        PlacementAction::Place {
            id,
            pos,
            size,
            z_layer,
            category,
        } => engine.try_place(id, *pos, *size, *z_layer, *category),
        PlacementAction::Remove { id } => engine.try_remove(id).map(|_| ()),
        PlacementAction::Move { id, to } => engine.try_move(id, *to),
        PlacementAction::Resize { width, height } => {
            return match engine.try_resize(*width, *height) {
                Ok(evicted) if evicted.is_empty() => ActionResult::Success,
                Ok(evicted) => ActionResult::Evicted(evicted),
                Err(err) => ActionResult::Error(err),
            };
        }
        PlacementAction::ClearAll => {
            engine.clear_all();
            Ok(())
        }
    };
    match outcome {
        Ok(()) => ActionResult::Success,
        Err(err) => ActionResult::Error(err),
    }
}

/// Drain the queue in order, log every result, and announce evictions.
pub fn execute_queued_actions(
    mut queue: ResMut<ActionQueue>,
    mut engine: ResMut<SpatialEngine>,
    mut log: ResMut<PlacementResultLog>,
    mut evicted_events: EventWriter<ObjectsEvicted>,
) {
    for action in queue.drain() {
        let result = apply_action(&mut engine, &action);
        match &result {
            ActionResult::Evicted(ids) => {
                evicted_events.send(ObjectsEvicted { ids: ids.clone() });
            }
            ActionResult::Error(err) => {
                debug!("placement action {:?} rejected: {}", action, err);
            }
            ActionResult::Success => {}
        }
        log.record(action, result);
    }
}
