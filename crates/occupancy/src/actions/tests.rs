use bevy::prelude::*;

use super::*;
use crate::config::{GridConfig, AUDIT_INTERVAL_TICKS};
use crate::engine::SpatialEngine;
use crate::invariants::LedgerInvariantViolations;

fn test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(OccupancyPlugin {
        config: GridConfig::new(48, 20, 15),
    });
    app
}

fn run_fixed(app: &mut App) {
    app.world_mut().run_schedule(FixedUpdate);
}

fn push(app: &mut App, action: PlacementAction) {
    app.world_mut().resource_mut::<ActionQueue>().push(action);
}

fn place_action(id: &str, x: i32, y: i32, side: u32, z_layer: ZLayer) -> PlacementAction {
    PlacementAction::Place {
        id: id.to_string(),
        pos: GridPosition::new(x, y),
        size: ObjectSize::square(side),
        z_layer,
        category: ObjectCategory::Vehicle,
    }
}

#[test]
fn test_queue_drain_is_fifo() {
    let mut queue = ActionQueue::default();
    queue.push(PlacementAction::ClearAll);
    queue.push(PlacementAction::Remove {
        id: "a".to_string(),
    });
    assert_eq!(queue.len(), 2);
    let drained = queue.drain();
    assert!(queue.is_empty());
    assert_eq!(drained[0], PlacementAction::ClearAll);
}

#[test]
fn test_apply_action_reports_errors() {
    let mut engine = SpatialEngine::default();
    assert_eq!(
        executor::apply_action(&mut engine, &place_action("v1", 2, 2, 2, ZLayer::Vehicles)),
        ActionResult::Success
    );
    let blocked = executor::apply_action(
        &mut engine,
        &place_action("v2", 3, 3, 2, ZLayer::Vehicles),
    );
    assert!(!blocked.is_success());
    assert_eq!(
        executor::apply_action(
            &mut engine,
            &PlacementAction::Move {
                id: "nobody".to_string(),
                to: GridPosition::new(0, 0),
            }
        ),
        ActionResult::Error(PlacementError::NotFound)
    );
}

#[test]
fn test_executor_applies_queue_in_order() {
    let mut app = test_app();
    push(&mut app, place_action("v1", 2, 2, 2, ZLayer::Vehicles));
    push(&mut app, place_action("v2", 3, 3, 2, ZLayer::Vehicles));
    push(
        &mut app,
        PlacementAction::Move {
            id: "v1".to_string(),
            to: GridPosition::new(10, 10),
        },
    );
    push(&mut app, place_action("v2", 3, 3, 2, ZLayer::Vehicles));
    run_fixed(&mut app);

    let engine = app.world().resource::<SpatialEngine>();
    assert_eq!(engine.object_position("v1"), Some(GridPosition::new(10, 10)));
    assert_eq!(engine.object_position("v2"), Some(GridPosition::new(3, 3)));
    assert!(app.world().resource::<ActionQueue>().is_empty());

    let log = app.world().resource::<PlacementResultLog>();
    let results: Vec<bool> = log.recent(4).map(|e| e.result.is_success()).collect();
    assert_eq!(results, vec![true, false, true, true]);
    assert_eq!(log.failures().count(), 1);
}

#[test]
fn test_resize_sends_eviction_event() {
    let mut app = test_app();
    push(&mut app, place_action("small", 0, 0, 1, ZLayer::Vehicles));
    push(&mut app, place_action("corner", 18, 13, 2, ZLayer::Vehicles));
    push(
        &mut app,
        PlacementAction::Resize {
            width: 15,
            height: 10,
        },
    );
    run_fixed(&mut app);

    let events = app.world().resource::<Events<ObjectsEvicted>>();
    let sent: Vec<&ObjectsEvicted> = events.iter_current_update_events().collect();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].ids, vec![ObjectId::new("corner").unwrap()]);

    let log = app.world().resource::<PlacementResultLog>();
    assert_eq!(
        log.latest().unwrap().result,
        ActionResult::Evicted(vec![ObjectId::new("corner").unwrap()])
    );
    assert_eq!(app.world().resource::<SpatialEngine>().len(), 1);
}

#[test]
fn test_audit_runs_on_interval_and_stays_clean() {
    let mut app = test_app();
    push(&mut app, place_action("a", 1, 1, 3, ZLayer::Vehicles));
    for _ in 0..AUDIT_INTERVAL_TICKS {
        run_fixed(&mut app);
    }
    let violations = app.world().resource::<LedgerInvariantViolations>();
    assert_eq!(violations.passes, 1);
    assert_eq!(violations.last_pass, 0);
}

#[test]
fn test_actions_serialize_to_json() {
    let action = place_action("v1", 2, 2, 2, ZLayer::Vehicles);
    let json = serde_json::to_string(&action).unwrap();
    let back: PlacementAction = serde_json::from_str(&json).unwrap();
    assert_eq!(back, action);
}
