//! Seeded random operation sequences. After every step the registry and the
//! ledger must still agree and no tile may hold conflicting layers.
//!
//! Run: cargo test -p occupancy --test random_ops

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use occupancy::invariants::audit;
use occupancy::{GridConfig, GridPosition, ObjectCategory, ObjectSize, SpatialEngine, ZLayer};

const STEPS: usize = 2_000;
const ID_POOL: usize = 24;

fn random_layer(rng: &mut ChaCha8Rng) -> ZLayer {
    ZLayer::ALL[rng.gen_range(0..ZLayer::COUNT)]
}

fn random_category(layer: ZLayer) -> ObjectCategory {
    match layer {
        ZLayer::Terrain => ObjectCategory::Terrain,
        ZLayer::Vehicles => ObjectCategory::Vehicle,
        ZLayer::Props => ObjectCategory::Prop,
        ZLayer::Effects => ObjectCategory::Effect,
        ZLayer::Characters => ObjectCategory::Character,
        ZLayer::Projectiles => ObjectCategory::Projectile,
        ZLayer::Ui => ObjectCategory::Marker,
    }
}

fn random_pos(rng: &mut ChaCha8Rng) -> GridPosition {
    // Slightly past the edges so out-of-bounds requests happen too.
    GridPosition::new(rng.gen_range(-2..22), rng.gen_range(-2..17))
}

fn run_sequence(seed: u64) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut engine = SpatialEngine::new(GridConfig::new(48, 20, 15));

    for step in 0..STEPS {
        let id = format!("obj{}", rng.gen_range(0..ID_POOL));
        match rng.gen_range(0..100) {
            0..=49 => {
                let layer = random_layer(&mut rng);
                let size = ObjectSize::new(rng.gen_range(1..4), rng.gen_range(1..4)).unwrap();
                let pos = random_pos(&mut rng);
                // Upsert drops the old placement first, so judge the new spot
                // against the engine with this id already gone.
                let mut without = engine.clone();
                without.remove(&id);
                let could = without.can_place(pos, size, layer, None);
                let placed = engine.place(&id, pos, size, layer, random_category(layer));
                assert_eq!(placed, could, "step {step}: place disagreed with can_place");
                if placed {
                    assert_eq!(engine.object_position(&id), Some(pos));
                } else {
                    assert!(!engine.contains(&id), "step {step}: failed upsert kept id");
                }
            }
            50..=74 => {
                let before = engine.object(&id).cloned();
                let pos = random_pos(&mut rng);
                let moved = engine.move_object(&id, pos);
                match before {
                    Some(old) if !moved => {
                        assert_eq!(
                            engine.object(&id),
                            Some(&old),
                            "step {step}: failed move mutated"
                        );
                    }
                    Some(_) => assert_eq!(engine.object_position(&id), Some(pos)),
                    None => assert!(!moved),
                }
            }
            75..=94 => {
                let existed = engine.contains(&id);
                assert_eq!(engine.remove(&id), existed);
                assert!(!engine.contains(&id));
            }
            95..=97 => {
                let w = rng.gen_range(5..25);
                let h = rng.gen_range(5..20);
                let before = engine.len();
                let evicted = engine.handle_resize(w, h);
                assert_eq!(engine.len(), before - evicted.len());
                for gone in &evicted {
                    assert!(!engine.contains(gone.as_str()));
                }
            }
            _ => engine.clear_all(),
        }

        let violations = audit(&engine);
        assert!(
            violations.is_empty(),
            "seed {seed} step {step}: {:?}",
            violations
        );
        let stats = engine.stats();
        assert_eq!(stats.total_objects, engine.len());
        assert_eq!(stats.occupied_tile_count, engine.ledger().occupied_tile_count());
    }
}

#[test]
fn random_sequences_preserve_invariants() {
    for seed in [1, 7, 42, 1337, 9001] {
        run_sequence(seed);
    }
}
