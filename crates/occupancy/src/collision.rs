//! Z-layer conflict policy.
//!
//! The policy is a closed table over the seven [`ZLayer`] bands. It is kept
//! as a single matrix so it can be audited (and tested) as data.

use crate::layers::ZLayer;

const X: bool = true;
const O: bool = false;

/// `CONFLICTS[a][b]` is true when an object on band `a` may not share a tile
/// with an object on band `b`. Rows/columns follow [`ZLayer::ALL`]:
/// Terrain, Vehicles, Props, Effects, Characters, Projectiles, Ui.
#[rustfmt::skip]
const CONFLICTS: [[bool; ZLayer::COUNT]; ZLayer::COUNT] = [
    //  Ter Veh Prp Eff Chr Prj Ui
    [   X,  X,  X,  O,  X,  O,  O ], // Terrain
    [   X,  X,  X,  O,  O,  O,  O ], // Vehicles
    [   X,  X,  X,  O,  O,  O,  O ], // Props
    [   O,  O,  O,  O,  O,  O,  O ], // Effects
    [   X,  O,  O,  O,  X,  O,  O ], // Characters
    [   O,  O,  O,  O,  O,  O,  O ], // Projectiles
    [   O,  O,  O,  O,  O,  O,  O ], // Ui
];

#[derive(Debug, Clone, Copy, Default)]
pub struct CollisionPolicy;

impl CollisionPolicy {
    #[inline]
    pub fn conflicts(a: ZLayer, b: ZLayer) -> bool {
        CONFLICTS[a.index()][b.index()]
    }

    /// Bands that `layer` may not share a tile with.
    pub fn blockers_of(layer: ZLayer) -> Vec<ZLayer> {
        ZLayer::ALL
            .iter()
            .copied()
            .filter(|other| Self::conflicts(layer, *other))
            .collect()
    }
}
