use serde::{Deserialize, Serialize};

/// Ordered category band. Higher bands paint on top and win `object_at`
/// lookups; the same bands drive [`crate::collision::CollisionPolicy`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ZLayer {
    Terrain,
    Vehicles,
    Props,
    Effects,
    Characters,
    Projectiles,
    Ui,
}

impl ZLayer {
    pub const COUNT: usize = 7;

    /// All bands in ascending order.
    pub const ALL: [ZLayer; ZLayer::COUNT] = [
        ZLayer::Terrain,
        ZLayer::Vehicles,
        ZLayer::Props,
        ZLayer::Effects,
        ZLayer::Characters,
        ZLayer::Projectiles,
        ZLayer::Ui,
    ];

    /// Numeric paint order.
    pub fn value(self) -> i32 {
        match self {
            ZLayer::Terrain => 0,
            ZLayer::Vehicles => 1,
            ZLayer::Props => 2,
            ZLayer::Effects => 3,
            ZLayer::Characters => 4,
            ZLayer::Projectiles => 5,
            ZLayer::Ui => 6,
        }
    }

    pub fn from_value(value: i32) -> Option<Self> {
        ZLayer::ALL.iter().copied().find(|l| l.value() == value)
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.value() as usize
    }
}

/// What kind of thing an object is. Closed set; each category has a natural
/// layer but callers may place it on another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectCategory {
    Character,
    Vehicle,
    Terrain,
    Prop,
    Effect,
    Projectile,
    Marker,
}

impl ObjectCategory {
    pub fn default_layer(self) -> ZLayer {
        match self {
            ObjectCategory::Character => ZLayer::Characters,
            ObjectCategory::Vehicle => ZLayer::Vehicles,
            ObjectCategory::Terrain => ZLayer::Terrain,
            ObjectCategory::Prop => ZLayer::Props,
            ObjectCategory::Effect => ZLayer::Effects,
            ObjectCategory::Projectile => ZLayer::Projectiles,
            ObjectCategory::Marker => ZLayer::Ui,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ObjectCategory::Character => "character",
            ObjectCategory::Vehicle => "vehicle",
            ObjectCategory::Terrain => "terrain",
            ObjectCategory::Prop => "prop",
            ObjectCategory::Effect => "effect",
            ObjectCategory::Projectile => "projectile",
            ObjectCategory::Marker => "marker",
        }
    }
}
