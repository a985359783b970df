use serde::{Deserialize, Serialize};

use crate::config::GridConfig;

/// Tile-indexed grid coordinate. Signed so that pixel conversions left of or
/// above the origin stay representable; validity is checked separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
}

impl GridPosition {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for GridPosition {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Object extent in tiles. Both sides must be at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectSize {
    pub width: u32,
    pub height: u32,
}

impl ObjectSize {
    pub const ONE: ObjectSize = ObjectSize {
        width: 1,
        height: 1,
    };

    /// Returns `None` for a zero extent.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        let size = Self { width, height };
        size.is_valid().then_some(size)
    }

    pub const fn square(side: u32) -> Self {
        Self {
            width: side,
            height: side,
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.width >= 1 && self.height >= 1
    }

    pub fn tile_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl Default for ObjectSize {
    fn default() -> Self {
        Self::ONE
    }
}

/// Conversions between pixel space and tile space, and bounds checks against
/// the current grid extents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinateTransform {
    tile_size: u32,
    width: i32,
    height: i32,
}

impl CoordinateTransform {
    /// The config is assumed validated; see [`GridConfig::validate`].
    pub fn new(config: &GridConfig) -> Self {
        Self {
            tile_size: config.tile_size,
            width: config.width,
            height: config.height,
        }
    }

    /// Same tile size, new extents.
    pub fn resized(&self, width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..*self
        }
    }

    #[inline]
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    #[inline]
    fn tile_px(&self) -> f32 {
        self.tile_size as f32
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Floors each pixel coordinate to its tile. The result is not
    /// bounds-checked. Inputs whose tile index leaves the `i32` range saturate
    /// to `i32::MIN`/`i32::MAX` and NaN maps to 0; use
    /// [`checked_pixel_to_grid`](Self::checked_pixel_to_grid) to reject them.
    pub fn pixel_to_grid(&self, px: f32, py: f32) -> GridPosition {
        let gx = (px / self.tile_px()).floor() as i32;
        let gy = (py / self.tile_px()).floor() as i32;
        GridPosition::new(gx, gy)
    }

    /// Like [`pixel_to_grid`](Self::pixel_to_grid), but `None` when either
    /// coordinate is non-finite or its tile index does not fit in an `i32`.
    pub fn checked_pixel_to_grid(&self, px: f32, py: f32) -> Option<GridPosition> {
        let to_tile = |p: f32| {
            let t = (p as f64 / self.tile_size as f64).floor();
            if t.is_finite() && t >= i32::MIN as f64 && t <= i32::MAX as f64 {
                Some(t as i32)
            } else {
                None
            }
        };
        Some(GridPosition::new(to_tile(px)?, to_tile(py)?))
    }

    /// Top-left pixel of the tile.
    pub fn grid_to_pixel(&self, x: i32, y: i32) -> (f32, f32) {
        (x as f32 * self.tile_px(), y as f32 * self.tile_px())
    }

    pub fn grid_to_pixel_center(&self, x: i32, y: i32) -> (f32, f32) {
        let (px, py) = self.grid_to_pixel(x, y);
        let half = self.tile_px() * 0.5;
        (px + half, py + half)
    }

    pub fn snap_to_grid(&self, px: f32, py: f32) -> (f32, f32) {
        let pos = self.pixel_to_grid(px, py);
        self.grid_to_pixel(pos.x, pos.y)
    }

    #[inline]
    pub fn is_valid_position(&self, pos: GridPosition) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    pub fn is_valid_area(&self, pos: GridPosition, size: ObjectSize) -> bool {
        size.is_valid()
            && self.is_valid_position(pos)
            && pos.x as i64 + size.width as i64 <= self.width as i64
            && pos.y as i64 + size.height as i64 <= self.height as i64
    }

    /// Every tile of the rectangle in row-major order. Does not clip: call
    /// [`Self::is_valid_area`] first.
    pub fn footprint_of(&self, pos: GridPosition, size: ObjectSize) -> Vec<GridPosition> {
        let mut tiles = Vec::with_capacity(size.tile_count());
        for dy in 0..size.height as i32 {
            for dx in 0..size.width as i32 {
                tiles.push(GridPosition::new(pos.x + dx, pos.y + dy));
            }
        }
        tiles
    }

    /// Valid tiles within Euclidean distance `radius` of `center`. An infinite
    /// radius covers the whole grid.
    pub fn positions_in_radius(&self, center: GridPosition, radius: f32) -> Vec<GridPosition> {
        if radius.is_nan() || radius < 0.0 {
            return Vec::new();
        }
        // Any two i32 coordinates are less than u32::MAX apart, so this reach
        // still spans the grid and the i64 bounds below cannot overflow.
        let reach = radius.ceil().min(u32::MAX as f32) as i64;
        let r2 = radius as f64 * radius as f64;
        let min_x = (center.x as i64 - reach).max(0);
        let max_x = (center.x as i64 + reach).min(self.width as i64 - 1);
        let min_y = (center.y as i64 - reach).max(0);
        let max_y = (center.y as i64 + reach).min(self.height as i64 - 1);

        let mut tiles = Vec::new();
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = (x - center.x as i64) as f64;
                let dy = (y - center.y as i64) as f64;
                if dx * dx + dy * dy <= r2 {
                    tiles.push(GridPosition::new(x as i32, y as i32));
                }
            }
        }
        tiles
    }

    /// Tiles of the rectangle spanned by two corners in any order, clipped to
    /// the grid.
    pub fn positions_in_rectangle(&self, a: GridPosition, b: GridPosition) -> Vec<GridPosition> {
        let min_x = a.x.min(b.x).max(0);
        let max_x = a.x.max(b.x).min(self.width - 1);
        let min_y = a.y.min(b.y).max(0);
        let max_y = a.y.max(b.y).min(self.height - 1);

        let mut tiles = Vec::new();
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                tiles.push(GridPosition::new(x, y));
            }
        }
        tiles
    }
}
