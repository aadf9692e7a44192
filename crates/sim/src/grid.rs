use thiserror::Error;

/// Immutable tile grid for one loaded level.
///
/// Holds the logical tile ids (for gate detection and presentation) and a
/// collision layer where any nonzero entry is solid. World coordinates map
/// to tiles by dividing by the tile size and truncating toward zero.
///
/// Lookups outside the grid are non-solid: the boundary is open, which
/// keeps edge tiles walkable.
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionGrid {
    width: u32,
    height: u32,
    tile_width: f32,
    tile_height: f32,
    tiles: Vec<u16>,
    collision: Vec<u16>,
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GridError {
    #[error("tile count mismatch: expected {expected}, got {actual}")]
    TileCountMismatch { expected: usize, actual: usize },
    #[error("collision layer size mismatch: expected {expected}, got {actual}")]
    CollisionCountMismatch { expected: usize, actual: usize },
    #[error("tile size must be positive, got {width}x{height}")]
    NonPositiveTileSize { width: f32, height: f32 },
}

impl CollisionGrid {
    pub fn new(
        width: u32,
        height: u32,
        tile_width: f32,
        tile_height: f32,
        tiles: Vec<u16>,
        collision: Vec<u16>,
    ) -> Result<Self, GridError> {
        if tile_width <= 0.0 || tile_height <= 0.0 {
            return Err(GridError::NonPositiveTileSize {
                width: tile_width,
                height: tile_height,
            });
        }
        let expected = width as usize * height as usize;
        if tiles.len() != expected {
            return Err(GridError::TileCountMismatch {
                expected,
                actual: tiles.len(),
            });
        }
        if collision.len() != expected {
            return Err(GridError::CollisionCountMismatch {
                expected,
                actual: collision.len(),
            });
        }
        Ok(Self {
            width,
            height,
            tile_width,
            tile_height,
            tiles,
            collision,
        })
    }

    pub fn width_in_tiles(&self) -> u32 {
        self.width
    }

    pub fn height_in_tiles(&self) -> u32 {
        self.height
    }

    pub fn tile_width(&self) -> f32 {
        self.tile_width
    }

    pub fn tile_height(&self) -> f32 {
        self.tile_height
    }

    pub fn width_in_world(&self) -> f32 {
        self.width as f32 * self.tile_width
    }

    pub fn height_in_world(&self) -> f32 {
        self.height as f32 * self.tile_height
    }

    fn index_of(&self, tile_x: i32, tile_y: i32) -> Option<usize> {
        if tile_x < 0 || tile_y < 0 || tile_x >= self.width as i32 || tile_y >= self.height as i32 {
            return None;
        }
        Some(tile_y as usize * self.width as usize + tile_x as usize)
    }

    /// Logical tile id at the cell, or `None` outside the grid.
    pub fn tile_id_at(&self, tile_x: i32, tile_y: i32) -> Option<u16> {
        self.index_of(tile_x, tile_y)
            .and_then(|index| self.tiles.get(index).copied())
    }

    /// Zero in the collision layer means walkable. Out-of-range cells are
    /// non-solid (open boundary).
    pub fn is_solid(&self, tile_x: i32, tile_y: i32) -> bool {
        match self.index_of(tile_x, tile_y) {
            Some(index) => self.collision.get(index).copied().unwrap_or(0) != 0,
            None => false,
        }
    }

    /// World position to tile coordinates, truncating toward zero.
    pub fn tile_coords_at_world(&self, world_x: f32, world_y: f32) -> (i32, i32) {
        (
            (world_x / self.tile_width) as i32,
            (world_y / self.tile_height) as i32,
        )
    }

    pub fn is_solid_at_world(&self, world_x: f32, world_y: f32) -> bool {
        let (tile_x, tile_y) = self.tile_coords_at_world(world_x, world_y);
        self.is_solid(tile_x, tile_y)
    }
}
