//! Precomputed ray views
//!
//! For every cell and every axis the table stores the 9 cell indices at
//! offsets -4..=+4. Indices point into the board's cell storage; offsets past
//! the edge point at the sentinel slot (index `size * size`), which always
//! holds `Stone::OutOfBounds`. Because rays hold indices rather than copies,
//! every make/undo on the board is visible through every ray immediately.

use super::{Direction, Pos, RAY_CENTER, RAY_LEN};

/// Ray of cell indices along one axis
pub type Ray = [u32; RAY_LEN];

/// Ray index table for a square board
#[derive(Debug, Clone)]
pub struct RayTable {
    size: usize,
    rays: Vec<[Ray; 4]>,
}

impl RayTable {
    /// Build the table once for a board of `size` x `size` cells.
    #[must_use]
    pub fn new(size: usize) -> Self {
        let sentinel = Self::sentinel_for(size) as u32;
        let mut rays = vec![[[sentinel; RAY_LEN]; 4]; size * size];

        for row in 0..size {
            for col in 0..size {
                let cell = &mut rays[row * size + col];
                for dir in Direction::ALL {
                    let (dr, dc) = dir.step();
                    let ray = &mut cell[dir.index()];
                    for (slot, offset) in (-(RAY_CENTER as i32)..=RAY_CENTER as i32).enumerate() {
                        let r = row as i32 + dr * offset;
                        let c = col as i32 + dc * offset;
                        if r >= 0 && r < size as i32 && c >= 0 && c < size as i32 {
                            ray[slot] = (r as usize * size + c as usize) as u32;
                        }
                    }
                }
            }
        }

        Self { size, rays }
    }

    /// Index of the out-of-bounds sentinel slot
    #[inline]
    pub fn sentinel(&self) -> usize {
        Self::sentinel_for(self.size)
    }

    #[inline]
    fn sentinel_for(size: usize) -> usize {
        size * size
    }

    /// Ray through `pos` along `dir`
    #[inline]
    pub fn ray(&self, pos: Pos, dir: Direction) -> &Ray {
        &self.rays[pos.to_index(self.size)][dir.index()]
    }

    /// All four rays through the cell at `idx`
    #[inline]
    pub fn rays_at(&self, idx: usize) -> &[Ray; 4] {
        &self.rays[idx]
    }
}
