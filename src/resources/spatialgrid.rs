//! Uniform grid broad-phase for projectile vs enemy checks.
//!
//! Rebuilt from scratch every frame from the live enemies' bounds. A body
//! spanning several cells is inserted into each of them; queries dedup.

use bevy_ecs::prelude::*;
use glam::Vec2;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::components::aabb::Aabb;

type Bucket = SmallVec<[Entity; 4]>;

#[derive(Resource, Debug, Clone)]
pub struct SpatialGrid {
    cell_size: f32,
    cells: FxHashMap<(i32, i32), Bucket>,
}

impl SpatialGrid {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size: cell_size.max(1e-5),
            cells: FxHashMap::default(),
        }
    }

    /// Drop every bucket. The cell size is kept.
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn world_to_cell(&self, p: Vec2) -> (i32, i32) {
        (
            (p.x / self.cell_size).floor() as i32,
            (p.y / self.cell_size).floor() as i32,
        )
    }

    /// Insert `entity` into every cell covered by `bounds`.
    pub fn insert(&mut self, entity: Entity, bounds: &Aabb) {
        let (ix0, iy0) = self.world_to_cell(bounds.pos);
        let (ix1, iy1) = self.world_to_cell(bounds.pos + bounds.size);
        for iy in iy0..=iy1 {
            for ix in ix0..=ix1 {
                self.cells.entry((ix, iy)).or_default().push(entity);
            }
        }
    }

    /// Entities in any cell touched by the box around the circle, each once.
    ///
    /// This is a broad-phase: callers still run the exact overlap test.
    pub fn query_circle(&self, center: Vec2, radius: f32) -> Vec<Entity> {
        self.query_aabb(&Aabb::from_center(center, Vec2::splat(radius)))
    }

    pub fn query_aabb(&self, bounds: &Aabb) -> Vec<Entity> {
        let (ix0, iy0) = self.world_to_cell(bounds.pos);
        let (ix1, iy1) = self.world_to_cell(bounds.pos + bounds.size);
        let mut out = Vec::new();
        let mut seen = FxHashSet::default();
        for iy in iy0..=iy1 {
            for ix in ix0..=ix1 {
                if let Some(bucket) = self.cells.get(&(ix, iy)) {
                    for &entity in bucket {
                        if seen.insert(entity) {
                            out.push(entity);
                        }
                    }
                }
            }
        }
        out
    }
}

impl Default for SpatialGrid {
    fn default() -> Self {
        Self::new(64.0)
    }
}
