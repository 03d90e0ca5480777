//! Uniform-grid spatial hashing for proximity queries.
//!
//! Particles are binned into square cells at least `cell_size` wide, then
//! sorted by cell with a counting sort (histogram, prefix sum, scatter) so
//! each cell's members sit in one contiguous slice. Any two points closer
//! than `cell_size` land in the same or adjacent cells, so a 3×3 block
//! lookup finds every candidate neighbor.

use crate::Vec2;

/// Upper bound on cells per axis. Wider extents grow the cell size instead.
const MAX_CELLS_PER_AXIS: usize = 1024;

/// Particles binned into a uniform grid covering their bounding box.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    origin: Vec2,
    cell_size: f32,
    cols: usize,
    rows: usize,
    /// `cell_start[c]..cell_start[c + 1]` indexes `indices` for cell `c`.
    cell_start: Vec<usize>,
    /// Particle indices sorted by cell.
    indices: Vec<usize>,
}

impl SpatialGrid {
    /// Bin `positions` into cells of at least `cell_size` pixels.
    ///
    /// `cell_size` must be positive and finite.
    pub fn build(positions: &[Vec2], cell_size: f32) -> Self {
        let (min, max) = bounding_box(positions);
        let extent = max - min;
        let cell_size = cell_size
            .max(extent.x / MAX_CELLS_PER_AXIS as f32)
            .max(extent.y / MAX_CELLS_PER_AXIS as f32);

        let cols = axis_cells(extent.x, cell_size);
        let rows = axis_cells(extent.y, cell_size);

        let mut grid = Self {
            origin: min,
            cell_size,
            cols,
            rows,
            cell_start: vec![0; cols * rows + 1],
            indices: vec![0; positions.len()],
        };

        // Histogram
        let keys: Vec<usize> = positions.iter().map(|&p| grid.cell_key(p)).collect();
        for &key in &keys {
            grid.cell_start[key + 1] += 1;
        }

        // Prefix sum
        for c in 1..grid.cell_start.len() {
            grid.cell_start[c] += grid.cell_start[c - 1];
        }

        // Scatter
        let mut cursor = grid.cell_start.clone();
        for (index, &key) in keys.iter().enumerate() {
            grid.indices[cursor[key]] = index;
            cursor[key] += 1;
        }

        grid
    }

    /// Effective cell size (may exceed the requested one for huge extents).
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Grid dimensions as `(cols, rows)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    /// Cell coordinates containing `p`, clamped to the grid.
    pub fn cell_of(&self, p: Vec2) -> (usize, usize) {
        let local = (p - self.origin) / self.cell_size;
        // `as` saturates negatives and NaN to 0
        let cx = (local.x.floor() as usize).min(self.cols - 1);
        let cy = (local.y.floor() as usize).min(self.rows - 1);
        (cx, cy)
    }

    /// Particle indices stored in cell `(cx, cy)`.
    pub fn cell(&self, cx: usize, cy: usize) -> &[usize] {
        let c = cy * self.cols + cx;
        &self.indices[self.cell_start[c]..self.cell_start[c + 1]]
    }

    /// Every particle index in the 3×3 block of cells around `p`.
    pub fn neighbors(&self, p: Vec2) -> impl Iterator<Item = usize> + '_ {
        let (cx, cy) = self.cell_of(p);
        let xs = cx.saturating_sub(1)..=(cx + 1).min(self.cols - 1);
        let ys = cy.saturating_sub(1)..=(cy + 1).min(self.rows - 1);
        ys.flat_map(move |y| xs.clone().map(move |x| (x, y)))
            .flat_map(move |(x, y)| self.cell(x, y).iter().copied())
    }

    fn cell_key(&self, p: Vec2) -> usize {
        let (cx, cy) = self.cell_of(p);
        cy * self.cols + cx
    }
}

fn bounding_box(positions: &[Vec2]) -> (Vec2, Vec2) {
    let finite = positions.iter().filter(|p| p.is_finite());
    let min = finite.clone().fold(Vec2::splat(f32::INFINITY), |acc, &p| acc.min(p));
    let max = finite.fold(Vec2::splat(f32::NEG_INFINITY), |acc, &p| acc.max(p));
    if min.x > max.x {
        (Vec2::ZERO, Vec2::ZERO)
    } else {
        (min, max)
    }
}

fn axis_cells(extent: f32, cell_size: f32) -> usize {
    ((extent / cell_size).floor() as usize + 1).min(MAX_CELLS_PER_AXIS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_index_binned_once() {
        let positions: Vec<Vec2> = (0..100)
            .map(|i| Vec2::new((i * 37 % 500) as f32, (i * 91 % 300) as f32))
            .collect();
        let grid = SpatialGrid::build(&positions, 100.0);
        let (cols, rows) = grid.dimensions();

        let mut seen = vec![false; positions.len()];
        for y in 0..rows {
            for x in 0..cols {
                for &i in grid.cell(x, y) {
                    assert!(!seen[i]);
                    seen[i] = true;
                    assert_eq!(grid.cell_of(positions[i]), (x, y));
                }
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_neighbors_cover_close_points() {
        let positions = vec![
            Vec2::new(99.0, 99.0),
            Vec2::new(101.0, 101.0),
            Vec2::new(450.0, 20.0),
        ];
        let grid = SpatialGrid::build(&positions, 100.0);
        let near: Vec<usize> = grid.neighbors(positions[0]).collect();
        assert!(near.contains(&1));
        assert!(!near.contains(&2));
    }

    #[test]
    fn test_empty_and_degenerate_inputs() {
        let grid = SpatialGrid::build(&[], 50.0);
        assert_eq!(grid.dimensions(), (1, 1));
        assert_eq!(grid.neighbors(Vec2::ZERO).count(), 0);

        let same = vec![Vec2::new(5.0, 5.0); 4];
        let grid = SpatialGrid::build(&same, 50.0);
        assert_eq!(grid.neighbors(Vec2::new(5.0, 5.0)).count(), 4);
    }

    #[test]
    fn test_huge_extent_caps_cells() {
        let positions = vec![Vec2::ZERO, Vec2::new(1.0e7, 1.0e7)];
        let grid = SpatialGrid::build(&positions, 1.0);
        let (cols, rows) = grid.dimensions();
        assert!(cols <= MAX_CELLS_PER_AXIS && rows <= MAX_CELLS_PER_AXIS);
        assert!(grid.cell_size() >= 1.0e7 / MAX_CELLS_PER_AXIS as f32);
    }

    #[test]
    fn test_non_finite_positions_do_not_panic() {
        let positions = vec![Vec2::new(f32::NAN, 1.0), Vec2::new(10.0, 10.0)];
        let grid = SpatialGrid::build(&positions, 100.0);
        assert_eq!(grid.neighbors(Vec2::new(10.0, 10.0)).count(), 2);
    }
}
