use grid_util::Point;
use log::error;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::{
    cell::Cell,
    error::{Result, SearchError},
    grid::Grid,
    topology, N_SMALLVEC_SIZE,
};

/// The private arena a search runs on: a copy of the caller's cells with fresh search state,
/// addressed by `row * cols + col`. Predecessor links are arena indices, so the chain of
/// [Cell::previous] is followed by lookup rather than by reference.
#[derive(Clone, Debug)]
pub struct WorkingGrid {
    rows: usize,
    cols: usize,
    pub cells: Vec<Cell>,
    pub components: UnionFind<usize>,
}

impl WorkingGrid {
    /// Copies `grid` and resets every cell's search state. The copy shares nothing with the live
    /// grid. Components are regenerated if the live grid has them marked dirty.
    pub fn prepare(grid: &Grid) -> Result<WorkingGrid> {
        let (rows, cols) = (grid.rows(), grid.cols());
        if grid.cells().len() != rows * cols {
            return Err(SearchError::InvalidGrid(format!(
                "{} cells do not form a {rows}x{cols} grid",
                grid.cells().len()
            )));
        }
        let mut cells = grid.cells().to_vec();
        for cell in cells.iter_mut() {
            cell.reset_search_state();
        }
        let components = if grid.components_dirty {
            topology::generate_components(rows, cols, &cells)
        } else {
            grid.components.clone()
        };
        Ok(WorkingGrid {
            rows,
            cols,
            cells,
            components,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn ix_point(&self, point: Point) -> Option<usize> {
        if point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.cols
            && (point.y as usize) < self.rows
        {
            Some(point.y as usize * self.cols + point.x as usize)
        } else {
            None
        }
    }

    pub fn neighbours(&self, ix: usize) -> SmallVec<[usize; N_SMALLVEC_SIZE]> {
        topology::neighbours(self.rows, self.cols, ix)
    }

    /// Manhattan distance between two cells.
    pub fn manhattan(&self, a: usize, b: usize) -> u32 {
        self.cells[a].point().manhattan_distance(&self.cells[b].point()) as u32
    }

    pub fn connected(&self, a: usize, b: usize) -> bool {
        self.components.equiv(a, b)
    }

    /// Clears the search state of the previous leg and seeds `start` with distance zero. Walls,
    /// weights and endpoints are left alone.
    pub fn reset_leg(&mut self, start: usize) {
        for cell in self.cells.iter_mut() {
            cell.reset_search_state();
        }
        self.cells[start].distance = 0;
    }

    /// Walks the predecessor links back from `target` and returns the path in start to target
    /// order. A chain longer than the grid can only come from a corrupted arena.
    pub fn path_to(&self, target: usize) -> Result<Vec<usize>> {
        let mut path = Vec::new();
        let mut current = Some(target);
        while let Some(ix) = current {
            if path.len() >= self.cells.len() {
                error!(
                    "Predecessor chain from {} exceeds {} cells",
                    self.cells[target].point(),
                    self.cells.len()
                );
                return Err(SearchError::InternalInvariantViolation(format!(
                    "predecessor chain from {} does not terminate",
                    self.cells[target].point()
                )));
            }
            path.push(ix);
            current = self.cells[ix].previous;
        }
        path.reverse();
        Ok(path)
    }
}
