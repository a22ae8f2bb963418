//! Neighbourhood and connectivity of a rectangular, 4-connected grid stored row-major.
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::{cell::Cell, N_SMALLVEC_SIZE};

/// The in-bounds neighbours of `ix`, always in the order up, down, left, right. Search traces
/// depend on this order.
pub fn neighbours(rows: usize, cols: usize, ix: usize) -> SmallVec<[usize; N_SMALLVEC_SIZE]> {
    let (row, col) = (ix / cols, ix % cols);
    let mut n = SmallVec::new();
    if row > 0 {
        n.push(ix - cols);
    }
    if row + 1 < rows {
        n.push(ix + cols);
    }
    if col > 0 {
        n.push(ix - 1);
    }
    if col + 1 < cols {
        n.push(ix + 1);
    }
    n
}

/// Generates a new [UnionFind] structure and links up free grid neighbours to the same
/// components. Only the cells below and to the right are joined, the rest follows by symmetry.
pub fn generate_components(rows: usize, cols: usize, cells: &[Cell]) -> UnionFind<usize> {
    let mut components = UnionFind::new(rows * cols);
    for ix in 0..rows * cols {
        if cells[ix].is_wall {
            continue;
        }
        let (row, col) = (ix / cols, ix % cols);
        if row + 1 < rows && !cells[ix + cols].is_wall {
            components.union(ix, ix + cols);
        }
        if col + 1 < cols && !cells[ix + 1].is_wall {
            components.union(ix, ix + 1);
        }
    }
    components
}
