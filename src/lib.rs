//! # grid_search
//!
//! The search engine behind an interactive pathfinding visualizer. A [Grid] holds walls,
//! weighted terrain and an ordered list of waypoints ("food" cells); one of four algorithms
//! ([Dijkstra](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm),
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm),
//! [breadth-first](https://en.wikipedia.org/wiki/Breadth-first_search) and
//! [depth-first](https://en.wikipedia.org/wiki/Depth-first_search) search) is run from the start
//! through every waypoint to the finish. The resulting [SearchResult] carries the order in which
//! cells were explored as well as the found route, ready to be replayed by an animation layer.
//!
//! Movement is 4-connected. Entering a weighted cell costs its weight, entering any other cell
//! costs 1. Positions are [Point]s with `x` the column and `y` the row.
//!
//! Like the rest of the crate, searches run on a private [WorkingGrid] copy so the caller's grid
//! is never touched. Connected components are tracked with a
//! [UnionFind](petgraph::unionfind::UnionFind) so that unreachable legs are rejected without
//! flood-filling the grid.
pub mod cell;
pub mod error;
pub mod grid;
pub mod pathfinder;
pub mod solver;
pub mod topology;
pub mod working;

pub use cell::Cell;
pub use error::{Result, SearchError};
pub use grid::Grid;
pub use grid_util::Point;
pub use pathfinder::{Pathfinder, SearchResult};
pub use solver::Algorithm;
pub use working::WorkingGrid;

/// Distance of a cell that has not been reached yet. Path costs are sums of `u32` weights over at
/// most one step per cell, so they stay below this value on any grid with fewer than 2^32 cells.
pub const INFINITE: u64 = u64::MAX;
/// Weight given to a cell by [Grid::place_weight].
pub const DEFAULT_WEIGHT: u32 = 5;
/// Inline capacity of neighbour buffers, a cell has at most 4 neighbours.
pub const N_SMALLVEC_SIZE: usize = 4;

/// Runs `algorithm` from `start` through each of `waypoints` (in order) to `finish`, using the
/// default [Pathfinder] configuration.
pub fn search(
    algorithm: Algorithm,
    grid: &Grid,
    start: Point,
    finish: Point,
    waypoints: &[Point],
) -> Result<SearchResult> {
    Pathfinder::default().search(algorithm, grid, start, finish, waypoints)
}
