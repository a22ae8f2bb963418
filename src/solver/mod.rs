use core::fmt;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::str::FromStr;

use crate::{
    error::{Result, SearchError},
    working::WorkingGrid,
    INFINITE,
};

pub mod astar;
pub mod bfs;
pub mod dfs;
pub mod dijkstra;

use astar::AstarSolver;
use bfs::BfsSolver;
use dfs::DfsSolver;
use dijkstra::DijkstraSolver;

/// A frontier policy. All four searches share the traversal in [search_leg] and differ only in
/// how the frontier is ordered and when a cell counts as visited.
pub trait GridSolver: Default {
    /// Cells are marked visited as they enter the frontier (BFS, DFS) rather than when they
    /// leave it (Dijkstra, A*). Changes the visited order under ties.
    const MARK_ON_PUSH: bool;
    /// Expand neighbours right, left, down, up instead of up, down, left, right.
    const REVERSE_NEIGHBOURS: bool = false;

    /// Called once per leg after the search state has been reset.
    fn prepare(&mut self, _grid: &mut WorkingGrid, _start: usize, _target: usize) {}
    fn push(&mut self, grid: &WorkingGrid, ix: usize);
    fn pop(&mut self) -> Option<usize>;
    /// Called after a cell's distance and predecessor were improved.
    fn relax(&self, _grid: &mut WorkingGrid, _ix: usize) {}
}

/// Outcome of a single leg: every cell taken off the frontier, and the route if the target was
/// reached.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LegSearch {
    pub visited: Vec<usize>,
    pub path: Option<Vec<usize>>,
}

/// Runs one leg from `start` to `target` on `grid` with the frontier policy `S`.
pub fn search_leg<S: GridSolver>(
    grid: &mut WorkingGrid,
    start: usize,
    target: usize,
) -> Result<LegSearch> {
    let mut solver = S::default();
    grid.reset_leg(start);
    solver.prepare(grid, start, target);
    if S::MARK_ON_PUSH {
        grid.cells[start].is_visited = true;
    }
    solver.push(grid, start);

    let mut visited = Vec::new();
    while let Some(ix) = solver.pop() {
        if grid.cells[ix].is_wall {
            continue;
        }
        if !S::MARK_ON_PUSH {
            // Stale queue entry of a cell that was already settled
            if grid.cells[ix].is_visited {
                continue;
            }
            if grid.cells[ix].distance == INFINITE {
                break;
            }
            grid.cells[ix].is_visited = true;
        }
        visited.push(ix);
        if ix == target {
            let path = grid.path_to(target)?;
            return Ok(LegSearch {
                visited,
                path: Some(path),
            });
        }

        let distance = grid.cells[ix].distance;
        let mut neighbours = grid.neighbours(ix);
        if S::REVERSE_NEIGHBOURS {
            neighbours.reverse();
        }
        for n in neighbours {
            let cell = &mut grid.cells[n];
            if cell.is_visited || cell.is_wall {
                continue;
            }
            if S::MARK_ON_PUSH {
                cell.is_visited = true;
                cell.previous = Some(ix);
                cell.distance = distance.saturating_add(1);
            } else {
                let candidate = distance.saturating_add(u64::from(cell.traversal_cost()));
                if candidate >= cell.distance {
                    continue;
                }
                cell.distance = candidate;
                cell.previous = Some(ix);
                solver.relax(grid, n);
            }
            solver.push(grid, n);
        }
    }
    Ok(LegSearch {
        visited,
        path: None,
    })
}

struct SmallestCostHolder {
    estimated_cost: u64,
    tie_break: u32,
    seq: usize,
    index: usize,
}

impl Eq for SmallestCostHolder {}

impl PartialEq for SmallestCostHolder {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl PartialOrd for SmallestCostHolder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallestCostHolder {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap pops the smallest estimate, then the smallest tie break, then
        // the earliest insertion
        other
            .estimated_cost
            .cmp(&self.estimated_cost)
            .then_with(|| other.tie_break.cmp(&self.tie_break))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-priority queue of arena indices with deterministic tie-breaking. Improving a cell pushes
/// it again; outdated entries are skipped when popped because the cell is already visited.
#[derive(Default)]
pub struct CostQueue {
    heap: BinaryHeap<SmallestCostHolder>,
    seq: usize,
}

impl CostQueue {
    pub fn push(&mut self, estimated_cost: u64, tie_break: u32, index: usize) {
        self.heap.push(SmallestCostHolder {
            estimated_cost,
            tie_break,
            seq: self.seq,
            index,
        });
        self.seq += 1;
    }

    pub fn pop(&mut self) -> Option<usize> {
        self.heap.pop().map(|h| h.index)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

/// The search algorithms a user can pick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Dijkstra,
    AStar,
    BreadthFirst,
    DepthFirst,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Dijkstra,
        Algorithm::AStar,
        Algorithm::BreadthFirst,
        Algorithm::DepthFirst,
    ];

    /// Whether the algorithm takes cell weights into account.
    pub fn is_weighted(self) -> bool {
        matches!(self, Algorithm::Dijkstra | Algorithm::AStar)
    }

    /// Whether the found route is optimal: by cost for weighted algorithms, by hops for BFS.
    pub fn guarantees_shortest_path(self) -> bool {
        !matches!(self, Algorithm::DepthFirst)
    }

    pub fn search_leg(self, grid: &mut WorkingGrid, start: usize, target: usize) -> Result<LegSearch> {
        match self {
            Algorithm::Dijkstra => search_leg::<DijkstraSolver>(grid, start, target),
            Algorithm::AStar => search_leg::<AstarSolver>(grid, start, target),
            Algorithm::BreadthFirst => search_leg::<BfsSolver>(grid, start, target),
            Algorithm::DepthFirst => search_leg::<DfsSolver>(grid, start, target),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::AStar => "astar",
            Algorithm::BreadthFirst => "bfs",
            Algorithm::DepthFirst => "dfs",
        };
        f.write_str(name)
    }
}

impl FromStr for Algorithm {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Algorithm> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dijkstra" => Ok(Algorithm::Dijkstra),
            "astar" | "a*" => Ok(Algorithm::AStar),
            "bfs" | "breadth-first" => Ok(Algorithm::BreadthFirst),
            "dfs" | "depth-first" => Ok(Algorithm::DepthFirst),
            _ => Err(SearchError::UnknownAlgorithm(s.to_owned())),
        }
    }
}
