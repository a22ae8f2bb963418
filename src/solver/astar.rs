use crate::{
    solver::{CostQueue, GridSolver},
    working::WorkingGrid,
};

/// A* with the [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) to the leg
/// target as heuristic. Every step costs at least 1, so the heuristic is admissible and
/// consistent and the found leg paths are optimal.
#[derive(Default)]
pub struct AstarSolver {
    queue: CostQueue,
}

impl GridSolver for AstarSolver {
    const MARK_ON_PUSH: bool = false;

    fn prepare(&mut self, grid: &mut WorkingGrid, _start: usize, target: usize) {
        for ix in 0..grid.cells.len() {
            let h = grid.manhattan(ix, target);
            let cell = &mut grid.cells[ix];
            cell.heuristic = h;
            cell.f_score = cell.distance.saturating_add(u64::from(h));
        }
    }

    /// Ordered by f-score, preferring the cell estimated closer to the target on ties.
    fn push(&mut self, grid: &WorkingGrid, ix: usize) {
        let cell = &grid.cells[ix];
        self.queue.push(cell.f_score, cell.heuristic, ix);
    }

    fn pop(&mut self) -> Option<usize> {
        self.queue.pop()
    }

    fn relax(&self, grid: &mut WorkingGrid, ix: usize) {
        let cell = &mut grid.cells[ix];
        cell.f_score = cell.distance.saturating_add(u64::from(cell.heuristic));
    }
}

#[cfg(test)]
mod tests {
    use grid_util::Point;

    use super::*;
    use crate::{
        grid::Grid,
        solver::{dijkstra::DijkstraSolver, search_leg},
        INFINITE,
    };

    #[test]
    fn heads_straight_for_the_target() {
        let grid = Grid::new(3, 3, Point::new(0, 0), Point::new(2, 2)).unwrap();
        let mut working = WorkingGrid::prepare(&grid).unwrap();
        let leg = search_leg::<AstarSolver>(&mut working, 0, 8).unwrap();
        assert_eq!(leg.visited, vec![0, 3, 6, 7, 8]);
        assert_eq!(leg.path.unwrap(), vec![0, 3, 6, 7, 8]);
        assert_eq!(working.cells[8].f_score, 4);
        assert_eq!(working.cells[2].heuristic, 2);
        assert_eq!(working.cells[2].f_score, INFINITE);
    }

    /// Asserts that the optimal cost is found on a board where the heuristic is misleading.
    #[test]
    fn matches_dijkstra_cost_behind_a_wall() {
        // S....
        // ####.
        // F....
        let mut grid = Grid::new(3, 5, Point::new(0, 0), Point::new(0, 2)).unwrap();
        for x in 0..4 {
            grid.set_wall(Point::new(x, 1), true).unwrap();
        }
        grid.set_weight(Point::new(4, 0), Some(3)).unwrap();
        let mut working = WorkingGrid::prepare(&grid).unwrap();
        let astar = search_leg::<AstarSolver>(&mut working, 0, 10).unwrap();
        let astar_cost = working.cells[10].distance;
        let mut working = WorkingGrid::prepare(&grid).unwrap();
        let dijkstra = search_leg::<DijkstraSolver>(&mut working, 0, 10).unwrap();
        assert_eq!(astar_cost, working.cells[10].distance);
        assert_eq!(astar_cost, 12);
        assert_eq!(astar.path, dijkstra.path);
        assert!(astar.visited.len() <= dijkstra.visited.len());
    }
}
