use crate::{
    solver::{CostQueue, GridSolver},
    working::WorkingGrid,
};

/// Uniform-cost search: settles cells in order of distance from the leg start.
#[derive(Default)]
pub struct DijkstraSolver {
    queue: CostQueue,
}

impl GridSolver for DijkstraSolver {
    const MARK_ON_PUSH: bool = false;

    fn push(&mut self, grid: &WorkingGrid, ix: usize) {
        self.queue.push(grid.cells[ix].distance, 0, ix);
    }

    fn pop(&mut self) -> Option<usize> {
        self.queue.pop()
    }
}

#[cfg(test)]
mod tests {
    use grid_util::Point;

    use super::*;
    use crate::{
        grid::Grid,
        solver::{astar::AstarSolver, search_leg, Algorithm},
    };

    fn points(grid: &WorkingGrid, ixs: &[usize]) -> Vec<(i32, i32)> {
        ixs.iter()
            .map(|&ix| {
                let p = grid.cells[ix].point();
                (p.y, p.x)
            })
            .collect()
    }

    #[test]
    fn visits_by_distance_in_insertion_order() {
        let grid = Grid::new(3, 3, Point::new(0, 0), Point::new(2, 2)).unwrap();
        let mut working = WorkingGrid::prepare(&grid).unwrap();
        let leg = search_leg::<DijkstraSolver>(&mut working, 0, 8).unwrap();
        assert_eq!(
            points(&working, &leg.visited),
            vec![(0, 0), (1, 0), (0, 1), (2, 0), (1, 1), (0, 2), (2, 1), (1, 2), (2, 2)]
        );
        assert_eq!(
            points(&working, &leg.path.unwrap()),
            vec![(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)]
        );
    }

    /// Asserts that a heavy cell on the direct route is avoided when a cheaper detour exists.
    #[test]
    fn routes_around_weight() {
        // S.w.F
        // .....
        let mut grid = Grid::new(2, 5, Point::new(0, 0), Point::new(4, 0)).unwrap();
        grid.set_weight(Point::new(2, 0), Some(5)).unwrap();
        let mut working = WorkingGrid::prepare(&grid).unwrap();
        let leg = search_leg::<DijkstraSolver>(&mut working, 0, 4).unwrap();
        let path = leg.path.unwrap();
        assert!(!path.contains(&2));
        assert_eq!(working.cells[4].distance, 6);
    }

    #[test]
    fn reaches_past_maximum_weight() {
        // SwF
        let mut grid = Grid::new(1, 3, Point::new(0, 0), Point::new(2, 0)).unwrap();
        grid.set_weight(Point::new(1, 0), Some(u32::MAX)).unwrap();
        let mut working = WorkingGrid::prepare(&grid).unwrap();
        let leg = search_leg::<DijkstraSolver>(&mut working, 0, 2).unwrap();
        assert_eq!(leg.path, Some(vec![0, 1, 2]));
        assert_eq!(working.cells[2].distance, u64::from(u32::MAX) + 1);

        let leg = search_leg::<AstarSolver>(&mut working, 0, 2).unwrap();
        assert_eq!(leg.path, Some(vec![0, 1, 2]));
        assert!(grid.search(Algorithm::Dijkstra).unwrap().is_complete());
    }

    #[test]
    fn unreachable_target_exhausts_frontier() {
        // S#.
        // ##F
        let mut grid = Grid::new(2, 3, Point::new(0, 0), Point::new(2, 1)).unwrap();
        grid.set_wall(Point::new(1, 0), true).unwrap();
        grid.set_wall(Point::new(0, 1), true).unwrap();
        grid.set_wall(Point::new(1, 1), true).unwrap();
        let mut working = WorkingGrid::prepare(&grid).unwrap();
        let leg = search_leg::<DijkstraSolver>(&mut working, 0, 5).unwrap();
        assert_eq!(leg.visited, vec![0]);
        assert!(leg.path.is_none());
    }
}
