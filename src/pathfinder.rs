use grid_util::Point;
use itertools::Itertools;
use log::{debug, info, warn};

use crate::{
    cell::Cell,
    error::{Result, SearchError},
    grid::Grid,
    solver::{Algorithm, LegSearch},
    working::WorkingGrid,
};

/// Everything an animation layer needs to replay a search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchResult {
    /// Cells in the order they were taken off the frontier, legs concatenated in order.
    pub visited_in_order: Vec<Cell>,
    /// The route, one segment per leg from the leg start to its target inclusive. Consecutive
    /// segments therefore both contain the waypoint joining them.
    pub path_in_order: Vec<Cell>,
    /// Set to [SearchError::LegUnreachable] when a leg failed and the route is partial.
    pub unreachable: Option<SearchError>,
}

impl SearchResult {
    /// True if every leg up to the finish was routed.
    pub fn is_complete(&self) -> bool {
        self.unreachable.is_none()
    }

    /// Turns a partial result into its [SearchError::LegUnreachable] error.
    pub fn into_complete(self) -> Result<SearchResult> {
        match self.unreachable {
            Some(e) => Err(e),
            None => Ok(self),
        }
    }

    pub fn visited_points(&self) -> Vec<Point> {
        self.visited_in_order.iter().map(Cell::point).collect()
    }

    pub fn path_points(&self) -> Vec<Point> {
        self.path_in_order.iter().map(Cell::point).collect()
    }

    /// Sum of the cost of entering each route cell after the first. Waypoints repeated at leg
    /// boundaries are counted once.
    pub fn path_cost(&self) -> u64 {
        self.steps().map(|(_, to)| u64::from(to.traversal_cost())).sum()
    }

    /// Number of moves along the route.
    pub fn path_hops(&self) -> usize {
        self.steps().count()
    }

    fn steps(&self) -> impl Iterator<Item = (&Cell, &Cell)> {
        self.path_in_order
            .iter()
            .tuple_windows()
            .filter(|(a, b)| (a.row, a.col) != (b.row, b.col))
    }
}

/// Runs searches over a sequence of legs, start to each waypoint in turn to finish.
#[derive(Clone, Debug)]
pub struct Pathfinder {
    /// Reject legs whose endpoints lie in different connected components before searching.
    /// Such legs then contribute no visited cells. When disabled the failed leg's exploration
    /// is kept in the result.
    pub check_components: bool,
}

impl Default for Pathfinder {
    fn default() -> Pathfinder {
        Pathfinder {
            check_components: true,
        }
    }
}

impl Pathfinder {
    pub fn new() -> Pathfinder {
        Pathfinder::default()
    }

    /// Searches from `start` through `waypoints` to `finish` on a private copy of `grid`.
    ///
    /// Malformed input fails with [SearchError::InvalidGrid]. A leg that cannot be routed does
    /// not fail the call: the legs before it are returned with
    /// [unreachable](SearchResult::unreachable) set.
    pub fn search(
        &self,
        algorithm: Algorithm,
        grid: &Grid,
        start: Point,
        finish: Point,
        waypoints: &[Point],
    ) -> Result<SearchResult> {
        let working = WorkingGrid::prepare(grid)?;
        let stops = Self::stops(grid, start, finish, waypoints)?;
        self.run(algorithm, working, &stops)
    }

    /// Arena indices of start, waypoints and finish in visiting order.
    fn stops(grid: &Grid, start: Point, finish: Point, waypoints: &[Point]) -> Result<Vec<usize>> {
        let start_ix = grid.ix_checked(start)?;
        let finish_ix = grid.ix_checked(finish)?;
        if start_ix == finish_ix {
            return Err(SearchError::InvalidGrid(format!(
                "start and finish are both {start}"
            )));
        }
        let mut stops = Vec::with_capacity(waypoints.len() + 2);
        stops.push(start_ix);
        for p in waypoints {
            stops.push(grid.ix_checked(*p)?);
        }
        stops.push(finish_ix);
        if let Some(&wall) = stops.iter().find(|&&ix| grid.cells()[ix].is_wall) {
            return Err(SearchError::InvalidGrid(format!(
                "{} is a wall",
                grid.cells()[wall].point()
            )));
        }
        Ok(stops)
    }

    /// Runs one leg per consecutive pair of `stops` on `working`, stopping at the first leg that
    /// cannot be routed.
    pub fn run(
        &self,
        algorithm: Algorithm,
        mut working: WorkingGrid,
        stops: &[usize],
    ) -> Result<SearchResult> {
        let mut result = SearchResult::default();
        for (leg, (&from, &to)) in stops.iter().tuple_windows().enumerate() {
            let unreachable = SearchError::LegUnreachable {
                leg,
                from: working.cells[from].point(),
                to: working.cells[to].point(),
            };
            if self.check_components && !working.connected(from, to) {
                info!("{unreachable}");
                result.unreachable = Some(unreachable);
                break;
            }
            debug!(
                "Leg {leg}: {algorithm} from {} to {}",
                working.cells[from].point(),
                working.cells[to].point()
            );
            let LegSearch { visited, path } = algorithm.search_leg(&mut working, from, to)?;
            result
                .visited_in_order
                .extend(visited.iter().map(|&ix| working.cells[ix]));
            match path {
                Some(path) => {
                    debug!("Leg {leg}: {} visited, {} on path", visited.len(), path.len());
                    result
                        .path_in_order
                        .extend(path.iter().map(|&ix| working.cells[ix]));
                }
                None => {
                    if self.check_components {
                        warn!("Reachable leg {leg} could not be pathed, are the components correct?");
                    } else {
                        info!("{unreachable}");
                    }
                    result.unreachable = Some(unreachable);
                    break;
                }
            }
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_grid(n: usize) -> Grid {
        Grid::new(n, n, Point::new(0, 0), Point::new(n as i32 - 1, n as i32 - 1)).unwrap()
    }

    #[test]
    fn single_leg_without_waypoints() {
        let grid = open_grid(5);
        let result = grid.search(Algorithm::Dijkstra).unwrap();
        assert!(result.is_complete());
        assert_eq!(result.path_in_order.len(), 9);
        assert_eq!(result.path_cost(), 8);
        assert_eq!(result.path_points().last(), Some(&Point::new(4, 4)));
    }

    #[test]
    fn heavy_legs_cost_more_than_u32() {
        // SwowF
        let mut grid = Grid::new(1, 5, Point::new(0, 0), Point::new(4, 0)).unwrap();
        grid.set_weight(Point::new(1, 0), Some(3_000_000_000)).unwrap();
        grid.set_weight(Point::new(3, 0), Some(3_000_000_000)).unwrap();
        grid.add_waypoint(Point::new(2, 0)).unwrap();
        for algorithm in Algorithm::ALL {
            let result = grid.search(algorithm).unwrap();
            assert!(result.is_complete(), "{algorithm}");
            assert_eq!(result.path_hops(), 4);
            assert_eq!(result.path_cost(), 6_000_000_002, "{algorithm}");
        }
    }

    #[test]
    fn waypoint_legs_are_concatenated() {
        let mut grid = open_grid(5);
        grid.add_waypoint(Point::new(4, 0)).unwrap();
        for algorithm in Algorithm::ALL {
            let result = grid.search(algorithm).unwrap();
            let path = result.path_points();
            assert_eq!(path.first(), Some(&Point::new(0, 0)));
            assert_eq!(path.last(), Some(&Point::new(4, 4)));
            assert!(path.contains(&Point::new(4, 0)), "{algorithm}");
            if algorithm.guarantees_shortest_path() {
                assert_eq!(path.len(), 10);
                assert_eq!(path[4], Point::new(4, 0));
                assert_eq!(path[5], Point::new(4, 0));
                assert_eq!(result.path_hops(), 8);
            }
        }
    }

    #[test]
    fn composition_matches_independent_legs() {
        let mut grid = open_grid(6);
        grid.set_wall(Point::new(2, 2), true).unwrap();
        grid.set_weight(Point::new(3, 1), Some(5)).unwrap();
        let p = Point::new(5, 0);
        for algorithm in Algorithm::ALL {
            let combined = search(&grid, algorithm, &[p]);
            let leg_1 = Pathfinder::default()
                .search(algorithm, &grid, grid.start(), p, &[])
                .unwrap();
            let leg_2 = Pathfinder::default()
                .search(algorithm, &grid, p, grid.finish(), &[])
                .unwrap();
            let mut visited = leg_1.visited_in_order.clone();
            visited.extend(leg_2.visited_in_order.iter().copied());
            assert_eq!(combined.visited_in_order, visited, "{algorithm}");
            let mut path = leg_1.path_in_order.clone();
            path.extend(leg_2.path_in_order.iter().copied());
            assert_eq!(combined.path_in_order, path, "{algorithm}");
        }
    }

    fn search(grid: &Grid, algorithm: Algorithm, waypoints: &[Point]) -> SearchResult {
        Pathfinder::default()
            .search(algorithm, grid, grid.start(), grid.finish(), waypoints)
            .unwrap()
    }

    #[test]
    fn failed_leg_returns_partial_route() {
        // S.o..
        // .....
        // .....
        // ....#
        // ...#F
        let mut grid = open_grid(5);
        grid.add_waypoint(Point::new(2, 0)).unwrap();
        grid.set_wall(Point::new(4, 3), true).unwrap();
        grid.set_wall(Point::new(3, 4), true).unwrap();
        for algorithm in Algorithm::ALL {
            let result = grid.search(algorithm).unwrap();
            assert!(!result.is_complete());
            assert_eq!(
                result.unreachable,
                Some(SearchError::LegUnreachable {
                    leg: 1,
                    from: Point::new(2, 0),
                    to: Point::new(4, 4)
                })
            );
            assert_eq!(result.path_points().last(), Some(&Point::new(2, 0)));
            if algorithm.guarantees_shortest_path() {
                assert_eq!(result.path_in_order.len(), 3, "{algorithm}");
            }
            assert!(result.clone().into_complete().is_err());
        }
    }

    #[test]
    fn unreachable_first_leg_is_empty() {
        let mut grid = open_grid(3);
        grid.set_wall(Point::new(1, 0), true).unwrap();
        grid.set_wall(Point::new(0, 1), true).unwrap();
        let result = grid.search(Algorithm::AStar).unwrap();
        assert!(result.visited_in_order.is_empty());
        assert!(result.path_in_order.is_empty());

        let pathfinder = Pathfinder {
            check_components: false,
        };
        let result = pathfinder
            .search(Algorithm::AStar, &grid, grid.start(), grid.finish(), &[])
            .unwrap();
        assert_eq!(result.visited_points(), vec![Point::new(0, 0)]);
        assert!(result.path_in_order.is_empty());
        assert!(!result.is_complete());
    }

    #[test]
    fn rejects_invalid_endpoints() {
        let mut grid = open_grid(3);
        grid.set_wall(Point::new(1, 1), true).unwrap();
        let pathfinder = Pathfinder::new();
        let cases = [
            (Point::new(0, 0), Point::new(0, 0), vec![]),
            (Point::new(0, 0), Point::new(3, 0), vec![]),
            (Point::new(1, 1), Point::new(2, 2), vec![]),
            (Point::new(0, 0), Point::new(2, 2), vec![Point::new(1, 1)]),
            (Point::new(0, 0), Point::new(2, 2), vec![Point::new(-1, 0)]),
        ];
        for (start, finish, waypoints) in cases {
            let err = pathfinder
                .search(Algorithm::BreadthFirst, &grid, start, finish, &waypoints)
                .unwrap_err();
            assert!(matches!(err, SearchError::InvalidGrid(_)));
        }
    }

    #[test]
    fn caller_grid_is_untouched() {
        let grid = open_grid(4);
        let before = grid.cells().to_vec();
        let result = grid.search(Algorithm::Dijkstra).unwrap();
        assert!(result.visited_in_order.iter().all(|c| c.is_visited));
        assert_eq!(grid.cells(), before.as_slice());
    }
}
