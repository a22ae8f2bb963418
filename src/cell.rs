use grid_util::Point;

use crate::INFINITE;

/// A single grid position. The static flags are edited through [Grid](crate::Grid) tool actions,
/// the search state is only ever written on a [WorkingGrid](crate::WorkingGrid).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub is_start: bool,
    pub is_finish: bool,
    pub is_wall: bool,
    /// Marks a waypoint that has to be visited before the finish.
    pub is_food: bool,
    pub is_weight: bool,
    /// Cost of entering this cell, only used when `is_weight` is set.
    pub weight_value: u32,
    pub is_visited: bool,
    pub distance: u64,
    /// Arena index of the predecessor on the best known path.
    pub previous: Option<usize>,
    pub heuristic: u32,
    pub f_score: u64,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Cell {
        Cell {
            row,
            col,
            is_start: false,
            is_finish: false,
            is_wall: false,
            is_food: false,
            is_weight: false,
            weight_value: 1,
            is_visited: false,
            distance: INFINITE,
            previous: None,
            heuristic: 0,
            f_score: INFINITE,
        }
    }

    pub fn point(&self) -> Point {
        Point::new(self.col as i32, self.row as i32)
    }

    /// Cost of moving into this cell from a neighbour.
    pub fn traversal_cost(&self) -> u32 {
        if self.is_weight {
            self.weight_value.max(1)
        } else {
            1
        }
    }

    /// True for cells that must keep their terrain free: start, finish and waypoints.
    pub fn is_endpoint(&self) -> bool {
        self.is_start || self.is_finish || self.is_food
    }

    pub fn reset_search_state(&mut self) {
        self.is_visited = false;
        self.distance = INFINITE;
        self.previous = None;
        self.heuristic = 0;
        self.f_score = INFINITE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_only_counts_when_flagged() {
        let mut cell = Cell::new(2, 3);
        cell.weight_value = 5;
        assert_eq!(cell.traversal_cost(), 1);
        cell.is_weight = true;
        assert_eq!(cell.traversal_cost(), 5);
        assert_eq!(cell.point(), Point::new(3, 2));
    }

    #[test]
    fn reset_keeps_static_fields() {
        let mut cell = Cell::new(0, 0);
        cell.is_weight = true;
        cell.weight_value = 5;
        cell.is_visited = true;
        cell.distance = 7;
        cell.previous = Some(3);
        cell.heuristic = 2;
        cell.f_score = 9;
        cell.reset_search_state();
        assert!(!cell.is_visited);
        assert_eq!(cell.distance, INFINITE);
        assert_eq!(cell.previous, None);
        assert_eq!(cell.heuristic, 0);
        assert_eq!(cell.f_score, INFINITE);
        assert!(cell.is_weight);
        assert_eq!(cell.weight_value, 5);
    }
}
