use core::fmt;
use grid_util::Point;
use log::info;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::{
    cell::Cell,
    error::{Result, SearchError},
    pathfinder::{Pathfinder, SearchResult},
    solver::Algorithm,
    topology, DEFAULT_WEIGHT, N_SMALLVEC_SIZE,
};

/// The live grid edited by the user. [Grid] maintains information about connected components
/// using a [UnionFind] structure next to the [Cell]s themselves, so that searches can reject
/// unreachable targets up front.
///
/// Exactly one cell is the start and exactly one is the finish. Walls never share a cell with
/// the start, the finish, a waypoint or a weight: tool actions that place one of those on a wall
/// replace the wall.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    start: Point,
    finish: Point,
    waypoints: Vec<Point>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl Grid {
    /// An empty `rows` x `cols` grid with the given start and finish.
    pub fn new(rows: usize, cols: usize, start: Point, finish: Point) -> Result<Grid> {
        if rows == 0 || cols == 0 {
            return Err(SearchError::InvalidGrid("grid has no cells".to_owned()));
        }
        let cells = (0..rows * cols)
            .map(|ix| Cell::new(ix / cols, ix % cols))
            .collect();
        let mut grid = Grid {
            rows,
            cols,
            cells,
            start,
            finish,
            waypoints: Vec::new(),
            components: UnionFind::new(rows * cols),
            components_dirty: false,
        };
        let start_ix = grid.ix_checked(start)?;
        let finish_ix = grid.ix_checked(finish)?;
        if start_ix == finish_ix {
            return Err(SearchError::InvalidGrid(format!(
                "start and finish are both {start}"
            )));
        }
        grid.cells[start_ix].is_start = true;
        grid.cells[finish_ix].is_finish = true;
        grid.generate_components();
        Ok(grid)
    }

    /// Builds a grid from rows of cells as held by a UI layer. Waypoints are collected in
    /// row-major order; use [add_waypoint](Self::add_waypoint) to control their order instead.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Grid> {
        let cols = rows.first().map_or(0, |r| r.len());
        if cols == 0 {
            return Err(SearchError::InvalidGrid("grid has no cells".to_owned()));
        }
        if let Some((r, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != cols) {
            return Err(SearchError::InvalidGrid(format!(
                "row {r} has {} cells, expected {cols}",
                row.len()
            )));
        }
        let n_rows = rows.len();
        let cells: Vec<Cell> = rows.into_iter().flatten().collect();

        let mut start = None;
        let mut finish = None;
        let mut waypoints = Vec::new();
        for (ix, cell) in cells.iter().enumerate() {
            let (row, col) = (ix / cols, ix % cols);
            if (cell.row, cell.col) != (row, col) {
                return Err(SearchError::InvalidGrid(format!(
                    "cell at ({row}, {col}) claims to be at ({}, {})",
                    cell.row, cell.col
                )));
            }
            if cell.is_wall && (cell.is_endpoint() || cell.is_weight) {
                return Err(SearchError::InvalidGrid(format!(
                    "wall at {} overlaps an endpoint or weight",
                    cell.point()
                )));
            }
            if cell.is_start && cell.is_finish {
                return Err(SearchError::InvalidGrid(format!(
                    "start and finish are both {}",
                    cell.point()
                )));
            }
            if cell.is_start && start.replace(cell.point()).is_some() {
                return Err(SearchError::InvalidGrid("more than one start".to_owned()));
            }
            if cell.is_finish && finish.replace(cell.point()).is_some() {
                return Err(SearchError::InvalidGrid("more than one finish".to_owned()));
            }
            if cell.is_food {
                waypoints.push(cell.point());
            }
        }
        let start = start.ok_or_else(|| SearchError::InvalidGrid("no start".to_owned()))?;
        let finish = finish.ok_or_else(|| SearchError::InvalidGrid("no finish".to_owned()))?;

        let mut grid = Grid {
            rows: n_rows,
            cols,
            cells,
            start,
            finish,
            waypoints,
            components: UnionFind::new(n_rows * cols),
            components_dirty: false,
        };
        grid.generate_components();
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
    pub fn start(&self) -> Point {
        self.start
    }
    pub fn finish(&self) -> Point {
        self.finish
    }
    /// Waypoints in the order they have to be visited.
    pub fn waypoints(&self) -> &[Point] {
        &self.waypoints
    }
    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
    pub fn cell(&self, point: Point) -> Option<&Cell> {
        self.ix_point(point).map(|ix| &self.cells[ix])
    }

    pub fn point_in_bounds(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.cols
            && (point.y as usize) < self.rows
    }
    /// Arena index of `point`, `row * cols + col`.
    pub fn ix_point(&self, point: Point) -> Option<usize> {
        if self.point_in_bounds(point) {
            Some(point.y as usize * self.cols + point.x as usize)
        } else {
            None
        }
    }
    pub(crate) fn ix_checked(&self, point: Point) -> Result<usize> {
        self.ix_point(point).ok_or_else(|| {
            SearchError::InvalidGrid(format!(
                "{point} lies outside the {}x{} grid",
                self.rows, self.cols
            ))
        })
    }

    /// In-bounds neighbours of `point` in the order up, down, left, right.
    pub fn neighbours(&self, point: Point) -> SmallVec<[Point; N_SMALLVEC_SIZE]> {
        match self.ix_point(point) {
            Some(ix) => topology::neighbours(self.rows, self.cols, ix)
                .into_iter()
                .map(|n| self.cells[n].point())
                .collect(),
            None => SmallVec::new(),
        }
    }

    /// Places or removes a wall. Placing a wall removes any weight on the cell; the start, the
    /// finish and waypoints cannot be walled.
    pub fn set_wall(&mut self, point: Point, blocked: bool) -> Result<()> {
        let ix = self.ix_checked(point)?;
        if blocked {
            if self.cells[ix].is_endpoint() {
                return Err(SearchError::InvalidGrid(format!(
                    "cannot place a wall on {point}"
                )));
            }
            let cell = &mut self.cells[ix];
            cell.is_weight = false;
            cell.weight_value = 1;
            if !cell.is_wall {
                cell.is_wall = true;
                self.components_dirty = true;
            }
        } else {
            self.free_cell(ix);
        }
        Ok(())
    }

    /// Flips the wall state of a cell and returns the new state.
    pub fn toggle_wall(&mut self, point: Point) -> Result<bool> {
        let ix = self.ix_checked(point)?;
        let blocked = !self.cells[ix].is_wall;
        self.set_wall(point, blocked)?;
        Ok(blocked)
    }

    /// Sets (`Some`) or clears (`None`) the weight of a cell, replacing a wall if there is one.
    pub fn set_weight(&mut self, point: Point, weight: Option<u32>) -> Result<()> {
        let ix = self.ix_checked(point)?;
        match weight {
            Some(0) => {
                return Err(SearchError::InvalidGrid(format!(
                    "weight at {point} must be positive"
                )))
            }
            Some(value) => {
                if self.cells[ix].is_start || self.cells[ix].is_finish {
                    return Err(SearchError::InvalidGrid(format!(
                        "cannot weight the start or finish at {point}"
                    )));
                }
                self.free_cell(ix);
                self.cells[ix].is_weight = true;
                self.cells[ix].weight_value = value;
            }
            None => {
                self.cells[ix].is_weight = false;
                self.cells[ix].weight_value = 1;
            }
        }
        Ok(())
    }

    /// The weight tool: places a weight of [DEFAULT_WEIGHT] on a cell.
    pub fn place_weight(&mut self, point: Point) -> Result<()> {
        self.set_weight(point, Some(DEFAULT_WEIGHT))
    }

    /// Appends a waypoint to the end of the visiting order.
    pub fn add_waypoint(&mut self, point: Point) -> Result<()> {
        let ix = self.ix_checked(point)?;
        let cell = &self.cells[ix];
        if cell.is_start || cell.is_finish || cell.is_food {
            return Err(SearchError::InvalidGrid(format!(
                "{point} is already an endpoint"
            )));
        }
        self.free_cell(ix);
        self.cells[ix].is_food = true;
        self.waypoints.push(point);
        Ok(())
    }

    /// Removes a waypoint, returning whether there was one at `point`.
    pub fn remove_waypoint(&mut self, point: Point) -> bool {
        match self.ix_point(point) {
            Some(ix) if self.cells[ix].is_food => {
                self.cells[ix].is_food = false;
                self.waypoints.retain(|p| *p != point);
                true
            }
            _ => false,
        }
    }

    pub fn clear_waypoints(&mut self) {
        for p in std::mem::take(&mut self.waypoints) {
            if let Some(ix) = self.ix_point(p) {
                self.cells[ix].is_food = false;
            }
        }
    }

    pub fn move_start(&mut self, point: Point) -> Result<()> {
        let ix = self.ix_checked(point)?;
        if self.cells[ix].is_finish || self.cells[ix].is_food {
            return Err(SearchError::InvalidGrid(format!(
                "cannot move the start onto {point}"
            )));
        }
        let old = self.ix_checked(self.start)?;
        self.cells[old].is_start = false;
        self.free_cell(ix);
        self.cells[ix].is_weight = false;
        self.cells[ix].weight_value = 1;
        self.cells[ix].is_start = true;
        self.start = point;
        Ok(())
    }

    pub fn move_finish(&mut self, point: Point) -> Result<()> {
        let ix = self.ix_checked(point)?;
        if self.cells[ix].is_start || self.cells[ix].is_food {
            return Err(SearchError::InvalidGrid(format!(
                "cannot move the finish onto {point}"
            )));
        }
        let old = self.ix_checked(self.finish)?;
        self.cells[old].is_finish = false;
        self.free_cell(ix);
        self.cells[ix].is_weight = false;
        self.cells[ix].weight_value = 1;
        self.cells[ix].is_finish = true;
        self.finish = point;
        Ok(())
    }

    pub fn clear_walls(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.is_wall = false;
        }
        self.generate_components();
    }

    pub fn clear_weights(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.is_weight = false;
            cell.weight_value = 1;
        }
    }

    /// Removes all walls, weights and waypoints, keeping start and finish.
    pub fn clear_board(&mut self) {
        self.clear_waypoints();
        self.clear_weights();
        self.clear_walls();
    }

    /// Removes a wall and joins the newly connected components.
    fn free_cell(&mut self, ix: usize) {
        if !self.cells[ix].is_wall {
            return;
        }
        self.cells[ix].is_wall = false;
        for n in topology::neighbours(self.rows, self.cols, ix) {
            if !self.cells[n].is_wall {
                self.components.union(ix, n);
            }
        }
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> Option<usize> {
        self.ix_point(*point).map(|ix| self.components.find(ix))
    }

    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are not on the same component.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        match (self.ix_point(*start), self.ix_point(*goal)) {
            (Some(s), Some(g)) => !self.components.equiv(s, g),
            _ => true,
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    pub fn generate_components(&mut self) {
        self.components = topology::generate_components(self.rows, self.cols, &self.cells);
        self.components_dirty = false;
    }

    /// Searches from the grid's own start through its waypoints to its finish.
    pub fn search(&self, algorithm: Algorithm) -> Result<SearchResult> {
        Pathfinder::default().search(algorithm, self, self.start, self.finish, &self.waypoints)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.cols) {
            let line: String = row
                .iter()
                .map(|c| {
                    if c.is_start {
                        'S'
                    } else if c.is_finish {
                        'F'
                    } else if c.is_food {
                        'o'
                    } else if c.is_wall {
                        '#'
                    } else if c.is_weight {
                        'w'
                    } else {
                        '.'
                    }
                })
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
