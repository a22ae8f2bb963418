use grid_search::{Algorithm, Grid, Point};

/// Runs every algorithm on a 5x5 grid with shape
/// S....
/// .#...
/// ..w..
/// .....
/// ....F
/// where
/// - S marks the start
/// - F marks the finish
/// - w is a cell with weight 5
fn main() {
    let mut grid = Grid::new(5, 5, Point::new(0, 0), Point::new(4, 4)).unwrap();
    grid.set_wall(Point::new(1, 1), true).unwrap();
    grid.place_weight(Point::new(2, 2)).unwrap();
    grid.update();
    println!("{}", grid);
    for algorithm in Algorithm::ALL {
        let result = grid.search(algorithm).unwrap();
        println!(
            "{algorithm}: visited {} cells, path of {} cells with cost {}",
            result.visited_in_order.len(),
            result.path_in_order.len(),
            result.path_cost()
        );
    }
}
