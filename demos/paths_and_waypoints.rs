use grid_search::{Algorithm, Grid, Point};

/// Illustrates the output of a search through waypoints: the visited order is what an animation
/// replays first, the path is drawn afterwards. Each leg's segment ends on the waypoint the next
/// one starts from.
/// S..#.
/// ...#o
/// .o.#.
/// .....
/// ....F
fn main() {
    let mut grid = Grid::new(5, 5, Point::new(0, 0), Point::new(4, 4)).unwrap();
    for y in 0..3 {
        grid.set_wall(Point::new(3, y), true).unwrap();
    }
    grid.add_waypoint(Point::new(1, 2)).unwrap();
    grid.add_waypoint(Point::new(4, 1)).unwrap();
    grid.update();
    println!("{}", grid);

    let result = grid.search(Algorithm::AStar).unwrap();
    println!("Visited in order:");
    for p in result.visited_points() {
        println!("{:?}", p);
    }
    println!("Path:");
    for p in result.path_points() {
        println!("{:?}", p);
    }

    // Walling off the last waypoint leaves a partial route.
    grid.set_wall(Point::new(4, 0), true).unwrap();
    grid.set_wall(Point::new(4, 2), true).unwrap();
    let partial = grid.search(Algorithm::AStar).unwrap();
    if let Some(e) = &partial.unreachable {
        println!("{e}; route ends at {:?}", partial.path_points().last());
    }
}
