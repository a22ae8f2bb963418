use std::collections::VecDeque;

use crate::{solver::GridSolver, working::WorkingGrid};

/// Level-order traversal ignoring weights. Finds a path with the fewest steps.
#[derive(Default)]
pub struct BfsSolver {
    queue: VecDeque<usize>,
}

impl GridSolver for BfsSolver {
    const MARK_ON_PUSH: bool = true;

    fn push(&mut self, _grid: &WorkingGrid, ix: usize) {
        self.queue.push_back(ix);
    }

    fn pop(&mut self) -> Option<usize> {
        self.queue.pop_front()
    }
}
