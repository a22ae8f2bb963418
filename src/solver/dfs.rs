use crate::{solver::GridSolver, working::WorkingGrid};

/// Depth-first traversal. Neighbours are pushed in reverse so the stack pops them up, down,
/// left, right. Any route found is connected but not necessarily short.
#[derive(Default)]
pub struct DfsSolver {
    stack: Vec<usize>,
}

impl GridSolver for DfsSolver {
    const MARK_ON_PUSH: bool = true;
    const REVERSE_NEIGHBOURS: bool = true;

    fn push(&mut self, _grid: &WorkingGrid, ix: usize) {
        self.stack.push(ix);
    }

    fn pop(&mut self) -> Option<usize> {
        self.stack.pop()
    }
}
