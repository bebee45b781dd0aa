use grid_util::point::Point;
use log::{debug, warn};

use crate::grid::Grid;
use crate::solver::dls::depth_limited;
use crate::solver::{GridSolver, SearchOutcome};

/// Iterative deepening: repeats the depth-limited search with limits 0, 1, 2, ... so that the
/// first path found is a shortest one. Search marks are cleared between iterations.
#[derive(Clone, Debug, Default)]
pub struct IddfsSolver {
    /// Largest limit tried before giving up with [SearchOutcome::LimitReached]. Defaults to the
    /// number of cells, which no simple path can exceed.
    pub max_depth: Option<usize>,
}

impl IddfsSolver {
    pub fn new() -> IddfsSolver {
        IddfsSolver { max_depth: None }
    }
    pub fn with_max_depth(max_depth: usize) -> IddfsSolver {
        IddfsSolver {
            max_depth: Some(max_depth),
        }
    }
}

impl GridSolver for IddfsSolver {
    fn name(&self) -> &'static str {
        "IDDFS"
    }

    fn explore(
        &self,
        grid: &mut Grid,
        start: Point,
        end: Point,
        draw: &mut dyn FnMut(&Grid),
    ) -> SearchOutcome {
        let max_depth = self.max_depth.unwrap_or(grid.len());
        for limit in 0..=max_depth {
            if limit > 0 {
                grid.clear_search_marks();
            }
            debug!("IDDFS: depth limit {}", limit);
            match depth_limited(grid, start, end, limit, draw) {
                SearchOutcome::LimitReached { .. } => continue,
                outcome => return outcome,
            }
        }
        warn!("IDDFS: no result within depth {}", max_depth);
        SearchOutcome::LimitReached { limit: max_depth }
    }
}
