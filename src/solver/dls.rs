use fxhash::FxHashMap;
use grid_util::point::Point;

use crate::grid::Grid;
use crate::search_tree::{reconstruct_path, CameFrom, FxIndexSet};
use crate::solver::{GridSolver, SearchOutcome};
use crate::DEFAULT_DEPTH_LIMIT;

/// Depth-first search that never goes deeper than `limit` moves from the start. Fails with
/// [SearchOutcome::LimitReached] when the end is further away than the limit.
#[derive(Clone, Debug)]
pub struct DepthLimitedSolver {
    pub limit: usize,
}

impl DepthLimitedSolver {
    /// Uses [DEFAULT_DEPTH_LIMIT].
    pub fn new() -> DepthLimitedSolver {
        DepthLimitedSolver {
            limit: DEFAULT_DEPTH_LIMIT,
        }
    }
    pub fn with_limit(limit: usize) -> DepthLimitedSolver {
        DepthLimitedSolver { limit }
    }
}

impl Default for DepthLimitedSolver {
    fn default() -> Self {
        DepthLimitedSolver::new()
    }
}

impl GridSolver for DepthLimitedSolver {
    fn name(&self) -> &'static str {
        "DLS"
    }

    fn explore(
        &self,
        grid: &mut Grid,
        start: Point,
        end: Point,
        draw: &mut dyn FnMut(&Grid),
    ) -> SearchOutcome {
        depth_limited(grid, start, end, self.limit, draw)
    }
}

/// One frame of the explicit depth-first stack.
struct Frame {
    cell: Point,
    depth: usize,
    /// Index of the next neighbour to try.
    next: usize,
}

/// Depth-first search bounded by `limit`, shared with iterative deepening.
///
/// Cells on the current path are never revisited and leave the path exactly when their frame
/// is popped. A cell is only expanded again if it is reached at a strictly smaller depth than
/// before, which keeps the search complete for paths of at most `limit` moves. Entered cells are
/// marked open and become closed when backtracked.
///
/// Returns [SearchOutcome::NoPath] only if the limit kept the search from entering some cell,
/// that is, if a larger limit could not change the result. Cells cut off below one branch but
/// entered through another do not count.
pub(crate) fn depth_limited(
    grid: &mut Grid,
    start: Point,
    end: Point,
    limit: usize,
    draw: &mut dyn FnMut(&Grid),
) -> SearchOutcome {
    let mut stack = vec![Frame {
        cell: start,
        depth: 0,
        next: 0,
    }];
    let mut on_path: FxIndexSet<Point> = FxIndexSet::default();
    on_path.insert(start);
    let mut best_depth: FxHashMap<Point, usize> = FxHashMap::default();
    best_depth.insert(start, 0);
    let mut came_from = CameFrom::new(start);
    let mut cut_off: Vec<Point> = Vec::new();
    draw(grid);

    while let Some(frame) = stack.last_mut() {
        let neighbours = &grid[frame.cell].neighbours;
        let next = if frame.depth < limit {
            neighbours.get(frame.next).copied()
        } else {
            cut_off.extend(neighbours.iter().copied());
            None
        };
        let Some(neighbour) = next else {
            if let Some(done) = stack.pop() {
                on_path.pop();
                if done.cell != start {
                    grid.cell_mut(done.cell).mark_closed();
                }
            }
            continue;
        };
        frame.next += 1;
        let depth = frame.depth + 1;
        let parent = frame.cell;
        if on_path.contains(&neighbour) || best_depth.get(&neighbour).is_some_and(|&d| d <= depth)
        {
            continue;
        }
        best_depth.insert(neighbour, depth);
        on_path.insert(neighbour);
        came_from.insert(neighbour, &parent);
        grid.cell_mut(neighbour).mark_open();
        draw(grid);
        if neighbour == end {
            let path = reconstruct_path(grid, &came_from, &end, draw);
            return SearchOutcome::Found { path };
        }
        stack.push(Frame {
            cell: neighbour,
            depth,
            next: 0,
        });
    }

    if cut_off.iter().any(|n| !best_depth.contains_key(n)) {
        SearchOutcome::LimitReached { limit }
    } else {
        SearchOutcome::NoPath
    }
}
