use fxhash::FxHashMap;
use grid_util::point::Point;
use log::{debug, warn};

use crate::grid::Grid;
use crate::heuristic::{manhattan, Heuristic};
use crate::search_tree::{reconstruct_path, CameFrom, FxIndexSet};
use crate::solver::{GridSolver, SearchOutcome};

/// Iterative deepening A*. Each iteration is a depth-first search that prunes every cell whose
/// `f = g + h` exceeds the current bound; the next bound is the smallest `f` among pruned cells
/// the pass never entered. Cells are only excluded while they are on the current path, so they can be revisited in
/// later iterations.
#[derive(Clone, Debug)]
pub struct IdaStarSolver {
    pub heuristic: Heuristic,
    /// Largest bound tried before giving up with [SearchOutcome::LimitReached]. `None` uses the
    /// largest `f` a simple path on the grid can produce, so the search always decides.
    pub max_bound: Option<f64>,
}

impl IdaStarSolver {
    pub fn new() -> IdaStarSolver {
        IdaStarSolver {
            heuristic: manhattan,
            max_bound: None,
        }
    }
    pub fn with_heuristic(heuristic: Heuristic) -> IdaStarSolver {
        IdaStarSolver {
            heuristic,
            ..IdaStarSolver::new()
        }
    }

    pub fn with_max_bound(max_bound: f64) -> IdaStarSolver {
        IdaStarSolver {
            max_bound: Some(max_bound),
            ..IdaStarSolver::new()
        }
    }

    /// No simple path has more moves than there are cells, and no free cell estimates further
    /// than the worst one.
    fn bound_ceiling(&self, grid: &Grid, end: Point) -> f64 {
        let h_max = grid
            .cells()
            .filter(|c| !c.is_barrier())
            .map(|c| (self.heuristic)(&c.point(), &end))
            .fold(0.0, f64::max);
        grid.len().saturating_sub(1) as f64 + h_max
    }

    /// Runs the iterations, recording every bound tried.
    fn deepen(
        &self,
        grid: &mut Grid,
        start: Point,
        end: Point,
        draw: &mut dyn FnMut(&Grid),
        bounds: &mut Vec<f64>,
    ) -> SearchOutcome {
        let ceiling = self
            .max_bound
            .unwrap_or_else(|| self.bound_ceiling(grid, end));
        let mut bound = (self.heuristic)(&start, &end);
        let mut iteration = 0;
        loop {
            if bound > ceiling {
                warn!(
                    "IDA*: bound {} exceeds the ceiling {} after {} iterations",
                    bound, ceiling, iteration
                );
                return SearchOutcome::LimitReached {
                    limit: ceiling as usize,
                };
            }
            if iteration > 0 {
                grid.clear_search_marks();
            }
            debug!("IDA*: iteration {} with bound {}", iteration, bound);
            bounds.push(bound);
            match self.bounded(grid, start, end, bound, draw) {
                Bounded::Found(path) => return SearchOutcome::Found { path },
                Bounded::Exceeded(next) => bound = next,
                Bounded::Exhausted => return SearchOutcome::NoPath,
            }
            iteration += 1;
        }
    }

    /// One depth-first pass under `bound`.
    fn bounded(
        &self,
        grid: &mut Grid,
        start: Point,
        end: Point,
        bound: f64,
        draw: &mut dyn FnMut(&Grid),
    ) -> Bounded {
        let mut stack = vec![Frame {
            cell: start,
            g: 0,
            next: 0,
        }];
        let mut path: FxIndexSet<Point> = FxIndexSet::default();
        path.insert(start);
        // Within one pass a cell is only expanded again if reached more cheaply.
        let mut best_g: FxHashMap<Point, u32> = FxHashMap::default();
        best_g.insert(start, 0);
        let mut pruned: Vec<(Point, f64)> = Vec::new();
        draw(grid);

        while let Some(frame) = stack.last_mut() {
            let Some(neighbour) = grid[frame.cell].neighbours.get(frame.next).copied() else {
                if let Some(done) = stack.pop() {
                    path.pop();
                    if done.cell != start {
                        grid.cell_mut(done.cell).mark_closed();
                    }
                }
                continue;
            };
            frame.next += 1;
            let g = frame.g + 1;
            if path.contains(&neighbour) || best_g.get(&neighbour).is_some_and(|&b| b <= g) {
                continue;
            }
            let f = g as f64 + (self.heuristic)(&neighbour, &end);
            if f > bound {
                pruned.push((neighbour, f));
                continue;
            }
            best_g.insert(neighbour, g);
            path.insert(neighbour);
            grid.cell_mut(neighbour).mark_open();
            draw(grid);
            if neighbour == end {
                let found = match CameFrom::from_path(&path) {
                    Some(came_from) => reconstruct_path(grid, &came_from, &end, draw),
                    None => Vec::new(),
                };
                return Bounded::Found(found);
            }
            stack.push(Frame {
                cell: neighbour,
                g,
                next: 0,
            });
        }

        // A pruned cell that was entered anyway, from a smaller g, adds nothing to the next pass.
        let next_bound = pruned
            .iter()
            .filter(|(cell, _)| !best_g.contains_key(cell))
            .map(|&(_, f)| f)
            .fold(f64::INFINITY, f64::min);
        if next_bound.is_finite() {
            Bounded::Exceeded(next_bound)
        } else {
            Bounded::Exhausted
        }
    }
}

impl Default for IdaStarSolver {
    fn default() -> Self {
        IdaStarSolver::new()
    }
}

struct Frame {
    cell: Point,
    g: u32,
    next: usize,
}

enum Bounded {
    Found(Vec<Point>),
    /// Nothing within the bound; carries the smallest `f` of a cell the pass never entered.
    Exceeded(f64),
    /// Every cell the bound kept out was entered through another route, so a larger one cannot
    /// help.
    Exhausted,
}

impl GridSolver for IdaStarSolver {
    fn name(&self) -> &'static str {
        "IDA*"
    }

    fn explore(
        &self,
        grid: &mut Grid,
        start: Point,
        end: Point,
        draw: &mut dyn FnMut(&Grid),
    ) -> SearchOutcome {
        self.deepen(grid, start, end, draw, &mut Vec::new())
    }
}
