use grid_util::point::Point;

use crate::grid::Grid;
use crate::heuristic::{manhattan, Heuristic};
use crate::search_tree::{reconstruct_path, CameFrom, CostMap, Frontier};
use crate::solver::{GridSolver, SearchOutcome};

/// A* search ordering the frontier by `g + h`. With the default [manhattan] heuristic and a
/// `heuristic_factor` of 1.0 the path found is a shortest one; larger factors trade optimality
/// for fewer expansions.
#[derive(Clone, Debug)]
pub struct AstarSolver {
    pub heuristic: Heuristic,
    pub heuristic_factor: f64,
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver {
            heuristic: manhattan,
            heuristic_factor: 1.0,
        }
    }
    pub fn with_heuristic(heuristic: Heuristic) -> AstarSolver {
        AstarSolver {
            heuristic,
            ..AstarSolver::new()
        }
    }
    /// Just the heuristic times the heuristic factor.
    pub fn estimate(&self, p1: &Point, p2: &Point) -> f64 {
        (self.heuristic)(p1, p2) * self.heuristic_factor
    }
}

impl Default for AstarSolver {
    fn default() -> Self {
        AstarSolver::new()
    }
}

impl GridSolver for AstarSolver {
    fn name(&self) -> &'static str {
        "A*"
    }

    fn explore(
        &self,
        grid: &mut Grid,
        start: Point,
        end: Point,
        draw: &mut dyn FnMut(&Grid),
    ) -> SearchOutcome {
        let mut frontier = Frontier::new();
        frontier.push(self.estimate(&start, &end), (start, 0));
        let mut came_from = CameFrom::new(start);
        let mut g_score: CostMap<u32> = CostMap::new(start);
        while let Some((_, (current, g))) = frontier.pop() {
            // We may have inserted a cell several times into the frontier if we found a
            // cheaper way to reach it. Only the entry carrying the best cost is expanded.
            if g > g_score.get(&current) {
                continue;
            }
            draw(grid);
            if current == end {
                let path = reconstruct_path(grid, &came_from, &end, draw);
                return SearchOutcome::Found { path };
            }
            for neighbour in grid[current].neighbours.clone() {
                let tentative = g + 1;
                if tentative < g_score.get(&neighbour) {
                    came_from.insert(neighbour, &current);
                    g_score.set(neighbour, tentative);
                    let f = tentative as f64 + self.estimate(&neighbour, &end);
                    frontier.push(f, (neighbour, tentative));
                    grid.cell_mut(neighbour).mark_open();
                }
            }
            if current != start {
                grid.cell_mut(current).mark_closed();
            }
        }
        SearchOutcome::NoPath
    }
}
