use grid_util::point::Point;
use std::collections::VecDeque;

use crate::grid::Grid;
use crate::search_tree::{reconstruct_path, CameFrom};
use crate::solver::{GridSolver, SearchOutcome};

/// Breadth-first search. Expands cells in the order they were discovered, so the path found has
/// the fewest moves.
#[derive(Clone, Copy, Debug, Default)]
pub struct BfsSolver;

impl GridSolver for BfsSolver {
    fn name(&self) -> &'static str {
        "BFS"
    }

    fn explore(
        &self,
        grid: &mut Grid,
        start: Point,
        end: Point,
        draw: &mut dyn FnMut(&Grid),
    ) -> SearchOutcome {
        let mut queue = VecDeque::from([start]);
        // Doubles as the visited set: a cell is visited once it has been queued.
        let mut came_from = CameFrom::new(start);
        while let Some(current) = queue.pop_front() {
            draw(grid);
            if current == end {
                let path = reconstruct_path(grid, &came_from, &end, draw);
                return SearchOutcome::Found { path };
            }
            for neighbour in grid[current].neighbours.clone() {
                if !came_from.contains(&neighbour) {
                    came_from.insert(neighbour, &current);
                    queue.push_back(neighbour);
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
