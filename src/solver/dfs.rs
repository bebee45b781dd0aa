use grid_util::point::Point;

use crate::grid::Grid;
use crate::search_tree::{reconstruct_path, CameFrom};
use crate::solver::{GridSolver, SearchOutcome};

/// Depth-first search with an explicit stack. Neighbours are pushed in enumeration order, so the
/// last one enumerated is expanded first. Cells are marked visited when pushed.
#[derive(Clone, Copy, Debug, Default)]
pub struct DfsSolver;

impl GridSolver for DfsSolver {
    fn name(&self) -> &'static str {
        "DFS"
    }

    fn explore(
        &self,
        grid: &mut Grid,
        start: Point,
        end: Point,
        draw: &mut dyn FnMut(&Grid),
    ) -> SearchOutcome {
        let mut stack = vec![start];
        let mut came_from = CameFrom::new(start);
        while let Some(current) = stack.pop() {
            draw(grid);
            if current == end {
                let path = reconstruct_path(grid, &came_from, &end, draw);
                return SearchOutcome::Found { path };
            }
            for neighbour in grid[current].neighbours.clone() {
                if !came_from.contains(&neighbour) {
                    came_from.insert(neighbour, &current);
                    stack.push(neighbour);
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follows_last_enumerated_neighbour() {
        // Up is popped before down, so the search takes the long way round.
        let mut grid: Grid = ".....\n.#S#.\n.#.#.\n..E..".parse().unwrap();
        let outcome = DfsSolver.solve(&mut grid, |_: &Grid| {}).unwrap();
        assert!(outcome.is_found());
        assert_eq!(outcome.hops(), Some(8));

        let mut grid: Grid = "...\nS#E\n...".parse().unwrap();
        let outcome = DfsSolver.solve(&mut grid, |_: &Grid| {}).unwrap();
        // Up is enumerated after down, so the route goes over the top.
        assert_eq!(grid.to_string(), "***\nS#E\no..\n");
        assert_eq!(outcome.hops(), Some(4));
    }

    #[test]
    fn no_path() {
        let mut grid: Grid = "S#.\n##.\n..E".parse().unwrap();
        assert_eq!(
            DfsSolver.solve(&mut grid, |_: &Grid| {}).unwrap(),
            SearchOutcome::NoPath
        );
    }
}
