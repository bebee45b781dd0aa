use fxhash::FxHashSet;
use grid_util::point::Point;

use crate::grid::Grid;
use crate::search_tree::{reconstruct_path, CameFrom, CostMap, Frontier};
use crate::solver::{GridSolver, SearchOutcome};

/// Uniform-cost search (Dijkstra). Every move costs 1, so this finds the same path lengths as
/// breadth-first search, expanding cells by accumulated cost with ties in insertion order.
#[derive(Clone, Copy, Debug, Default)]
pub struct UniformCostSolver;

impl GridSolver for UniformCostSolver {
    fn name(&self) -> &'static str {
        "UCS"
    }

    fn explore(
        &self,
        grid: &mut Grid,
        start: Point,
        end: Point,
        draw: &mut dyn FnMut(&Grid),
    ) -> SearchOutcome {
        let mut frontier = Frontier::new();
        frontier.push(0, start);
        let mut came_from = CameFrom::new(start);
        let mut costs: CostMap<u32> = CostMap::new(start);
        let mut closed = FxHashSet::default();
        while let Some((cost, current)) = frontier.pop() {
            // Cheaper entries for the same cell may have been pushed later.
            if !closed.insert(current) {
                continue;
            }
            draw(grid);
            if current == end {
                let path = reconstruct_path(grid, &came_from, &end, draw);
                return SearchOutcome::Found { path };
            }
            for neighbour in grid[current].neighbours.clone() {
                let new_cost = cost + 1;
                if new_cost < costs.get(&neighbour) {
                    costs.set(neighbour, new_cost);
                    came_from.insert(neighbour, &current);
                    frontier.push(new_cost, neighbour);
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
    use crate::solver::bfs::BfsSolver;

    #[test]
    fn matches_breadth_first_hop_count() {
        let layout = "S....#....\n.###.#.##.\n...#...#..\n##.####.#.\n.......#.E";
        let mut grid: Grid = layout.parse().unwrap();
        let ucs = UniformCostSolver.solve(&mut grid, |_: &Grid| {}).unwrap();
        let mut grid: Grid = layout.parse().unwrap();
        let bfs = BfsSolver.solve(&mut grid, |_: &Grid| {}).unwrap();
        assert!(ucs.is_found());
        assert_eq!(ucs.hops(), bfs.hops());
    }

    #[test]
    fn expands_each_cell_once() {
        let mut grid = Grid::new(4, 4);
        let mut draws = 0;
        let outcome = UniformCostSolver
            .search(&mut grid, Point::new(0, 0), Point::new(3, 3), |_: &Grid| {
                draws += 1
            })
            .unwrap();
        assert_eq!(outcome.hops(), Some(6));
        // At most every cell expanded once, plus five path cells.
        assert!(draws <= 16 + 5);
    }
}
