use grid_util::point::Point;

use crate::grid::Grid;
use crate::heuristic::{euclidean, Heuristic};
use crate::search_tree::{reconstruct_path, CameFrom, Frontier};
use crate::solver::{GridSolver, SearchOutcome};

/// Greedy best-first search: always expands the discovered cell that looks closest to the end.
/// Fast to reach the goal, but the path is not necessarily the shortest.
#[derive(Clone, Debug)]
pub struct GreedySolver {
    pub heuristic: Heuristic,
}

impl GreedySolver {
    /// Uses the [euclidean] distance.
    pub fn new() -> GreedySolver {
        GreedySolver {
            heuristic: euclidean,
        }
    }
    pub fn with_heuristic(heuristic: Heuristic) -> GreedySolver {
        GreedySolver { heuristic }
    }
}

impl Default for GreedySolver {
    fn default() -> Self {
        GreedySolver::new()
    }
}

impl GridSolver for GreedySolver {
    fn name(&self) -> &'static str {
        "Greedy"
    }

    fn explore(
        &self,
        grid: &mut Grid,
        start: Point,
        end: Point,
        draw: &mut dyn FnMut(&Grid),
    ) -> SearchOutcome {
        let mut frontier = Frontier::new();
        frontier.push((self.heuristic)(&start, &end), start);
        let mut came_from = CameFrom::new(start);
        while let Some((_, current)) = frontier.pop() {
            draw(grid);
            if current == end {
                let path = reconstruct_path(grid, &came_from, &end, draw);
                return SearchOutcome::Found { path };
            }
            for neighbour in grid[current].neighbours.clone() {
                if !came_from.contains(&neighbour) {
                    came_from.insert(neighbour, &current);
                    frontier.push((self.heuristic)(&neighbour, &end), neighbour);
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
    use crate::heuristic::manhattan;

    #[test]
    fn heads_straight_for_the_goal() {
        let mut grid = Grid::new(5, 5);
        let mut draws = 0;
        let outcome = GreedySolver::new()
            .search(&mut grid, Point::new(0, 0), Point::new(4, 0), |_: &Grid| {
                draws += 1
            })
            .unwrap();
        assert_eq!(outcome.hops(), Some(4));
        // Only the cells along the row are expanded, then three are marked as path.
        assert_eq!(draws, 5 + 3);
    }

    #[test]
    fn finds_a_way_around_a_wall() {
        let layout = "\
            ..........\n\
            .S........\n\
            .#######..\n\
            .......#..\n\
            .E.....#..";
        let mut grid: Grid = layout.parse().unwrap();
        let outcome = GreedySolver::new().solve(&mut grid, |_: &Grid| {}).unwrap();
        assert_eq!(outcome.hops(), Some(5));
        assert!(grid[Point::new(0, 3)].is_path());
    }

    #[test]
    fn accepts_injected_heuristic() {
        let mut grid: Grid = "S..\n.#.\n..E".parse().unwrap();
        let solver = GreedySolver::with_heuristic(manhattan);
        let outcome = solver.solve(&mut grid, |_: &Grid| {}).unwrap();
        assert_eq!(outcome.hops(), Some(4));
    }
}
