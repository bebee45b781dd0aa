use crate::cell::{Cell, Role};
use crate::error::{Error, Result};
use core::fmt;
use grid_util::point::Point;
use log::info;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;
use std::ops::Index;
use std::str::FromStr;

/// Offsets in neighbour enumeration order: down, up, right, left.
const NEUMANN_OFFSETS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// [Grid] owns a fixed-size, row-major collection of [Cell]s. Besides the cells it keeps track of
/// connected components of free cells using a [UnionFind] structure, which gives a cheap
/// reachability oracle that is independent of the search algorithms.
///
/// Points address cells with `x` as column and `y` as row.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Grid {
        let cells = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| Cell::new(row, col)))
            .collect();
        let mut grid = Grid {
            rows,
            cols,
            cells,
            components: UnionFind::new(rows * cols),
            components_dirty: false,
        };
        grid.generate_components();
        grid.update_neighbours();
        grid
    }
    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
    pub fn in_bounds(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.cols
            && (point.y as usize) < self.rows
    }
    /// Row-major index of a point, if it lies on the grid.
    pub fn get_ix_point(&self, point: &Point) -> Option<usize> {
        self.in_bounds(*point)
            .then(|| point.y as usize * self.cols + point.x as usize)
    }
    pub fn get(&self, point: Point) -> Option<&Cell> {
        self.get_ix_point(&point).map(|ix| &self.cells[ix])
    }
    /// The cell at `(row, col)`.
    pub fn at(&self, row: usize, col: usize) -> Option<&Cell> {
        self.get(Point::new(col as i32, row as i32))
    }
    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
    pub(crate) fn cell_mut(&mut self, point: Point) -> &mut Cell {
        let ix = self.checked_ix(point);
        &mut self.cells[ix]
    }
    fn checked_ix(&self, point: Point) -> usize {
        match self.get_ix_point(&point) {
            Some(ix) => ix,
            None => panic!("{} lies outside a {}x{} grid", point, self.rows, self.cols),
        }
    }
    fn try_ix(&self, point: Point) -> Result<usize> {
        self.get_ix_point(&point).ok_or(Error::OutOfBounds(point))
    }

    /// Computes the in-bounds, non-barrier cells sharing an edge with `point`, in the order
    /// down, up, right, left.
    pub fn neighbours_of(&self, point: Point) -> SmallVec<[Point; 4]> {
        NEUMANN_OFFSETS
            .iter()
            .map(|(dx, dy)| Point::new(point.x + dx, point.y + dy))
            .filter(|p| self.can_move_to(*p))
            .collect()
    }
    pub fn can_move_to(&self, point: Point) -> bool {
        self.get(point).is_some_and(|cell| !cell.is_barrier())
    }
    /// Recomputes the cached neighbour list of every cell. Barriers may have been painted since
    /// the last search, so every search calls this first.
    pub fn update_neighbours(&mut self) {
        for ix in 0..self.cells.len() {
            let neighbours = self.neighbours_of(self.cells[ix].point());
            self.cells[ix].neighbours = neighbours;
        }
    }

    /// Position of the start cell, if one is placed.
    pub fn start(&self) -> Option<Point> {
        self.cells.iter().find(|c| c.is_start()).map(Cell::point)
    }
    /// Position of the end cell, if one is placed.
    pub fn end(&self) -> Option<Point> {
        self.cells.iter().find(|c| c.is_end()).map(Cell::point)
    }

    /// Places the start cell, resetting any previous one. Overwrites barriers and the end cell.
    pub fn set_start(&mut self, point: Point) -> Result<()> {
        self.set_terminal(point, Role::Start)
    }
    /// Places the end cell, resetting any previous one. Overwrites barriers and the start cell.
    pub fn set_end(&mut self, point: Point) -> Result<()> {
        self.set_terminal(point, Role::End)
    }
    fn set_terminal(&mut self, point: Point, role: Role) -> Result<()> {
        let ix = self.try_ix(point)?;
        if let Some(previous) = self.cells.iter_mut().find(|c| c.role() == role) {
            previous.reset();
        }
        let was_barrier = self.cells[ix].is_barrier();
        match role {
            Role::Start => self.cells[ix].mark_start(),
            _ => self.cells[ix].mark_end(),
        }
        if was_barrier {
            self.on_blocked_changed(point, false);
        }
        Ok(())
    }

    /// Paints or removes a barrier. Start and end cells are never turned into barriers, in which
    /// case `false` is returned.
    pub fn set_barrier(&mut self, point: Point, blocked: bool) -> Result<bool> {
        let ix = self.try_ix(point)?;
        let cell = &mut self.cells[ix];
        if blocked == cell.is_barrier() {
            return Ok(true);
        }
        if blocked {
            cell.mark_barrier();
            if !cell.is_barrier() {
                return Ok(false);
            }
        } else {
            cell.reset();
        }
        self.on_blocked_changed(point, blocked);
        Ok(true)
    }

    /// Mirrors a primary click: the first click places the start, the next one the end, and
    /// every following click paints a barrier. Returns the resulting role of the cell.
    pub fn paint(&mut self, point: Point) -> Result<Role> {
        let ix = self.try_ix(point)?;
        let role = self.cells[ix].role();
        if self.start().is_none() && role != Role::End {
            self.set_start(point)?;
        } else if self.end().is_none() && role != Role::Start {
            self.set_end(point)?;
        } else if role != Role::Start && role != Role::End {
            self.set_barrier(point, true)?;
        }
        Ok(self.cells[ix].role())
    }

    /// Mirrors a secondary click: resets the cell to empty, forgetting it as start or end.
    pub fn erase(&mut self, point: Point) -> Result<()> {
        let ix = self.try_ix(point)?;
        let was_barrier = self.cells[ix].is_barrier();
        self.cells[ix].reset();
        if was_barrier {
            self.on_blocked_changed(point, false);
        }
        Ok(())
    }

    /// Resets every cell to empty.
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(Cell::reset);
        self.generate_components();
        self.update_neighbours();
    }

    /// Resets open, closed and path cells left behind by a search, keeping barriers, start and
    /// end in place.
    pub fn clear_search_marks(&mut self) {
        self.cells
            .iter_mut()
            .filter(|c| c.role().is_search_mark())
            .for_each(Cell::reset);
    }

    /// Joins newly connected components and flags the components as dirty if they are
    /// (potentially) broken apart into multiple.
    fn on_blocked_changed(&mut self, point: Point, blocked: bool) {
        if blocked {
            self.components_dirty = true;
        } else {
            let p_ix = self.checked_ix(point);
            for n in self.neighbours_of(point) {
                let n_ix = self.checked_ix(n);
                self.components.union(p_ix, n_ix);
            }
        }
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> Option<usize> {
        self.get_ix_point(point).map(|ix| self.components.find(ix))
    }
    /// Checks if start and goal are on the same component. Call [update](Self::update) first
    /// if barriers were painted since the components were generated.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        match (self.get(*start), self.get(*goal)) {
            (Some(s), Some(g)) if !s.is_barrier() && !g.is_barrier() => {
                let start_ix = self.checked_ix(*start);
                let goal_ix = self.checked_ix(*goal);
                self.components.equiv(start_ix, goal_ix)
            }
            _ => false,
        }
    }
    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }
    /// Generates a new [UnionFind] structure and links up free grid neighbours to the same
    /// components.
    pub fn generate_components(&mut self) {
        self.components = UnionFind::new(self.cells.len());
        self.components_dirty = false;
        for ix in 0..self.cells.len() {
            if self.cells[ix].is_barrier() {
                continue;
            }
            let point = self.cells[ix].point();
            // Linking right and down covers every edge once.
            let linked = [Point::new(point.x + 1, point.y), Point::new(point.x, point.y + 1)]
                .into_iter()
                .filter_map(|p| self.can_move_to(p).then(|| self.checked_ix(p)))
                .collect::<SmallVec<[usize; 2]>>();
            for n_ix in linked {
                self.components.union(ix, n_ix);
            }
        }
    }
}

impl Index<Point> for Grid {
    type Output = Cell;

    fn index(&self, point: Point) -> &Cell {
        &self.cells[self.checked_ix(point)]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.cols.max(1)) {
            let line: String = row.iter().map(|c| c.role().symbol()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Parses the layout produced by the [Display] implementation, one line per row. Only `.`, `#`,
/// `S` and `E` are accepted; search marks are not part of a layout.
impl FromStr for Grid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Grid> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let cols = lines.first().map_or(0, |l| l.chars().count());
        if lines.iter().any(|l| l.chars().count() != cols) {
            return Err(Error::InvalidLayout("rows differ in length".to_owned()));
        }
        let mut grid = Grid::new(lines.len(), cols);
        for (row, line) in lines.iter().enumerate() {
            for (col, c) in line.chars().enumerate() {
                let p = Point::new(col as i32, row as i32);
                match c {
                    '.' => {}
                    '#' => {
                        grid.set_barrier(p, true)?;
                    }
                    'S' if grid.start().is_none() => grid.set_start(p)?,
                    'E' if grid.end().is_none() => grid.set_end(p)?,
                    'S' | 'E' => {
                        return Err(Error::InvalidLayout(format!("more than one '{}'", c)))
                    }
                    other => {
                        return Err(Error::InvalidLayout(format!(
                            "unexpected '{}' at row {}, column {}",
                            other, row, col
                        )))
                    }
                }
            }
        }
        grid.update();
        grid.update_neighbours();
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbours_are_four_connected_and_ordered() {
        let grid = Grid::new(3, 3);
        let centre = Point::new(1, 1);
        let n = grid.neighbours_of(centre);
        assert_eq!(
            n.as_slice(),
            &[
                Point::new(1, 2),
                Point::new(1, 0),
                Point::new(2, 1),
                Point::new(0, 1)
            ]
        );
        assert_eq!(grid.neighbours_of(Point::new(0, 0)).len(), 2);
    }

    #[test]
    fn neighbours_follow_barrier_changes() {
        let mut grid = Grid::new(2, 2);
        grid.set_barrier(Point::new(1, 0), true).unwrap();
        // Cached lists are stale until refreshed.
        assert_eq!(grid[Point::new(0, 0)].neighbours().len(), 2);
        grid.update_neighbours();
        assert_eq!(grid[Point::new(0, 0)].neighbours(), &[Point::new(0, 1)]);
        grid.set_barrier(Point::new(1, 0), false).unwrap();
        grid.update_neighbours();
        assert_eq!(grid[Point::new(0, 0)].neighbours().len(), 2);
    }

    #[test]
    fn single_start_and_end() {
        let mut grid = Grid::new(3, 3);
        grid.set_start(Point::new(0, 0)).unwrap();
        grid.set_start(Point::new(1, 1)).unwrap();
        grid.set_end(Point::new(2, 2)).unwrap();
        assert_eq!(grid.cells().filter(|c| c.is_start()).count(), 1);
        assert_eq!(grid.start(), Some(Point::new(1, 1)));
        assert_eq!(grid.end(), Some(Point::new(2, 2)));
        assert!(grid[Point::new(0, 0)].is_empty());
    }

    #[test]
    fn start_and_end_are_never_barriers() {
        let mut grid = Grid::new(2, 2);
        grid.set_start(Point::new(0, 0)).unwrap();
        assert!(!grid.set_barrier(Point::new(0, 0), true).unwrap());
        assert!(grid[Point::new(0, 0)].is_start());
    }

    #[test]
    fn paint_places_start_end_then_barriers() {
        let mut grid = Grid::new(2, 3);
        assert_eq!(grid.paint(Point::new(0, 0)).unwrap(), Role::Start);
        assert_eq!(grid.paint(Point::new(0, 0)).unwrap(), Role::Start);
        assert_eq!(grid.paint(Point::new(2, 1)).unwrap(), Role::End);
        assert_eq!(grid.paint(Point::new(1, 1)).unwrap(), Role::Barrier);
        assert_eq!(grid.paint(Point::new(2, 1)).unwrap(), Role::End);
        grid.erase(Point::new(0, 0)).unwrap();
        assert_eq!(grid.start(), None);
        assert_eq!(grid.paint(Point::new(1, 0)).unwrap(), Role::Start);
    }

    #[test]
    fn out_of_bounds_is_rejected() {
        let mut grid = Grid::new(2, 2);
        let outside = Point::new(2, 0);
        assert_eq!(grid.paint(outside), Err(Error::OutOfBounds(outside)));
        assert!(grid.get(Point::new(-1, 0)).is_none());
        assert!(grid.at(1, 1).is_some());
    }

    /// Tests whether points are correctly mapped to different connected components
    #[test]
    fn test_component_generation() {
        // |.#.|
        // |.#.|
        let mut grid: Grid = ".#.\n.#.".parse().unwrap();
        assert!(grid.reachable(&Point::new(0, 0), &Point::new(0, 1)));
        assert!(!grid.reachable(&Point::new(0, 0), &Point::new(2, 0)));
        assert!(!grid.reachable(&Point::new(0, 0), &Point::new(1, 0)));
        grid.set_barrier(Point::new(1, 1), false).unwrap();
        assert!(grid.reachable(&Point::new(0, 0), &Point::new(2, 0)));
        grid.set_barrier(Point::new(1, 1), true).unwrap();
        assert!(grid.components_dirty);
        grid.update();
        assert!(!grid.reachable(&Point::new(0, 0), &Point::new(2, 0)));
    }

    #[test]
    fn layout_round_trips_through_display() {
        let layout = "S..#\n.#..\n...E\n";
        let grid: Grid = layout.parse().unwrap();
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 4);
        assert_eq!(grid.to_string(), layout);
        assert!(matches!(
            "S.\n...".parse::<Grid>(),
            Err(Error::InvalidLayout(_))
        ));
        assert!(matches!("SS".parse::<Grid>(), Err(Error::InvalidLayout(_))));
    }

    #[test]
    fn clear_search_marks_keeps_layout() {
        let mut grid: Grid = "S.#E".parse().unwrap();
        grid.cell_mut(Point::new(0, 0)).mark_open();
        grid.cell_mut(Point::new(1, 0)).mark_closed();
        assert_eq!(grid.to_string(), "Sx#E\n");
        grid.clear_search_marks();
        assert_eq!(grid.to_string(), "S.#E\n");
        grid.clear();
        assert_eq!(grid.to_string(), "....\n");
    }
}
