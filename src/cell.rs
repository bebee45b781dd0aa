use core::fmt;
use grid_util::point::Point;
use smallvec::SmallVec;

/// The role a [Cell] plays, both for the search and for whoever renders the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Role {
    #[default]
    Empty,
    Barrier,
    Start,
    End,
    /// Discovered and waiting in the frontier.
    Open,
    /// Expanded.
    Closed,
    Path,
}

impl Role {
    /// Single character used by the textual rendering of a [Grid](crate::Grid).
    pub fn symbol(&self) -> char {
        match self {
            Role::Empty => '.',
            Role::Barrier => '#',
            Role::Start => 'S',
            Role::End => 'E',
            Role::Open => 'o',
            Role::Closed => 'x',
            Role::Path => '*',
        }
    }

    /// Roles written by the search algorithms, as opposed to the ones a user paints.
    pub fn is_search_mark(&self) -> bool {
        matches!(self, Role::Open | Role::Closed | Role::Path)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A single unit of the grid. Cells are created once by the [Grid](crate::Grid) and only their
/// role and cached neighbours change afterwards.
///
/// The search marks ([mark_open](Self::mark_open), [mark_closed](Self::mark_closed),
/// [mark_path](Self::mark_path)) never overwrite a start or end cell, and a start or end cell
/// cannot be turned into a barrier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    position: Point,
    role: Role,
    pub(crate) neighbours: SmallVec<[Point; 4]>,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Cell {
        Cell {
            position: Point::new(col as i32, row as i32),
            role: Role::Empty,
            neighbours: SmallVec::new(),
        }
    }
    pub fn row(&self) -> usize {
        self.position.y as usize
    }
    pub fn col(&self) -> usize {
        self.position.x as usize
    }
    /// Logical `(row, col)` position.
    pub fn position(&self) -> (usize, usize) {
        (self.row(), self.col())
    }
    /// The grid coordinate of this cell, `x` being the column and `y` the row.
    pub fn point(&self) -> Point {
        self.position
    }
    pub fn role(&self) -> Role {
        self.role
    }
    /// Neighbours as of the last [Grid::update_neighbours](crate::Grid::update_neighbours).
    pub fn neighbours(&self) -> &[Point] {
        &self.neighbours
    }

    pub fn is_empty(&self) -> bool {
        self.role == Role::Empty
    }
    pub fn is_barrier(&self) -> bool {
        self.role == Role::Barrier
    }
    pub fn is_start(&self) -> bool {
        self.role == Role::Start
    }
    pub fn is_end(&self) -> bool {
        self.role == Role::End
    }
    pub fn is_open(&self) -> bool {
        self.role == Role::Open
    }
    pub fn is_closed(&self) -> bool {
        self.role == Role::Closed
    }
    pub fn is_path(&self) -> bool {
        self.role == Role::Path
    }
    fn is_terminal(&self) -> bool {
        self.is_start() || self.is_end()
    }

    pub fn mark_start(&mut self) {
        self.role = Role::Start;
    }
    pub fn mark_end(&mut self) {
        self.role = Role::End;
    }
    pub fn mark_barrier(&mut self) {
        if !self.is_terminal() {
            self.role = Role::Barrier;
        }
    }
    pub fn mark_open(&mut self) {
        self.mark_search(Role::Open);
    }
    pub fn mark_closed(&mut self) {
        self.mark_search(Role::Closed);
    }
    pub fn mark_path(&mut self) {
        self.mark_search(Role::Path);
    }
    /// Clears the cell back to [Role::Empty], whatever its role was.
    pub fn reset(&mut self) {
        self.role = Role::Empty;
    }

    fn mark_search(&mut self, role: Role) {
        // Barriers never end up in a frontier, but guard anyway so a stale
        // neighbour list cannot paint over one.
        if !self.is_terminal() && !self.is_barrier() {
            self.role = role;
        }
    }
}
