use crate::error::{Error, Result};
use crate::grid::Grid;
use core::fmt;
use grid_util::point::Point;
use log::info;
use std::str::FromStr;

pub mod astar;
pub mod bfs;
pub mod dfs;
pub mod dls;
pub mod greedy;
pub mod iddfs;
pub mod ida_star;
pub mod ucs;

use astar::AstarSolver;
use bfs::BfsSolver;
use dfs::DfsSolver;
use dls::DepthLimitedSolver;
use greedy::GreedySolver;
use iddfs::IddfsSolver;
use ida_star::IdaStarSolver;
use ucs::UniformCostSolver;

/// How a search run ended.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchOutcome {
    /// The end was reached. The path runs from start to end, both included.
    Found { path: Vec<Point> },
    /// Every cell reachable from the start was explored without reaching the end.
    NoPath,
    /// The search gave up at a depth limit or iteration ceiling before it could decide whether
    /// a path exists.
    LimitReached { limit: usize },
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found { .. })
    }
    pub fn path(&self) -> Option<&[Point]> {
        match self {
            SearchOutcome::Found { path } => Some(path),
            _ => None,
        }
    }
    /// Number of moves along the found path.
    pub fn hops(&self) -> Option<usize> {
        self.path().map(|p| p.len().saturating_sub(1))
    }
}

/// Common contract of the search algorithms. Implementors only provide [explore](Self::explore);
/// [search](Self::search) takes care of the preconditions, the neighbour refresh, the trivial
/// case and restoring the start and end roles.
///
/// The redraw callback receives a shared view of the grid. It is called once for every cell
/// that is expanded and once for every cell marked as path.
pub trait GridSolver {
    fn name(&self) -> &'static str;

    /// Runs the algorithm proper. Neighbour lists are fresh and `start != end`.
    fn explore(
        &self,
        grid: &mut Grid,
        start: Point,
        end: Point,
        draw: &mut dyn FnMut(&Grid),
    ) -> SearchOutcome;

    /// Searches for a path from `start` to `end`, marking the explored cells and, on success,
    /// the path. Afterwards `start` and `end` are the start and end cells of the grid.
    fn search<F>(
        &self,
        grid: &mut Grid,
        start: Point,
        end: Point,
        mut draw: F,
    ) -> Result<SearchOutcome>
    where
        F: FnMut(&Grid),
    {
        for p in [start, end] {
            let cell = grid.get(p).ok_or(Error::OutOfBounds(p))?;
            if cell.is_barrier() {
                return Err(Error::Blocked(p));
            }
        }
        grid.update_neighbours();
        if start == end {
            return Ok(SearchOutcome::Found { path: vec![start] });
        }
        info!("{}: searching from {} to {}", self.name(), start, end);
        let outcome = self.explore(grid, start, end, &mut draw);
        match &outcome {
            SearchOutcome::Found { path } => {
                info!("{}: found a path of {} cells", self.name(), path.len())
            }
            SearchOutcome::NoPath => {
                info!("{}: {} is not reachable from {}", self.name(), end, start)
            }
            SearchOutcome::LimitReached { limit } => {
                info!("{}: gave up at limit {}", self.name(), limit)
            }
        }
        grid.set_start(start)?;
        grid.set_end(end)?;
        Ok(outcome)
    }

    /// Like [search](Self::search), using the start and end cells placed on the grid.
    fn solve<F>(&self, grid: &mut Grid, draw: F) -> Result<SearchOutcome>
    where
        F: FnMut(&Grid),
    {
        let start = grid.start().ok_or(Error::MissingStart)?;
        let end = grid.end().ok_or(Error::MissingEnd)?;
        self.search(grid, start, end, draw)
    }
}

/// Selects one of the solvers with its default configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Bfs,
    Dfs,
    Astar,
    DepthLimited,
    UniformCost,
    Greedy,
    Iddfs,
    IdaStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 8] = [
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::Astar,
        Algorithm::DepthLimited,
        Algorithm::UniformCost,
        Algorithm::Greedy,
        Algorithm::Iddfs,
        Algorithm::IdaStar,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Bfs => "BFS",
            Algorithm::Dfs => "DFS",
            Algorithm::Astar => "A*",
            Algorithm::DepthLimited => "DLS",
            Algorithm::UniformCost => "UCS",
            Algorithm::Greedy => "Greedy",
            Algorithm::Iddfs => "IDDFS",
            Algorithm::IdaStar => "IDA*",
        }
    }

    /// Whether the found path is guaranteed to be a shortest one.
    pub fn is_optimal(&self) -> bool {
        matches!(
            self,
            Algorithm::Bfs
                | Algorithm::Astar
                | Algorithm::UniformCost
                | Algorithm::Iddfs
                | Algorithm::IdaStar
        )
    }

    pub fn search<F>(
        &self,
        grid: &mut Grid,
        start: Point,
        end: Point,
        draw: F,
    ) -> Result<SearchOutcome>
    where
        F: FnMut(&Grid),
    {
        match self {
            Algorithm::Bfs => BfsSolver.search(grid, start, end, draw),
            Algorithm::Dfs => DfsSolver.search(grid, start, end, draw),
            Algorithm::Astar => AstarSolver::new().search(grid, start, end, draw),
            Algorithm::DepthLimited => DepthLimitedSolver::new().search(grid, start, end, draw),
            Algorithm::UniformCost => UniformCostSolver.search(grid, start, end, draw),
            Algorithm::Greedy => GreedySolver::new().search(grid, start, end, draw),
            Algorithm::Iddfs => IddfsSolver::new().search(grid, start, end, draw),
            Algorithm::IdaStar => IdaStarSolver::new().search(grid, start, end, draw),
        }
    }

    /// Runs the algorithm between the start and end cells placed on the grid.
    pub fn solve<F>(&self, grid: &mut Grid, draw: F) -> Result<SearchOutcome>
    where
        F: FnMut(&Grid),
    {
        let start = grid.start().ok_or(Error::MissingStart)?;
        let end = grid.end().ok_or(Error::MissingEnd)?;
        self.search(grid, start, end, draw)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Algorithm> {
        let algorithm = match s.trim().to_ascii_lowercase().as_str() {
            "bfs" => Algorithm::Bfs,
            "dfs" => Algorithm::Dfs,
            "a*" | "astar" => Algorithm::Astar,
            "dls" => Algorithm::DepthLimited,
            "ucs" | "dijkstra" => Algorithm::UniformCost,
            "greedy" => Algorithm::Greedy,
            "iddfs" | "ids" => Algorithm::Iddfs,
            "ida*" | "ida" | "idastar" => Algorithm::IdaStar,
            _ => return Err(Error::UnknownAlgorithm(s.to_owned())),
        };
        Ok(algorithm)
    }
}
