//! # grid_search
//!
//! Step-by-step path search on a 4-connected grid of cells. Eight algorithms are available:
//! breadth-first, depth-first, depth-limited, iterative deepening, uniform cost, greedy
//! best-first, [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) and
//! [IDA*](https://en.wikipedia.org/wiki/Iterative_deepening_A*). Every move costs one.
//!
//! A search marks the cells it touches as open or closed while it runs and calls a redraw
//! callback after each step, so a front end can animate the exploration. On success the cells
//! on the path are marked as well. The grid also maintains
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory)) of free
//! cells, which answer reachability queries without running a search.
//!
//! ```
//! use grid_search::{Algorithm, Grid};
//!
//! let mut grid: Grid = "S.#\n..#\n#.E".parse().unwrap();
//! let outcome = Algorithm::Bfs.solve(&mut grid, |_: &Grid| {}).unwrap();
//! assert_eq!(outcome.hops(), Some(4));
//! ```
mod cell;
mod error;
mod grid;
pub mod heuristic;
pub mod search_tree;
pub mod solver;

pub use crate::cell::{Cell, Role};
pub use crate::error::{Error, Result};
pub use crate::grid::Grid;
pub use crate::solver::astar::AstarSolver;
pub use crate::solver::bfs::BfsSolver;
pub use crate::solver::dfs::DfsSolver;
pub use crate::solver::dls::DepthLimitedSolver;
pub use crate::solver::greedy::GreedySolver;
pub use crate::solver::ida_star::IdaStarSolver;
pub use crate::solver::iddfs::IddfsSolver;
pub use crate::solver::ucs::UniformCostSolver;
pub use crate::solver::{Algorithm, GridSolver, SearchOutcome};
pub use grid_util::point::Point;

/// Depth limit of [DepthLimitedSolver::new].
pub const DEFAULT_DEPTH_LIMIT: usize = 10;
