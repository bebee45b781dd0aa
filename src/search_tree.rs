//! Bookkeeping shared by the solvers during a single search run: predecessor links, costs, a
//! deterministic priority frontier and path reconstruction.
use crate::grid::Grid;
use fxhash::{FxBuildHasher, FxHashMap};
use grid_util::point::Point;
use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;
use num_traits::{Bounded, Zero};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

pub(crate) type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;
pub(crate) type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

const NO_PARENT: usize = usize::MAX;

/// Came-from mapping of one search run. Cells are kept in discovery order and refer to their
/// predecessor by index; the root has no predecessor. Re-parenting a cell keeps its index, so
/// the iteration order only depends on the order of discovery.
#[derive(Clone, Debug)]
pub struct CameFrom {
    parents: FxIndexMap<Point, usize>,
}

impl CameFrom {
    pub fn new(root: Point) -> CameFrom {
        let mut parents = FxIndexMap::default();
        parents.insert(root, NO_PARENT);
        CameFrom { parents }
    }
    /// Records `parent` as predecessor of `child`, replacing an earlier one.
    pub fn insert(&mut self, child: Point, parent: &Point) {
        let parent_ix = self.parents.get_index_of(parent).unwrap_or(NO_PARENT);
        self.parents.insert(child, parent_ix);
    }
    /// Whether the cell was discovered, the root included.
    pub fn contains(&self, point: &Point) -> bool {
        self.parents.contains_key(point)
    }
    pub fn parent(&self, point: &Point) -> Option<Point> {
        let &parent_ix = self.parents.get(point)?;
        self.parents.get_index(parent_ix).map(|(p, _)| *p)
    }
    pub fn len(&self) -> usize {
        self.parents.len()
    }
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
    /// Builds the mapping of a path given in start to end order.
    pub fn from_path<'a>(path: impl IntoIterator<Item = &'a Point>) -> Option<CameFrom> {
        let mut points = path.into_iter().peekable();
        let mut came_from = CameFrom::new(**points.peek()?);
        for (parent, child) in points.tuple_windows() {
            came_from.insert(*child, parent);
        }
        Some(came_from)
    }
    /// Follows predecessors from `end` to the root, both inclusive.
    fn walk_back(&self, end: &Point) -> Vec<Point> {
        let first = self.parents.get_index_of(end);
        std::iter::successors(first, |&ix| {
            let (_, &parent_ix) = self.parents.get_index(ix)?;
            (parent_ix != NO_PARENT).then_some(parent_ix)
        })
        .filter_map(|ix| self.parents.get_index(ix).map(|(p, _)| *p))
        .collect()
    }
}

/// Walks the predecessors from `end` back towards the start, marking every cell in between as
/// path and redrawing once per marked cell. The cells are visited end to start, the returned
/// path runs from start to end with both included. Returns an empty path if `end` was never
/// reached.
pub fn reconstruct_path(
    grid: &mut Grid,
    came_from: &CameFrom,
    end: &Point,
    draw: &mut dyn FnMut(&Grid),
) -> Vec<Point> {
    let mut path = came_from.walk_back(end);
    let n = path.len();
    for p in path.iter().take(n.saturating_sub(1)).skip(1) {
        grid.cell_mut(*p).mark_path();
        draw(grid);
    }
    path.reverse();
    path
}

/// Cost-so-far of each cell, "infinite" for cells that have not been reached.
#[derive(Clone, Debug)]
pub struct CostMap<C> {
    costs: FxHashMap<Point, C>,
}

impl<C: Bounded + Zero + Copy> CostMap<C> {
    pub fn new(root: Point) -> CostMap<C> {
        let mut costs = FxHashMap::default();
        costs.insert(root, C::zero());
        CostMap { costs }
    }
    pub fn get(&self, point: &Point) -> C {
        self.costs.get(point).copied().unwrap_or_else(C::max_value)
    }
    pub fn set(&mut self, point: Point, cost: C) {
        self.costs.insert(point, cost);
    }
}

struct FrontierEntry<K, T> {
    priority: K,
    sequence: usize,
    item: T,
}

impl<K: PartialOrd, T> Eq for FrontierEntry<K, T> {}

impl<K: PartialOrd, T> PartialEq for FrontierEntry<K, T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K: PartialOrd, T> PartialOrd for FrontierEntry<K, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: PartialOrd, T> Ord for FrontierEntry<K, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed on both keys: the heap pops the smallest priority, and among equal
        // priorities the entry pushed first.
        match other.priority.partial_cmp(&self.priority) {
            Some(Ordering::Equal) | None => other.sequence.cmp(&self.sequence),
            Some(s) => s,
        }
    }
}

/// Min-priority queue whose ties are broken by insertion order.
pub struct Frontier<K, T> {
    heap: BinaryHeap<FrontierEntry<K, T>>,
    sequence: usize,
}

impl<K: PartialOrd, T> Frontier<K, T> {
    pub fn new() -> Frontier<K, T> {
        Frontier {
            heap: BinaryHeap::new(),
            sequence: 0,
        }
    }
    pub fn push(&mut self, priority: K, item: T) {
        self.heap.push(FrontierEntry {
            priority,
            sequence: self.sequence,
            item,
        });
        self.sequence += 1;
    }
    pub fn pop(&mut self) -> Option<(K, T)> {
        self.heap.pop().map(|e| (e.priority, e.item))
    }
    pub fn len(&self) -> usize {
        self.heap.len()
    }
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<K: PartialOrd, T> Default for Frontier<K, T> {
    fn default() -> Self {
        Frontier::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frontier_breaks_ties_by_insertion() {
        let mut frontier = Frontier::new();
        frontier.push(2.0, 'a');
        frontier.push(1.0, 'b');
        frontier.push(2.0, 'c');
        frontier.push(1.0, 'd');
        let order: Vec<char> = std::iter::from_fn(|| frontier.pop().map(|(_, c)| c)).collect();
        assert_eq!(order, vec!['b', 'd', 'a', 'c']);
    }

    #[test]
    fn cost_map_defaults_to_infinite() {
        let root = Point::new(0, 0);
        let mut costs: CostMap<u32> = CostMap::new(root);
        assert_eq!(costs.get(&root), 0);
        assert_eq!(costs.get(&Point::new(1, 0)), u32::MAX);
        costs.set(Point::new(1, 0), 1);
        assert_eq!(costs.get(&Point::new(1, 0)), 1);
    }

    #[test]
    fn reparenting_keeps_a_tree() {
        let a = Point::new(0, 0);
        let b = Point::new(1, 0);
        let c = Point::new(1, 1);
        let mut came_from = CameFrom::new(a);
        came_from.insert(b, &a);
        came_from.insert(c, &b);
        assert_eq!(came_from.parent(&c), Some(b));
        came_from.insert(c, &a);
        assert_eq!(came_from.parent(&c), Some(a));
        assert_eq!(came_from.parent(&a), None);
        assert_eq!(came_from.walk_back(&c), vec![c, a]);
        assert_eq!(came_from.len(), 3);
    }

    #[test]
    fn reconstruct_marks_intermediate_cells_end_first() {
        let mut grid: Grid = "S..E".parse().unwrap();
        let path: Vec<Point> = (0..4).map(|x| Point::new(x, 0)).collect();
        let came_from = CameFrom::from_path(&path).unwrap();
        let mut marked = Vec::new();
        let end = Point::new(3, 0);
        let result = reconstruct_path(&mut grid, &came_from, &end, &mut |g: &Grid| {
            marked.push(g.cells().filter(|c| c.is_path()).count())
        });
        assert_eq!(result, path);
        assert_eq!(marked, vec![1, 2]);
        assert!(grid[Point::new(2, 0)].is_path());
        assert_eq!(grid.to_string(), "S**E\n");
    }

    #[test]
    fn reconstruct_without_route_is_empty() {
        let mut grid = Grid::new(1, 2);
        let came_from = CameFrom::new(Point::new(0, 0));
        let path = reconstruct_path(&mut grid, &came_from, &Point::new(1, 0), &mut |_: &Grid| {});
        assert!(path.is_empty());
    }
}
