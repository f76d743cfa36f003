use crate::edges::EdgeIndex;

/// Row-major identity of a cell: `row * columns + column`.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct CellId(pub usize);

/// The four sides of a square cell.
///
/// The declaration order is also the cyclic order in which the carver scans for an
/// unvisited neighbour, so `Direction::from_index(i)` must stay in sync with it.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const COUNT: usize = 4;
    pub const ALL: [Direction; Direction::COUNT] = [Direction::Left,
                                                    Direction::Right,
                                                    Direction::Up,
                                                    Direction::Down];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Direction::Left => 0,
            Direction::Right => 1,
            Direction::Up => 2,
            Direction::Down => 3,
        }
    }

    /// Panics if `index` is not below `Direction::COUNT`.
    #[inline]
    pub fn from_index(index: usize) -> Direction {
        Direction::ALL[index]
    }

    /// The side of the neighbouring cell that faces this side.
    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Next direction in the cyclic scan order, wrapping from `Down` back to `Left`.
    #[inline]
    pub fn next(self) -> Direction {
        Direction::from_index((self.index() + 1) % Direction::COUNT)
    }
}

/// One grid position: its identity, whether the carver has reached it and one optional
/// shared edge per side. Cells on the grid boundary have `None` on their outer sides.
#[derive(Clone, Debug)]
pub struct Cell {
    id: CellId,
    pub(crate) visited: bool,
    pub(crate) edges: [Option<EdgeIndex>; Direction::COUNT],
}

impl Cell {
    pub fn new(id: CellId) -> Cell {
        Cell {
            id,
            visited: false,
            edges: [None; Direction::COUNT],
        }
    }

    #[inline]
    pub fn id(&self) -> CellId {
        self.id
    }

    #[inline]
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    #[inline]
    pub fn edge(&self, direction: Direction) -> Option<EdgeIndex> {
        self.edges[direction.index()]
    }

    /// Every side that has an edge, in scan order.
    pub fn edges(&self) -> impl Iterator<Item = (Direction, EdgeIndex)> + '_ {
        Direction::ALL
            .iter()
            .filter_map(move |&dir| self.edge(dir).map(|edge| (dir, edge)))
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn direction_indices_follow_scan_order() {
        for (i, dir) in Direction::ALL.iter().enumerate() {
            assert_eq!(dir.index(), i);
            assert_eq!(Direction::from_index(i), *dir);
        }
    }

    #[test]
    fn direction_cycle_wraps() {
        assert_eq!(Direction::Left.next(), Direction::Right);
        assert_eq!(Direction::Right.next(), Direction::Up);
        assert_eq!(Direction::Up.next(), Direction::Down);
        assert_eq!(Direction::Down.next(), Direction::Left);
    }

    #[test]
    fn opposite_is_an_involution() {
        for dir in &Direction::ALL {
            assert_ne!(dir.opposite(), *dir);
            assert_eq!(dir.opposite().opposite(), *dir);
        }
    }

    #[test]
    fn new_cell_is_unvisited_and_unconnected() {
        let c = Cell::new(CellId(7));
        assert_eq!(c.id(), CellId(7));
        assert!(!c.is_visited());
        assert_eq!(c.edges().count(), 0);
        for dir in &Direction::ALL {
            assert_eq!(c.edge(*dir), None);
        }
    }
}
