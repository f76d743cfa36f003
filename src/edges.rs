use petgraph::graph;

use crate::cells::CellId;

/// Index of an edge in the grid's edge arena.
pub type EdgeIndex = graph::EdgeIndex<u32>;

/// The wall between two grid adjacent cells.
///
/// `active` means the wall is standing. Carving only ever knocks walls down, so once an
/// edge is inactive it stays that way.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Edge {
    cells: [CellId; 2],
    pub(crate) active: bool,
}

impl Edge {
    pub fn new(a: CellId, b: CellId) -> Edge {
        debug_assert_ne!(a, b, "an edge needs two distinct cells");
        Edge {
            cells: [a, b],
            active: true,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn cells(&self) -> (CellId, CellId) {
        (self.cells[0], self.cells[1])
    }

    /// The cell on the other side of the wall from `cell`.
    ///
    /// Callers pass one of the edge's own cells; any other id yields the first cell.
    #[inline]
    pub fn other(&self, cell: CellId) -> CellId {
        if cell == self.cells[0] {
            self.cells[1]
        } else {
            self.cells[0]
        }
    }

    #[inline]
    pub fn connects(&self, a: CellId, b: CellId) -> bool {
        (self.cells[0] == a && self.cells[1] == b) || (self.cells[0] == b && self.cells[1] == a)
    }

    #[inline]
    pub(crate) fn deactivate(&mut self) {
        self.active = false;
    }
}
