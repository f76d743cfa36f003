use std::fmt;
use std::io::{self, Write};

use itertools::iproduct;
use petgraph::graph::{self, Graph, NodeIndex};
use petgraph::Undirected;
use smallvec::SmallVec;
use tracing::debug;

use crate::cells::{Cell, CellId, Direction};
use crate::edges::{Edge, EdgeIndex};
use crate::errors::*;
use crate::units::{ColumnIndex, ColumnsCount, EdgesCount, NodesCount, RowIndex, RowsCount};

pub type LinksSmallVec = SmallVec<[CellId; 4]>;

/// Open passages only: one node per cell (node index == cell id), one edge per carved wall
/// weighted with the index of the grid edge it came from.
pub type PassageGraph = Graph<CellId, EdgeIndex, Undirected, u32>;

/// A rectangular lattice of cells joined by shared walls.
///
/// The petgraph graph is the arena for both: node `i` holds the cell with id `i` and every
/// edge is stored once, referenced by index from the directional slots of both its cells.
#[derive(Clone)]
pub struct Grid {
    graph: Graph<Cell, Edge, Undirected, u32>,
    rows: RowsCount,
    columns: ColumnsCount,
    start: Option<CellId>,
    end: Option<CellId>,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "Grid :: rows: {:?}, columns: {:?}, edges: {}, start: {:?}, end: {:?}",
               self.rows,
               self.columns,
               self.graph.edge_count(),
               self.start,
               self.end)
    }
}

#[inline(always)]
fn node(id: CellId) -> NodeIndex<u32> {
    NodeIndex::new(id.0)
}

/// Cell and wall counts of a `rows` by `columns` grid.
/// None if either dimension is zero or the counts do not fit a 32 bit graph index.
pub fn graph_size(rows: RowsCount, columns: ColumnsCount) -> Option<(NodesCount, EdgesCount)> {
    let (RowsCount(r), ColumnsCount(c)) = (rows, columns);
    if r == 0 || c == 0 {
        return None;
    }
    let nodes = r.checked_mul(c)?;
    let edges = r.checked_mul(c - 1)?.checked_add(c.checked_mul(r - 1)?)?;

    // petgraph reserves the maximum index value as its "no index" marker.
    let index_limit = u32::MAX as usize;
    if nodes >= index_limit || edges >= index_limit {
        None
    } else {
        Some((NodesCount(nodes), EdgesCount(edges)))
    }
}

impl Grid {
    /// Builds every cell and every wall between row or column adjacent cells.
    ///
    /// Cells are visited in row-major order and each side in `Direction` order. Before a
    /// wall is created the neighbour's facing slot is checked, so a wall the neighbour
    /// already made is reused and each adjacency ends up with exactly one edge.
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> Result<Grid> {
        let (NodesCount(nodes), EdgesCount(edges)) =
            graph_size(rows, columns).ok_or_else(|| ErrorKind::InvalidDimensions(rows.0, columns.0))?;

        let mut graph = Graph::with_capacity(nodes, edges);
        for id in 0..nodes {
            let _ = graph.add_node(Cell::new(CellId(id)));
        }

        let mut grid = Grid {
            graph,
            rows,
            columns,
            start: None,
            end: None,
        };

        for (row, column) in iproduct!(0..rows.0, 0..columns.0) {
            let (row, column) = (RowIndex(row), ColumnIndex(column));
            let id = grid.cell_index(row, column);
            for &dir in &Direction::ALL {
                if let Some(neighbour) = grid.neighbour_index(row, column, dir) {
                    grid.share_edge(id, neighbour, dir);
                }
            }
        }
        debug_assert_eq!(grid.graph.edge_count(), edges);

        debug!("built {}x{} grid: {} cells, {} edges",
               rows.0,
               columns.0,
               nodes,
               grid.graph.edge_count());
        Ok(grid)
    }

    fn share_edge(&mut self, id: CellId, neighbour: CellId, dir: Direction) {
        let facing = dir.opposite();
        let edge = match self.graph[node(neighbour)].edge(facing) {
            Some(existing) => existing,
            None => self.graph.add_edge(node(id), node(neighbour), Edge::new(id, neighbour)),
        };
        self.graph[node(id)].edges[dir.index()] = Some(edge);
        self.graph[node(neighbour)].edges[facing.index()] = Some(edge);
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.graph.node_count()
    }

    #[inline]
    pub fn edges_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[inline]
    pub fn start(&self) -> Option<CellId> {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Option<CellId> {
        self.end
    }

    pub(crate) fn set_endpoints(&mut self, start: CellId, end: CellId) {
        self.start = Some(start);
        self.end = Some(end);
    }

    /// Row-major id of the cell at `row`, `column`. The position is not bounds checked.
    #[inline]
    pub fn cell_index(&self, row: RowIndex, column: ColumnIndex) -> CellId {
        CellId(row.0 * self.columns.0 + column.0)
    }

    #[inline]
    pub fn cell_coordinate(&self, id: CellId) -> (RowIndex, ColumnIndex) {
        (RowIndex(id.0 / self.columns.0), ColumnIndex(id.0 % self.columns.0))
    }

    #[inline]
    pub fn is_valid_cell(&self, id: CellId) -> bool {
        id.0 < self.size()
    }

    /// Id of the cell one step away in `direction`, None off the edge of the grid.
    pub fn neighbour_index(&self,
                           row: RowIndex,
                           column: ColumnIndex,
                           direction: Direction)
                           -> Option<CellId> {
        let (RowIndex(r), ColumnIndex(c)) = (row, column);
        if r >= self.rows.0 || c >= self.columns.0 {
            return None;
        }
        match direction {
            Direction::Left if c > 0 => Some(self.cell_index(row, ColumnIndex(c - 1))),
            Direction::Right if c + 1 < self.columns.0 => Some(self.cell_index(row, ColumnIndex(c + 1))),
            Direction::Up if r > 0 => Some(self.cell_index(RowIndex(r - 1), column)),
            Direction::Down if r + 1 < self.rows.0 => Some(self.cell_index(RowIndex(r + 1), column)),
            _ => None,
        }
    }

    /// The neighbour reached through the cell's own edge slot, open or not.
    pub fn neighbour(&self, id: CellId, direction: Direction) -> Option<CellId> {
        self.edge_at(id, direction)
            .and_then(|edge| self.edge(edge))
            .map(|edge| edge.other(id))
    }

    #[inline]
    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.graph.node_weight(node(id))
    }

    #[inline]
    pub fn edge(&self, edge: EdgeIndex) -> Option<&Edge> {
        self.graph.edge_weight(edge)
    }

    #[inline]
    pub fn edge_at(&self, id: CellId, direction: Direction) -> Option<EdgeIndex> {
        self.cell(id).and_then(|cell| cell.edge(direction))
    }

    pub fn edge_between(&self, a: CellId, b: CellId) -> Option<EdgeIndex> {
        if self.is_valid_cell(a) && self.is_valid_cell(b) {
            self.graph.find_edge(node(a), node(b))
        } else {
            None
        }
    }

    /// Panics if `id` is not a cell of this grid.
    pub(crate) fn mark_visited(&mut self, id: CellId) {
        self.graph[node(id)].visited = true;
    }

    /// Panics if `edge` is not an edge of this grid.
    pub(crate) fn open_edge(&mut self, edge: EdgeIndex) {
        self.graph[edge].deactivate();
    }

    /// Cell ids in row-major order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = CellId> {
        (0..self.size()).map(CellId)
    }

    pub fn iter_cells(&self) -> impl ExactSizeIterator<Item = &Cell> {
        self.graph.raw_nodes().iter().map(|n| &n.weight)
    }

    /// Edges in creation order.
    pub fn iter_edges(&self) -> impl ExactSizeIterator<Item = (EdgeIndex, &Edge)> {
        self.graph
            .raw_edges()
            .iter()
            .enumerate()
            .map(|(i, e)| (graph::EdgeIndex::new(i), &e.weight))
    }

    pub fn walls_count(&self) -> usize {
        self.iter_edges().filter(|(_, edge)| edge.is_active()).count()
    }

    pub fn passages_count(&self) -> usize {
        self.edges_count() - self.walls_count()
    }

    /// Are two cells joined by an open passage?
    pub fn is_linked(&self, a: CellId, b: CellId) -> bool {
        self.edge_between(a, b)
            .and_then(|edge| self.edge(edge))
            .map_or(false, |edge| !edge.is_active())
    }

    pub fn is_neighbour_linked(&self, id: CellId, direction: Direction) -> bool {
        self.edge_at(id, direction)
            .and_then(|edge| self.edge(edge))
            .map_or(false, |edge| !edge.is_active())
    }

    /// Cells reachable from `id` through an open passage.
    /// None if the id is not a cell of this grid.
    pub fn links(&self, id: CellId) -> Option<LinksSmallVec> {
        self.cell(id).map(|cell| {
            cell.edges()
                .filter_map(|(_, edge_index)| self.edge(edge_index))
                .filter(|edge| !edge.is_active())
                .map(|edge| edge.other(id))
                .collect()
        })
    }

    pub fn is_fully_visited(&self) -> bool {
        self.iter_cells().all(Cell::is_visited)
    }

    pub fn passages(&self) -> PassageGraph {
        self.graph.filter_map(|_, cell| Some(cell.id()),
                              |edge_index, edge| if edge.is_active() {
                                  None
                              } else {
                                  Some(edge_index)
                              })
    }

    /// Writes the open passages as a text edge list.
    ///
    /// Line 1: `n m`, the cell count and the passage count. Then one `a b` line per passage
    /// in edge creation order, using 1-based cell indices.
    pub fn write_passages<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let passages = self.passages();
        writeln!(out, "{} {}", passages.node_count(), passages.edge_count())?;
        for edge in passages.raw_edges() {
            let src_as_1_based_index = edge.source().index() + 1;
            let dst_as_1_based_index = edge.target().index() + 1;
            writeln!(out, "{} {}", src_as_1_based_index, dst_as_1_based_index)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {

    use itertools::Itertools;

    use super::*;

    fn grid(rows: usize, columns: usize) -> Grid {
        Grid::new(RowsCount(rows), ColumnsCount(columns)).expect("valid grid dimensions")
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        for &(r, c) in &[(0, 0), (0, 5), (5, 0)] {
            let err = Grid::new(RowsCount(r), ColumnsCount(c)).unwrap_err();
            match *err.kind() {
                ErrorKind::InvalidDimensions(er, ec) => assert_eq!((er, ec), (r, c)),
                ref other => panic!("expected invalid dimensions, got {}", other),
            }
        }
    }

    #[test]
    fn oversized_dimensions_are_rejected() {
        assert!(graph_size(RowsCount(usize::MAX), ColumnsCount(2)).is_none());
        assert!(graph_size(RowsCount(1 << 16), ColumnsCount(1 << 16)).is_none());
    }

    #[test]
    fn cell_and_edge_counts() {
        for &(r, c) in &[(1, 1), (1, 4), (4, 1), (2, 2), (3, 5), (10, 10)] {
            let g = grid(r, c);
            assert_eq!(g.size(), r * c);
            assert_eq!(g.edges_count(), r * (c - 1) + c * (r - 1));
            assert_eq!(g.walls_count(), g.edges_count());
            assert_eq!(g.passages_count(), 0);
        }
    }

    #[test]
    fn single_cell_grid_has_no_edges() {
        let g = grid(1, 1);
        assert_eq!(g.edges_count(), 0);
        let cell = g.cell(CellId(0)).unwrap();
        assert_eq!(cell.edges().count(), 0);
    }

    #[test]
    fn cell_ids_are_row_major() {
        let g = grid(3, 4);
        let ids = iproduct!(0..3, 0..4)
            .map(|(r, c)| g.cell_index(RowIndex(r), ColumnIndex(c)))
            .collect::<Vec<_>>();
        assert_eq!(ids, g.iter().collect::<Vec<_>>());
        for id in g.iter() {
            let (row, column) = g.cell_coordinate(id);
            assert_eq!(g.cell_index(row, column), id);
            assert_eq!(g.cell(id).unwrap().id(), id);
        }
    }

    #[test]
    fn neighbour_cells() {
        let g = grid(3, 3);
        let check = |r, c, expected: &[Option<usize>]| {
            let found = Direction::ALL
                .iter()
                .map(|&dir| g.neighbour_index(RowIndex(r), ColumnIndex(c), dir).map(|id| id.0))
                .collect::<Vec<_>>();
            assert_eq!(&found[..], expected);
        };
        // corners, Left Right Up Down
        check(0, 0, &[None, Some(1), None, Some(3)]);
        check(0, 2, &[Some(1), None, None, Some(5)]);
        check(2, 0, &[None, Some(7), Some(3), None]);
        check(2, 2, &[Some(7), None, Some(5), None]);
        // middle
        check(1, 1, &[Some(3), Some(5), Some(1), Some(7)]);
        // outside
        check(3, 0, &[None, None, None, None]);
    }

    #[test]
    fn adjacent_cells_share_one_edge() {
        let g = grid(4, 5);
        for id in g.iter() {
            let (row, column) = g.cell_coordinate(id);
            for &dir in &Direction::ALL {
                match g.neighbour_index(row, column, dir) {
                    Some(neighbour) => {
                        let mine = g.edge_at(id, dir).expect("interior side has an edge");
                        let theirs = g.edge_at(neighbour, dir.opposite())
                            .expect("facing side has an edge");
                        assert_eq!(mine, theirs);
                        assert!(g.edge(mine).unwrap().connects(id, neighbour));
                        assert_eq!(g.neighbour(id, dir), Some(neighbour));
                    }
                    None => assert_eq!(g.edge_at(id, dir), None),
                }
            }
        }

        let pairs = g.iter_edges()
            .map(|(_, e)| {
                let (a, b) = e.cells();
                if a < b { (a, b) } else { (b, a) }
            })
            .collect::<Vec<_>>();
        assert_eq!(pairs.iter().unique().count(), pairs.len());
    }

    #[test]
    fn edges_are_created_in_construction_order() {
        let g = grid(2, 2);
        let cells = g.iter_edges().map(|(_, e)| e.cells()).collect::<Vec<_>>();
        assert_eq!(cells,
                   vec![(CellId(0), CellId(1)),
                        (CellId(0), CellId(2)),
                        (CellId(1), CellId(3)),
                        (CellId(2), CellId(3))]);
    }

    #[test]
    fn opening_edges_links_cells() {
        let mut g = grid(2, 2);
        let (a, b, d) = (CellId(0), CellId(1), CellId(3));
        assert!(!g.is_linked(a, b));
        assert!(g.links(a).unwrap().is_empty());

        let ab = g.edge_between(a, b).unwrap();
        g.open_edge(ab);
        assert!(g.is_linked(a, b));
        assert!(g.is_linked(b, a));
        assert!(g.is_neighbour_linked(a, Direction::Right));
        assert!(g.is_neighbour_linked(b, Direction::Left));
        assert!(!g.is_neighbour_linked(a, Direction::Down));
        assert_eq!(&*g.links(a).unwrap(), &[b]);
        assert_eq!(&*g.links(b).unwrap(), &[a]);

        // diagonal cells are never linked
        assert_eq!(g.edge_between(a, d), None);
        assert!(!g.is_linked(a, d));

        assert_eq!(g.passages_count(), 1);
        assert_eq!(g.walls_count(), 3);
        let passages = g.passages();
        assert_eq!(passages.node_count(), 4);
        assert_eq!(passages.edge_count(), 1);
        assert_eq!(passages.raw_edges()[0].weight, ab);
    }

    #[test]
    fn passages_edge_list() {
        let mut g = grid(2, 2);
        let mut out = Vec::new();
        g.write_passages(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "4 0\n");

        for (a, b) in vec![(0, 1), (1, 3), (2, 3)] {
            let edge = g.edge_between(CellId(a), CellId(b)).unwrap();
            g.open_edge(edge);
        }
        let mut out = Vec::new();
        g.write_passages(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "4 3\n1 2\n2 4\n3 4\n");
    }

    #[test]
    fn links_of_invalid_cell() {
        let g = grid(2, 2);
        assert!(g.links(CellId(4)).is_none());
        assert!(!g.is_linked(CellId(0), CellId(100)));
    }

    #[test]
    fn visiting() {
        let mut g = grid(1, 2);
        assert!(!g.is_fully_visited());
        g.mark_visited(CellId(0));
        assert!(!g.is_fully_visited());
        g.mark_visited(CellId(1));
        assert!(g.is_fully_visited());
    }
}
