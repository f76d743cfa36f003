use std::cmp;

use rand::{thread_rng, Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use tracing::{debug, trace};

use crate::cells::{CellId, Direction};
use crate::errors::*;
use crate::grid::Grid;
use crate::units::{ColumnIndex, RowIndex};

/// Optional overrides for where the maze starts (top row) and ends (bottom row).
/// A missing column is picked at random when carving.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Default)]
pub struct Endpoints {
    pub start_column: Option<ColumnIndex>,
    pub end_column: Option<ColumnIndex>,
}

impl Endpoints {
    pub fn new(start_column: Option<ColumnIndex>, end_column: Option<ColumnIndex>) -> Endpoints {
        Endpoints {
            start_column,
            end_column,
        }
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug, Default)]
pub struct CarveStats {
    pub cells_visited: usize,
    pub passages_carved: usize,
    /// Deepest backtracking stack reached, not counting the start cell.
    pub max_depth: usize,
}

pub type MazeRng = Xoshiro256StarStar;

/// A seeded generator reproduces the same maze for the same seed. Without a seed one is
/// drawn from the thread rng.
pub fn maze_rng(seed: Option<u64>) -> MazeRng {
    let seed = seed.unwrap_or_else(|| thread_rng().gen());
    trace!("maze rng seed {}", seed);
    MazeRng::seed_from_u64(seed)
}

/// Carve a perfect maze into a freshly built grid with a randomised depth first search.
///
/// Starting from the start cell, repeatedly pick a random direction and scan the four
/// sides cyclically from it for a wall into an unvisited cell. Knock that wall down and
/// continue from the neighbour. When a full scan finds nothing, backtrack to the previous
/// cell, which draws a fresh direction and scans again.
///
/// Random draws happen in a fixed order: the start column (unless given), the end column
/// (unless given), then one direction index in `0..4` per scan. The backtracking stack is
/// an explicit `Vec`, so grid size is not limited by the thread's call stack.
///
/// Fails with `AlreadyCarved` if the grid has endpoints or visited cells from an earlier
/// carve, and with `InvalidEndpoint` for a column outside the grid. Neither touches the grid.
pub fn recursive_backtracker<R>(grid: &mut Grid,
                                rng: &mut R,
                                endpoints: Endpoints)
                                -> Result<CarveStats>
    where R: Rng + ?Sized
{
    if grid.start().is_some() || grid.iter_cells().any(|c| c.is_visited()) {
        return Err(ErrorKind::AlreadyCarved.into());
    }

    let columns = grid.columns().0;
    for column in [endpoints.start_column, endpoints.end_column].iter().flatten() {
        if column.0 >= columns {
            return Err(ErrorKind::InvalidEndpoint(column.0, columns).into());
        }
    }

    let start_column = endpoints.start_column
        .unwrap_or_else(|| ColumnIndex(rng.gen_range(0..columns)));
    let end_column = endpoints.end_column
        .unwrap_or_else(|| ColumnIndex(rng.gen_range(0..columns)));
    let start = grid.cell_index(RowIndex(0), start_column);
    let end = grid.cell_index(RowIndex(grid.rows().0 - 1), end_column);
    grid.set_endpoints(start, end);
    debug!("carving from {:?} (column {}), end {:?} (column {})",
           start,
           start_column.0,
           end,
           end_column.0);

    let mut stats = CarveStats {
        cells_visited: 1,
        ..CarveStats::default()
    };
    grid.mark_visited(start);

    let mut stack = Vec::with_capacity(grid.size());
    stack.push(start);
    while let Some(&current) = stack.last() {
        match carve_to_unvisited_neighbour(grid, rng, current) {
            Some(next) => {
                grid.mark_visited(next);
                stack.push(next);
                stats.cells_visited += 1;
                stats.passages_carved += 1;
                stats.max_depth = cmp::max(stats.max_depth, stack.len() - 1);
            }
            None => {
                let _ = stack.pop();
            }
        }
    }

    debug!("carved {} passages over {} cells, max depth {}",
           stats.passages_carved,
           stats.cells_visited,
           stats.max_depth);
    Ok(stats)
}

/// One scan of `cell`'s sides. Opens the wall to the first unvisited neighbour found and
/// returns that neighbour.
fn carve_to_unvisited_neighbour<R>(grid: &mut Grid, rng: &mut R, cell: CellId) -> Option<CellId>
    where R: Rng + ?Sized
{
    let mut dir = Direction::from_index(rng.gen_range(0..Direction::COUNT));
    for _ in 0..Direction::COUNT {
        if let Some(edge) = grid.edge_at(cell, dir) {
            let neighbour = grid.neighbour(cell, dir);
            let unvisited = neighbour.and_then(|n| grid.cell(n)).map_or(false, |c| !c.is_visited());
            if unvisited {
                grid.open_edge(edge);
                trace!("{:?} -> {:?} via {:?}", cell, neighbour, dir);
                return neighbour;
            }
        }
        dir = dir.next();
    }
    None
}
