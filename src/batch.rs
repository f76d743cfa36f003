use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::debug;

use crate::errors::*;
use crate::generators::{maze_rng, recursive_backtracker, CarveStats, Endpoints};
use crate::grid::Grid;
use crate::units::{ColumnsCount, RowsCount};

/// Build and carve one maze per seed, in parallel.
///
/// Each maze owns its grid and its own generator seeded from its seed, so the result for
/// a seed is the same as carving it alone. Results come back in seed order.
pub fn generate_batch(rows: RowsCount,
                      columns: ColumnsCount,
                      seeds: &[u64],
                      endpoints: Endpoints)
                      -> Result<Vec<(Grid, CarveStats)>> {
    debug!("generating {} mazes of {}x{}", seeds.len(), rows.0, columns.0);

    seeds.par_iter()
        .map(|&seed| -> Result<(Grid, CarveStats)> {
            let mut grid = Grid::new(rows, columns)?;
            let stats = recursive_backtracker(&mut grid, &mut maze_rng(Some(seed)), endpoints)?;
            Ok((grid, stats))
        })
        .collect()
}

/// `count` consecutive seeds starting at `first`, wrapping at `u64::MAX`.
pub fn consecutive_seeds(first: u64, count: usize) -> Result<Vec<u64>> {
    if count == 0 {
        return Err(ErrorKind::InvalidCount(count).into());
    }
    Ok((0..count as u64).map(|i| first.wrapping_add(i)).collect())
}

/// Output path for the maze numbered `index`: `maze.svg` becomes `maze-3.svg`.
pub fn numbered_path(path: &Path, index: usize) -> PathBuf {
    let stem = path.file_stem().map_or_else(|| "maze".into(), |s| s.to_string_lossy());
    let file_name = match path.extension() {
        Some(ext) => format!("{}-{}.{}", stem, index, ext.to_string_lossy()),
        None => format!("{}-{}", stem, index),
    };
    path.with_file_name(file_name)
}
