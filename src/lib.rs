//! **mazegen** generates perfect mazes on a rectangular grid and renders them as SVG.
//!
//! A `grid::Grid` owns the cells and the walls between them. `generators::recursive_backtracker`
//! knocks walls down with a randomised depth first search until every cell is reachable by
//! exactly one path, and `renderers` draws the cells and the walls that are left.
//!
//! ```
//! use mazegen::generators::{maze_rng, recursive_backtracker, Endpoints};
//! use mazegen::grid::Grid;
//! use mazegen::renderers::{render_svg_string, RenderOptions};
//! use mazegen::units::{ColumnsCount, RowsCount};
//!
//! let mut grid = Grid::new(RowsCount(8), ColumnsCount(12)).unwrap();
//! recursive_backtracker(&mut grid, &mut maze_rng(Some(7)), Endpoints::default()).unwrap();
//! assert_eq!(grid.passages_count(), 8 * 12 - 1);
//!
//! let svg = render_svg_string(&grid, &RenderOptions::default());
//! assert_eq!(svg.matches("<line ").count(), grid.walls_count());
//! ```

pub mod batch;
pub mod cells;
pub mod edges;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod renderers;
pub mod units;
