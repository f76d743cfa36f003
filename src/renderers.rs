use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use itertools::iproduct;
use tracing::info;

use crate::cells::{CellId, Direction};
use crate::errors::*;
use crate::grid::Grid;
use crate::units::{CellSize, ColumnIndex, RowIndex};

pub const DEFAULT_CELL_SIZE: CellSize = CellSize(20);
pub const DEFAULT_WALL_INSET: u32 = 1;

#[derive(Clone, Debug, PartialEq)]
pub struct RenderOptions {
    cell_size: CellSize,
    wall_inset: u32,
    background_colour: String,
    visited_colour: String,
    start_colour: String,
    end_colour: String,
    cell_stroke_colour: String,
    cell_stroke_width: f32,
    wall_colour: String,
    wall_width: f32,
}

impl Default for RenderOptions {
    fn default() -> RenderOptions {
        RenderOptions {
            cell_size: DEFAULT_CELL_SIZE,
            wall_inset: DEFAULT_WALL_INSET,
            background_colour: String::from("white"),
            visited_colour: String::from("whitesmoke"),
            start_colour: String::from("red"),
            end_colour: String::from("green"),
            cell_stroke_colour: String::from("gray"),
            cell_stroke_width: 0.5,
            wall_colour: String::from("black"),
            wall_width: 1.0,
        }
    }
}

impl RenderOptions {
    #[inline]
    pub fn cell_size(&self) -> CellSize {
        self.cell_size
    }

    #[inline]
    pub fn wall_inset(&self) -> u32 {
        self.wall_inset
    }

    fn cell_fill(&self, grid: &Grid, id: CellId) -> &str {
        if grid.end() == Some(id) {
            &self.end_colour
        } else if grid.start() == Some(id) {
            &self.start_colour
        } else if grid.cell(id).map_or(false, |c| c.is_visited()) {
            &self.visited_colour
        } else {
            &self.background_colour
        }
    }
}

#[derive(Debug, Default)]
pub struct RenderOptionsBuilder {
    options: RenderOptions,
}

impl RenderOptionsBuilder {
    pub fn new() -> RenderOptionsBuilder {
        RenderOptionsBuilder::default()
    }

    /// Cell sizes below 1 are clamped to 1.
    pub fn cell_size(mut self, size: CellSize) -> Self {
        self.options.cell_size = CellSize(size.0.max(1));
        self
    }

    /// `build` clamps the inset to half a cell so a wall never has negative length.
    pub fn wall_inset(mut self, inset: u32) -> Self {
        self.options.wall_inset = inset;
        self
    }

    pub fn background_colour(mut self, colour: &str) -> Self {
        self.options.background_colour = colour.to_owned();
        self
    }

    pub fn visited_colour(mut self, colour: &str) -> Self {
        self.options.visited_colour = colour.to_owned();
        self
    }

    pub fn start_colour(mut self, colour: &str) -> Self {
        self.options.start_colour = colour.to_owned();
        self
    }

    pub fn end_colour(mut self, colour: &str) -> Self {
        self.options.end_colour = colour.to_owned();
        self
    }

    pub fn cell_stroke(mut self, colour: &str, width: f32) -> Self {
        self.options.cell_stroke_colour = colour.to_owned();
        self.options.cell_stroke_width = width;
        self
    }

    pub fn wall_stroke(mut self, colour: &str, width: f32) -> Self {
        self.options.wall_colour = colour.to_owned();
        self.options.wall_width = width;
        self
    }

    pub fn build(self) -> RenderOptions {
        let mut options = self.options;
        options.wall_inset = options.wall_inset.min(options.cell_size.0 / 2);
        options
    }
}

/// Write the grid as an SVG document.
///
/// Every cell becomes a square `rect` filled by its state. Every wall still standing
/// becomes one `line` along the shared side, pulled in from the corners by the wall inset
/// so neighbouring walls stay visually separate. Each wall is emitted once, from the cell
/// on its left or above it.
pub fn render_svg<W: Write>(grid: &Grid, options: &RenderOptions, out: &mut W) -> io::Result<()> {
    let size = options.cell_size.0 as usize;
    let inset = options.wall_inset as usize;
    let (rows, columns) = (grid.rows().0, grid.columns().0);
    let (width, height) = (columns * size, rows * size);

    write!(out,
           "<svg xmlns='http://www.w3.org/2000/svg' width='{w}' height='{h}' viewBox='0 0 {w} {h}'>",
           w = width,
           h = height)?;

    for (row, column) in iproduct!(0..rows, 0..columns) {
        let id = grid.cell_index(RowIndex(row), ColumnIndex(column));
        write!(out,
               "<rect x='{}' y='{}' width='{s}' height='{s}' fill='{}' stroke='{}' stroke-width='{}' />",
               column * size,
               row * size,
               options.cell_fill(grid, id),
               options.cell_stroke_colour,
               options.cell_stroke_width,
               s = size)?;
    }

    for (row, column) in iproduct!(0..rows, 0..columns) {
        let id = grid.cell_index(RowIndex(row), ColumnIndex(column));
        let (x, y) = (column * size, row * size);

        if is_wall(grid, id, Direction::Right) {
            write_wall(out, options, (x + size, y + inset), (x + size, y + size - inset))?;
        }
        if is_wall(grid, id, Direction::Down) {
            write_wall(out, options, (x + inset, y + size), (x + size - inset, y + size))?;
        }
    }

    write!(out, "</svg>")
}

fn is_wall(grid: &Grid, id: CellId, direction: Direction) -> bool {
    grid.edge_at(id, direction)
        .and_then(|edge| grid.edge(edge))
        .map_or(false, |edge| edge.is_active())
}

fn write_wall<W: Write>(out: &mut W,
                        options: &RenderOptions,
                        from: (usize, usize),
                        to: (usize, usize))
                        -> io::Result<()> {
    write!(out,
           "<line x1='{}' y1='{}' x2='{}' y2='{}' stroke='{}' stroke-width='{}' />",
           from.0,
           from.1,
           to.0,
           to.1,
           options.wall_colour,
           options.wall_width)
}

pub fn render_svg_string(grid: &Grid, options: &RenderOptions) -> String {
    let mut buffer = Vec::new();
    render_svg(grid, options, &mut buffer).expect("writing to a Vec cannot fail");
    String::from_utf8(buffer).expect("svg output is ascii")
}

/// Render to `path`, creating or truncating the file.
pub fn write_svg_file<P: AsRef<Path>>(grid: &Grid, options: &RenderOptions, path: P) -> Result<()> {
    let path = path.as_ref();
    let write = || -> io::Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        render_svg(grid, options, &mut out)?;
        out.flush()
    };
    write().chain_err(|| format!("Failed to write maze svg to {}", path.display()))?;

    info!("wrote {}x{} maze to {}", grid.rows().0, grid.columns().0, path.display());
    Ok(())
}
