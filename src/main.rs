use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use docopt::Docopt;
use serde_derive::Deserialize;
use tracing::{info, Level};

use mazegen::{
    batch,
    generators::{self, CarveStats, Endpoints},
    grid::Grid,
    renderers::{self, RenderOptionsBuilder},
    units::{CellSize, ColumnIndex, ColumnsCount, RowsCount},
};

const USAGE: &str = "Mazegen

Usage:
    mazegen -h | --help
    mazegen <rows> <cols> [--seed=<n>] [--start-column=<c>] [--end-column=<c>] [--cell-size=<px>] [--svg-out=<path>] [--text] [--save-edges=<path>] [--count=<n>] [--verbose | --debug]

Options:
    -h --help              Show this screen.
    --seed=<n>             Seed for the random generator. Same seed, same maze. Seeded from the OS if not given.
    --start-column=<c>     Column of the start cell in the first row. Random if not given.
    --end-column=<c>       Column of the end cell in the last row. Random if not given.
    --cell-size=<px>       Side length of a rendered cell [default: 20].
    --svg-out=<path>       Output file path for the svg rendering of the maze [default: maze.svg].
    --text                 Also print the maze as text.
    --save-edges=<path>    Serialize the maze passages to a text file: Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
    --count=<n>            Number of mazes to generate, using consecutive seeds. Output file names get the maze number appended. Must be at least 1 [default: 1].
    --verbose              Log progress.
    --debug                Log everything, including every carving step.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    arg_rows: usize,
    arg_cols: usize,
    flag_seed: Option<u64>,
    flag_start_column: Option<usize>,
    flag_end_column: Option<usize>,
    flag_cell_size: u32,
    flag_svg_out: String,
    flag_text: bool,
    flag_save_edges: String,
    flag_count: usize,
    flag_verbose: bool,
    flag_debug: bool,
}

mod errors {
    #![allow(deprecated)]
    use error_chain::*;
    error_chain! {

        links {
            Maze(::mazegen::errors::Error, ::mazegen::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() {
    let args: MazeArgs = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    if let Err(ref e) = run(&args) {
        let stderr = &mut io::stderr();
        let _ = writeln!(stderr, "error: {}", e);
        for cause in e.iter().skip(1) {
            let _ = writeln!(stderr, "caused by: {}", cause);
        }
        ::std::process::exit(1);
    }
}

fn run(args: &MazeArgs) -> Result<()> {
    let level = if args.flag_debug {
        Level::TRACE
    } else if args.flag_verbose {
        Level::INFO
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .init();

    let rows = RowsCount(args.arg_rows);
    let columns = ColumnsCount(args.arg_cols);
    let endpoints = Endpoints::new(args.flag_start_column.map(ColumnIndex),
                                   args.flag_end_column.map(ColumnIndex));
    let render_options = RenderOptionsBuilder::new()
        .cell_size(CellSize(args.flag_cell_size))
        .build();

    if args.flag_count == 1 {
        let mut maze_grid = Grid::new(rows, columns)?;
        let mut rng = generators::maze_rng(args.flag_seed);

        let start_time = Instant::now();
        let stats = generators::recursive_backtracker(&mut maze_grid, &mut rng, endpoints)?;
        report_generation(&stats, start_time);

        write_outputs(&maze_grid, args, &render_options, None)?;
    } else {
        let first_seed = args.flag_seed.unwrap_or_else(rand::random);
        let seeds = batch::consecutive_seeds(first_seed, args.flag_count)?;

        let start_time = Instant::now();
        let mazes = batch::generate_batch(rows, columns, &seeds, endpoints)?;
        println!("Generating {} mazes took {:.4} ms.",
                 mazes.len(),
                 elapsed_ms(start_time));

        for (index, (maze_grid, stats)) in mazes.iter().enumerate() {
            info!("maze {} (seed {}): {:?}", index, seeds[index], stats);
            write_outputs(maze_grid, args, &render_options, Some(index))?;
        }
    }

    Ok(())
}

fn elapsed_ms(start_time: Instant) -> f64 {
    start_time.elapsed().as_secs_f64() * 1000.0
}

fn report_generation(stats: &CarveStats, start_time: Instant) {
    let ms = elapsed_ms(start_time);
    info!("carved {} passages across {} cells (max depth {}) in {:.4} ms",
          stats.passages_carved,
          stats.cells_visited,
          stats.max_depth,
          ms);
    println!("Maze generation took {:.4} ms.", ms);
}

fn write_outputs(maze_grid: &Grid,
                 args: &MazeArgs,
                 render_options: &renderers::RenderOptions,
                 index: Option<usize>)
                 -> Result<()> {
    if args.flag_text {
        println!("{}", maze_grid);
    }

    if !args.flag_save_edges.is_empty() {
        let edges_path = output_path(&args.flag_save_edges, index);
        save_maze_graph(maze_grid, &edges_path)?;
    }

    let svg_path = output_path(&args.flag_svg_out, index);
    renderers::write_svg_file(maze_grid, render_options, &svg_path)?;
    Ok(())
}

fn output_path(path: &str, index: Option<usize>) -> PathBuf {
    match index {
        None => PathBuf::from(path),
        Some(i) => batch::numbered_path(Path::new(path), i),
    }
}

fn save_maze_graph(maze_grid: &Grid, file_path: &Path) -> Result<()> {
    let write = || -> io::Result<()> {
        let mut out = BufWriter::new(File::create(file_path)?);
        maze_grid.write_passages(&mut out)?;
        out.flush()
    };
    write().chain_err(|| format!("Failed to write maze graph to text file {}", file_path.display()))?;

    info!("wrote {} passages to {}", maze_grid.passages_count(), file_path.display());
    Ok(())
}
