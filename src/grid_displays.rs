use std::fmt;

use crate::cells::{CellId, Direction};
use crate::grid::Grid;
use crate::units::{ColumnIndex, ColumnsCount, RowIndex, RowsCount};

/// Three glyph wide body of a cell: `S` marks the start, `E` the end.
fn render_cell_body(grid: &Grid, id: CellId) -> &'static str {
    match (grid.start() == Some(id), grid.end() == Some(id)) {
        (true, true) => "S E",
        (true, false) => " S ",
        (false, true) => " E ",
        (false, false) => "   ",
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const CORNER: &str = "+";
        const WALL_LR_3: &str = "---";
        const WALL_UD: &str = "|";
        const OPEN_LR_3: &str = "   ";
        const OPEN_UD: &str = " ";

        let ColumnsCount(columns_count) = self.columns();
        let RowsCount(rows_count) = self.rows();

        // The north boundary has no cells above it to draw it, so it is done up front.
        let mut output = String::from(CORNER);
        for _ in 0..columns_count {
            output.push_str(WALL_LR_3);
            output.push_str(CORNER);
        }
        output.push('\n');

        // Each cell draws its body, its east side and its south side. The west and north
        // sides belong to the neighbouring cells, or the boundary.
        for row in 0..rows_count {
            let mut row_middle_section_render = String::from(WALL_UD);
            let mut row_bottom_section_render = String::from(CORNER);

            for column in 0..columns_count {
                let id = self.cell_index(RowIndex(row), ColumnIndex(column));

                row_middle_section_render.push_str(render_cell_body(self, id));
                row_middle_section_render.push_str(if self.is_neighbour_linked(id, Direction::Right) {
                    OPEN_UD
                } else {
                    WALL_UD
                });

                row_bottom_section_render.push_str(if self.is_neighbour_linked(id, Direction::Down) {
                    OPEN_LR_3
                } else {
                    WALL_LR_3
                });
                row_bottom_section_render.push_str(CORNER);
            }

            output.push_str(&row_middle_section_render);
            output.push('\n');
            output.push_str(&row_bottom_section_render);
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}

#[cfg(test)]
mod tests {

    use rand::rngs::mock::StepRng;

    use crate::generators::{recursive_backtracker, Endpoints};
    use crate::grid::Grid;
    use crate::units::{ColumnsCount, RowsCount};

    #[test]
    fn uncarved_grid_is_all_walls() {
        let g = Grid::new(RowsCount(2), ColumnsCount(3)).unwrap();
        let expected = "\
+---+---+---+
|   |   |   |
+---+---+---+
|   |   |   |
+---+---+---+
";
        assert_eq!(g.to_string(), expected);
    }

    #[test]
    fn carved_two_by_two() {
        let mut g = Grid::new(RowsCount(2), ColumnsCount(2)).unwrap();
        recursive_backtracker(&mut g, &mut StepRng::new(0, 0), Endpoints::default()).unwrap();
        let expected = "\
+---+---+
| S     |
+---+   +
| E     |
+---+---+
";
        assert_eq!(g.to_string(), expected);
    }

    #[test]
    fn shared_start_and_end() {
        let mut g = Grid::new(RowsCount(1), ColumnsCount(1)).unwrap();
        recursive_backtracker(&mut g, &mut StepRng::new(0, 0), Endpoints::default()).unwrap();
        assert_eq!(g.to_string(), "+---+\n|S E|\n+---+\n");
    }
}
