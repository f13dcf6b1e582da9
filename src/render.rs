//! Text rendering of the board for terminal play.

use strictly_lattice::{Board, Coord, Player};

const POINT: char = '·';

/// Character column of a point: rows are centred, neighbours four columns apart.
fn column(row_lengths: &[usize], coord: Coord) -> usize {
    let widest = row_lengths.iter().copied().max().unwrap_or(0);
    let len = row_lengths.get(coord.row()).copied().unwrap_or(widest);
    2 * (widest - len) + 4 * coord.col()
}

/// Draws the board as text.
///
/// Point rows are labelled `r0`, `r1`, ...; columns count from 0 at the left
/// end of each row. Drawn edges appear as `---`, `/` or `\`, shared edges
/// along a row as `===`, and filled triangles show the scorer's number.
pub fn render_board(board: &Board) -> String {
    let lattice = board.lattice();
    let rows = lattice.row_lengths();
    if rows.is_empty() {
        return String::new();
    }

    let width = lattice
        .points()
        .iter()
        .map(|point| column(rows, *point.coord()) + 1)
        .max()
        .unwrap_or(1);
    let mut grid = vec![vec![' '; width]; 2 * rows.len() - 1];

    for point in lattice.points() {
        let coord = *point.coord();
        grid[2 * coord.row()][column(rows, coord)] = POINT;
    }

    for (edge, state) in lattice.edges().iter().zip(board.edge_states()) {
        if !state.drawn() {
            continue;
        }
        let (low, high) = (edge.key().low(), edge.key().high());
        let (a, b) = (column(rows, low), column(rows, high));
        if low.row() == high.row() {
            let fill = if state.is_shared() { '=' } else { '-' };
            for cell in &mut grid[2 * low.row()][a.min(b) + 1..a.max(b)] {
                *cell = fill;
            }
        } else {
            let slant = if b < a { '/' } else { '\\' };
            grid[2 * low.row() + 1][(a + b) / 2] = slant;
        }
    }

    for (triangle, state) in lattice.triangles().iter().zip(board.triangle_states()) {
        let Some(player) = state.scored_by() else {
            continue;
        };
        let corners = triangle.points();
        let top = corners.iter().map(|c| c.row()).min().unwrap_or(0);
        let on_top: Vec<&Coord> = corners.iter().filter(|c| c.row() == top).collect();
        // Downward cells mark under their lower corner, upward cells under their apex.
        let anchor = if on_top.len() == 2 {
            corners.iter().find(|c| c.row() != top)
        } else {
            on_top.first().copied()
        };
        if let Some(anchor) = anchor {
            grid[2 * top + 1][column(rows, *anchor)] = marker(player);
        }
    }

    grid.iter()
        .enumerate()
        .map(|(line, cells)| {
            let label = if line % 2 == 0 {
                format!("r{:<3}", line / 2)
            } else {
                "    ".to_string()
            };
            let body: String = cells.iter().collect();
            format!("{}{}", label, body).trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn marker(player: Player) -> char {
    match player {
        Player::One => '1',
        Player::Two => '2',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_lattice::{BoardPreset, Stroke, resolve_stroke};

    #[test]
    fn test_empty_small_board() {
        let board = Board::from_preset(BoardPreset::Small);
        let text = render_board(&board);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "r0      ·   ·   ·");
        assert_eq!(lines[4], "r2  ·   ·   ·   ·   ·");
        assert!(lines[1].is_empty());
    }

    #[test]
    fn test_drawn_edges_and_filled_cell() {
        let mut board = Board::from_preset(BoardPreset::Small);
        let strokes = [
            ((0, 0), (0, 1), Player::One),
            ((0, 0), (1, 1), Player::Two),
            ((0, 1), (1, 1), Player::One),
        ];
        for ((r1, c1), (r2, c2), player) in strokes {
            let stroke = Stroke::new(Coord::new(r1, c1), Coord::new(r2, c2));
            resolve_stroke(&mut board, stroke, player, 0).unwrap();
        }

        let text = render_board(&board);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "r0      ·---·   ·");
        assert_eq!(lines[1], "         \\1/");
    }
}
