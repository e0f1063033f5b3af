/*!
 * # ASCII rendering of the explored labyrinth
 *
 * Draws a `MazeMap` as text for debug logs. Each cell is one character:
 *
 * - `P` the player
 * - `G` the goal
 * - `F` a frontier cell
 * - `.` a visited cell
 * - `?` a cell nothing is known about
 *
 * Known passages are drawn between cells: `-` and `|` for straight moves,
 * `\` and `/` for corner cuts (`X` when both diagonals of a square are known).
 */

use crate::geometry::Cell;
use crate::map::MazeMap;

/// Symbol of one cell, the player taking precedence over everything else.
fn cell_symbol(map: &MazeMap, cell: Cell, player: Option<Cell>) -> char {
    if player == Some(cell) {
        'P'
    } else if cell == map.goal() {
        'G'
    } else if map.frontier().contains(cell) {
        'F'
    } else if map.is_visited(cell) {
        '.'
    } else {
        '?'
    }
}

/// Symbol drawn in the middle of the square whose top-left cell is `cell`.
fn diagonal_symbol(map: &MazeMap, cell: Cell) -> char {
    let right = Cell::new(cell.x + 1, cell.y);
    let below = Cell::new(cell.x, cell.y + 1);
    let falling = map.has_edge(cell, Cell::new(cell.x + 1, cell.y + 1));
    let rising = map.has_edge(right, below);
    match (falling, rising) {
        (true, true) => 'X',
        (true, false) => '\\',
        (false, true) => '/',
        (false, false) => ' ',
    }
}

/// Renders the whole grid, one text line per row of cells and one per row
/// of vertical passages.
///
/// # Arguments
///
/// * `map` - The knowledge gathered so far.
/// * `player` - Where to draw the player, if anywhere.
pub fn render_map(map: &MazeMap, player: Option<Cell>) -> String {
    let mut out = String::new();
    for y in 0..map.rows() {
        for x in 0..map.columns() {
            let cell = Cell::new(x, y);
            out.push(cell_symbol(map, cell, player));
            if x + 1 < map.columns() {
                let passage = map.has_edge(cell, Cell::new(x + 1, y));
                out.push(if passage { '-' } else { ' ' });
            }
        }
        out.push('\n');

        if y + 1 < map.rows() {
            for x in 0..map.columns() {
                let cell = Cell::new(x, y);
                let passage = map.has_edge(cell, Cell::new(x, y + 1));
                out.push(if passage { '|' } else { ' ' });
                if x + 1 < map.columns() {
                    out.push(diagonal_symbol(map, cell));
                }
            }
            out.push('\n');
        }
    }
    out
}
