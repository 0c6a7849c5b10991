use std::io::{self, stdout, Write};

use crate::{pos, Grid, Pos};

pub use canvas::Canvas;
mod canvas;

const PREVIEW_ALIVE: char = '#';

pub fn preview(grid: &Grid) -> io::Result<()> {
    let limit = if termion::is_tty(&stdout()) {
        let (width, height) = termion::terminal_size()?;
        Some((width as usize, (height as usize).saturating_sub(1)))
    } else {
        None
    };
    let mut out = stdout().lock();
    draw(grid, limit, &mut out)
}

pub fn draw(grid: &Grid, limit: Option<(usize, usize)>, out: &mut impl Write) -> io::Result<()> {
    let (width, height) = (grid.cols() + 2, grid.rows() + 2);
    let (width, height) = match limit {
        Some((max_width, max_height)) => (width.min(max_width), height.min(max_height)),
        None => (width, height),
    };

    let mut canvas = Canvas::new(width, height);
    canvas.layer(|Pos { row, col }| {
        let top_or_bottom = row == 0 || row == grid.rows() + 1;
        let side = col == 0 || col == grid.cols() + 1;
        match (top_or_bottom, side) {
            (true, true) => Some('+'),
            (true, false) => Some('-'),
            (false, true) => Some('|'),
            (false, false) => None,
        }
    });

    let origin = pos!(1, 1);
    canvas.layer(|pos| {
        let inner = pos.row.checked_sub(origin.row).zip(pos.col.checked_sub(origin.col))?;
        let cell = grid.get(pos!(inner.0, inner.1))?;
        cell.is_active().then_some(PREVIEW_ALIVE)
    });

    canvas.display(out)
}

#[test]
fn test_draw_whole_grid() {
    let mut grid = Grid::empty(2, 3);
    grid.set(pos!(0, 0), crate::Cell::active());
    grid.set(pos!(1, 2), crate::Cell::active());
    let mut out = Vec::new();
    draw(&grid, None, &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "+---+\n|#  |\n|  #|\n+---+\n"
    );
}

#[test]
fn test_draw_truncated() {
    let grid = Grid::empty(10, 10);
    let mut out = Vec::new();
    draw(&grid, Some((4, 3)), &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "+---\n|\n|\n");
}
