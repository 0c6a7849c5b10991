use log::debug;
use rand::Rng;

use crate::{utils::positions, Pos};

pub const ALIVE_MARKER: char = '*';
pub const DEAD_MARKER: char = ' ';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    active: bool,
}

impl Cell {
    pub fn active() -> Self {
        Self { active: true }
    }

    pub fn inactive() -> Self {
        Self { active: false }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn marker(&self) -> char {
        if self.active {
            ALIVE_MARKER
        } else {
            DEAD_MARKER
        }
    }

    pub fn from_marker(marker: char) -> Option<Self> {
        match marker {
            ALIVE_MARKER => Some(Self::active()),
            DEAD_MARKER => Some(Self::inactive()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Density(f64);

impl Density {
    /// clamps `value` into `[0, 1]`. NaN ends up at 1, like `max(0, min(1, NaN))` would.
    pub fn clamped(value: f64) -> Self {
        let clamped = if value.is_nan() {
            1.0
        } else {
            value.clamp(0.0, 1.0)
        };
        if clamped != value {
            debug!("density {value} clamped to {clamped}");
        }
        Self(clamped)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn empty(rows: usize, cols: usize) -> Self {
        let cells = vec![vec![Cell::inactive(); cols]; rows];
        Self { rows, cols, cells }
    }

    pub fn random(rows: usize, cols: usize, density: Density, rng: &mut impl Rng) -> Self {
        let mut grid = Self::empty(rows, cols);
        for pos in positions(rows, cols) {
            if rng.gen_bool(density.value()) {
                grid.set(pos, Cell::active());
            }
        }
        grid
    }

    /// builds a grid out of already complete rows, every row must hold `cols` cells.
    pub(crate) fn from_rows(rows: usize, cols: usize, cells: Vec<Vec<Cell>>) -> Self {
        debug_assert_eq!(cells.len(), rows);
        debug_assert!(cells.iter().all(|row| row.len() == cols));
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, pos: Pos) -> Option<Cell> {
        self.cells.get(pos.row)?.get(pos.col).copied()
    }

    /// panics when `pos` lies outside the grid.
    pub(crate) fn set(&mut self, pos: Pos, cell: Cell) {
        self.cells[pos.row][pos.col] = cell;
    }

    pub fn lines(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.iter().map(Vec::as_slice)
    }

    pub fn alive_count(&self) -> usize {
        self.lines()
            .flat_map(|row| row.iter())
            .filter(|cell| cell.is_active())
            .count()
    }
}

pub use pattern_file::{parse, render};
mod pattern_file;

#[cfg(test)]
fn seeded() -> rand::rngs::StdRng {
    use rand::SeedableRng;
    rand::rngs::StdRng::seed_from_u64(0x5eed)
}

#[test]
fn test_dimensions() {
    let mut rng = seeded();
    for (rows, cols) in [(0, 0), (0, 4), (4, 0), (1, 1), (7, 3), (20, 50)] {
        let grid = Grid::random(rows, cols, Density::clamped(0.5), &mut rng);
        assert_eq!(grid.rows(), rows);
        assert_eq!(grid.cols(), cols);
        assert_eq!(grid.lines().count(), rows);
        assert!(grid.lines().all(|row| row.len() == cols));
        assert!(grid
            .lines()
            .flatten()
            .all(|cell| [ALIVE_MARKER, DEAD_MARKER].contains(&cell.marker())));
    }
}

#[test]
fn test_density_bounds() {
    let mut rng = seeded();
    let dead = Grid::random(10, 10, Density::clamped(0.0), &mut rng);
    assert_eq!(dead.alive_count(), 0);
    let alive = Grid::random(10, 10, Density::clamped(1.0), &mut rng);
    assert_eq!(alive.alive_count(), 100);
}

#[test]
fn test_density_clamping() {
    assert_eq!(Density::clamped(-0.5), Density::clamped(0.0));
    assert_eq!(Density::clamped(1.5), Density::clamped(1.0));
    assert_eq!(Density::clamped(f64::NAN).value(), 1.0);
    assert_eq!(Density::clamped(f64::NEG_INFINITY).value(), 0.0);
    assert_eq!(Density::clamped(0.25).value(), 0.25);

    let mut rng = seeded();
    let below = Grid::random(6, 6, Density::clamped(-0.5), &mut rng);
    assert_eq!(below, Grid::empty(6, 6));
    let above = Grid::random(6, 6, Density::clamped(1.5), &mut rng);
    assert_eq!(above.alive_count(), 36);
}

#[test]
fn test_density_is_roughly_respected() {
    let mut rng = seeded();
    let grid = Grid::random(100, 100, Density::clamped(0.3), &mut rng);
    let ratio = grid.alive_count() as f64 / 10_000.0;
    assert!((0.25..0.35).contains(&ratio), "ratio was {ratio}");
}

#[test]
fn test_markers() {
    assert_eq!(Cell::active().marker(), '*');
    assert_eq!(Cell::inactive().marker(), ' ');
    assert_eq!(Cell::from_marker('*'), Some(Cell::active()));
    assert_eq!(Cell::from_marker(' '), Some(Cell::inactive()));
    assert_eq!(Cell::from_marker('#'), None);
}

#[test]
fn test_get_out_of_bounds() {
    let grid = Grid::empty(2, 3);
    assert_eq!(grid.get(crate::pos!(1, 2)), Some(Cell::inactive()));
    assert_eq!(grid.get(crate::pos!(2, 0)), None);
    assert_eq!(grid.get(crate::pos!(0, 3)), None);
}

#[test]
#[should_panic]
fn test_set_out_of_bounds_panics() {
    let mut grid = Grid::empty(2, 3);
    grid.set(crate::pos!(2, 0), Cell::active());
}
