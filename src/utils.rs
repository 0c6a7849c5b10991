#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

#[macro_export]
macro_rules! pos {
    ($row:expr, $col:expr) => {
        Pos {
            row: $row,
            col: $col,
        }
    };
}

pub fn positions(rows: usize, cols: usize) -> impl Iterator<Item = Pos> {
    (0..rows).flat_map(move |row| (0..cols).map(move |col| pos!(row, col)))
}

#[test]
fn test_positions() {
    let all: Vec<_> = positions(2, 2).collect();
    assert_eq!(all, vec![pos!(0, 0), pos!(0, 1), pos!(1, 0), pos!(1, 1)]);
    assert_eq!(positions(0, 5).count(), 0);
    assert_eq!(positions(5, 0).count(), 0);
}
