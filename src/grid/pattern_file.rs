use std::{
    fmt::{self, Display, Formatter},
    num::ParseIntError,
};

use crate::{Cell, Grid};

const DELIMITER: char = '|';

pub fn render(grid: &Grid) -> String {
    let mut result = format!("{} {}\n", grid.rows(), grid.cols());
    for row in grid.lines() {
        result.push(DELIMITER);
        for cell in row {
            result.push(cell.marker());
            result.push(DELIMITER);
        }
        result.push('\n');
    }
    result
}

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    MissingHeader,
    MalformedHeader(String),
    BadDimension(ParseIntError),
    RowCount { expected: usize, found: usize },
    MissingBars { line: usize },
    CellCount { line: usize, expected: usize, found: usize },
    UnknownMarker { line: usize, marker: char },
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MissingHeader => write!(f, "missing '<rows> <cols>' header"),
            ParseError::MalformedHeader(header) => write!(f, "malformed header '{header}'"),
            ParseError::BadDimension(err) => write!(f, "bad dimension in header: {err}"),
            ParseError::RowCount { expected, found } => {
                write!(f, "expected {expected} rows, found {found}")
            }
            ParseError::MissingBars { line } => {
                write!(f, "line {line}: row must start and end with '{DELIMITER}'")
            }
            ParseError::CellCount {
                line,
                expected,
                found,
            } => write!(f, "line {line}: expected {expected} cells, found {found}"),
            ParseError::UnknownMarker { line, marker } => {
                write!(f, "line {line}: unknown cell marker {marker:?}")
            }
        }
    }
}

impl std::error::Error for ParseError {}

impl From<ParseIntError> for ParseError {
    fn from(err: ParseIntError) -> Self {
        ParseError::BadDimension(err)
    }
}

fn parse_header(header: &str) -> Result<(usize, usize), ParseError> {
    let mut parts = header.split_whitespace();
    let (Some(rows), Some(cols), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ParseError::MalformedHeader(header.to_string()));
    };
    Ok((rows.parse()?, cols.parse()?))
}

fn parse_row(line: usize, text: &str, cols: usize) -> Result<Vec<Cell>, ParseError> {
    // a row without cells is a lone bar
    let markers: Vec<&str> = if text == "|" {
        vec![]
    } else {
        text.strip_prefix(DELIMITER)
            .and_then(|rest| rest.strip_suffix(DELIMITER))
            .ok_or(ParseError::MissingBars { line })?
            .split(DELIMITER)
            .collect()
    };
    if markers.len() != cols {
        return Err(ParseError::CellCount {
            line,
            expected: cols,
            found: markers.len(),
        });
    }

    markers
        .into_iter()
        .map(|marker| {
            let mut chars = marker.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => {
                    Cell::from_marker(c).ok_or(ParseError::UnknownMarker { line, marker: c })
                }
                (Some(c), Some(_)) => Err(ParseError::UnknownMarker { line, marker: c }),
                (None, _) => Err(ParseError::CellCount {
                    line,
                    expected: cols,
                    found: 0,
                }),
            }
        })
        .collect()
}

pub fn parse(content: &str) -> Result<Grid, ParseError> {
    let mut lines = content.lines();
    let header = lines.next().ok_or(ParseError::MissingHeader)?;
    let (rows, cols) = parse_header(header)?;

    let body: Vec<&str> = lines.collect();
    if body.len() != rows {
        return Err(ParseError::RowCount {
            expected: rows,
            found: body.len(),
        });
    }

    let cells = body
        .iter()
        .enumerate()
        .map(|(index, text)| parse_row(index + 2, text, cols))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Grid::from_rows(rows, cols, cells))
}

#[test]
fn test_render_dead_grid() {
    let grid = Grid::empty(2, 3);
    assert_eq!(render(&grid), "2 3\n| | | |\n| | | |\n");
}

#[test]
fn test_render_mixed_grid() {
    use crate::{pos, Pos};
    let mut grid = Grid::empty(2, 2);
    grid.set(pos!(0, 1), Cell::active());
    grid.set(pos!(1, 0), Cell::active());
    assert_eq!(render(&grid), "2 2\n| |*|\n|*| |\n");
}

#[test]
fn test_round_trip() {
    use rand::SeedableRng;
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    for (rows, cols) in [(1, 1), (3, 8), (12, 5)] {
        let grid = Grid::random(rows, cols, crate::Density::clamped(0.4), &mut rng);
        let text = render(&grid);

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(format!("{rows} {cols}").as_str()));
        let body: Vec<_> = lines.collect();
        assert_eq!(body.len(), rows);
        for line in body {
            assert!(line.starts_with('|') && line.ends_with('|'));
            assert_eq!(line.matches('|').count(), cols + 1);
            assert_eq!(line.chars().count(), 2 * cols + 1);
        }

        assert_eq!(parse(&text), Ok(grid));
    }
}

#[test]
fn test_zero_sized() {
    assert_eq!(render(&Grid::empty(0, 4)), "0 4\n");
    assert_eq!(parse("0 4\n"), Ok(Grid::empty(0, 4)));
    assert_eq!(render(&Grid::empty(2, 0)), "2 0\n|\n|\n");
    assert_eq!(parse("2 0\n|\n|\n"), Ok(Grid::empty(2, 0)));
}

#[test]
fn test_parse_errors() {
    assert_eq!(parse(""), Err(ParseError::MissingHeader));
    assert_eq!(
        parse("2\n"),
        Err(ParseError::MalformedHeader("2".to_string()))
    );
    assert!(matches!(parse("a 2\n"), Err(ParseError::BadDimension(_))));
    assert_eq!(
        parse("2 1\n| |\n"),
        Err(ParseError::RowCount {
            expected: 2,
            found: 1
        })
    );
    assert_eq!(parse("1 1\n * \n"), Err(ParseError::MissingBars { line: 2 }));
    assert_eq!(
        parse("1 3\n|*| |\n"),
        Err(ParseError::CellCount {
            line: 2,
            expected: 3,
            found: 2
        })
    );
    assert_eq!(
        parse("1 2\n|*|#|\n"),
        Err(ParseError::UnknownMarker {
            line: 2,
            marker: '#'
        })
    );
}
