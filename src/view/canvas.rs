use std::io::{self, Write};

use crate::{pos, Pos};

pub struct Canvas {
    lines: Vec<Vec<char>>,
    width: usize,
    height: usize,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        let lines = vec![vec![' '; width]; height];
        Self {
            height,
            lines,
            width,
        }
    }

    pub fn layer(&mut self, f: impl Fn(Pos) -> Option<char>) {
        for row in 0..self.height {
            for col in 0..self.width {
                if let Some(char) = f(pos!(row, col)) {
                    self.lines[row][col] = char;
                }
            }
        }
    }

    pub fn display(&self, out: &mut impl Write) -> io::Result<()> {
        for line in &self.lines {
            let line: String = line.iter().collect();
            writeln!(out, "{}", line.trim_end())?;
        }
        out.flush()
    }
}

#[test]
fn test_layers_stack() {
    let mut canvas = Canvas::new(3, 2);
    canvas.layer(|_| Some('.'));
    canvas.layer(|Pos { row, col }| (row == col).then_some('x'));
    let mut out = Vec::new();
    canvas.display(&mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "x..\n.x.\n");
}
