use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use log::{debug, info};

use crate::{grid::render, Grid};

pub const DEFAULT_PREFIX: &str = "gpt_python";
pub const DEFAULT_EXTENSION: &str = "txt";

#[derive(Debug, Clone)]
pub struct OutputNaming {
    dir: PathBuf,
    prefix: String,
    extension: String,
}

impl Default for OutputNaming {
    fn default() -> Self {
        Self::new(".", DEFAULT_PREFIX)
    }
}

impl OutputNaming {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    pub fn path_for(&self, index: u32) -> PathBuf {
        let name = format!("{}{index}.{}", self.prefix, self.extension);
        self.dir.join(name)
    }

    /// smallest index, starting at 1, whose file does not exist yet.
    ///
    /// only existence is checked, two concurrent runs may resolve the same index.
    pub fn next_index(&self) -> u32 {
        let mut index = 1;
        while self.path_for(index).exists() {
            debug!("{} already taken", self.path_for(index).display());
            index += 1;
        }
        index
    }

    pub fn save(&self, grid: &Grid, index: u32) -> Result<PathBuf> {
        let path = self.path_for(index);
        write_pattern(&path, grid)
            .with_context(|| format!("failed to write pattern to {}", path.display()))?;
        info!(
            "wrote {}x{} pattern with {} alive cells to {}",
            grid.rows(),
            grid.cols(),
            grid.alive_count(),
            path.display()
        );
        Ok(path)
    }
}

fn write_pattern(path: &Path, grid: &Grid) -> std::io::Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    file.write_all(render(grid).as_bytes())?;
    file.flush()
}

#[cfg(test)]
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("golgen-{}-{name}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_default_naming() {
    let naming = OutputNaming::default();
    assert_eq!(naming.path_for(1), Path::new(".").join("gpt_python1.txt"));
    assert_eq!(naming.path_for(42), Path::new(".").join("gpt_python42.txt"));
}

#[test]
fn test_next_index_empty_dir() {
    let dir = scratch_dir("empty");
    assert_eq!(OutputNaming::new(&dir, DEFAULT_PREFIX).next_index(), 1);
    std::fs::remove_dir_all(dir).unwrap();
}

#[test]
fn test_next_index_after_existing() {
    let dir = scratch_dir("existing");
    for index in 1..=4 {
        std::fs::write(dir.join(format!("gpt_python{index}.txt")), "").unwrap();
    }
    // other prefixes do not count
    std::fs::write(dir.join("other5.txt"), "").unwrap();
    let naming = OutputNaming::new(&dir, DEFAULT_PREFIX);
    assert_eq!(naming.next_index(), 5);
    std::fs::remove_dir_all(dir).unwrap();
}

#[test]
fn test_next_index_fills_gap() {
    let dir = scratch_dir("gap");
    for index in [1, 2, 4] {
        std::fs::write(dir.join(format!("gpt_python{index}.txt")), "").unwrap();
    }
    assert_eq!(OutputNaming::new(&dir, DEFAULT_PREFIX).next_index(), 3);
    std::fs::remove_dir_all(dir).unwrap();
}

#[test]
fn test_save_dead_grid() {
    let dir = scratch_dir("save");
    let naming = OutputNaming::new(&dir, DEFAULT_PREFIX);
    let grid = Grid::empty(2, 3);
    let path = naming.save(&grid, 1).unwrap();
    assert_eq!(path, dir.join("gpt_python1.txt"));
    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, "2 3\n| | | |\n| | | |\n");
    assert_eq!(naming.next_index(), 2);
    std::fs::remove_dir_all(dir).unwrap();
}

#[test]
fn test_save_into_missing_dir_fails() {
    let root = scratch_dir("missing");
    let naming = OutputNaming::new(root.join("does-not-exist"), DEFAULT_PREFIX);
    let err = naming.save(&Grid::empty(1, 1), 1).unwrap_err();
    assert!(err.to_string().contains("failed to write pattern"));
    assert!(err.downcast_ref::<std::io::Error>().is_some());
    std::fs::remove_dir_all(root).unwrap();
}
