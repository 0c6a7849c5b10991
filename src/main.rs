use std::{
    fs,
    io::{stdin, stdout, BufRead, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;
use rand::{rngs::StdRng, thread_rng, Rng, SeedableRng};

pub use utils::Pos;
mod utils;

pub use grid::{Cell, Density, Grid};
pub mod grid;

mod output;

use prompt::{Prompter, COLS_PROMPT, DENSITY_PROMPT, ROWS_PROMPT};
mod prompt;

use config::Opt;
mod config;

mod view;

fn run<R, W>(
    opt: &Opt,
    prompter: &mut Prompter<R, W>,
    rng: &mut impl Rng,
) -> Result<(PathBuf, Grid)>
where
    R: BufRead,
    W: Write,
{
    let rows = match opt.rows {
        Some(rows) => rows,
        None => prompter.ask(ROWS_PROMPT)?,
    };
    let cols = match opt.cols {
        Some(cols) => cols,
        None => prompter.ask(COLS_PROMPT)?,
    };
    let density = match opt.density {
        Some(density) => density,
        None => prompter.ask(DENSITY_PROMPT)?,
    };

    let grid = Grid::random(rows, cols, Density::clamped(density), rng);
    let naming = opt.naming();
    let index = naming.next_index();
    debug!("resolved index {index}");
    let path = naming.save(&grid, index)?;
    Ok((path, grid))
}

pub fn main() -> Result<()> {
    let opt = Opt::parse();
    env_logger::Builder::new().parse_filters(&opt.rust_log).init();
    debug!("start golgen with config: {:#?}", opt);

    let styled = termion::is_tty(&stdout());
    let mut prompter = Prompter::new(stdin().lock(), stdout().lock(), styled);
    let (path, _) = match opt.seed {
        Some(seed) => run(&opt, &mut prompter, &mut StdRng::seed_from_u64(seed))?,
        None => run(&opt, &mut prompter, &mut thread_rng())?,
    };
    drop(prompter);

    if opt.preview {
        // shows the file as written rather than the in-memory grid
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read back {}", path.display()))?;
        let written = grid::parse(&content)
            .with_context(|| format!("malformed pattern in {}", path.display()))?;
        view::preview(&written).context("failed to preview pattern")?;
    }
    println!("Pattern saved to {}", display_path(&path).display());
    Ok(())
}

/// drops the leading `./` the default output directory puts in front of the file name.
fn display_path(path: &Path) -> &Path {
    path.strip_prefix(".").unwrap_or(path)
}

#[cfg(test)]
fn scratch_opt(name: &str, args: &[&str]) -> Opt {
    let dir = std::env::temp_dir().join(format!("golgen-run-{}-{name}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    let dir = dir.to_str().unwrap().to_string();
    let mut full = vec!["golgen", "--dir", dir.as_str()];
    full.extend_from_slice(args);
    Opt::try_parse_from(full).unwrap()
}

#[test]
fn test_run_prompts_and_saves() {
    let opt = scratch_opt("prompts", &[]);
    let mut prompter = Prompter::new("2\n3\n0.0\n".as_bytes(), Vec::new(), false);
    let (path, _) = run(&opt, &mut prompter, &mut StdRng::seed_from_u64(1)).unwrap();
    assert_eq!(path, opt.dir.join("gpt_python1.txt"));
    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, "2 3\n| | | |\n| | | |\n");
    std::fs::remove_dir_all(&opt.dir).unwrap();
}

#[test]
fn test_run_increments_index() {
    let opt = scratch_opt(
        "increments",
        &["--rows", "3", "--cols", "2", "--density", "1.5"],
    );
    let mut prompter = Prompter::new("".as_bytes(), Vec::new(), false);
    let mut rng = StdRng::seed_from_u64(2);
    for expected in 1..=3 {
        let (path, grid) = run(&opt, &mut prompter, &mut rng).unwrap();
        assert_eq!(path, opt.dir.join(format!("gpt_python{expected}.txt")));
        assert_eq!(grid.alive_count(), 6);
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(grid::parse(&content).unwrap(), grid);
    }
    std::fs::remove_dir_all(&opt.dir).unwrap();
}

#[test]
fn test_run_same_seed_same_grid() {
    let opt = scratch_opt(
        "seeded",
        &["--rows", "8", "--cols", "8", "--density", "0.5"],
    );
    let mut prompter = Prompter::new("".as_bytes(), Vec::new(), false);
    let (_, first) = run(&opt, &mut prompter, &mut StdRng::seed_from_u64(3)).unwrap();
    let (_, second) = run(&opt, &mut prompter, &mut StdRng::seed_from_u64(3)).unwrap();
    assert_eq!(first, second);
    std::fs::remove_dir_all(&opt.dir).unwrap();
}

#[test]
fn test_run_bad_input_writes_nothing() {
    let opt = scratch_opt("bad-input", &[]);
    let mut prompter = Prompter::new("4\nabc\n".as_bytes(), Vec::new(), false);
    assert!(run(&opt, &mut prompter, &mut StdRng::seed_from_u64(4)).is_err());
    assert_eq!(std::fs::read_dir(&opt.dir).unwrap().count(), 0);
    std::fs::remove_dir_all(&opt.dir).unwrap();
}

#[test]
fn test_display_path() {
    let naming = crate::output::OutputNaming::new(".", "gpt_python");
    assert_eq!(display_path(&naming.path_for(1)), Path::new("gpt_python1.txt"));
    let nested = crate::output::OutputNaming::new("patterns", "gpt_python");
    assert_eq!(
        display_path(&nested.path_for(2)),
        Path::new("patterns/gpt_python2.txt")
    );
}
