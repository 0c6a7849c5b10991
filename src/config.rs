use std::path::PathBuf;

use clap::Parser;

use crate::output::{OutputNaming, DEFAULT_PREFIX};

/// Generates a random pattern file for a game of life simulation.
///
/// Parameters missing from the command line are asked for interactively.
#[derive(Debug, Clone, Parser)]
#[command(name = "golgen", version, about)]
pub struct Opt {
    /// Number of rows of the generated grid
    #[arg(long)]
    pub rows: Option<usize>,

    /// Number of columns of the generated grid
    #[arg(long)]
    pub cols: Option<usize>,

    /// Probability for a cell to be alive, clamped into 0.0..=1.0
    #[arg(long, allow_negative_numbers = true)]
    pub density: Option<f64>,

    /// Directory the pattern file is written to
    #[arg(long, env = "GOLGEN_DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Prefix of the pattern file name, followed by its index
    #[arg(long, env = "GOLGEN_PREFIX", default_value = DEFAULT_PREFIX)]
    pub prefix: String,

    /// Seed for a reproducible grid
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the generated grid to the terminal
    #[arg(long)]
    pub preview: bool,

    #[arg(long, env = "RUST_LOG", default_value = "golgen=warn")]
    pub rust_log: String,
}

impl Opt {
    pub fn naming(&self) -> OutputNaming {
        OutputNaming::new(&self.dir, &self.prefix)
    }
}

#[test]
fn test_defaults() {
    let opt = Opt::try_parse_from(["golgen"]).unwrap();
    assert_eq!(opt.rows, None);
    assert_eq!(opt.cols, None);
    assert_eq!(opt.density, None);
    assert_eq!(opt.prefix, "gpt_python");
    assert!(!opt.preview);
    assert_eq!(
        opt.naming().path_for(3),
        std::path::Path::new(".").join("gpt_python3.txt")
    );
}

#[test]
fn test_explicit_parameters() {
    let opt = Opt::try_parse_from([
        "golgen",
        "--rows",
        "3",
        "--cols",
        "4",
        "--density",
        "-0.5",
        "--dir",
        "/tmp/patterns",
        "--prefix",
        "glider",
        "--seed",
        "9",
        "--preview",
    ])
    .unwrap();
    assert_eq!(opt.rows, Some(3));
    assert_eq!(opt.cols, Some(4));
    assert_eq!(opt.density, Some(-0.5));
    assert_eq!(opt.seed, Some(9));
    assert!(opt.preview);
    assert_eq!(
        opt.naming().path_for(1),
        PathBuf::from("/tmp/patterns/glider1.txt")
    );
}

#[test]
fn test_rejects_negative_rows() {
    assert!(Opt::try_parse_from(["golgen", "--rows", "-1"]).is_err());
}
