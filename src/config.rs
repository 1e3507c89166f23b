/// Crate `config` provides solver's configuration and CLI.
use {
    std::{fmt, path::PathBuf, str::FromStr},
    structopt::StructOpt,
};

/// Trisat version number.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Branching-node selection rule used by the recursive search.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Heuristic {
    /// minimum live-state count greater than one, ties broken by the
    /// lowest triplet index
    Mrv,
    /// minimise `count / (impact + k)`; favours small, highly-connected
    /// domains
    Impact,
    /// maximum live-state count greater than one; forces work on the
    /// most undetermined node
    Widest,
}

impl Default for Heuristic {
    fn default() -> Self {
        Heuristic::Impact
    }
}

impl FromStr for Heuristic {
    type Err = &'static str;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mrv" => Ok(Heuristic::Mrv),
            "impact" => Ok(Heuristic::Impact),
            "widest" => Ok(Heuristic::Widest),
            _ => Err("heuristic must be one of 'mrv', 'impact', 'widest'"),
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Heuristic::Mrv => write!(f, "mrv"),
            Heuristic::Impact => write!(f, "impact"),
            Heuristic::Widest => write!(f, "widest"),
        }
    }
}

/// Configuration built from command line options
#[derive(Clone, Debug, StructOpt)]
#[structopt(name = "trisat", about, author)]
pub struct Config {
    //
    //## I/O configuration
    //
    /// A DIMACS format CNF file
    #[structopt(parse(from_os_str))]
    pub cnf_filename: PathBuf,

    /// Disable any progress message
    #[structopt(long = "quiet", short = "q")]
    pub quiet_mode: bool,

    //
    //## search
    //
    /// Branching-node selection rule ('mrv', 'impact' or 'widest')
    #[structopt(long = "heuristic", default_value = "impact")]
    pub heuristic: Heuristic,

    /// Shuffle the candidate states of the branching node
    #[structopt(long = "shuffle", short = "w")]
    pub use_shuffle: bool,

    /// Seed for the pseudorandom stream
    #[structopt(long = "seed", default_value = "42")]
    pub seed: u64,

    /// Enable conflict-directed backjumping
    #[structopt(long = "cbj", short = "B")]
    pub use_backjump: bool,

    /// Smoothing constant k of the impact heuristic
    #[structopt(long = "smooth", default_value = "1")]
    pub smoothing: usize,

    //
    //## endgame
    //
    /// Total live-state threshold for the residual solver (0 disables)
    #[structopt(long = "endgame", default_value = "400")]
    pub endgame_threshold: usize,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            // I/O
            cnf_filename: PathBuf::new(),
            quiet_mode: false,

            // search
            heuristic: Heuristic::default(),
            use_shuffle: false,
            seed: 42,
            use_backjump: false,
            smoothing: 1,

            // endgame
            endgame_threshold: 400,
        }
    }
}

impl<T> From<T> for Config
where
    PathBuf: From<T>,
{
    fn from(path: T) -> Config {
        Config {
            cnf_filename: PathBuf::from(path),
            ..Config::default()
        }
    }
}

impl Config {
    #[allow(unused_mut)]
    pub fn override_args(mut self) -> Config {
        self
    }
}
