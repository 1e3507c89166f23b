/// Solver Builder
use {
    super::Solver,
    crate::{
        config::Config,
        network::{Network, NetworkIF},
        search::Search,
        state::State,
        triplet::{TripletDB, TripletDBIF},
        types::*,
    },
    std::{
        convert::TryFrom,
        fs::File,
        io::{BufRead, BufReader},
        path::Path,
    },
};

/// API for SAT solver creation.
pub trait SatSolverBuildIF {
    /// make a solver and load a CNF file into it.
    ///
    /// # Errors
    ///
    /// IO error by failing to load a CNF file, or a malformed header.
    fn build(config: &Config) -> Result<Solver, SolverError>;
}

impl SatSolverBuildIF for Solver {
    fn build(config: &Config) -> Result<Solver, SolverError> {
        let (cnf, clauses) = parse_dimacs(&config.cnf_filename)?;
        Ok(Solver::synthesize(config, cnf, clauses))
    }
}

impl TryFrom<&str> for Solver {
    type Error = SolverError;
    /// return a new solver built for a CNF file.
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let config = Config::from(s);
        Solver::build(&config)
    }
}

impl<V: AsRef<[i32]>> TryFrom<(Config, &[V])> for Solver {
    type Error = SolverError;
    /// return a new solver injected with a vector of clauses; a clause
    /// may carry a trailing zero terminator, which is stripped.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::convert::TryFrom;
    /// use trisat::{config::Config, solver::Solver};
    ///
    /// let v: Vec<Vec<i32>> = vec![vec![1, 2], vec![-1, 3], vec![-2, -3]];
    /// assert!(Solver::try_from((Config::default(), v.as_slice())).is_ok());
    /// ```
    fn try_from((config, vec): (Config, &[V])) -> Result<Self, Self::Error> {
        let cnf = CNFDescription::from(vec);
        let clauses: Vec<Clause> = vec
            .iter()
            .map(|c| clause_from_ints(c.as_ref()))
            .filter(|c| !c.is_empty())
            .collect();
        Ok(Solver::synthesize(&config, cnf, clauses))
    }
}

impl Solver {
    /// partition the clauses, enumerate the states, compile the network
    /// and wire up the search engine.
    fn synthesize(config: &Config, cnf: CNFDescription, clauses: Vec<Clause>) -> Solver {
        let tdb = TripletDB::build(&clauses);
        let net = Network::compile(&tdb);
        let srch = Search::new(config, tdb.len());
        let mut state = State::instantiate(config, &cnf);
        state.num_triplets = tdb.len();
        if tdb.first_empty().is_some() {
            state.ok = false;
        }
        Solver {
            tdb,
            net,
            srch,
            state,
        }
    }
}

/// read a DIMACS CNF file tolerantly:
///
/// - lines starting with `c`, `%`, or a lone `0` are ignored
/// - `p cnf` declares the variable count (3rd token); the clause count
///   is ignored
/// - body lines are signed integers terminated by `0`; the terminator
///   is stripped; a malformed integer drops the whole line silently
/// - empty clauses after stripping are dropped
fn parse_dimacs(path: &Path) -> Result<(CNFDescription, Vec<Clause>), SolverError> {
    let file = File::open(path).map_err(|_| SolverError::IOError)?;
    let mut reader = BufReader::new(file);
    let mut buf = String::new();
    let mut nv = 0usize;
    let mut clauses: Vec<Clause> = Vec::new();
    loop {
        buf.clear();
        match reader.read_line(&mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let line = buf.trim();
                if line.is_empty()
                    || line.starts_with('c')
                    || line.starts_with('%')
                    || line == "0"
                {
                    continue;
                }
                if line.starts_with('p') {
                    let mut iter = line.split_whitespace();
                    if iter.next() != Some("p") || iter.next() != Some("cnf") {
                        return Err(SolverError::InvalidHeader);
                    }
                    nv = iter
                        .next()
                        .and_then(|s| s.parse::<usize>().ok())
                        .ok_or(SolverError::InvalidHeader)?;
                    continue;
                }
                let mut lits: Clause = Vec::new();
                let mut dropped = false;
                for s in line.split_whitespace() {
                    match s.parse::<i32>() {
                        Ok(0) => break,
                        Ok(x) => lits.push(Lit::from(x)),
                        Err(_) => {
                            dropped = true;
                            break;
                        }
                    }
                }
                if dropped || lits.is_empty() {
                    continue;
                }
                clauses.push(lits);
            }
            Err(_) => return Err(SolverError::IOError),
        }
    }
    let observed = clauses
        .iter()
        .flat_map(|c| c.iter().map(|l| l.vi()))
        .max()
        .unwrap_or(0);
    let cnf = CNFDescription {
        num_of_variables: nv.max(observed),
        num_of_clauses: clauses.len(),
        pathname: path.to_string_lossy().into_owned(),
    };
    Ok((cnf, clauses))
}
