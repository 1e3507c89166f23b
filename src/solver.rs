//! The top-level API as a SAT solver.
mod build;

pub use build::SatSolverBuildIF;

use {
    crate::{
        bitset::StateSet,
        network::Network,
        propagate::{PropagateIF, PropagateTarget},
        search::{Search, SearchIF},
        state::{State, StateIF},
        triplet::{TripletDB, TripletDBIF},
        types::*,
        validator::ValidateIF,
    },
    std::fmt,
};

/// The solution or the refutation for a problem.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Certificate {
    SAT(Vec<i32>),
    UNSAT,
}

/// The return type of `Solver::solve`.
pub type SolverResult = Result<Certificate, SolverError>;

/// The SAT solver: the macro-node partition, the compiled constraint
/// network, the search engine and the reporting state.
#[derive(Debug)]
pub struct Solver {
    pub tdb: TripletDB,
    pub net: Network,
    pub srch: Search,
    pub state: State,
}

/// API for SAT solving.
pub trait SatSolverIF {
    /// search an assignment.
    ///
    /// # Errors
    ///
    /// if an internal invariant is violated.
    fn solve(&mut self) -> SolverResult;
}

impl SatSolverIF for Solver {
    /// # Examples
    ///
    /// ```
    /// use std::convert::TryFrom;
    /// use trisat::{config::Config, solver::*};
    ///
    /// let mut config = Config::default();
    /// config.quiet_mode = true;
    /// let v: Vec<Vec<i32>> = vec![vec![1, 2], vec![-1, 3]];
    /// let mut s = Solver::try_from((config, v.as_slice())).expect("panic");
    /// if let Ok(Certificate::SAT(ans)) = s.solve() {
    ///     println!("found: {:?}", ans);
    /// }
    /// ```
    fn solve(&mut self) -> SolverResult {
        let found = {
            let Solver {
                tdb,
                net,
                srch,
                state,
            } = self;
            if !state.ok {
                state.progress(srch, Some("a macro-node has no satisfying state"));
                return Ok(Certificate::UNSAT);
            }
            state.progress_header(tdb);
            state.flush("initial filtering...");
            let mut domains = tdb.initial_domains();
            if srch
                .prp
                .filter(net, &mut domains, PropagateTarget::Everything)
                .is_err()
            {
                state.flush("\n");
                state.progress(srch, Some("collapsed by initial filtering"));
                return Ok(Certificate::UNSAT);
            }
            state.flush("done\n");
            srch.run(net, &domains)
        };
        let res = match found {
            Some(fin) => {
                let model = self.extract(&fin)?;
                if let Some(clause) = self.validate_assignment(&model) {
                    // the singleton domains disagreed with the formula
                    println!("c broken model on clause {:?}", clause);
                    return Err(SolverError::SolverBug);
                }
                Ok(Certificate::SAT(model))
            }
            None => Ok(Certificate::UNSAT),
        };
        let Solver { srch, state, .. } = self;
        state.progress(
            srch,
            Some(match &res {
                Ok(Certificate::SAT(_)) => "found an assignment",
                _ => "exhausted the search space",
            }),
        );
        res
    }
}

impl Solver {
    /// compose the per-triplet singleton states into a total assignment
    /// over every variable appearing in a clause.
    ///
    /// # Errors
    ///
    /// `SolverError::SolverBug` if a domain is not a singleton or two
    /// triplets disagree on a shared variable.
    fn extract(&self, domains: &[StateSet]) -> Result<Vec<i32>, SolverError> {
        let mut value: Vec<Option<bool>> = vec![None; self.state.target.num_of_variables + 1];
        for (t, d) in self.tdb.triplet.iter().zip(domains.iter()) {
            let s = match d.as_singleton() {
                Some(s) => s,
                None => return Err(SolverError::SolverBug),
            };
            for (p, v) in t.vars.iter().enumerate() {
                let b = t.states[s][p];
                match value[*v] {
                    None => value[*v] = Some(b),
                    Some(prev) if prev == b => (),
                    Some(_) => return Err(SolverError::SolverBug),
                }
            }
        }
        Ok(value
            .iter()
            .enumerate()
            .skip(1)
            .filter_map(|(v, b)| b.map(|b| if b { v as i32 } else { -(v as i32) }))
            .collect())
    }
}

impl fmt::Display for Solver {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Solver({})", self.state.target)
    }
}
