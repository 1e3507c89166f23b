//! Basic types
use {crate::config::Config, std::fmt};

/// Variable as Index is `usize`
pub type VarId = usize;

/// Triplet (macro-node) identifier, an index into the triplet list.
pub type NodeId = usize;

/// Literal encoded on an unsigned integer: variable `v` becomes `2 * v`
/// for the positive literal and `2 * v + 1` for the negation.
///
/// # Examples
///
/// ```
/// use trisat::types::*;
/// assert_eq!(2, u32::from(Lit::from( 1)));
/// assert_eq!(3, u32::from(Lit::from(-1)));
/// assert_eq!(4, u32::from(Lit::from( 2)));
/// assert_eq!(5, u32::from(Lit::from(-2)));
/// assert_eq!( 1, i32::from(Lit::from( 1)));
/// assert_eq!(-2, i32::from(Lit::from(-2)));
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Lit(u32);

impl From<i32> for Lit {
    fn from(x: i32) -> Self {
        debug_assert!(x != 0, "zero is a terminator, not a literal");
        Lit(if x < 0 { -2 * x + 1 } else { 2 * x } as u32)
    }
}

impl From<Lit> for i32 {
    fn from(l: Lit) -> i32 {
        if l.positive() {
            (l.0 >> 1) as i32
        } else {
            -((l.0 >> 1) as i32)
        }
    }
}

impl From<Lit> for u32 {
    fn from(l: Lit) -> u32 {
        l.0
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", i32::from(*self))
    }
}

impl Lit {
    /// converts to var index.
    ///
    /// ```
    /// use trisat::types::*;
    /// assert_eq!(7, Lit::from(-7).vi());
    /// assert_eq!(7, Lit::from( 7).vi());
    /// ```
    pub fn vi(self) -> VarId {
        (self.0 >> 1) as VarId
    }
    /// returns `true` if this is a positive literal.
    pub fn positive(self) -> bool {
        self.0 & 1 == 0
    }
    /// returns the value of the underlying variable that makes this
    /// literal true.
    pub fn phase(self) -> bool {
        self.positive()
    }
    /// flips the polarity.
    pub fn negate(self) -> Lit {
        Lit(self.0 ^ 1)
    }
}

/// converts a slice of literals back to the DIMACS representation.
pub fn vec2int(v: &[Lit]) -> Vec<i32> {
    v.iter().map(|l| i32::from(*l)).collect::<Vec<i32>>()
}

/// data about a problem.
#[derive(Clone, Debug)]
pub struct CNFDescription {
    pub num_of_variables: usize,
    pub num_of_clauses: usize,
    pub pathname: String,
}

impl Default for CNFDescription {
    fn default() -> CNFDescription {
        CNFDescription {
            num_of_variables: 0,
            num_of_clauses: 0,
            pathname: "".to_string(),
        }
    }
}

impl fmt::Display for CNFDescription {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let CNFDescription {
            num_of_variables: nv,
            num_of_clauses: nc,
            pathname: path,
        } = &self;
        write!(f, "CNF({}, {}, {})", nv, nc, path)
    }
}

impl<V: AsRef<[i32]>> From<&[V]> for CNFDescription {
    fn from(vec: &[V]) -> Self {
        let nv = vec
            .iter()
            .flat_map(|c| c.as_ref().iter())
            .map(|i| i.abs() as usize)
            .max()
            .unwrap_or(0);
        CNFDescription {
            num_of_variables: nv,
            num_of_clauses: vec.len(),
            pathname: "".to_string(),
        }
    }
}

/// Internal errors.
/// Note: returning `Ok(false)` never means an error.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SolverError {
    /// the formula is already falsified while building the triplets
    Inconsistent,
    /// a file is missing or unreadable
    IOError,
    /// the DIMACS header is malformed beyond tolerant parsing
    InvalidHeader,
    /// an internal invariant was violated; a bug
    SolverBug,
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SolverError::Inconsistent => write!(f, "Inconsistent"),
            SolverError::IOError => write!(f, "IO error"),
            SolverError::InvalidHeader => write!(f, "invalid DIMACS header"),
            SolverError::SolverBug => write!(f, "solver bug"),
        }
    }
}

impl std::error::Error for SolverError {}

/// `Result` returned by operations that can detect inconsistency.
pub type MaybeInconsistent = Result<(), SolverError>;

/// API for O(1) instantiation from a configuration and a problem
/// description.
pub trait Instantiate {
    /// make and return an object from `Config` and `CNFDescription`.
    fn instantiate(config: &Config, cnf: &CNFDescription) -> Self;
}

/// API for exporting internal counters.
///
/// exporting via a tuple avoids borrow conflicts between fields and
/// keeps the consumers decoupled from the struct layouts.
pub trait Export<T> {
    /// exports a tuple of internal counters.
    fn exports(&self) -> T;
}

/// A parsed clause: the signed integers of a DIMACS body line with the
/// terminator stripped, in input order.
pub type Clause = Vec<Lit>;

/// builds a clause from DIMACS integers, dropping a trailing terminator.
///
/// ```
/// use trisat::types::*;
/// let c = clause_from_ints(&[1, -3, 0]);
/// assert_eq!(vec![1, -3], vec2int(&c));
/// ```
pub fn clause_from_ints(ints: &[i32]) -> Clause {
    ints.iter()
        .take_while(|i| **i != 0)
        .map(|i| Lit::from(*i))
        .collect::<Clause>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lit_encoding() {
        for x in &[1i32, -1, 2, -2, 40, -40] {
            let l = Lit::from(*x);
            assert_eq!(*x, i32::from(l));
            assert_eq!(x.abs() as usize, l.vi());
            assert_eq!(0 < *x, l.positive());
            assert_eq!(-*x, i32::from(l.negate()));
        }
    }
    #[test]
    fn test_cnf_description() {
        let v: Vec<Vec<i32>> = vec![vec![1, -5], vec![2, 3]];
        let cnf = CNFDescription::from(v.as_slice());
        assert_eq!(5, cnf.num_of_variables);
        assert_eq!(2, cnf.num_of_clauses);
    }
}
