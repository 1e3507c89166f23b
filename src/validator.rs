/// Crate `validator` implements a model checker.
use crate::{solver::Solver, types::*};

/// API for SAT validation.
pub trait ValidateIF {
    /// return `None` if the assignment set is a model of the problem.
    /// Otherwise return a clause which is falsified under it.
    fn validate_assignment(&self, assigns: &[i32]) -> Option<Vec<i32>>;
}

impl ValidateIF for Solver {
    fn validate_assignment(&self, assigns: &[i32]) -> Option<Vec<i32>> {
        let mut value: Vec<Option<bool>> =
            vec![None; self.state.target.num_of_variables + 1];
        for x in assigns {
            if let Some(slot) = value.get_mut(x.abs() as usize) {
                *slot = Some(0 < *x);
            }
        }
        for t in &self.tdb.triplet {
            for c in &t.clauses {
                if !c.iter().any(|l| value[l.vi()] == Some(l.phase())) {
                    return Some(vec2int(c));
                }
            }
        }
        None
    }
}
