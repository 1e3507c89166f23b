//! Macro-node construction and state enumeration.
//!
//! Clauses are greedily grouped into *triplets* of up to three clauses
//! maximising shared variables; every assignment over a triplet's
//! variables that satisfies all of its clauses becomes one of its
//! *states*. The state order is canonical (the sorted variable list read
//! as bit positions of an incrementing integer) and the compatibility
//! tables index into it, so it must never be permuted.
use {
    crate::{bitset::StateSet, types::*},
    std::fmt,
};

/// A macro-node: one to three clauses reasoned about as a unit.
#[derive(Clone, Debug)]
pub struct Triplet {
    /// the member clauses, in partition order
    pub clauses: Vec<Clause>,
    /// the union of the member clauses' variables, sorted ascending
    pub vars: Vec<VarId>,
    /// every satisfying assignment over `vars`, canonically ordered;
    /// `states[s][p]` is the value of `vars[p]` in state `s`
    pub states: Vec<Vec<bool>>,
}

impl Triplet {
    fn compose(clauses: Vec<Clause>) -> Triplet {
        let mut vars = clauses
            .iter()
            .flat_map(|c| c.iter().map(|l| l.vi()))
            .collect::<Vec<VarId>>();
        vars.sort_unstable();
        vars.dedup();
        let mut t = Triplet {
            clauses,
            vars,
            states: Vec::new(),
        };
        t.enumerate_states();
        t
    }
    /// fills `states` by enumerating all assignments over the sorted
    /// variable list; bit `j` of the counter is the value of `vars[j]`.
    fn enumerate_states(&mut self) {
        let n = self.vars.len();
        debug_assert!(n < usize::BITS as usize);
        // literal positions resolved once against the sorted list
        let keyed: Vec<Vec<(usize, bool)>> = self
            .clauses
            .iter()
            .map(|c| {
                c.iter()
                    .filter_map(|l| self.index_of(l.vi()).map(|p| (p, l.phase())))
                    .collect()
            })
            .collect();
        for k in 0..(1usize << n) {
            let assign: Vec<bool> = (0..n).map(|j| (k >> j) & 1 == 1).collect();
            if keyed
                .iter()
                .all(|c| c.iter().any(|(p, phase)| assign[*p] == *phase))
            {
                self.states.push(assign);
            }
        }
    }
    /// the position of variable `v` in the sorted variable list.
    pub fn index_of(&self, v: VarId) -> Option<usize> {
        self.vars.binary_search(&v).ok()
    }
    /// the value of variable `v` in state `s`, if `v` belongs to this
    /// triplet.
    pub fn value(&self, s: usize, v: VarId) -> Option<bool> {
        self.index_of(v).map(|p| self.states[s][p])
    }
    pub fn num_states(&self) -> usize {
        self.states.len()
    }
}

impl fmt::Display for Triplet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "T({} clauses, {} vars, {} states)",
            self.clauses.len(),
            self.vars.len(),
            self.states.len()
        )
    }
}

/// The triplet list: an exact cover of the input clauses by macro-nodes.
#[derive(Debug, Default)]
pub struct TripletDB {
    pub triplet: Vec<Triplet>,
}

/// API for the macro-node partition.
pub trait TripletDBIF {
    /// partition `clauses` into triplets and enumerate their states.
    fn build(clauses: &[Clause]) -> TripletDB;
    /// the first triplet with no satisfying state, if any; such a
    /// triplet makes the formula trivially unsatisfiable.
    fn first_empty(&self) -> Option<NodeId>;
    /// all-ones domains over each triplet's state count.
    fn initial_domains(&self) -> Vec<StateSet>;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool;
}

impl TripletDBIF for TripletDB {
    fn build(clauses: &[Clause]) -> TripletDB {
        let nv = clauses
            .iter()
            .flat_map(|c| c.iter().map(|l| l.vi()))
            .max()
            .unwrap_or(0);
        let mut in_group = vec![false; nv + 1];
        let mut used = vec![false; clauses.len()];
        let mut triplet = Vec::new();
        for i in 0..clauses.len() {
            if used[i] {
                continue;
            }
            let mut group = vec![clauses[i].clone()];
            used[i] = true;
            for l in &clauses[i] {
                in_group[l.vi()] = true;
            }
            // add up to two more clauses, each maximising the overlap
            // with the variables gathered so far; ties keep the first
            for _ in 0..2 {
                let mut best: Option<(usize, usize)> = None;
                for (j, c) in clauses.iter().enumerate() {
                    if used[j] {
                        continue;
                    }
                    let o = overlap(c, &in_group);
                    if best.map_or(true, |(_, b)| b < o) {
                        best = Some((j, o));
                    }
                }
                match best {
                    Some((j, _)) => {
                        used[j] = true;
                        for l in &clauses[j] {
                            in_group[l.vi()] = true;
                        }
                        group.push(clauses[j].clone());
                    }
                    None => break,
                }
            }
            for c in &group {
                for l in c {
                    in_group[l.vi()] = false;
                }
            }
            triplet.push(Triplet::compose(group));
        }
        TripletDB { triplet }
    }
    fn first_empty(&self) -> Option<NodeId> {
        self.triplet.iter().position(|t| t.states.is_empty())
    }
    fn initial_domains(&self) -> Vec<StateSet> {
        self.triplet
            .iter()
            .map(|t| StateSet::full(t.num_states()))
            .collect()
    }
    fn len(&self) -> usize {
        self.triplet.len()
    }
    fn is_empty(&self) -> bool {
        self.triplet.is_empty()
    }
}

/// the number of distinct marked variables in `c`.
fn overlap(c: &Clause, in_group: &[bool]) -> usize {
    let mut seen: Vec<VarId> = Vec::with_capacity(c.len());
    for l in c {
        let v = l.vi();
        if in_group[v] && !seen.contains(&v) {
            seen.push(v);
        }
    }
    seen.len()
}
