//! The triplet interaction graph and the state-compatibility tables.
//!
//! Two triplets interact when they share at least one variable. For each
//! directed edge and each state of the source, the set of target states
//! agreeing on every shared variable is precomputed as a bitmask; AC-3
//! and the endgame answer all their compatibility queries from these
//! tables in constant time.
use crate::{
    bitset::StateSet,
    triplet::{TripletDB, TripletDBIF},
    types::*,
};

/// An adjacency entry of the interaction graph.
#[derive(Clone, Debug)]
pub struct Edge {
    pub to: NodeId,
    /// the variables shared with `to`, sorted ascending
    pub shared: Vec<VarId>,
    /// `shared.len()`; summed per node into the impact weight
    pub weight: usize,
}

/// The compiled constraint network over the triplet list.
#[derive(Debug, Default)]
pub struct Network {
    adj: Vec<Vec<Edge>>,
    impact: Vec<usize>,
    /// `compat[i][s][j]` is the mask over `j`'s states compatible with
    /// state `s` of `i`; `None` on non-edges (including `j == i`)
    compat: Vec<Vec<Vec<Option<StateSet>>>>,
}

/// API for the interaction graph and the compatibility tables.
pub trait NetworkIF {
    /// build the graph, the impact weights and the compatibility tables.
    fn compile(tdb: &TripletDB) -> Network;
    /// the number of nodes.
    fn len(&self) -> usize;
    fn neighbors(&self, i: NodeId) -> &[Edge];
    /// the sum of incident edge weights of `i`.
    fn impact(&self, i: NodeId) -> usize;
    /// the mask over `j`'s states compatible with state `s` of `i`, or
    /// `None` if `(i, j)` is not an edge.
    fn compat(&self, i: NodeId, s: usize, j: NodeId) -> Option<&StateSet>;
}

impl NetworkIF for Network {
    fn compile(tdb: &TripletDB) -> Network {
        let k = tdb.len();
        let mut adj: Vec<Vec<Edge>> = (0..k).map(|_| Vec::new()).collect();
        let mut impact = vec![0; k];
        for i in 0..k {
            for j in i + 1..k {
                let shared = intersect_sorted(&tdb.triplet[i].vars, &tdb.triplet[j].vars);
                if shared.is_empty() {
                    continue;
                }
                let weight = shared.len();
                impact[i] += weight;
                impact[j] += weight;
                adj[i].push(Edge {
                    to: j,
                    shared: shared.clone(),
                    weight,
                });
                adj[j].push(Edge {
                    to: i,
                    shared,
                    weight,
                });
            }
        }
        let mut compat: Vec<Vec<Vec<Option<StateSet>>>> = Vec::with_capacity(k);
        for i in 0..k {
            let ti = &tdb.triplet[i];
            let mut per_state: Vec<Vec<Option<StateSet>>> =
                (0..ti.num_states()).map(|_| vec![None; k]).collect();
            for e in &adj[i] {
                let tj = &tdb.triplet[e.to];
                // shared-variable positions resolved once per edge
                let pairs: Vec<(usize, usize)> = e
                    .shared
                    .iter()
                    .filter_map(|v| match (ti.index_of(*v), tj.index_of(*v)) {
                        (Some(p), Some(q)) => Some((p, q)),
                        _ => None,
                    })
                    .collect();
                for s in 0..ti.num_states() {
                    let mut mask = StateSet::empty(tj.num_states());
                    for t in 0..tj.num_states() {
                        if pairs
                            .iter()
                            .all(|(p, q)| ti.states[s][*p] == tj.states[t][*q])
                        {
                            mask.insert(t);
                        }
                    }
                    per_state[s][e.to] = Some(mask);
                }
            }
            compat.push(per_state);
        }
        Network { adj, impact, compat }
    }
    fn len(&self) -> usize {
        self.adj.len()
    }
    fn neighbors(&self, i: NodeId) -> &[Edge] {
        &self.adj[i]
    }
    fn impact(&self, i: NodeId) -> usize {
        self.impact[i]
    }
    fn compat(&self, i: NodeId, s: usize, j: NodeId) -> Option<&StateSet> {
        self.compat[i][s][j].as_ref()
    }
}

/// the intersection of two ascending variable lists.
fn intersect_sorted(a: &[VarId], b: &[VarId]) -> Vec<VarId> {
    let mut out = Vec::new();
    let (mut p, mut q) = (0, 0);
    while p < a.len() && q < b.len() {
        if a[p] < b[q] {
            p += 1;
        } else if b[q] < a[p] {
            q += 1;
        } else {
            out.push(a[p]);
            p += 1;
            q += 1;
        }
    }
    out
}
