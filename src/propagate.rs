//! The AC-3 propagator over bitset domains.
//!
//! Filtering works on a vector of live-state domains, one bitmask per
//! triplet. A FIFO holds the triplets whose domain has changed; every
//! pass over an arc `(u, v)` unions the compatibility masks of `u`'s
//! live states and intersects `v`'s domain with the result. The queue
//! drains in finite time: each pass either strictly shrinks some domain
//! or enqueues nothing.
use {
    crate::{
        bitset::{NodeSet, StateSet},
        network::{Network, NetworkIF},
        types::*,
    },
    std::collections::VecDeque,
};

/// Where a filtering pass starts from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PropagateTarget {
    /// recheck every arc; used for the initial whole-graph filtering
    Everything,
    /// recheck the arcs leaving a single just-reduced triplet
    From(NodeId),
}

/// The propagator and its scratch space.
///
/// The queue and the membership markers are reused across calls and are
/// never observed outside `filter`.
#[derive(Debug)]
pub struct Propagator {
    queue: VecDeque<NodeId>,
    in_queue: Vec<bool>,
    /// the number of arc passes
    num_propagation: usize,
    /// the number of domain reductions
    num_revision: usize,
    /// the number of domain wipe-outs
    num_collapse: usize,
}

/// API for domain filtering.
pub trait PropagateIF {
    /// enforce arc consistency on `domains`, starting at `target`.
    ///
    /// # Errors
    ///
    /// on a domain wipe-out, returns the conflict set: the seed node
    /// plus every node that narrowed a neighbour during this call.
    fn filter(
        &mut self,
        net: &Network,
        domains: &mut [StateSet],
        target: PropagateTarget,
    ) -> Result<(), NodeSet>;
}

impl Propagator {
    pub fn new(n: usize) -> Propagator {
        Propagator {
            queue: VecDeque::with_capacity(n),
            in_queue: vec![false; n],
            num_propagation: 0,
            num_revision: 0,
            num_collapse: 0,
        }
    }
}

impl Export<(usize, usize, usize)> for Propagator {
    /// exports:
    ///  1. the number of arc passes
    ///  1. the number of domain reductions
    ///  1. the number of domain wipe-outs
    #[inline]
    fn exports(&self) -> (usize, usize, usize) {
        (self.num_propagation, self.num_revision, self.num_collapse)
    }
}

impl PropagateIF for Propagator {
    fn filter(
        &mut self,
        net: &Network,
        domains: &mut [StateSet],
        target: PropagateTarget,
    ) -> Result<(), NodeSet> {
        debug_assert_eq!(net.len(), domains.len());
        self.queue.clear();
        for m in self.in_queue.iter_mut() {
            *m = false;
        }
        let mut conflict = NodeSet::empty(net.len());
        match target {
            PropagateTarget::Everything => {
                for u in 0..net.len() {
                    self.queue.push_back(u);
                    self.in_queue[u] = true;
                }
            }
            PropagateTarget::From(u) => {
                self.queue.push_back(u);
                self.in_queue[u] = true;
                conflict.insert(u);
            }
        }
        while let Some(u) = self.queue.pop_front() {
            self.in_queue[u] = false;
            for e in net.neighbors(u) {
                let v = e.to;
                self.num_propagation += 1;
                // the union of u's live-state masks towards v; a missing
                // mask leaves v unconstrained by this arc
                let mut allowed = StateSet::empty(domains[v].width());
                let constrained = if let Some(s) = domains[u].as_singleton() {
                    match net.compat(u, s, v) {
                        Some(mask) => {
                            allowed.union_with(mask);
                            true
                        }
                        None => false,
                    }
                } else {
                    let mut all_present = true;
                    for s in domains[u].iter() {
                        match net.compat(u, s, v) {
                            Some(mask) => allowed.union_with(mask),
                            None => {
                                all_present = false;
                                break;
                            }
                        }
                    }
                    all_present
                };
                if !constrained || domains[v].is_subset_of(&allowed) {
                    continue;
                }
                domains[v].intersect_with(&allowed);
                self.num_revision += 1;
                conflict.insert(u);
                if domains[v].is_empty() {
                    self.num_collapse += 1;
                    return Err(conflict);
                }
                if !self.in_queue[v] {
                    self.queue.push_back(v);
                    self.in_queue[v] = true;
                }
            }
        }
        Ok(())
    }
}
