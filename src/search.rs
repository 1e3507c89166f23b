//! The recursive branching search.
//!
//! Branching fixes one triplet's domain to a singleton, re-propagates
//! from it, and recurses until every domain is a singleton. All the
//! solver family's variants are switches over this one core: the
//! branching-node heuristic, the candidate ordering (ascending or a
//! seeded shuffle), conflict-directed backjumping, and the residual
//! endgame hand-off.
use {
    crate::{
        bitset::{NodeSet, StateSet},
        config::{Config, Heuristic},
        endgame,
        network::{Network, NetworkIF},
        propagate::{PropagateIF, PropagateTarget, Propagator},
        types::*,
    },
    rand::{rngs::SmallRng, seq::SliceRandom, SeedableRng},
};

/// the deepest level that emits a progress line
const REPORT_DEPTH: usize = 4;

/// The search engine. Owns the propagator, the pseudorandom stream and
/// the per-run counters.
#[derive(Debug)]
pub struct Search {
    pub prp: Propagator,
    rng: SmallRng,
    heuristic: Heuristic,
    use_shuffle: bool,
    use_backjump: bool,
    smoothing: usize,
    endgame_threshold: usize,
    verbose: bool,
    num_decision: usize,
    num_backjump: usize,
    num_endgame: usize,
}

/// API for the branching search.
pub trait SearchIF {
    /// drive an arc-consistent domain vector to singletons.
    ///
    /// returns `None` when every branch is exhausted (unsatisfiable
    /// under the current domains).
    fn run(&mut self, net: &Network, domains: &[StateSet]) -> Option<Vec<StateSet>>;
}

impl Search {
    pub fn new(config: &Config, n: usize) -> Search {
        Search {
            prp: Propagator::new(n),
            rng: SmallRng::seed_from_u64(config.seed),
            heuristic: config.heuristic,
            use_shuffle: config.use_shuffle,
            use_backjump: config.use_backjump,
            smoothing: config.smoothing.max(1),
            endgame_threshold: config.endgame_threshold,
            verbose: !config.quiet_mode,
            num_decision: 0,
            num_backjump: 0,
            num_endgame: 0,
        }
    }
}

impl Export<(usize, usize, usize)> for Search {
    /// exports:
    ///  1. the number of decisions
    ///  1. the number of backjumps
    ///  1. the number of endgame hand-offs
    #[inline]
    fn exports(&self) -> (usize, usize, usize) {
        (self.num_decision, self.num_backjump, self.num_endgame)
    }
}

impl SearchIF for Search {
    fn run(&mut self, net: &Network, domains: &[StateSet]) -> Option<Vec<StateSet>> {
        if self.use_backjump {
            let assigned = NodeSet::empty(net.len());
            self.explore_cbj(net, domains, &assigned, 1).ok()
        } else {
            self.explore(net, domains, 1)
        }
    }
}

impl Search {
    /// the branching node under the configured heuristic, or `None`
    /// when every domain is a singleton.
    fn select(&self, net: &Network, domains: &[StateSet]) -> Option<NodeId> {
        let mut best: Option<NodeId> = None;
        match self.heuristic {
            Heuristic::Mrv => {
                let mut best_count = usize::MAX;
                for (i, d) in domains.iter().enumerate() {
                    let c = d.count();
                    if 1 < c && c < best_count {
                        best_count = c;
                        best = Some(i);
                    }
                }
            }
            Heuristic::Widest => {
                let mut best_count = 1;
                for (i, d) in domains.iter().enumerate() {
                    let c = d.count();
                    if best_count < c {
                        best_count = c;
                        best = Some(i);
                    }
                }
            }
            Heuristic::Impact => {
                let mut best_score = f64::INFINITY;
                for (i, d) in domains.iter().enumerate() {
                    let c = d.count();
                    if c <= 1 {
                        continue;
                    }
                    let score = c as f64 / (net.impact(i) + self.smoothing) as f64;
                    if score < best_score {
                        best_score = score;
                        best = Some(i);
                    }
                }
            }
        }
        best
    }
    /// the live states of `dom` in branching order.
    fn candidates(&mut self, dom: &StateSet) -> Vec<usize> {
        let mut order: Vec<usize> = dom.iter().collect();
        if self.use_shuffle {
            order.shuffle(&mut self.rng);
        }
        order
    }
    fn report(&self, domains: &[StateSet], depth: usize, target: NodeId) {
        if self.verbose && depth <= REPORT_DEPTH {
            println!(
                "{:>width$}level {}: node {} ({} states), total {}",
                "",
                depth,
                target,
                domains[target].count(),
                total_live(domains),
                width = 2 * depth,
            );
        }
    }
    fn explore(
        &mut self,
        net: &Network,
        domains: &[StateSet],
        depth: usize,
    ) -> Option<Vec<StateSet>> {
        if 0 < self.endgame_threshold && total_live(domains) < self.endgame_threshold {
            self.num_endgame += 1;
            return endgame::close_out(net, domains);
        }
        let target = match self.select(net, domains) {
            Some(t) => t,
            // every domain is a singleton and the last propagation
            // succeeded, so the assignment is consistent
            None => return Some(domains.to_vec()),
        };
        self.num_decision += 1;
        self.report(domains, depth, target);
        for s in self.candidates(&domains[target]) {
            let mut branched = domains.to_vec();
            branched[target] = StateSet::singleton(domains[target].width(), s);
            if self
                .prp
                .filter(net, &mut branched, PropagateTarget::From(target))
                .is_ok()
            {
                if let Some(found) = self.explore(net, &branched, depth + 1) {
                    return Some(found);
                }
            }
        }
        None
    }
    /// the conflict-directed variant: a failed branch names the nodes
    /// that caused the wipe-out, and a nogood that skips the current
    /// target lets the search jump over the remaining candidates here.
    fn explore_cbj(
        &mut self,
        net: &Network,
        domains: &[StateSet],
        assigned: &NodeSet,
        depth: usize,
    ) -> Result<Vec<StateSet>, NodeSet> {
        if 0 < self.endgame_threshold && total_live(domains) < self.endgame_threshold {
            self.num_endgame += 1;
            return match endgame::close_out(net, domains) {
                Some(found) => Ok(found),
                // the refuted residual depends on everything fixed so
                // far; the full assigned set is the only safe nogood
                None => Err(assigned.clone()),
            };
        }
        let target = match self.select(net, domains) {
            Some(t) => t,
            None => return Ok(domains.to_vec()),
        };
        self.num_decision += 1;
        self.report(domains, depth, target);
        let mut level_conflict = NodeSet::empty(net.len());
        level_conflict.insert(target);
        let mut deeper = assigned.clone();
        deeper.insert(target);
        for s in self.candidates(&domains[target]) {
            let mut branched = domains.to_vec();
            branched[target] = StateSet::singleton(domains[target].width(), s);
            let conflict = match self
                .prp
                .filter(net, &mut branched, PropagateTarget::From(target))
            {
                Ok(()) => match self.explore_cbj(net, &branched, &deeper, depth + 1) {
                    Ok(found) => return Ok(found),
                    Err(cs) => cs,
                },
                Err(cs) => cs,
            };
            if !conflict.contains(target) {
                // the culprit sits above this level
                self.num_backjump += 1;
                return Err(conflict);
            }
            level_conflict.union_with(&conflict);
        }
        level_conflict.remove(target);
        if level_conflict.is_empty() {
            return Err(self.substitute_nogood(assigned));
        }
        Err(level_conflict)
    }
    /// an empty outgoing nogood would stall the caller; substitute a
    /// random already-assigned node.
    fn substitute_nogood(&mut self, assigned: &NodeSet) -> NodeSet {
        let mut out = NodeSet::empty(assigned.width());
        let pool: Vec<NodeId> = assigned.iter().collect();
        match pool.choose(&mut self.rng) {
            Some(n) => out.insert(*n),
            None => {
                if 0 < out.width() {
                    out.insert(0);
                }
            }
        }
        out
    }
}

/// the total live-state count across all domains.
pub fn total_live(domains: &[StateSet]) -> usize {
    domains.iter().map(|d| d.count()).sum()
}
