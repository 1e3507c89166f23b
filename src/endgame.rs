//! The residual solver for small live-state tails.
//!
//! Deep in the search the branching overhead exceeds the cost of direct
//! enumeration. Once the total live-state count falls under the
//! configured threshold, the remaining domains and their compatibility
//! constraints are handed to this module, which answers satisfiability
//! of the conjunction by a depth-first sweep with pairwise pruning.
use crate::{
    bitset::StateSet,
    network::{Network, NetworkIF},
    types::*,
};

/// answer satisfiability of the residual; on success returns the chosen
/// singleton domains so extraction stays uniform with the main search.
pub fn close_out(net: &Network, domains: &[StateSet]) -> Option<Vec<StateSet>> {
    let mut chosen: Vec<usize> = Vec::with_capacity(domains.len());
    if pick(net, domains, &mut chosen) {
        Some(
            domains
                .iter()
                .zip(chosen.iter())
                .map(|(d, s)| StateSet::singleton(d.width(), *s))
                .collect(),
        )
    } else {
        None
    }
}

fn pick(net: &Network, domains: &[StateSet], chosen: &mut Vec<usize>) -> bool {
    let i = chosen.len();
    if i == domains.len() {
        return true;
    }
    for s in domains[i].iter() {
        if agrees_with_prefix(net, chosen, i, s) {
            chosen.push(s);
            if pick(net, domains, chosen) {
                return true;
            }
            chosen.pop();
        }
    }
    false
}

/// `true` if state `s` of node `i` agrees with every already-chosen
/// neighbour on the shared variables.
fn agrees_with_prefix(net: &Network, chosen: &[usize], i: NodeId, s: usize) -> bool {
    net.neighbors(i).iter().all(|e| {
        e.to >= chosen.len()
            || net
                .compat(i, s, e.to)
                .map_or(true, |mask| mask.contains(chosen[e.to]))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        network::Network,
        triplet::{TripletDB, TripletDBIF},
    };

    fn setup(v: &[&[i32]]) -> (Network, Vec<StateSet>) {
        let cs = v.iter().map(|c| clause_from_ints(c)).collect::<Vec<Clause>>();
        let tdb = TripletDB::build(&cs);
        let net = Network::compile(&tdb);
        let domains = tdb.initial_domains();
        (net, domains)
    }

    #[test]
    fn test_residual_sat() {
        let (net, domains) = setup(&[
            &[1, 2],
            &[-1, 2],
            &[1, -2],
            &[2, 3],
            &[3, 2],
            &[2, 3],
        ]);
        let found = close_out(&net, &domains).expect("satisfiable residual");
        assert_eq!(domains.len(), found.len());
        for d in &found {
            assert!(d.as_singleton().is_some());
        }
    }
    #[test]
    fn test_residual_unsat() {
        // two triplets forcing variable 1 to opposite values
        let (net, domains) = setup(&[
            &[1],
            &[1, 2],
            &[1, -2],
            &[-1],
            &[-1, 3],
            &[-1, -3],
        ]);
        assert!(close_out(&net, &domains).is_none());
    }
}
