// cargo test -- --nocapture
use {
    std::convert::TryFrom,
    trisat::{
        config::Config,
        network::{Network, NetworkIF},
        propagate::{PropagateIF, PropagateTarget, Propagator},
        solver::{Certificate, SatSolverBuildIF, SatSolverIF, Solver},
        triplet::{TripletDB, TripletDBIF},
        types::*,
        validator::ValidateIF,
    },
};

fn quiet() -> Config {
    let mut config = Config::default();
    config.quiet_mode = true;
    config
}

fn solver_for(clauses: &[Vec<i32>], config: Config) -> Solver {
    Solver::try_from((config, clauses)).expect("injection never fails")
}

fn certificate(clauses: &[Vec<i32>], config: Config) -> Certificate {
    solver_for(clauses, config)
        .solve()
        .expect("no internal error")
}

/// a satisfiable 3-SAT instance with a planted assignment (odd variables
/// true), generated from a fixed xorshift stream.
fn planted_3sat(num_vars: usize, num_clauses: usize) -> Vec<Vec<i32>> {
    let mut seed = 0x2545_f491_4f6c_dd1du64;
    let mut next = move || {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        seed
    };
    let planted = |v: i32| v % 2 == 1;
    let mut out = Vec::with_capacity(num_clauses);
    for _ in 0..num_clauses {
        let mut vars: Vec<i32> = Vec::with_capacity(3);
        while vars.len() < 3 {
            let v = (next() as usize % num_vars) as i32 + 1;
            if !vars.contains(&v) {
                vars.push(v);
            }
        }
        let mut clause: Vec<i32> = vars
            .iter()
            .map(|v| if next() & 1 == 0 { *v } else { -*v })
            .collect();
        if !clause.iter().any(|l| (0 < *l) == planted(l.abs())) {
            // force a literal true under the planted assignment
            clause[0] = if planted(clause[0].abs()) {
                clause[0].abs()
            } else {
                -clause[0].abs()
            };
        }
        out.push(clause);
    }
    out
}

/// five triplets in a chain, consecutive ones sharing exactly one
/// variable; greedy grouping keeps each three-clause block together.
fn chain_5() -> Vec<Vec<i32>> {
    let mut out = Vec::new();
    for g in 0..5i32 {
        let x = |j: i32| 4 * g + j;
        out.push(vec![x(1), x(2), x(3)]);
        out.push(vec![-x(1), -x(2), x(4)]);
        out.push(vec![x(3), -x(4), x(5)]);
    }
    out
}

#[test]
fn test_trivial_sat() {
    match certificate(&[vec![1]], quiet()) {
        Certificate::SAT(model) => assert_eq!(vec![1], model),
        Certificate::UNSAT => panic!("a unit clause is satisfiable"),
    }
}

#[test]
fn test_trivial_unsat() {
    assert_eq!(
        Certificate::UNSAT,
        certificate(&[vec![1], vec![-1]], quiet())
    );
}

#[test]
fn test_disjoint_clauses() {
    let clauses = vec![vec![1, 2], vec![3, 4]];
    let mut s = solver_for(&clauses, quiet());
    match s.solve().expect("no internal error") {
        Certificate::SAT(model) => {
            let vars: Vec<i32> = model.iter().map(|l| l.abs()).collect();
            assert_eq!(vec![1, 2, 3, 4], vars);
            assert_eq!(None, s.validate_assignment(&model));
        }
        Certificate::UNSAT => panic!("two disjoint clauses are satisfiable"),
    }
}

/// three pigeons into two holes: variable `2 * (i - 1) + j` stands for
/// "pigeon i sits in hole j".
fn pigeonhole_3_2() -> Vec<Vec<i32>> {
    vec![
        vec![1, 2],
        vec![3, 4],
        vec![5, 6],
        vec![-1, -3],
        vec![-1, -5],
        vec![-3, -5],
        vec![-2, -4],
        vec![-2, -6],
        vec![-4, -6],
    ]
}

#[test]
fn test_pigeonhole_unsat() {
    assert_eq!(Certificate::UNSAT, certificate(&pigeonhole_3_2(), quiet()));
}

#[test]
fn test_pigeonhole_unsat_without_endgame() {
    let mut config = quiet();
    config.endgame_threshold = 0;
    assert_eq!(Certificate::UNSAT, certificate(&pigeonhole_3_2(), config));
}

#[test]
fn test_pigeonhole_unsat_with_backjumping() {
    let mut config = quiet();
    config.use_backjump = true;
    config.use_shuffle = true;
    config.endgame_threshold = 0;
    assert_eq!(Certificate::UNSAT, certificate(&pigeonhole_3_2(), config));
}

#[test]
fn test_planted_3sat_is_solved_and_verified() {
    let clauses = planted_3sat(20, 91);
    for threshold in &[0usize, 400] {
        let mut config = quiet();
        config.endgame_threshold = *threshold;
        let mut s = solver_for(&clauses, config);
        match s.solve().expect("no internal error") {
            Certificate::SAT(model) => {
                assert_eq!(None, s.validate_assignment(&model));
                // every variable of the formula is covered
                let mut vars: Vec<i32> = clauses.iter().flatten().map(|l| l.abs()).collect();
                vars.sort_unstable();
                vars.dedup();
                assert_eq!(vars.len(), model.len());
            }
            Certificate::UNSAT => panic!("the planted instance is satisfiable"),
        }
    }
}

#[test]
fn test_all_heuristics_solve_a_planted_instance() {
    let clauses = planted_3sat(20, 60);
    for h in &["mrv", "impact", "widest"] {
        let mut config = quiet();
        config.heuristic = h.parse().expect("a heuristic name");
        config.endgame_threshold = 0;
        let mut s = solver_for(&clauses, config);
        match s.solve().expect("no internal error") {
            Certificate::SAT(model) => assert_eq!(None, s.validate_assignment(&model)),
            Certificate::UNSAT => panic!("the planted instance is satisfiable"),
        }
    }
}

#[test]
fn test_shuffled_runs_are_deterministic_under_a_seed() {
    let clauses = planted_3sat(20, 91);
    let run = || {
        let mut config = quiet();
        config.use_shuffle = true;
        config.seed = 99;
        config.endgame_threshold = 0;
        solver_for(&clauses, config)
            .solve()
            .expect("no internal error")
    };
    assert_eq!(run(), run());
}

#[test]
fn test_backjumping_solves_the_chain() {
    let mut config = quiet();
    config.use_backjump = true;
    config.endgame_threshold = 0;
    let mut s = solver_for(&chain_5(), config);
    match s.solve().expect("no internal error") {
        Certificate::SAT(model) => assert_eq!(None, s.validate_assignment(&model)),
        Certificate::UNSAT => panic!("the chain instance is satisfiable"),
    }
}

#[test]
fn test_partitioning_covers_every_clause_once() {
    let clauses = planted_3sat(20, 91);
    let s = solver_for(&clauses, quiet());
    let mut input: Vec<Vec<i32>> = clauses;
    let mut grouped: Vec<Vec<i32>> = s
        .tdb
        .triplet
        .iter()
        .flat_map(|t| t.clauses.iter().map(|c| vec2int(c)))
        .collect();
    input.sort();
    grouped.sort();
    assert_eq!(input, grouped);
    for t in &s.tdb.triplet {
        assert!(!t.clauses.is_empty() && t.clauses.len() <= 3);
    }
}

#[test]
fn test_chain_is_built_as_expected() {
    let clauses: Vec<Clause> = chain_5()
        .iter()
        .map(|c| clause_from_ints(c))
        .collect();
    let tdb = TripletDB::build(&clauses);
    assert_eq!(5, tdb.len());
    let net = Network::compile(&tdb);
    let degrees: Vec<usize> = (0..5).map(|i| net.neighbors(i).len()).collect();
    assert_eq!(vec![1, 2, 2, 2, 1], degrees);
    for i in 0..4 {
        let e = net
            .neighbors(i)
            .iter()
            .find(|e| e.to == i + 1)
            .expect("a chain edge");
        assert_eq!(1, e.weight);
    }
}

#[test]
fn test_chain_filtering_visits_linearly_many_arcs() {
    let clauses: Vec<Clause> = chain_5()
        .iter()
        .map(|c| clause_from_ints(c))
        .collect();
    let tdb = TripletDB::build(&clauses);
    let net = Network::compile(&tdb);
    let mut domains = tdb.initial_domains();
    let before = domains.clone();
    let mut prp = Propagator::new(net.len());
    assert!(prp
        .filter(&net, &mut domains, PropagateTarget::Everything)
        .is_ok());
    // the chain is arc-consistent from the start: one pass over each
    // directed arc and no requeues
    assert_eq!(before, domains);
    let (num_propagation, num_revision, _) = prp.exports();
    assert_eq!(0, num_revision);
    assert_eq!(8, num_propagation);
    assert!(num_propagation <= 4 * net.len());
}

#[test]
fn test_chain_is_satisfiable() {
    let mut config = quiet();
    config.endgame_threshold = 0;
    match certificate(&chain_5(), config) {
        Certificate::SAT(_) => (),
        Certificate::UNSAT => panic!("the chain instance is satisfiable"),
    }
}

#[test]
fn test_tolerant_dimacs_loading() {
    let path = std::env::temp_dir().join(format!("trisat_ok_{}.cnf", std::process::id()));
    std::fs::write(
        &path,
        "c a comment line\n\
         % a weight line from a SATLIB archive\n\
         p cnf 3 3\n\
         1 2 0\n\
         bogus line skipped silently\n\
         -1 3 0\n\
         0\n\
         -2 -3 0\n",
    )
    .expect("a writable temp dir");
    let mut config = quiet();
    config.cnf_filename = path.clone();
    let mut s = Solver::build(&config).expect("a loadable file");
    assert_eq!(3, s.state.target.num_of_clauses);
    assert_eq!(3, s.state.target.num_of_variables);
    match s.solve().expect("no internal error") {
        Certificate::SAT(model) => assert_eq!(None, s.validate_assignment(&model)),
        Certificate::UNSAT => panic!("the sample formula is satisfiable"),
    }
    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_malformed_header_is_surfaced() {
    let path = std::env::temp_dir().join(format!("trisat_bad_{}.cnf", std::process::id()));
    std::fs::write(&path, "p cnf three 3\n1 0\n").expect("a writable temp dir");
    let mut config = quiet();
    config.cnf_filename = path.clone();
    assert_eq!(
        Some(SolverError::InvalidHeader),
        Solver::build(&config).err()
    );
    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_missing_file_is_an_io_error() {
    let config = Config::from("no_such_file.cnf");
    assert_eq!(Some(SolverError::IOError), Solver::build(&config).err());
}

#[test]
fn test_empty_formula_is_satisfiable() {
    let clauses: Vec<Vec<i32>> = Vec::new();
    match certificate(&clauses, quiet()) {
        Certificate::SAT(model) => assert!(model.is_empty()),
        Certificate::UNSAT => panic!("an empty formula is satisfiable"),
    }
}
