/*!
# A triplet-decomposition SAT solver

Trisat is an experimental SAT solver. Instead of branching on single
variables, it aggregates the clauses of a CNF into small overlapping
macro-nodes of up to three clauses each, enumerates every locally
satisfying assignment of each macro-node, and solves the resulting
constraint network with arc consistency over bitset domains:

- clauses are greedily grouped into *triplets* maximising shared variables
- each triplet's satisfying assignments become its *states*
- triplets sharing variables are connected; agreement of their states on
  the shared variables is precomputed as per-state bitmasks
- an AC-3 propagator filters the per-triplet domains, and a recursive
  search drives every domain down to a singleton

## Usage

Trisat is a standalone program taking a DIMACS CNF file.

```plain
$ trisat uf20-01.cnf
uf20-01.cnf                         |#var:      20, #cls:      91
   Macronodes|#node:      31, #state: min:   3, max: 120, avg:   52.3
...
s SATISFIABLE: uf20-01.cnf
v 1 -2 3 4 ... 0
```

The answer line uses the DIMACS convention: `v` followed by one signed
integer per variable appearing in the formula, sorted by variable index,
terminated by `0`. On an unsatisfiable formula a line `UNSAT` is printed
instead.

## Command line options

Please check the help message (`trisat --help`). The search variants of
the solver family are configuration switches over one core: `--heuristic`
selects the branching rule, `--shuffle` enables randomised value ordering
(seeded, reproducible via `--seed`), `--cbj` enables conflict-directed
backjumping, and `--endgame` sets the residual hand-off threshold.
*/
/// Module `bitset` provides variable-width bitsets used as state domains.
pub mod bitset;
/// Module `config` provides solver's configuration and CLI.
pub mod config;
/// Module `endgame` closes out small residuals by direct enumeration.
pub mod endgame;
/// Module `network` provides the triplet interaction graph and the
/// precomputed state-compatibility tables.
pub mod network;
/// Module `propagate` implements the AC-3 propagator over bitset domains.
pub mod propagate;
/// Module `search` implements the recursive branching search.
pub mod search;
/// Module `solver` provides the top-level API as a SAT solver.
pub mod solver;
/// Module `state` is a collection of internal data for progress reports.
pub mod state;
/// Module `triplet` builds macro-nodes and enumerates their states.
pub mod triplet;
/// Module `types` provides various building blocks, including
/// some common traits.
pub mod types;
/// Module `validator` implements a model checker.
pub mod validator;
