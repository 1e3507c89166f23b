// A triplet-decomposition SAT solver driven by arc consistency
use {
    libc::{clock_gettime, timespec, CLOCK_PROCESS_CPUTIME_ID},
    std::{borrow::Cow, thread},
    structopt::StructOpt,
    trisat::{
        config::Config,
        solver::{Certificate, SatSolverBuildIF, SatSolverIF, Solver, SolverResult},
        state::StateIF,
        types::SolverError,
    },
};

const RED: &str = "\x1B[001m\x1B[031m";
const GREEN: &str = "\x1B[001m\x1B[032m";
const BLUE: &str = "\x1B[001m\x1B[034m";
const RESET: &str = "\x1B[000m";

// recursion depth is proportional to the number of triplets; reserve a
// deep stack for the search thread
const SOLVER_STACK_SIZE: usize = 256 * 1024 * 1024;

fn colored(v: Result<bool, &SolverError>, quiet: bool) -> Cow<'static, str> {
    if quiet {
        match v {
            Ok(false) => Cow::Borrowed("s UNSATISFIABLE"),
            Ok(true) => Cow::Borrowed("s SATISFIABLE"),
            Err(e) => Cow::from(format!("c UNKNOWN ({})", e)),
        }
    } else {
        match v {
            Ok(false) => Cow::from(format!("{}s UNSATISFIABLE{}", GREEN, RESET)),
            Ok(true) => Cow::from(format!("{}s SATISFIABLE{}", BLUE, RESET)),
            Err(e) => Cow::from(format!("{}c UNKNOWN ({}){}", RED, e, RESET)),
        }
    }
}

fn main() {
    let config = Config::from_args().override_args();
    if !config.cnf_filename.exists() {
        println!("{} does not exist.", config.cnf_filename.to_string_lossy());
        std::process::exit(1);
    }
    let worker = thread::Builder::new()
        .name("search".to_string())
        .stack_size(SOLVER_STACK_SIZE)
        .spawn(move || run(config));
    let res = match worker {
        Ok(handle) => handle.join().unwrap_or(Err(SolverError::SolverBug)),
        Err(_) => Err(SolverError::IOError),
    };
    std::process::exit(match res {
        Ok(_) => 0,
        Err(_) => 1,
    });
}

fn run(config: Config) -> SolverResult {
    let quiet = config.quiet_mode;
    let input = config.cnf_filename.to_string_lossy().into_owned();
    let mut s = match Solver::build(&config) {
        Ok(s) => s,
        Err(e) => {
            println!("{}: {}", colored(Err(&e), quiet), input);
            return Err(e);
        }
    };
    let res = s.solve();
    match &res {
        Ok(Certificate::SAT(model)) => {
            println!("{}: {}", colored(Ok(true), quiet), input);
            let mut line = String::from("v");
            for x in model {
                line.push(' ');
                line.push_str(&x.to_string());
            }
            line.push_str(" 0");
            println!("{}", line);
        }
        Ok(Certificate::UNSAT) => {
            println!("{}: {}", colored(Ok(false), quiet), input);
            println!("UNSAT");
        }
        Err(e) => {
            println!("{}: {}", colored(Err(e), quiet), input);
        }
    }
    if !quiet {
        println!(
            "c elapsed: {:>8.3} sec (cpu: {:>8.3} sec)",
            s.state.elapsed(),
            cpu_time(&s),
        );
    }
    res
}

fn cpu_time(s: &Solver) -> f64 {
    let mut time = timespec {
        tv_sec: 0,
        tv_nsec: 0,
    };
    if unsafe { clock_gettime(CLOCK_PROCESS_CPUTIME_ID, &mut time) } == -1 {
        s.state.elapsed()
    } else {
        time.tv_sec as f64 + time.tv_nsec as f64 / 1_000_000_000.0f64
    }
}
