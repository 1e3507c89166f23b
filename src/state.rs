//! Internal data for progress reports.
use {
    crate::{
        config::Config,
        search::Search,
        triplet::{TripletDB, TripletDBIF},
        types::*,
    },
    chrono::{DateTime, Utc},
    std::{
        fmt,
        io::{stdout, Write},
        path::Path,
    },
};

/// Miscellaneous solver state not owned by a core component.
#[derive(Debug)]
pub struct State {
    /// cleared when a macro-node turns out to have no satisfying state
    pub ok: bool,
    pub config: Config,
    pub target: CNFDescription,
    pub num_triplets: usize,
    pub start: DateTime<Utc>,
    pub progress_cnt: usize,
}

impl Instantiate for State {
    fn instantiate(config: &Config, cnf: &CNFDescription) -> State {
        State {
            ok: true,
            config: config.clone(),
            target: cnf.clone(),
            num_triplets: 0,
            start: Utc::now(),
            progress_cnt: 0,
        }
    }
}

/// API for progress reporting.
pub trait StateIF {
    /// elapsed wall-clock seconds since instantiation.
    fn elapsed(&self) -> f64;
    /// write a message to stdout without a newline.
    fn flush(&self, mes: &str);
    /// print the problem summary once, before filtering starts.
    fn progress_header(&mut self, tdb: &TripletDB);
    /// print a progress report.
    fn progress(&mut self, srch: &Search, mes: Option<&str>);
}

impl StateIF for State {
    fn elapsed(&self) -> f64 {
        (Utc::now() - self.start).num_milliseconds() as f64 / 1_000.0
    }
    fn flush(&self, mes: &str) {
        if self.config.quiet_mode {
            return;
        }
        print!("{}", mes);
        let _ = stdout().flush();
    }
    fn progress_header(&mut self, tdb: &TripletDB) {
        if self.config.quiet_mode || tdb.is_empty() {
            return;
        }
        println!(
            "{:<36}|#var:{:>8}, #cls:{:>8}",
            self.target_name(),
            self.target.num_of_variables,
            self.target.num_of_clauses,
        );
        let counts: Vec<usize> = tdb.triplet.iter().map(|t| t.num_states()).collect();
        let min = counts.iter().min().copied().unwrap_or(0);
        let max = counts.iter().max().copied().unwrap_or(0);
        let avg = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
        println!(
            "   Macronodes|#node:{:>7}, #state: min:{:>4}, max:{:>4}, avg:{:>7.1}",
            tdb.len(),
            min,
            max,
            avg,
        );
    }
    fn progress(&mut self, srch: &Search, mes: Option<&str>) {
        if self.config.quiet_mode {
            return;
        }
        self.progress_cnt += 1;
        let (num_propagation, num_revision, num_collapse) = srch.prp.exports();
        let (num_decision, num_backjump, num_endgame) = srch.exports();
        println!("{}", self);
        println!(
            "   Propagator|#arc:{:>9}, #rev:{:>9}, #out:{:>9}",
            num_propagation, num_revision, num_collapse,
        );
        println!(
            "       Search|#dcn:{:>9}, #bjp:{:>9}, #end:{:>9}",
            num_decision, num_backjump, num_endgame,
        );
        if let Some(mes) = mes {
            println!("     Strategy|mode: {}", mes);
        }
    }
}

impl State {
    fn target_name(&self) -> String {
        if self.target.pathname.is_empty() {
            "--".to_string()
        } else {
            Path::new(&self.target.pathname)
                .file_name()
                .map_or_else(|| "--".to_string(), |f| f.to_string_lossy().into_owned())
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:<36}|time:{:>10.2}", self.target_name(), self.elapsed())
    }
}
