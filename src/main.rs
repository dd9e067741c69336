use clap::{App, Arg};
use rustdpll::formula::dimacs::{parse, DimacsParseError, Instance};
use rustdpll::output::write_result;
use rustdpll::*;
use std::fs::File;

fn main() {
    env_logger::init();

    let matches = App::new("rustdpll")
        .about("DPLL SAT solver for DIMACS CNF formulas")
        .arg(Arg::with_name("INPUT").help("input file (in CNF)").index(1))
        .arg(
            Arg::with_name("heuristic")
                .long("heuristic")
                .short("H")
                .takes_value(true)
                .possible_values(HeuristicKind::NAMES)
                .default_value("weighted")
                .help("branching heuristic"),
        )
        .arg(
            Arg::with_name("weight")
                .long("weight")
                .short("w")
                .takes_value(true)
                .validator(|w| match w.parse::<u32>() {
                    Ok(w) if w >= 2 => Ok(()),
                    _ => Err(format!("weight must be an integer of at least 2, got '{}'", w)),
                })
                .help("base of the clause length weighting"),
        )
        .get_matches();

    // both values were checked by clap
    let heuristic: HeuristicKind = matches
        .value_of("heuristic")
        .and_then(|h| h.parse().ok())
        .unwrap_or_default();
    let weight = matches.value_of("weight").and_then(|w| w.parse().ok());

    let instance = if let Some(path) = matches.value_of("INPUT") {
        parse_from_file(path)
    } else {
        parse(std::io::stdin())
    };

    let result = match instance {
        Ok(Instance::Cnf(f)) => Solver::with_boxed_heuristic(f, heuristic.build(weight)).solve(),
        Ok(Instance::EmptyClause { num_variables }) => {
            log::info!("input over {} variables contains an empty clause", num_variables);
            SatResult::Unsatisfiable
        }
        Err(e) => {
            eprintln!("parse error: {}", e);
            std::process::exit(-1);
        }
    };

    let stdout = std::io::stdout();
    if let Err(e) = write_result(stdout.lock(), &result) {
        eprintln!("failed to write result: {}", e);
        std::process::exit(-1);
    }

    let exit_code = match result {
        SatResult::Satisfiable(_) => 0,
        SatResult::Unsatisfiable => 1,
    };
    std::process::exit(exit_code);
}

fn parse_from_file(path: &str) -> Result<Instance, DimacsParseError> {
    let file = File::open(path)?;
    parse(file)
}
