use crate::SatResult;
use std::io::{self, Write};

/// Writes the result in SAT competition form: an `s` status line, then for satisfiable instances a
/// `v` line listing every variable's literal, terminated by `0`.
pub fn write_result<W: Write>(mut out: W, result: &SatResult) -> io::Result<()> {
    match result {
        SatResult::Satisfiable(model) => {
            writeln!(out, "s SATISFIABLE")?;
            write!(out, "v ")?;
            for literal in model.literals() {
                write!(out, "{} ", literal)?;
            }
            writeln!(out, "0")
        }
        SatResult::Unsatisfiable => writeln!(out, "s UNSATISFIABLE"),
    }
}
