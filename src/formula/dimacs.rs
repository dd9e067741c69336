use crate::formula::{Clause, Formula, Literal};
use std::fmt;
use std::io::{BufRead, BufReader, Read};

/// A successfully read DIMACS problem.
#[derive(Debug)]
pub enum Instance {
    Cnf(Formula),
    /// The input contains a clause with no literals, so it is unsatisfiable without any search.
    EmptyClause { num_variables: usize },
}

pub fn parse<R: Read>(reader: R) -> Result<Instance, DimacsParseError> {
    let reader = BufReader::new(reader);

    let mut clauses = vec![];
    let mut header: Option<(usize, usize)> = None;
    let mut clause = vec![];
    let mut saw_empty_clause = false;

    'lines: for line in reader.lines() {
        let line = line?;
        let mut line = line.split_whitespace().peekable();

        match line.peek() {
            None => continue,
            Some(x) if x.starts_with('c') => continue,
            Some(x) if x.starts_with('%') => break,
            Some(&"p") => {
                let _ = line.next();

                if header.is_some() {
                    return Err(DimacsParseError::Format("duplicate 'p' line".into()));
                }
                if line.next() != Some("cnf") {
                    return Err(DimacsParseError::Format("missing 'cnf'".into()));
                }

                // literals are read as isize, and per-variable tables need one slot beyond the count
                let num_variables = line
                    .next()
                    .and_then(|c| c.parse::<usize>().ok())
                    .filter(|n| *n <= isize::MAX as usize)
                    .ok_or_else(|| DimacsParseError::Format("invalid num_variables".into()))?;

                let num_clauses = line
                    .next()
                    .and_then(|c| c.parse::<usize>().ok())
                    .ok_or_else(|| DimacsParseError::Format("invalid num_clauses".into()))?;

                header = Some((num_variables, num_clauses));
            }
            Some(_) => {
                let (num_variables, num_clauses) = header
                    .ok_or_else(|| DimacsParseError::Format("missing 'p' line before clauses".into()))?;

                for x in line {
                    match parse_literal(x, num_variables)? {
                        Some(l) => {
                            if !clause.contains(&l) {
                                clause.push(l);
                            }
                        }
                        None => {
                            if clause.is_empty() {
                                saw_empty_clause = true;
                            }
                            clauses.push(Clause::new(clause.drain(..)));
                            if clauses.len() >= num_clauses {
                                break 'lines;
                            }
                        }
                    }
                }
            }
        }
    }

    let (num_variables, _) = header.ok_or_else(|| DimacsParseError::Format("missing 'p' line".into()))?;

    // tolerate a final clause that is missing its terminating 0
    if !clause.is_empty() {
        clauses.push(Clause::new(clause));
    }

    if saw_empty_clause {
        return Ok(Instance::EmptyClause { num_variables });
    }

    Ok(Instance::Cnf(Formula::new(num_variables, clauses)))
}

fn parse_literal(s: &str, num_variables: usize) -> Result<Option<Literal>, DimacsParseError> {
    let l = s
        .parse::<isize>()
        .map_err(|_| DimacsParseError::Format(format!("invalid literal '{}'", s)))?;
    let literal = Literal::from_dimacs(l);
    if let Some(literal) = &literal {
        if literal.idx() > num_variables {
            return Err(DimacsParseError::Format(format!(
                "literal {} exceeds the declared {} variables",
                literal, num_variables
            )));
        }
    }
    Ok(literal)
}

#[derive(Debug)]
pub enum DimacsParseError {
    Io(std::io::Error),
    Format(String),
}

impl From<std::io::Error> for DimacsParseError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl fmt::Display for DimacsParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DimacsParseError::Io(e) => write!(f, "I/O error: {}", e),
            DimacsParseError::Format(msg) => write!(f, "malformed DIMACS: {}", msg),
        }
    }
}

impl std::error::Error for DimacsParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DimacsParseError::Io(e) => Some(e),
            DimacsParseError::Format(_) => None,
        }
    }
}
