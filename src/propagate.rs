use crate::formula::{Formula, Literal};
use log::trace;
use std::rc::Rc;

/// Simplification produced a clause with no literals left.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Conflict;

#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Propagation {
    /// Some clause cannot be satisfied under the forced literals.
    Conflict,
    /// Every clause is satisfied.
    Solved,
    /// Clauses remain, none of them unit.
    Reduced(Formula),
}

#[derive(Debug)]
pub struct Propagated {
    pub outcome: Propagation,
    /// Literals forced by unit clauses, in the order they were applied.
    pub forced: Vec<Literal>,
}

/// Assigns `literal` true in `formula`: clauses containing it are dropped, and its negation is
/// removed from the clauses that contain that. Untouched clauses are shared with `formula`.
pub fn simplify(formula: &Formula, literal: &Literal) -> Result<Formula, Conflict> {
    let negated = literal.negated();
    let mut clauses = Vec::with_capacity(formula.num_clauses());
    for clause in formula.shared_clauses() {
        if clause.contains(literal) {
            continue;
        }
        if clause.contains(&negated) {
            let shortened = clause.without(&negated);
            if shortened.is_empty() {
                return Err(Conflict);
            }
            clauses.push(Rc::new(shortened));
        } else {
            clauses.push(Rc::clone(clause));
        }
    }
    Ok(Formula::from_shared(formula.num_variables(), clauses))
}

/// Runs unit propagation until no unit clause is left, always applying the first unit clause in
/// clause order.
pub fn propagate_to_fixpoint(formula: Formula) -> Propagated {
    let mut forced = vec![];

    if formula.clauses().any(|clause| clause.is_empty()) {
        return Propagated {
            outcome: Propagation::Conflict,
            forced,
        };
    }

    let mut formula = formula;
    loop {
        if formula.is_empty() {
            return Propagated {
                outcome: Propagation::Solved,
                forced,
            };
        }

        let unit = formula.clauses().find_map(|clause| clause.unit_literal()).copied();
        let unit = match unit {
            Some(literal) => literal,
            None => {
                return Propagated {
                    outcome: Propagation::Reduced(formula),
                    forced,
                }
            }
        };

        trace!("forced {}", unit);
        forced.push(unit);
        formula = match simplify(&formula, &unit) {
            Ok(simplified) => simplified,
            Err(Conflict) => {
                trace!("conflict after forcing {}", unit);
                return Propagated {
                    outcome: Propagation::Conflict,
                    forced,
                };
            }
        };
    }
}
