pub mod dimacs;

use std::fmt::{self, Debug, Display, Formatter};
use std::rc::Rc;

#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, Debug)]
pub struct Variable(pub usize);

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Literal {
    Positive(Variable),
    Negative(Variable),
}

impl Literal {
    /// Converts a signed DIMACS integer into a literal. Zero is the clause terminator, not a
    /// literal, so it maps to `None`.
    pub fn from_dimacs(l: isize) -> Option<Self> {
        if l > 0 {
            Some(Literal::Positive(Variable(l as usize)))
        } else if l < 0 {
            Some(Literal::Negative(Variable(l.unsigned_abs())))
        } else {
            None
        }
    }

    pub fn variable(&self) -> &Variable {
        match self {
            Literal::Positive(v) => v,
            Literal::Negative(v) => v,
        }
    }

    pub fn is_positive(&self) -> bool {
        match self {
            Literal::Positive(_) => true,
            Literal::Negative(_) => false,
        }
    }

    pub fn idx(&self) -> usize {
        self.variable().0
    }

    pub fn negated(&self) -> Self {
        match self {
            Literal::Positive(v) => Literal::Negative(*v),
            Literal::Negative(v) => Literal::Positive(*v),
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Literal::Positive(Variable(x)) => write!(f, "{}", x),
            Literal::Negative(Variable(x)) => write!(f, "-{}", x),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    pub fn new(disjuncts: impl IntoIterator<Item = Literal>) -> Self {
        Self {
            literals: disjuncts.into_iter().collect(),
        }
    }

    pub fn literals(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }

    /// The sole literal of a unit clause.
    pub fn unit_literal(&self) -> Option<&Literal> {
        if self.is_unit() {
            self.literals.first()
        } else {
            None
        }
    }

    pub fn contains(&self, literal: &Literal) -> bool {
        self.literals.contains(literal)
    }

    /// A copy of this clause with every occurrence of `literal` removed.
    pub(crate) fn without(&self, literal: &Literal) -> Self {
        Self {
            literals: self.literals.iter().filter(|l| *l != literal).copied().collect(),
        }
    }
}

/// A CNF formula over the variables `1..=num_variables`.
///
/// Clauses are reference counted so that a simplified formula can share every clause it did not
/// touch with the formula it was derived from. Nothing mutates a clause once it has been placed in a
/// formula, which keeps sibling search branches isolated from each other.
#[derive(Clone, PartialEq, Eq)]
pub struct Formula {
    num_variables: usize,
    clauses: Vec<Rc<Clause>>,
}

impl Formula {
    pub fn new(num_variables: usize, conjuncts: impl IntoIterator<Item = Clause>) -> Self {
        let clauses: Vec<_> = conjuncts.into_iter().map(Rc::new).collect();
        for clause in &clauses {
            for literal in clause.literals() {
                assert!(
                    literal.idx() >= 1 && literal.idx() <= num_variables,
                    "literal {} out of range for {} variables",
                    literal,
                    num_variables
                );
            }
        }
        Self { num_variables, clauses }
    }

    /// Builds a formula from already-shared clauses; used by simplification.
    pub(crate) fn from_shared(num_variables: usize, clauses: Vec<Rc<Clause>>) -> Self {
        Self { num_variables, clauses }
    }

    /// The declared number of variables, including ones that occur in no clause.
    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter().map(|clause| clause.as_ref())
    }

    pub(crate) fn shared_clauses(&self) -> impl Iterator<Item = &Rc<Clause>> {
        self.clauses.iter()
    }
}

impl Debug for Formula {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        let mut first_clause = true;
        for clause in &self.clauses {
            if first_clause {
                first_clause = false;
            } else {
                f.write_str(" & ")?;
            }
            if clause.len() > 1 {
                f.write_str("(")?;
            }
            let mut first_literal = true;
            for literal in clause.literals() {
                if first_literal {
                    first_literal = false;
                } else {
                    f.write_str(" | ")?;
                }
                write!(f, "{}", literal)?;
            }
            if clause.len() > 1 {
                f.write_str(")")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn p(x: usize) -> Literal {
    Literal::Positive(Variable(x))
}

#[cfg(test)]
pub(crate) fn n(x: usize) -> Literal {
    Literal::Negative(Variable(x))
}

/// Builds a formula from DIMACS-style signed integers, declaring just enough variables.
#[cfg(test)]
pub(crate) fn cnf(clauses: &[&[isize]]) -> Formula {
    let num_variables = clauses
        .iter()
        .flat_map(|clause| clause.iter())
        .map(|l| l.unsigned_abs())
        .max()
        .unwrap_or(0);
    cnf_with(num_variables, clauses)
}

#[cfg(test)]
pub(crate) fn cnf_with(num_variables: usize, clauses: &[&[isize]]) -> Formula {
    Formula::new(
        num_variables,
        clauses
            .iter()
            .map(|clause| Clause::new(clause.iter().map(|l| Literal::from_dimacs(*l).unwrap()))),
    )
}

/// Random 3-SAT-shaped formulas (clauses of one to three literals) over at most eight variables,
/// small enough for the brute-force oracle.
#[cfg(test)]
pub(crate) fn formula_3sat_strategy() -> impl proptest::strategy::Strategy<Value = Formula> {
    use proptest::prelude::*;

    (1usize..=8).prop_flat_map(|num_variables| {
        let literal = (1..=num_variables, any::<bool>()).prop_map(|(v, positive)| if positive { p(v) } else { n(v) });
        let clause = prop::collection::vec(literal, 1..=3).prop_map(|literals| Clause::new(literals));
        prop::collection::vec(clause, 0..24).prop_map(move |clauses| Formula::new(num_variables, clauses))
    })
}
