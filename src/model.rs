use crate::formula::{Formula, Literal, Variable};
use std::fmt::{self, Display, Formatter};

/// A total assignment to the variables `1..=n`, one literal per variable in ascending order.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Model {
    literals: Vec<Literal>,
}

impl Model {
    /// Extends the partial assignment found by the search to every declared variable. Variables
    /// the search never fixed are don't-cares and are set true.
    pub fn complete(partial: &[Literal], num_variables: usize) -> Self {
        let mut values = vec![None; num_variables + 1];
        for literal in partial {
            assert!(literal.idx() >= 1 && literal.idx() <= num_variables);
            let value = &mut values[literal.idx()];
            assert!(
                value.is_none() || *value == Some(literal.is_positive()),
                "variable {} assigned both ways",
                literal.idx()
            );
            *value = Some(literal.is_positive());
        }

        let literals = (1..=num_variables)
            .map(|x| match values[x] {
                Some(false) => Literal::Negative(Variable(x)),
                Some(true) | None => Literal::Positive(Variable(x)),
            })
            .collect();
        Self { literals }
    }

    pub fn literals(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    pub fn value(&self, variable: Variable) -> Option<bool> {
        variable
            .0
            .checked_sub(1)
            .and_then(|i| self.literals.get(i))
            .map(|l| l.is_positive())
    }

    /// Whether every clause of `formula` has a literal made true by this model.
    pub fn satisfies(&self, formula: &Formula) -> bool {
        formula.clauses().all(|clause| {
            clause
                .literals()
                .any(|l| self.value(*l.variable()) == Some(l.is_positive()))
        })
    }
}

impl Display for Model {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let mut first = true;
        for literal in &self.literals {
            if first {
                first = false;
            } else {
                f.write_str(" ")?;
            }
            write!(f, "{}", literal)?;
        }
        Ok(())
    }
}
