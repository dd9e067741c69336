use crate::*;

// Simple brute-force implementation for use as a test oracle
#[cfg(test)]
pub(crate) fn solve_brute_force(f: &Formula) -> SatResult {
    let num_variables = f.num_variables();
    assert!(num_variables <= 15); // just for safety

    // variable x is bit x - 1
    fn assignment_for(assignment: u32, x: usize) -> bool {
        assignment & (1 << (x - 1)) != 0
    }

    'search: for assignment in 0..2u32.pow(num_variables as u32) {
        'clauses: for clause in f.clauses() {
            for literal in clause.literals() {
                if assignment_for(assignment, literal.idx()) == literal.is_positive() {
                    // this clause is satisfied, let's go to the next one
                    continue 'clauses;
                }
            }
            // if we got here, this clause was not satisfied, so this assignment is bogus
            continue 'search;
        }
        // if we got here, every clause was satisfied, so we're done and satisfiable
        let model: Vec<Literal> = (1..=num_variables)
            .map(|x| {
                if assignment_for(assignment, x) {
                    Literal::Positive(Variable(x))
                } else {
                    Literal::Negative(Variable(x))
                }
            })
            .collect();
        return SatResult::Satisfiable(Model::complete(&model, num_variables));
    }
    // no assignment is valid
    SatResult::Unsatisfiable
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::cnf;

    #[test]
    fn solve_bcp_sat() {
        let f = cnf(&[&[1, 2], &[-1]]);
        assert!(solve_brute_force(&f).is_satisfiable());
    }

    #[test]
    fn solve_bcp_unsat() {
        let f = cnf(&[&[1, 2], &[-1], &[-2]]);
        assert_eq!(solve_brute_force(&f), SatResult::Unsatisfiable);
    }

    #[test]
    fn solve_conflict_sat() {
        let f = cnf(&[&[1, 2, 3], &[-1, -2, 3], &[-2, -3]]);
        match solve_brute_force(&f) {
            SatResult::Satisfiable(model) => assert!(model.satisfies(&f)),
            SatResult::Unsatisfiable => panic!("formula is satisfiable"),
        }
    }

    #[test]
    fn solve_all_sign_combinations_unsat() {
        let f = cnf(&[&[1, 2], &[-1, 2], &[1, -2], &[-1, -2]]);
        assert_eq!(solve_brute_force(&f), SatResult::Unsatisfiable);
    }
}
