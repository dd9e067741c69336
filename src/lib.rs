pub mod formula;
pub mod heuristic;
pub mod model;
pub mod output;
pub mod propagate;
mod solver;

#[cfg(test)]
mod brute_force;

#[derive(PartialEq, Clone, Debug)]
pub enum SatResult {
    Satisfiable(Model),
    Unsatisfiable,
}

impl SatResult {
    pub fn is_satisfiable(&self) -> bool {
        matches!(self, SatResult::Satisfiable(_))
    }

    pub fn model(&self) -> Option<&Model> {
        match self {
            SatResult::Satisfiable(model) => Some(model),
            SatResult::Unsatisfiable => None,
        }
    }
}

pub use formula::{Clause, Formula, Literal, Variable};
pub use heuristic::{BranchingHeuristic, HeuristicKind, TwoSided, WeightedLength};
pub use model::Model;
pub use solver::{Solver, Stats};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::{cnf, formula_3sat_strategy};
    use brute_force::solve_brute_force;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_3sat(rng: &mut StdRng, num_variables: usize, num_clauses: usize) -> Formula {
        Formula::new(
            num_variables,
            (0..num_clauses).map(|_| {
                Clause::new((0..3).map(|_| {
                    let var = Variable(rng.gen_range(1, num_variables + 1));
                    if rng.gen::<bool>() {
                        Literal::Positive(var)
                    } else {
                        Literal::Negative(var)
                    }
                }))
            }),
        )
    }

    #[test]
    fn random_instances_deterministic_and_sound() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..20 {
            let f = random_3sat(&mut rng, 30, 120);
            for kind in &[HeuristicKind::WeightedLength, HeuristicKind::TwoSided] {
                let first = Solver::with_boxed_heuristic(f.clone(), kind.build(None)).solve();
                let second = Solver::with_boxed_heuristic(f.clone(), kind.build(None)).solve();
                assert_eq!(first, second);
                if let Some(model) = first.model() {
                    assert!(model.satisfies(&f));
                    assert_eq!(model.literals().count(), 30);
                }
            }
        }
    }

    #[test]
    fn heuristics_agree_on_satisfiability() {
        let f = cnf(&[
            &[1, 2, 3],
            &[-1, -2],
            &[-2, -3],
            &[-1, -3],
            &[1, -4],
            &[2, 4, 5],
            &[-5, 3],
        ]);
        let weighted = Solver::with_heuristic(f.clone(), WeightedLength::new(2)).solve();
        let two_sided = Solver::with_heuristic(f.clone(), TwoSided::default()).solve();
        assert_eq!(weighted.is_satisfiable(), two_sided.is_satisfiable());
        assert_eq!(weighted.is_satisfiable(), solve_brute_force(&f).is_satisfiable());
    }

    proptest! {
        #[test]
        fn proptest_solve(f in formula_3sat_strategy()) {
            let brute_force = solve_brute_force(&f);
            let solver = Solver::new(f.clone()).solve();
            log::trace!("result = {:?}", solver);
            prop_assert_eq!(solver.is_satisfiable(), brute_force.is_satisfiable());
            if let Some(model) = solver.model() {
                prop_assert!(model.satisfies(&f));
            }
        }

        #[test]
        fn proptest_solve_two_sided(f in formula_3sat_strategy()) {
            let brute_force = solve_brute_force(&f);
            let solver = Solver::with_heuristic(f.clone(), TwoSided::default()).solve();
            prop_assert_eq!(solver.is_satisfiable(), brute_force.is_satisfiable());
            if let Some(model) = solver.model() {
                prop_assert!(model.satisfies(&f));
            }
        }
    }
}
