use crate::formula::{Formula, Literal};
use crate::heuristic::{BranchingHeuristic, WeightedLength};
use crate::model::Model;
use crate::propagate::{propagate_to_fixpoint, simplify, Conflict, Propagation};
use crate::SatResult;
use log::{debug, info, trace};

#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct Stats {
    pub decisions: usize,
    /// Literals forced by unit propagation.
    pub propagations: usize,
    pub conflicts: usize,
    /// Deepest nesting of decisions reached.
    pub max_depth: usize,
}

/// The negative half of a decision, explored only if the positive half fails.
#[derive(Debug)]
struct PendingBranch {
    // Reduced formula at the decision point, exactly as the positive branch first saw it
    formula: Formula,
    trail_len: usize,
    literal: Literal,
}

/// DPLL search: unit propagation to fixpoint, then branch on a variable picked by the heuristic,
/// positive polarity first, backtracking on conflict.
///
/// The recursion is unrolled onto an explicit stack of pending negative branches, so deep searches
/// don't exhaust the call stack. Nodes are explored in the same order as the recursive form.
pub struct Solver {
    formula: Formula,
    heuristic: Box<dyn BranchingHeuristic>,
    stats: Stats,
}

impl Solver {
    pub fn new(formula: Formula) -> Self {
        Self::with_heuristic(formula, WeightedLength::default())
    }

    pub fn with_heuristic(formula: Formula, heuristic: impl BranchingHeuristic + 'static) -> Self {
        Self::with_boxed_heuristic(formula, Box::new(heuristic))
    }

    pub fn with_boxed_heuristic(formula: Formula, heuristic: Box<dyn BranchingHeuristic>) -> Self {
        Self {
            formula,
            heuristic,
            stats: Stats::default(),
        }
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn solve(&mut self) -> SatResult {
        info!(
            "solving {} clauses over {} variables with {} heuristic",
            self.formula.num_clauses(),
            self.formula.num_variables(),
            self.heuristic.name()
        );
        self.stats = Stats::default();

        let result = match self.search() {
            Some(trail) => {
                let model = Model::complete(&trail, self.formula.num_variables());
                debug_assert!(model.satisfies(&self.formula), "model {} is not a witness", model);
                SatResult::Satisfiable(model)
            }
            None => SatResult::Unsatisfiable,
        };

        info!(
            "{}: {} decisions, {} propagations, {} conflicts, max depth {}",
            if result.is_satisfiable() { "sat" } else { "unsat" },
            self.stats.decisions,
            self.stats.propagations,
            self.stats.conflicts,
            self.stats.max_depth
        );
        result
    }

    /// Returns the literals fixed on the path to a satisfying node, in the order they were fixed.
    fn search(&mut self) -> Option<Vec<Literal>> {
        let mut trail = vec![];
        let mut pending: Vec<PendingBranch> = vec![];
        let mut node = Ok(self.formula.clone());

        loop {
            let outcome = match node {
                Ok(formula) => {
                    let propagated = propagate_to_fixpoint(formula);
                    self.stats.propagations += propagated.forced.len();
                    trail.extend(propagated.forced);
                    propagated.outcome
                }
                // entering the branch already emptied a clause
                Err(Conflict) => Propagation::Conflict,
            };

            match outcome {
                Propagation::Solved => return Some(trail),
                Propagation::Conflict => {
                    self.stats.conflicts += 1;
                    // nothing left to try at the root: unsatisfiable
                    let branch = pending.pop()?;
                    trace!(
                        "backtrack to depth {}, trying {}",
                        pending.len() + 1,
                        branch.literal
                    );
                    trail.truncate(branch.trail_len);
                    trail.push(branch.literal);
                    node = simplify(&branch.formula, &branch.literal);
                }
                Propagation::Reduced(formula) => {
                    let variable = self
                        .heuristic
                        .pick_variable(&formula)
                        .expect("reduced formula has a variable to branch on");
                    let positive = Literal::Positive(variable);
                    self.stats.decisions += 1;

                    node = simplify(&formula, &positive);
                    pending.push(PendingBranch {
                        formula,
                        trail_len: trail.len(),
                        literal: positive.negated(),
                    });
                    self.stats.max_depth = self.stats.max_depth.max(pending.len());
                    debug!("decide {} at depth {}", positive, pending.len());
                    trail.push(positive);
                }
            }
        }
    }
}
