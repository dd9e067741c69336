use crate::formula::{Formula, Variable};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[cfg(test)]
use mockall::automock;

/// Chooses the next decision variable. Polarity is not the heuristic's concern: the solver always
/// tries the positive literal first.
#[cfg_attr(test, automock)]
pub trait BranchingHeuristic {
    /// Picks a variable occurring in `formula`, which the solver guarantees is non-empty and free
    /// of unit clauses. Returns `None` only if no clause has a literal.
    fn pick_variable(&self, formula: &Formula) -> Option<Variable>;

    fn name(&self) -> &'static str;
}

thread_local! {
    // weight^-len, keyed by (weight, len). Pure, so entries are never invalidated.
    static LENGTH_WEIGHTS: RefCell<HashMap<(u32, usize), f64>> = RefCell::new(HashMap::new());
}

fn length_weight(weight: u32, len: usize) -> f64 {
    LENGTH_WEIGHTS.with(|cache| {
        *cache
            .borrow_mut()
            .entry((weight, len))
            .or_insert_with(|| f64::from(weight).powi(-(len as i32)))
    })
}

/// Returns the variable with the highest score, preferring the earliest in `order` on ties.
fn first_max(order: &[Variable], score: impl Fn(Variable) -> f64) -> Option<Variable> {
    let mut best: Option<(Variable, f64)> = None;
    for &v in order {
        let s = score(v);
        match best {
            Some((_, best_score)) if s <= best_score => {}
            _ => best = Some((v, s)),
        }
    }
    best.map(|(v, _)| v)
}

/// Per-variable tallies over a formula, remembering the order in which variables were first seen.
struct Tally<T> {
    seen: Vec<bool>,
    order: Vec<Variable>,
    values: Vec<T>,
}

impl<T: Default + Clone> Tally<T> {
    fn new(num_variables: usize) -> Self {
        Self {
            seen: vec![false; num_variables + 1],
            order: vec![],
            values: vec![T::default(); num_variables + 1],
        }
    }

    fn entry(&mut self, v: Variable) -> &mut T {
        if !self.seen[v.0] {
            self.seen[v.0] = true;
            self.order.push(v);
        }
        &mut self.values[v.0]
    }
}

/// Jeroslow-Wang style scoring: every occurrence of a variable in a clause of length `len` adds
/// `weight^-len` to that variable's score, so short clauses dominate.
#[derive(Clone, Copy, Debug)]
pub struct WeightedLength {
    weight: u32,
}

impl WeightedLength {
    pub const DEFAULT_WEIGHT: u32 = 3;

    pub fn new(weight: u32) -> Self {
        assert!(weight >= 2, "weight must be at least 2");
        Self { weight }
    }
}

impl Default for WeightedLength {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WEIGHT)
    }
}

impl BranchingHeuristic for WeightedLength {
    fn pick_variable(&self, formula: &Formula) -> Option<Variable> {
        let mut scores = Tally::<f64>::new(formula.num_variables());
        for clause in formula.clauses() {
            let w = length_weight(self.weight, clause.len());
            for literal in clause.literals() {
                *scores.entry(*literal.variable()) += w;
            }
        }
        first_max(&scores.order, |v| scores.values[v.0])
    }

    fn name(&self) -> &'static str {
        "weighted-length"
    }
}

#[derive(Clone, Copy, Default, Debug)]
struct Polarities {
    positive_weight: f64,
    positive_occurrences: u32,
    negative_weight: f64,
    negative_occurrences: u32,
}

/// Two-sided scoring: weighted sums and occurrence counts are kept per polarity and combined so
/// that variables occurring often in both polarities win by a wide margin.
#[derive(Clone, Copy, Debug)]
pub struct TwoSided {
    weight: u32,
    balance: f64,
}

impl TwoSided {
    pub const DEFAULT_WEIGHT: u32 = 2;
    pub const DEFAULT_BALANCE: f64 = 1024.0;

    pub fn new(weight: u32, balance: f64) -> Self {
        assert!(weight >= 2, "weight must be at least 2");
        Self { weight, balance }
    }

    fn score(&self, p: &Polarities) -> f64 {
        let positive = f64::from(p.positive_occurrences) * p.positive_weight;
        let negative = f64::from(p.negative_occurrences) * p.negative_weight;
        positive * negative * self.balance + positive + negative
    }
}

impl Default for TwoSided {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WEIGHT, Self::DEFAULT_BALANCE)
    }
}

impl BranchingHeuristic for TwoSided {
    fn pick_variable(&self, formula: &Formula) -> Option<Variable> {
        let mut tally = Tally::<Polarities>::new(formula.num_variables());
        for clause in formula.clauses() {
            let w = length_weight(self.weight, clause.len());
            for literal in clause.literals() {
                let p = tally.entry(*literal.variable());
                if literal.is_positive() {
                    p.positive_weight += w;
                    p.positive_occurrences += 1;
                } else {
                    p.negative_weight += w;
                    p.negative_occurrences += 1;
                }
            }
        }
        first_max(&tally.order, |v| self.score(&tally.values[v.0]))
    }

    fn name(&self) -> &'static str {
        "two-sided"
    }
}

/// The heuristics selectable from the command line.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HeuristicKind {
    WeightedLength,
    TwoSided,
}

impl HeuristicKind {
    pub const NAMES: &'static [&'static str] = &["weighted", "jw", "two-sided", "satz"];

    /// Builds the heuristic, overriding its default weight if `weight` is given.
    pub fn build(self, weight: Option<u32>) -> Box<dyn BranchingHeuristic> {
        match self {
            HeuristicKind::WeightedLength => {
                Box::new(WeightedLength::new(weight.unwrap_or(WeightedLength::DEFAULT_WEIGHT)))
            }
            HeuristicKind::TwoSided => Box::new(TwoSided::new(
                weight.unwrap_or(TwoSided::DEFAULT_WEIGHT),
                TwoSided::DEFAULT_BALANCE,
            )),
        }
    }
}

impl Default for HeuristicKind {
    fn default() -> Self {
        HeuristicKind::WeightedLength
    }
}

impl FromStr for HeuristicKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weighted" | "jw" => Ok(HeuristicKind::WeightedLength),
            "two-sided" | "satz" => Ok(HeuristicKind::TwoSided),
            _ => Err(format!("unknown heuristic '{}'", s)),
        }
    }
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HeuristicKind::WeightedLength => f.write_str("weighted"),
            HeuristicKind::TwoSided => f.write_str("two-sided"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::cnf;

    #[test]
    fn length_weight_values() {
        assert_eq!(length_weight(2, 1), 0.5);
        assert_eq!(length_weight(2, 3), 0.125);
        assert!((length_weight(3, 2) - 1.0 / 9.0).abs() < 1e-12);

        // repeated lookups reuse the cached entry
        let cached = LENGTH_WEIGHTS.with(|cache| cache.borrow().len());
        assert_eq!(length_weight(2, 3), 0.125);
        assert_eq!(LENGTH_WEIGHTS.with(|cache| cache.borrow().len()), cached);
        assert_eq!(length_weight(2, 4), 0.0625);
        assert_eq!(LENGTH_WEIGHTS.with(|cache| cache.borrow().len()), cached + 1);
    }

    #[test]
    fn weighted_prefers_short_clauses() {
        // 3 occurs in two binary clauses; 1 occurs in three ternary clauses
        let f = cnf(&[&[1, 2, 4], &[1, -2, 5], &[-1, 4, 5], &[3, 6], &[-3, 7]]);
        let h = WeightedLength::new(2);
        // 3: 2 * 1/4 = 0.5; 1: 3 * 1/8 = 0.375
        assert_eq!(h.pick_variable(&f), Some(Variable(3)));
    }

    #[test]
    fn weighted_ties_go_to_first_seen() {
        let f = cnf(&[&[2, 1], &[-1, -2]]);
        assert_eq!(WeightedLength::default().pick_variable(&f), Some(Variable(2)));

        let f = cnf(&[&[1, 2], &[-1, -2]]);
        assert_eq!(WeightedLength::default().pick_variable(&f), Some(Variable(1)));
    }

    #[test]
    fn weighted_counts_duplicates() {
        let f = cnf(&[&[1, 1, 2], &[2, 3, 4]]);
        // 1: 2/27, 2: 2/27, tie goes to 1 which is seen first
        assert_eq!(WeightedLength::default().pick_variable(&f), Some(Variable(1)));
        let f = cnf(&[&[1, 2, 2], &[2, 3, 4]]);
        assert_eq!(WeightedLength::default().pick_variable(&f), Some(Variable(2)));
    }

    #[test]
    fn two_sided_prefers_balanced() {
        // 1 occurs three times positively only; 2 once in each polarity
        let f = cnf(&[&[1, 3], &[1, 4], &[1, 5], &[2, 6], &[-2, 7]]);
        let h = TwoSided::default();
        // 1: 3 * 0.75 = 2.25; 2: 0.25 * 0.25 * 1024 + 0.5 = 64.5
        assert_eq!(h.pick_variable(&f), Some(Variable(2)));
        // without the balance factor the one-sided variable wins
        assert_eq!(TwoSided::new(2, 0.0).pick_variable(&f), Some(Variable(1)));
    }

    #[test]
    fn two_sided_ties_go_to_first_seen() {
        let f = cnf(&[&[3, 1], &[-3, -1]]);
        assert_eq!(TwoSided::default().pick_variable(&f), Some(Variable(3)));
    }

    #[test]
    fn empty_formula_has_no_variable() {
        let f = cnf(&[]);
        assert_eq!(WeightedLength::default().pick_variable(&f), None);
        assert_eq!(TwoSided::default().pick_variable(&f), None);
    }

    #[test]
    fn heuristic_kind_parsing() {
        assert_eq!("jw".parse::<HeuristicKind>(), Ok(HeuristicKind::WeightedLength));
        assert_eq!("weighted".parse::<HeuristicKind>(), Ok(HeuristicKind::WeightedLength));
        assert_eq!("two-sided".parse::<HeuristicKind>(), Ok(HeuristicKind::TwoSided));
        assert_eq!("satz".parse::<HeuristicKind>(), Ok(HeuristicKind::TwoSided));
        assert!("vsids".parse::<HeuristicKind>().is_err());
        for name in HeuristicKind::NAMES {
            assert!(name.parse::<HeuristicKind>().is_ok());
        }
    }

    #[test]
    fn heuristic_kind_builds() {
        assert_eq!(HeuristicKind::WeightedLength.build(None).name(), "weighted-length");
        assert_eq!(HeuristicKind::TwoSided.build(Some(3)).name(), "two-sided");
    }
}
