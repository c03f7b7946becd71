//! The narrow interface to the external 0/1 constraint solver.
//!
//! A query is phrased as a `ZeroOneModel`: binary decision columns, linear row
//! constraints with lower/upper bounds, and an optional linear objective. A
//! backend implementing `ZeroOneSolver` answers with a `SolveOutcome`. Only
//! `Optimal` and `Infeasible` are verdicts; every other terminal status of the
//! engine (time limit, numerical failure) is carried through as `Other` so that
//! callers can surface it instead of mistaking it for a proven negative.
//!
//! The default backend wraps the HiGHS engine. Swapping in a different engine
//! only requires another `ZeroOneSolver` implementation; the formulations and
//! the search layers do not change.

use fxhash::FxHashMap;
use log::debug;

/// Direction of the objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Minimize,
    Maximize,
}

#[derive(Debug, Clone)]
struct Row {
    lower: f64,
    upper: f64,
    terms: Vec<(usize, f64)>,
}

/// A 0/1 integer program. Without an objective the model is a pure
/// feasibility instance.
#[derive(Debug, Clone)]
pub struct ZeroOneModel {
    objective: Vec<f64>,
    sense: Sense,
    rows: Vec<Row>,
}

impl ZeroOneModel {

    pub fn new() -> Self {
        ZeroOneModel {
            objective: Vec::new(),
            sense: Sense::Minimize,
            rows: Vec::new(),
        }
    }

    /// Adds a binary decision variable with objective factor 0 and returns its id.
    pub fn binary(&mut self) -> usize {
        self.objective.push(0.0);
        self.objective.len() - 1
    }

    /// Returns the number of variables of `self`.
    pub fn num_vars(&self) -> usize {
        self.objective.len()
    }

    /// Returns the number of row constraints of `self`.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Sets the objective factors of the given variables and the direction.
    /// Variables not mentioned keep factor 0.
    pub fn set_objective(&mut self, sense: Sense, terms: &[(usize, f64)]) {
        self.sense = sense;
        for &(var, factor) in terms {
            self.objective[var] = factor;
        }
    }

    /// Adds the row constraint `lower <= sum(factor * var) <= upper`.
    /// Factors of a variable mentioned more than once are summed; a row may
    /// not hand the engine the same column twice.
    pub fn constrain(&mut self, lower: f64, upper: f64, terms: Vec<(usize, f64)>) {
        let mut merged: FxHashMap<usize, f64> = FxHashMap::default();
        for (var, factor) in terms {
            *merged.entry(var).or_insert(0.0) += factor;
        }
        let terms: Vec<(usize, f64)> = merged.into_iter()
            .filter(|(_, factor)| *factor != 0.0)
            .collect();
        self.rows.push(Row {
            lower,
            upper,
            terms,
        });
    }

    /// Constrains the given variables to sum to exactly one.
    pub fn exactly_one<I: IntoIterator<Item=usize>>(&mut self, vars: I) {
        let terms = vars.into_iter().map(|var| (var, 1.0)).collect();
        self.constrain(1.0, 1.0, terms);
    }

    /// Constrains the given variables to sum to at most one.
    pub fn at_most_one<I: IntoIterator<Item=usize>>(&mut self, vars: I) {
        let terms = vars.into_iter().map(|var| (var, 1.0)).collect();
        self.constrain(0.0, 1.0, terms);
    }

}

impl Default for ZeroOneModel {
    fn default() -> Self {
        Self::new()
    }
}

/// The variable values of a solved model.
#[derive(Debug, Clone)]
pub struct Assignment {
    values: Vec<f64>,
}

impl Assignment {

    /// Checks if the binary variable `var` was set in the solution. The engine
    /// reports floats, so everything above one half counts as set.
    pub fn is_one(&self, var: usize) -> bool {
        self.values[var] > 0.5
    }

    /// Returns the number of set variables among `vars`.
    pub fn count_ones<I: IntoIterator<Item=usize>>(&self, vars: I) -> usize {
        vars.into_iter().filter(|var| self.is_one(*var)).count()
    }

}

/// Terminal answer of the external solver.
#[derive(Debug, Clone)]
pub enum SolveOutcome {
    /// Proven optimal, respectively feasible for pure feasibility models.
    Optimal(Assignment),
    /// Proven that no assignment satisfies the constraints.
    Infeasible,
    /// Any other terminal status. The engine gave up without a verdict.
    Other(String),
}

/// Backend abstraction over the external solver.
pub trait ZeroOneSolver {
    fn solve(&self, model: &ZeroOneModel) -> SolveOutcome;
}

/// Adapter for the HiGHS engine.
#[derive(Debug, Clone, Default)]
pub struct HighsSolver {
    /// Wall clock limit per query in seconds. A query that runs into the limit
    /// is reported as `SolveOutcome::Other`, not as infeasible.
    pub time_limit: Option<f64>,
}

impl ZeroOneSolver for HighsSolver {

    fn solve(&self, model: &ZeroOneModel) -> SolveOutcome {
        let mut problem = highs::RowProblem::default();
        let cols: Vec<highs::Col> = model.objective
            .iter()
            .map(|&factor| problem.add_integer_column(factor, 0..=1))
            .collect();
        for row in &model.rows {
            problem.add_row(
                row.lower..=row.upper,
                row.terms.iter().map(|&(var, factor)| (cols[var], factor)),
            );
        }
        debug!("submitting model with {} columns and {} rows", model.num_vars(), model.num_rows());
        let mut prepared = problem.optimise(match model.sense {
            Sense::Minimize => highs::Sense::Minimise,
            Sense::Maximize => highs::Sense::Maximise,
        });
        prepared.set_option("output_flag", false);
        if let Some(limit) = self.time_limit {
            prepared.set_option("time_limit", limit);
        }
        let solved = prepared.solve();
        match solved.status() {
            highs::HighsModelStatus::Optimal => {
                let values = solved.get_solution().columns().to_vec();
                SolveOutcome::Optimal(Assignment { values })
            },
            highs::HighsModelStatus::Infeasible => SolveOutcome::Infeasible,
            other => SolveOutcome::Other(format!("{:?}", other)),
        }
    }

}
