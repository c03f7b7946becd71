//! Search orchestration: pinning down the exact chromatic numbers with as few
//! oracle queries as possible. Every query here may be NP-hard for the
//! backend, so the call count is the cost that matters.

use log::debug;

use crate::cache::{CachedValue, Invariant};
use crate::cust_error::QueryError;
use crate::ilp::ZeroOneSolver;
use crate::query_instance::QueryInstance;

impl<S: ZeroOneSolver> QueryInstance<S> {

    /// The chromatic number: the least k admitting a proper node coloring.
    ///
    /// Colorability is monotonic in k, which licenses a binary search over
    /// the estimator bracket: a feasible midpoint is a new upper bound, an
    /// infeasible one pushes the lower bound past it. The bracket is explicit
    /// loop state, and the loop ends after O(log(ub - lb)) feasibility
    /// queries; a bracket that is already tight ends it with none.
    pub fn chromatic_number(&mut self) -> Result<usize, QueryError> {
        if let Some(chi) = self.cached_count(Invariant::ChromaticNumber) {
            return Ok(chi)
        }
        let chi = if self.graph.num_nodes() == 0 {
            0
        } else if self.graph.num_edges() == 0 {
            1
        } else {
            let (mut lower, mut upper) = self.chromatic_bounds()?;
            while lower < upper {
                let mid = (lower + upper) / 2;
                if self.vertex_coloring(mid)?.is_some() {
                    upper = mid;
                } else {
                    lower = mid + 1;
                }
                debug!("chromatic number bracket tightened to [{}, {}]", lower, upper);
            }
            lower
        };
        self.cache.save(Invariant::ChromaticNumber, CachedValue::Count(chi));
        Ok(chi)
    }

    /// The edge chromatic number: the least k admitting a proper edge
    /// coloring.
    ///
    /// By Vizing's theorem the answer is the maximum degree or one above it,
    /// so a single feasibility query at the maximum degree settles it either
    /// way; a failed query needs no counter check.
    pub fn edge_chromatic_number(&mut self) -> Result<usize, QueryError> {
        if let Some(chi) = self.cached_count(Invariant::EdgeChromaticNumber) {
            return Ok(chi)
        }
        let max_degree = self.graph.max_degree();
        let chi = if max_degree == 0 {
            0
        } else if self.edge_coloring(max_degree)?.is_some() {
            max_degree
        } else {
            max_degree + 1
        };
        self.cache.save(Invariant::EdgeChromaticNumber, CachedValue::Count(chi));
        Ok(chi)
    }

}
