//! Bound estimation for the chromatic number, run once before any search
//! query to keep the bracket small.

use log::debug;

use crate::cust_error::QueryError;
use crate::helpers::{color_count, greedy_coloring};
use crate::ilp::ZeroOneSolver;
use crate::query_instance::QueryInstance;

impl<S: ZeroOneSolver> QueryInstance<S> {

    /// Computes a provably correct bracket `[lb, ub]` around the chromatic
    /// number. Valid for graphs with at least one edge; the search layer
    /// answers node-less and edgeless graphs before estimating.
    ///
    /// Every color class is an independent set, so no fewer than `n / α`
    /// classes can cover the nodes, and a clique forces pairwise distinct
    /// colors. The greedy coloring is proper, so its color count is an upper
    /// bound together with a witness.
    pub fn chromatic_bounds(&mut self) -> Result<(usize, usize), QueryError> {
        let num_nodes = self.graph.num_nodes();
        let alpha = self.max_independent_set()?.len();
        let omega = self.max_clique()?.len();
        let lower = (num_nodes / alpha).max(omega);
        let upper = color_count(&greedy_coloring(&self.graph));
        debug!("chromatic number bracket [{}, {}]", lower, upper);
        Ok((lower, upper))
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use crate::graph::UGraph;

    #[test]
    fn pentagon_bounds_test() {
        let col = Cursor::new("p edge 5 5\ne 1 2\ne 2 3\ne 3 4\ne 4 5\ne 5 1\n");
        let pentagon = UGraph::read_col(col).unwrap();
        let mut instance = QueryInstance::new(pentagon);
        let (lower, upper) = instance.chromatic_bounds().unwrap();
        // alpha = omega = 2, and no greedy order two-colors an odd cycle
        assert_eq!(lower, 2);
        assert_eq!(upper, 3);
    }

    #[test]
    fn complete_bounds_test() {
        let col = Cursor::new("p edge 4 6\ne 1 2\ne 1 3\ne 1 4\ne 2 3\ne 2 4\ne 3 4\n");
        let complete = UGraph::read_col(col).unwrap();
        let mut instance = QueryInstance::new(complete);
        // the clique bound meets the greedy bound, leaving nothing to search
        assert_eq!(instance.chromatic_bounds().unwrap(), (4, 4));
    }

    #[test]
    fn bipartite_bounds_test() {
        let col = Cursor::new("p edge 6 9\ne 1 4\ne 1 5\ne 1 6\ne 2 4\ne 2 5\ne 2 6\ne 3 4\ne 3 5\ne 3 6\n");
        let graph = UGraph::read_col(col).unwrap();
        let mut instance = QueryInstance::new(graph);
        let (lower, upper) = instance.chromatic_bounds().unwrap();
        assert_eq!(lower, 2);
        assert!((2..=3).contains(&upper));
    }

}
