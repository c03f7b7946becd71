//! The feasibility oracle: builds the coloring decision instances, submits
//! them, and decodes the assignments back into colorings.
//!
//! Every operation answers `Ok(Some(witness))` or the proven negative
//! `Ok(None)`; a solver status without a verdict is passed through as
//! `QueryError::Solver`.

use log::debug;

use crate::cust_error::QueryError;
use crate::graph::{Coloring, EdgeColoring, SetColoring, UGraph};
use crate::helpers::{kneser_graph, two_color};
use crate::ilp::{Assignment, ZeroOneModel, ZeroOneSolver};
use crate::query_instance::QueryInstance;

/// One variable per (node, color) pair, exactly one color per node, and per
/// edge and color at most one endpoint of that color. Variable ids follow
/// `node * k + color`.
fn vertex_coloring_model(graph: &UGraph, k: usize) -> ZeroOneModel {
    let var = |node: usize, color: usize| node * k + color;
    let mut model = ZeroOneModel::new();
    for _ in 0..graph.num_nodes() * k {
        model.binary();
    }
    for node in graph.nodes() {
        model.exactly_one((0..k).map(|color| var(node, color)));
    }
    for (src, trg) in graph.edges() {
        for color in 0..k {
            model.at_most_one(vec![var(src, color), var(trg, color)]);
        }
    }
    model
}

fn decode_vertex_coloring(graph: &UGraph, k: usize, assignment: &Assignment) -> Coloring {
    graph.nodes()
        .map(|node| {
            let color = (0..k)
                .find(|color| assignment.is_one(node * k + color))
                .expect("every node carries exactly one color");
            (node, color + 1)
        })
        .collect()
}

/// One variable per (edge, color) pair, exactly one color per edge, and per
/// node and color at most one incident edge of that color (each color class
/// is a matching). Variable ids follow `edge_id * k + color`.
fn edge_coloring_model(graph: &UGraph, edges: &[(usize, usize)], k: usize) -> ZeroOneModel {
    let var = |e: usize, color: usize| e * k + color;
    let mut model = ZeroOneModel::new();
    for _ in 0..edges.len() * k {
        model.binary();
    }
    for e in 0..edges.len() {
        model.exactly_one((0..k).map(|color| var(e, color)));
    }
    let mut incident = vec![Vec::new(); graph.num_nodes()];
    for (e, (src, trg)) in edges.iter().enumerate() {
        incident[*src].push(e);
        incident[*trg].push(e);
    }
    for edge_ids in incident.iter().filter(|edge_ids| edge_ids.len() > 1) {
        for color in 0..k {
            model.at_most_one(edge_ids.iter().map(|e| var(*e, color)));
        }
    }
    model
}

impl<S: ZeroOneSolver> QueryInstance<S> {

    /// Tries to properly color the nodes with at most `k` colors.
    /// `Ok(None)` is proven infeasibility, never a solver failure.
    pub fn vertex_coloring(&mut self, k: usize) -> Result<Option<Coloring>, QueryError> {
        if k == 0 {
            return Err(QueryError::InvalidParameter("at least one color is required".to_owned()))
        }
        if self.graph.num_edges() == 0 {
            // one color covers any edgeless graph
            return Ok(Some(self.graph.nodes().map(|node| (node, 1)).collect()))
        }
        if k == 1 {
            return Ok(None)
        }
        if k == 2 {
            // the bipartiteness helper is exact and cheaper than the formulation
            return Ok(two_color(&self.graph))
        }
        let model = vertex_coloring_model(&self.graph, k);
        match self.submit(&model)? {
            Some(assignment) => Ok(Some(decode_vertex_coloring(&self.graph, k, &assignment))),
            None => Ok(None),
        }
    }

    /// Tries to properly color the edges with at most `k` colors.
    pub fn edge_coloring(&mut self, k: usize) -> Result<Option<EdgeColoring>, QueryError> {
        if k == 0 {
            return Err(QueryError::InvalidParameter("at least one color is required".to_owned()))
        }
        if self.graph.num_edges() == 0 {
            return Ok(Some(EdgeColoring::default()))
        }
        if self.graph.max_degree() <= 1 {
            // the edges form a matching, one color does
            return Ok(Some(self.graph.edges().map(|edge| (edge, 1)).collect()))
        }
        // each color class is a matching, so k classes cover at most k * |M| edges
        let matching = self.max_matching()?;
        if self.graph.num_edges() > matching.len() * k {
            debug!("{} edge colors rejected by the matching bound", k);
            return Ok(None)
        }
        let edges: Vec<(usize, usize)> = self.graph.edges().collect();
        let model = edge_coloring_model(&self.graph, &edges, k);
        match self.submit(&model)? {
            Some(assignment) => {
                let coloring = edges.iter()
                    .enumerate()
                    .map(|(e, edge)| {
                        let color = (0..k)
                            .find(|color| assignment.is_one(e * k + color))
                            .expect("every edge carries exactly one color");
                        (*edge, color + 1)
                    })
                    .collect();
                Ok(Some(coloring))
            },
            None => Ok(None),
        }
    }

    /// Tries to assign every node a set of `b` out of `a` colors such that
    /// adjacent nodes get disjoint sets. Reduced to a homomorphism into the
    /// Kneser graph `K(a, b)` instead of a bespoke formulation.
    pub fn ab_coloring(&mut self, a: usize, b: usize) -> Result<Option<SetColoring>, QueryError> {
        if a == 0 || b == 0 {
            return Err(QueryError::InvalidParameter("a:b-coloring needs positive a and b".to_owned()))
        }
        let (kneser, subsets) = kneser_graph(a, b);
        match self.homomorphism(&kneser)? {
            Some(mapping) => {
                let coloring = mapping.into_iter()
                    .map(|(node, image)| (node, subsets[image].clone()))
                    .collect();
                Ok(Some(coloring))
            },
            None => Ok(None),
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use crate::cust_error::QueryError;

    #[test]
    fn zero_colors_test() {
        let col = Cursor::new("p edge 2 1\ne 1 2\n");
        let graph = UGraph::read_col(col).unwrap();
        let mut instance = QueryInstance::new(graph);
        assert!(matches!(instance.vertex_coloring(0), Err(QueryError::InvalidParameter(_))));
        assert!(matches!(instance.edge_coloring(0), Err(QueryError::InvalidParameter(_))));
        assert!(matches!(instance.ab_coloring(0, 1), Err(QueryError::InvalidParameter(_))));
        assert!(matches!(instance.ab_coloring(1, 0), Err(QueryError::InvalidParameter(_))));
    }

    #[test]
    fn vertex_coloring_monotonic_test() {
        let col = Cursor::new("p edge 3 3\ne 1 2\ne 1 3\ne 2 3\n");
        let triangle = UGraph::read_col(col).unwrap();
        let mut instance = QueryInstance::new(triangle);
        assert!(instance.vertex_coloring(1).unwrap().is_none());
        assert!(instance.vertex_coloring(2).unwrap().is_none());
        for k in 3..=5 {
            let coloring = instance.vertex_coloring(k).unwrap();
            assert!(coloring.is_some());
            assert!(instance.graph().is_proper_coloring(&coloring.unwrap()));
        }
    }

    #[test]
    fn edgeless_coloring_test() {
        let graph = UGraph::new(3, &[]).unwrap();
        let mut instance = QueryInstance::new(graph);
        let coloring = instance.vertex_coloring(1).unwrap();
        assert!(coloring.is_some());
        assert_eq!(coloring.unwrap().len(), 3);
        assert!(instance.edge_coloring(1).unwrap().is_some());
        assert_eq!(instance.oracle_queries(), 0);
    }

    #[test]
    fn edge_coloring_test() {
        let col = Cursor::new("p edge 5 5\ne 1 2\ne 2 3\ne 3 4\ne 4 5\ne 5 1\n");
        let pentagon = UGraph::read_col(col).unwrap();
        let mut instance = QueryInstance::new(pentagon);
        // the matching bound rejects two colors: 5 > 2 * 2
        assert!(instance.edge_coloring(2).unwrap().is_none());
        let coloring = instance.edge_coloring(3).unwrap();
        assert!(coloring.is_some());
        assert!(instance.graph().is_proper_edge_coloring(&coloring.unwrap()));
    }

    #[test]
    fn matching_graph_edge_coloring_test() {
        let col = Cursor::new("p edge 4 2\ne 1 2\ne 3 4\n");
        let graph = UGraph::read_col(col).unwrap();
        let mut instance = QueryInstance::new(graph);
        let coloring = instance.edge_coloring(1).unwrap();
        assert!(coloring.is_some());
        assert!(instance.graph().is_proper_edge_coloring(&coloring.unwrap()));
        assert_eq!(instance.oracle_queries(), 0);
    }

    #[test]
    fn ab_coloring_test() {
        // the 5-cycle is 5:2-colorable but not 4:2-colorable
        let col = Cursor::new("p edge 5 5\ne 1 2\ne 2 3\ne 3 4\ne 4 5\ne 5 1\n");
        let pentagon = UGraph::read_col(col).unwrap();
        let mut instance = QueryInstance::new(pentagon);
        let coloring = instance.ab_coloring(5, 2).unwrap();
        assert!(coloring.is_some());
        assert!(instance.graph().is_proper_set_coloring(&coloring.unwrap(), 2));
        assert!(instance.ab_coloring(4, 2).unwrap().is_none());
    }

    #[test]
    fn ab_coloring_as_plain_coloring_test() {
        // b = 1 degenerates to an ordinary coloring
        let col = Cursor::new("p edge 3 3\ne 1 2\ne 1 3\ne 2 3\n");
        let triangle = UGraph::read_col(col).unwrap();
        let mut instance = QueryInstance::new(triangle);
        assert!(instance.ab_coloring(2, 1).unwrap().is_none());
        let coloring = instance.ab_coloring(3, 1).unwrap();
        assert!(coloring.is_some());
        assert!(instance.graph().is_proper_set_coloring(&coloring.unwrap(), 1));
    }

}
