//! Cut formulations: global minimum edge cut and s-t edge connectivity.
//! Each is a single optimization query; the work is in building the model
//! and reading the witness back.

use crate::cache::{CachedValue, Invariant};
use crate::cust_error::QueryError;
use crate::graph::UGraph;
use crate::ilp::{Sense, ZeroOneModel, ZeroOneSolver};
use crate::query_instance::QueryInstance;

/// Partition formulation for the global minimum edge cut. Every node sits on
/// exactly one of two nonempty sides; a crossing indicator per edge is forced
/// up whenever its endpoints sit on different sides; the indicator sum is
/// minimized. Returns the model and the indicator variable per edge.
fn min_cut_model(graph: &UGraph, edges: &[(usize, usize)]) -> (ZeroOneModel, Vec<usize>) {
    let num_nodes = graph.num_nodes();
    let mut model = ZeroOneModel::new();
    let side_a: Vec<usize> = (0..num_nodes).map(|_| model.binary()).collect();
    let side_b: Vec<usize> = (0..num_nodes).map(|_| model.binary()).collect();
    for node in 0..num_nodes {
        model.exactly_one(vec![side_a[node], side_b[node]]);
    }
    model.constrain(1.0, num_nodes as f64, side_a.iter().map(|&var| (var, 1.0)).collect());
    model.constrain(1.0, num_nodes as f64, side_b.iter().map(|&var| (var, 1.0)).collect());
    let mut crossings = Vec::with_capacity(edges.len());
    let mut objective = Vec::with_capacity(edges.len());
    for (src, trg) in edges {
        let crossing = model.binary();
        // crossing >= side_a(src) + side_b(trg) - 1, and symmetrically
        model.constrain(
            f64::NEG_INFINITY,
            1.0,
            vec![(side_a[*src], 1.0), (side_b[*trg], 1.0), (crossing, -1.0)],
        );
        model.constrain(
            f64::NEG_INFINITY,
            1.0,
            vec![(side_a[*trg], 1.0), (side_b[*src], 1.0), (crossing, -1.0)],
        );
        objective.push((crossing, 1.0));
        crossings.push(crossing);
    }
    model.set_objective(Sense::Minimize, &objective);
    (model, crossings)
}

/// Unit-capacity flow formulation for the s-t edge connectivity. Two opposite
/// arcs per edge, never both carrying flow, conservation everywhere but at
/// the terminals, the source's net outflow tied to the sink's net inflow and
/// maximized. Returns the model and the arc variables leaving and entering
/// the source.
fn flow_model(graph: &UGraph, edges: &[(usize, usize)], s: usize, t: usize) -> (ZeroOneModel, Vec<usize>, Vec<usize>) {
    let mut model = ZeroOneModel::new();
    let mut outgoing = vec![Vec::new(); graph.num_nodes()];
    let mut incoming = vec![Vec::new(); graph.num_nodes()];
    for (src, trg) in edges {
        let forward = model.binary();
        let backward = model.binary();
        model.at_most_one(vec![forward, backward]);
        outgoing[*src].push(forward);
        incoming[*trg].push(forward);
        outgoing[*trg].push(backward);
        incoming[*src].push(backward);
    }
    for node in graph.nodes() {
        if node == s || node == t || graph.degree(node) == 0 {
            continue
        }
        let mut terms: Vec<(usize, f64)> = incoming[node].iter().map(|&var| (var, 1.0)).collect();
        terms.extend(outgoing[node].iter().map(|&var| (var, -1.0)));
        model.constrain(0.0, 0.0, terms);
    }
    // net outflow of the source equals net inflow of the sink
    let mut linking: Vec<(usize, f64)> = outgoing[s].iter().map(|&var| (var, 1.0)).collect();
    linking.extend(incoming[s].iter().map(|&var| (var, -1.0)));
    linking.extend(incoming[t].iter().map(|&var| (var, -1.0)));
    linking.extend(outgoing[t].iter().map(|&var| (var, 1.0)));
    model.constrain(0.0, 0.0, linking);
    let mut objective: Vec<(usize, f64)> = outgoing[s].iter().map(|&var| (var, 1.0)).collect();
    objective.extend(incoming[s].iter().map(|&var| (var, -1.0)));
    model.set_objective(Sense::Maximize, &objective);
    let source_out = outgoing[s].clone();
    let source_in = incoming[s].clone();
    (model, source_out, source_in)
}

impl<S: ZeroOneSolver> QueryInstance<S> {

    /// A minimum edge cut: a smallest edge set whose removal leaves the graph
    /// disconnected. The empty set for a graph that is already disconnected.
    pub fn min_edge_cut(&mut self) -> Result<Vec<(usize, usize)>, QueryError> {
        if let Some(edges) = self.cached_edges(Invariant::MinEdgeCut) {
            return Ok(edges)
        }
        if self.graph.num_nodes() < 2 {
            return Err(QueryError::Precondition("separating the graph needs at least two nodes".to_owned()))
        }
        let cut = if self.graph.disconnected() {
            Vec::new()
        } else {
            let edges: Vec<(usize, usize)> = self.graph.edges().collect();
            let (model, crossings) = min_cut_model(&self.graph, &edges);
            let assignment = self.submit_feasible(&model)?;
            let mut cut: Vec<(usize, usize)> = edges.iter()
                .zip(crossings.iter())
                .filter(|(_, crossing)| assignment.is_one(**crossing))
                .map(|(edge, _)| *edge)
                .collect();
            cut.sort_unstable();
            cut
        };
        self.cache.save(Invariant::MinEdgeCut, CachedValue::Edges(cut.clone()));
        Ok(cut)
    }

    /// The edge connectivity of the whole graph: the size of a minimum edge
    /// cut, 0 for a disconnected graph.
    pub fn edge_connectivity(&mut self) -> Result<usize, QueryError> {
        Ok(self.min_edge_cut()?.len())
    }

    /// The s-t edge connectivity: the maximum number of edge-disjoint s-t
    /// paths, which by max-flow/min-cut duality equals the minimum s-t edge
    /// cut. Obtained from one unit-capacity flow query instead of a dedicated
    /// flow algorithm.
    pub fn st_edge_connectivity(&mut self, s: usize, t: usize) -> Result<usize, QueryError> {
        if s == t {
            return Err(QueryError::InvalidParameter("source and sink must differ".to_owned()))
        }
        if !self.graph.contains_node(s) || !self.graph.contains_node(t) {
            return Err(QueryError::InvalidParameter("source and sink must be nodes of the graph".to_owned()))
        }
        if !self.graph.reachable(s).contains(&t) {
            return Ok(0)
        }
        let edges: Vec<(usize, usize)> = self.graph.edges().collect();
        let (model, source_out, source_in) = flow_model(&self.graph, &edges, s, t);
        let assignment = self.submit_feasible(&model)?;
        let value = assignment.count_ones(source_out) as i64 - assignment.count_ones(source_in) as i64;
        Ok(value.max(0) as usize)
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const K33: &str = "p edge 6 9\ne 1 4\ne 1 5\ne 1 6\ne 2 4\ne 2 5\ne 2 6\ne 3 4\ne 3 5\ne 3 6\n";

    #[test]
    fn disconnected_cut_test() {
        let col = Cursor::new("p edge 6 6\ne 1 2\ne 1 3\ne 2 3\ne 4 5\ne 4 6\ne 5 6\n");
        let graph = UGraph::read_col(col).unwrap();
        let mut instance = QueryInstance::new(graph);
        assert_eq!(instance.min_edge_cut().unwrap(), Vec::new());
        assert_eq!(instance.edge_connectivity().unwrap(), 0);
        assert_eq!(instance.oracle_queries(), 0);
        // no path between the components
        assert_eq!(instance.st_edge_connectivity(0, 4).unwrap(), 0);
    }

    #[test]
    fn bridge_cut_test() {
        // two triangles joined by a single edge
        let col = Cursor::new("p edge 6 7\ne 1 2\ne 1 3\ne 2 3\ne 3 4\ne 4 5\ne 4 6\ne 5 6\n");
        let graph = UGraph::read_col(col).unwrap();
        let mut instance = QueryInstance::new(graph);
        let cut = instance.min_edge_cut().unwrap();
        assert_eq!(cut, vec![(2, 3)]);
        assert!(instance.graph().disconnects(&cut));
    }

    #[test]
    fn complete_bipartite_cut_test() {
        let graph = UGraph::read_col(Cursor::new(K33)).unwrap();
        let mut instance = QueryInstance::new(graph);
        assert_eq!(instance.edge_connectivity().unwrap(), 3);
        let cut = instance.min_edge_cut().unwrap();
        assert_eq!(cut.len(), 3);
        assert!(instance.graph().disconnects(&cut));
    }

    #[test]
    fn st_connectivity_test() {
        let graph = UGraph::read_col(Cursor::new(K33)).unwrap();
        let mut instance = QueryInstance::new(graph);
        // across the sides and within one side alike
        assert_eq!(instance.st_edge_connectivity(0, 3).unwrap(), 3);
        assert_eq!(instance.st_edge_connectivity(0, 1).unwrap(), 3);
        let col = Cursor::new("p edge 5 5\ne 1 2\ne 2 3\ne 3 4\ne 4 5\ne 5 1\n");
        let pentagon = UGraph::read_col(col).unwrap();
        let mut instance = QueryInstance::new(pentagon);
        assert_eq!(instance.st_edge_connectivity(0, 2).unwrap(), 2);
    }

    #[test]
    fn st_parameter_validation_test() {
        let col = Cursor::new("p edge 2 1\ne 1 2\n");
        let graph = UGraph::read_col(col).unwrap();
        let mut instance = QueryInstance::new(graph);
        assert!(matches!(instance.st_edge_connectivity(0, 0), Err(QueryError::InvalidParameter(_))));
        assert!(matches!(instance.st_edge_connectivity(0, 7), Err(QueryError::InvalidParameter(_))));
    }

    #[test]
    fn cut_precondition_test() {
        let mut single = QueryInstance::new(UGraph::new(1, &[]).unwrap());
        assert!(matches!(single.min_edge_cut(), Err(QueryError::Precondition(_))));
        let mut empty = QueryInstance::new(UGraph::new(0, &[]).unwrap());
        assert!(matches!(empty.min_edge_cut(), Err(QueryError::Precondition(_))));
    }

    #[test]
    fn cut_memoization_test() {
        let graph = UGraph::read_col(Cursor::new(K33)).unwrap();
        let mut instance = QueryInstance::new(graph);
        let cut = instance.min_edge_cut().unwrap();
        let queries = instance.oracle_queries();
        assert_eq!(instance.min_edge_cut().unwrap(), cut);
        // connectivity reuses the cached cut
        assert_eq!(instance.edge_connectivity().unwrap(), cut.len());
        assert_eq!(instance.oracle_queries(), queries);
    }

}
