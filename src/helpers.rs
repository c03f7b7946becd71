//! The black-box helper subroutines the search and formulation layers consult.
//!
//! The heuristic helpers (greedy coloring, two-coloring, reachability) are
//! plain graph walks. The exact helpers (maximum matching, maximum independent
//! set, maximum clique, graph homomorphism) are each a single reduction to the
//! 0/1 oracle, so they share the backend, the accounting and the error
//! surfacing of every other query.

use fxhash::{FxHashMap, FxHashSet};
use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::thread_rng;

use crate::cust_error::QueryError;
use crate::graph::{Coloring, UGraph};
use crate::ilp::{Sense, ZeroOneModel, ZeroOneSolver};
use crate::query_instance::QueryInstance;

/// Number of greedy coloring passes. The first pass walks the nodes by
/// decreasing degree, the remaining ones use random orders.
pub const GREEDY_TRIES: usize = 8;

/// Returns the number of distinct colors `coloring` uses. Greedy passes hand
/// out the colors `1..=k` without gaps, so the maximum is the count.
pub fn color_count(coloring: &Coloring) -> usize {
    coloring.values().copied().max().unwrap_or(0)
}

fn greedy_pass(graph: &UGraph, order: &[usize]) -> Coloring {
    let mut coloring = Coloring::default();
    for node in order {
        let taken: FxHashSet<usize> = graph.neighbors(*node)
            .iter()
            .filter_map(|neigh| coloring.get(neigh).copied())
            .collect();
        let mut color = 1;
        while taken.contains(&color) {
            color += 1;
        }
        coloring.insert(*node, color);
    }
    coloring
}

/// Properly colors the nodes of `graph` with the first free color along a
/// node order, keeping the best of several orders. The result is always a
/// proper coloring and therefore a valid upper bound witness for the
/// chromatic number.
pub fn greedy_coloring(graph: &UGraph) -> Coloring {
    let mut order: Vec<usize> = graph.nodes().collect();
    order.sort_unstable_by_key(|node| -(graph.degree(*node) as isize));
    let mut best = greedy_pass(graph, &order);
    let mut rng = thread_rng();
    for _ in 1..GREEDY_TRIES {
        order.shuffle(&mut rng);
        let candidate = greedy_pass(graph, &order);
        if color_count(&candidate) < color_count(&best) {
            best = candidate;
        }
    }
    best
}

/// Properly colors the nodes of `graph` with the colors 1 and 2, or returns
/// `None` if `graph` is not bipartite. Exact, no solver involved.
pub fn two_color(graph: &UGraph) -> Option<Coloring> {
    let mut coloring = Coloring::default();
    for start in graph.nodes() {
        if coloring.contains_key(&start) {
            continue
        }
        coloring.insert(start, 1);
        let mut queue = vec![start];
        while let Some(next) = queue.pop() {
            let own = coloring[&next];
            for neigh in graph.neighbors(next) {
                match coloring.get(neigh) {
                    Some(color) if *color == own => return None,
                    Some(_) => {},
                    None => {
                        coloring.insert(*neigh, 3 - own);
                        queue.push(*neigh);
                    },
                }
            }
        }
    }
    Some(coloring)
}

/// Builds the Kneser graph `K(a, b)`: one node per b-element subset of
/// `1..=a`, edges between disjoint subsets. Returns the graph and the subset
/// behind each node.
pub fn kneser_graph(a: usize, b: usize) -> (UGraph, Vec<Vec<usize>>) {
    let subsets: Vec<Vec<usize>> = (1..=a).combinations(b).collect();
    let mut edges = Vec::new();
    for i in 0..subsets.len() {
        for j in (i + 1)..subsets.len() {
            if subsets[i].iter().all(|color| !subsets[j].contains(color)) {
                edges.push((i, j));
            }
        }
    }
    let graph = UGraph::new(subsets.len(), &edges)
        .expect("subset indices form a simple graph");
    (graph, subsets)
}

/// One variable per node, adjacent nodes exclude each other, maximize the
/// number of picked nodes. Variable ids equal node ids.
fn independent_set_model(graph: &UGraph) -> ZeroOneModel {
    let mut model = ZeroOneModel::new();
    let terms: Vec<(usize, f64)> = (0..graph.num_nodes())
        .map(|_| (model.binary(), 1.0))
        .collect();
    for (src, trg) in graph.edges() {
        model.at_most_one(vec![src, trg]);
    }
    model.set_objective(Sense::Maximize, &terms);
    model
}

/// One variable per edge, at most one picked edge per node, maximize the
/// number of picked edges. Variable ids equal positions in `edges`.
fn matching_model(graph: &UGraph, edges: &[(usize, usize)]) -> ZeroOneModel {
    let mut model = ZeroOneModel::new();
    let mut incident = vec![Vec::new(); graph.num_nodes()];
    let mut terms = Vec::with_capacity(edges.len());
    for (src, trg) in edges {
        let var = model.binary();
        incident[*src].push(var);
        incident[*trg].push(var);
        terms.push((var, 1.0));
    }
    for vars in incident.into_iter().filter(|vars| vars.len() > 1) {
        model.at_most_one(vars);
    }
    model.set_objective(Sense::Maximize, &terms);
    model
}

/// One variable per (node, image) pair, every node mapped to exactly one
/// image, endpoints of an edge never mapped to a non-adjacent image pair.
fn homomorphism_model(graph: &UGraph, target: &UGraph) -> ZeroOneModel {
    let images = target.num_nodes();
    let var = |node: usize, image: usize| node * images + image;
    let mut model = ZeroOneModel::new();
    for _ in 0..graph.num_nodes() * images {
        model.binary();
    }
    for node in graph.nodes() {
        model.exactly_one((0..images).map(|image| var(node, image)));
    }
    for (src, trg) in graph.edges() {
        for w1 in target.nodes() {
            for w2 in target.nodes() {
                if w1 == w2 || !target.edge_exists((w1, w2)) {
                    model.at_most_one(vec![var(src, w1), var(trg, w2)]);
                }
            }
        }
    }
    model
}

impl<S: ZeroOneSolver> QueryInstance<S> {

    /// Returns a maximum independent set. Exact; a single oracle query.
    pub fn max_independent_set(&mut self) -> Result<FxHashSet<usize>, QueryError> {
        if self.graph.num_nodes() == 0 {
            return Ok(FxHashSet::default())
        }
        let model = independent_set_model(&self.graph);
        let assignment = self.submit_feasible(&model)?;
        Ok(self.graph.nodes().filter(|node| assignment.is_one(*node)).collect())
    }

    /// Returns a maximum clique, found as a maximum independent set of the
    /// complement graph. Exact; a single oracle query.
    pub fn max_clique(&mut self) -> Result<FxHashSet<usize>, QueryError> {
        if self.graph.num_nodes() == 0 {
            return Ok(FxHashSet::default())
        }
        let complement = self.graph.complement();
        let model = independent_set_model(&complement);
        let assignment = self.submit_feasible(&model)?;
        Ok(complement.nodes().filter(|node| assignment.is_one(*node)).collect())
    }

    /// Returns a maximum matching. Exact; a single oracle query.
    pub fn max_matching(&mut self) -> Result<FxHashSet<(usize, usize)>, QueryError> {
        if self.graph.num_edges() == 0 {
            return Ok(FxHashSet::default())
        }
        let edges: Vec<(usize, usize)> = self.graph.edges().collect();
        let model = matching_model(&self.graph, &edges);
        let assignment = self.submit_feasible(&model)?;
        Ok(edges.iter()
            .enumerate()
            .filter(|(e, _)| assignment.is_one(*e))
            .map(|(_, edge)| *edge)
            .collect())
    }

    /// Looks for a graph homomorphism from the owned graph into `target`:
    /// a node mapping under which every edge lands on an edge. Returns the
    /// mapping, or `None` if no homomorphism exists.
    pub fn homomorphism(&mut self, target: &UGraph) -> Result<Option<FxHashMap<usize, usize>>, QueryError> {
        if self.graph.num_nodes() == 0 {
            return Ok(Some(FxHashMap::default()))
        }
        if target.num_nodes() == 0 {
            return Ok(None)
        }
        let images = target.num_nodes();
        let model = homomorphism_model(&self.graph, target);
        match self.submit(&model)? {
            Some(assignment) => {
                let mapping = self.graph.nodes()
                    .map(|node| {
                        let image = (0..images)
                            .find(|image| assignment.is_one(node * images + image))
                            .expect("every node is mapped to exactly one image");
                        (node, image)
                    })
                    .collect();
                Ok(Some(mapping))
            },
            None => Ok(None),
        }
    }

}
