//! Implementation of a simple, immutable undirected graph data structure with the
//! static queries the formulation and search layers need.

use fxhash::{FxHashMap, FxHashSet};
use std::io::BufRead;
use crate::cust_error::ImportError;

/// A proper vertex coloring candidate: node to a color in `1..=k`.
pub type Coloring = FxHashMap<usize, usize>;
/// A proper edge coloring candidate: normalized edge to a color in `1..=k`.
pub type EdgeColoring = FxHashMap<(usize, usize), usize>;
/// An a:b-coloring candidate: node to a sorted b-element subset of `1..=a`.
pub type SetColoring = FxHashMap<usize, Vec<usize>>;

/// Returns `edge` with the smaller endpoint first.
pub fn normalized(edge: (usize, usize)) -> (usize, usize) {
    if edge.0 <= edge.1 {
        edge
    } else {
        (edge.1, edge.0)
    }
}

/// A simple undirected graph over the nodes `0..n`, fixed at construction.
///
/// There is no way to add or remove nodes or edges afterwards, so every
/// invariant computed against a `UGraph` stays valid for its whole lifetime.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct UGraph {
    adj_list: Vec<FxHashSet<usize>>,
    num_edges: usize,
}

impl UGraph {

    /// Creates a graph with `n` nodes and the given edges. Duplicate edges are
    /// merged, self loops and out-of-range endpoints are rejected.
    pub fn new(n: usize, edges: &[(usize, usize)]) -> Result<Self, ImportError> {
        let mut adj_list = vec![FxHashSet::default(); n];
        let mut num_edges = 0;
        for &(src, trg) in edges {
            if src == trg {
                return Err(ImportError::Malformed(format!("self loop at node {}", src)));
            }
            if src >= n || trg >= n {
                return Err(ImportError::Malformed(format!("edge ({}, {}) out of range", src, trg)));
            }
            if adj_list[src].insert(trg) {
                adj_list[trg].insert(src);
                num_edges += 1;
            }
        }
        Ok(UGraph {
            adj_list,
            num_edges,
        })
    }

    /// Returns an `Iterator` over all nodes.
    pub fn nodes(&self) -> impl Iterator<Item=usize> + '_ {
        0..self.adj_list.len()
    }

    /// Returns the number of nodes of `self`.
    pub fn num_nodes(&self) -> usize {
        self.adj_list.len()
    }

    /// Returns the number of edges of `self`.
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Checks if `node` is a node of `self`.
    pub fn contains_node(&self, node: usize) -> bool {
        node < self.adj_list.len()
    }

    /// Returns the neighborhood of `node`.
    pub fn neighbors(&self, node: usize) -> &FxHashSet<usize> {
        &self.adj_list[node]
    }

    /// Returns the degree of `node`.
    pub fn degree(&self, node: usize) -> usize {
        self.adj_list[node].len()
    }

    /// Returns the highest degree over all nodes, or 0 if `self` has no nodes.
    pub fn max_degree(&self) -> usize {
        self.nodes().map(|node| self.degree(node)).max().unwrap_or(0)
    }

    /// Returns an iterator over all edges, each reported once with the smaller
    /// endpoint first.
    pub fn edges(&self) -> impl Iterator<Item=(usize, usize)> + '_ {
        self.adj_list
            .iter()
            .enumerate()
            .flat_map(|(i, adj)| {
                adj.iter()
                    .filter_map(move |neigh| {
                        if i < *neigh {
                            Some((i, *neigh))
                        } else {
                            None
                        }
                    })
            })
    }

    /// Checks if `edge` exists.
    pub fn edge_exists(&self, edge: (usize, usize)) -> bool {
        self.adj_list.get(edge.0).map_or(false, |neighs| neighs.contains(&edge.1))
    }

    /// Checks if an edge exists between any two nodes of `set`.
    pub fn has_edge_within(&self, set: &FxHashSet<usize>) -> bool {
        let mut mut_set = set.clone();
        while mut_set.len() > 1 {
            let next = *mut_set.iter().next().expect("`mut_set` is not empty");
            mut_set.remove(&next);
            if mut_set.intersection(self.neighbors(next)).count() > 0 {
                return true
            }
        }
        false
    }

    /// Returns a set of all nodes reachable from `node`, including `node`.
    /// Edges in `blocked` are not traversed.
    pub fn reachable_avoiding(&self, node: usize, blocked: &FxHashSet<(usize, usize)>) -> FxHashSet<usize> {
        let mut reached = FxHashSet::default();
        let mut queue = vec![node];
        while let Some(next) = queue.pop() {
            if reached.contains(&next) {
                continue
            }
            reached.insert(next);
            queue.extend(self.neighbors(next)
                .iter()
                .filter(|neigh| !blocked.contains(&normalized((next, **neigh)))));
        }
        reached
    }

    /// Returns a set of all nodes reachable from `node`, including `node`.
    pub fn reachable(&self, node: usize) -> FxHashSet<usize> {
        self.reachable_avoiding(node, &FxHashSet::default())
    }

    /// Checks if `self` is disconnected. A graph without nodes counts as
    /// connected.
    pub fn disconnected(&self) -> bool {
        if self.num_nodes() == 0 {
            return false
        }
        self.reachable(0).len() != self.num_nodes()
    }

    /// Returns the complement graph on the same node set.
    pub fn complement(&self) -> UGraph {
        let n = self.num_nodes();
        let mut adj_list = vec![FxHashSet::default(); n];
        let mut num_edges = 0;
        for i in 0..n {
            for j in (i + 1)..n {
                if !self.adj_list[i].contains(&j) {
                    adj_list[i].insert(j);
                    adj_list[j].insert(i);
                    num_edges += 1;
                }
            }
        }
        UGraph {
            adj_list,
            num_edges,
        }
    }

}

// Solution validation
impl UGraph {

    /// Checks if `coloring` assigns every node a color and no edge connects two
    /// nodes of the same color.
    pub fn is_proper_coloring(&self, coloring: &Coloring) -> bool {
        if self.nodes().any(|node| !coloring.contains_key(&node)) {
            return false
        }
        self.edges().all(|(src, trg)| coloring[&src] != coloring[&trg])
    }

    /// Checks if `coloring` assigns every edge a color and no two edges sharing
    /// a node have the same color.
    pub fn is_proper_edge_coloring(&self, coloring: &EdgeColoring) -> bool {
        if self.edges().any(|edge| !coloring.contains_key(&edge)) {
            return false
        }
        for node in self.nodes() {
            let mut seen = FxHashSet::default();
            for neigh in self.neighbors(node) {
                if !seen.insert(coloring[&normalized((node, *neigh))]) {
                    return false
                }
            }
        }
        true
    }

    /// Checks if `coloring` assigns every node a set of `b` distinct colors and
    /// the sets of adjacent nodes are disjoint.
    pub fn is_proper_set_coloring(&self, coloring: &SetColoring, b: usize) -> bool {
        for node in self.nodes() {
            match coloring.get(&node) {
                Some(subset) => {
                    let distinct: FxHashSet<usize> = subset.iter().copied().collect();
                    if distinct.len() != b {
                        return false
                    }
                },
                None => return false,
            }
        }
        self.edges().all(|(src, trg)| {
            coloring[&src].iter().all(|color| !coloring[&trg].contains(color))
        })
    }

    /// Checks if removing the edges in `cut` leaves `self` disconnected.
    pub fn disconnects(&self, cut: &[(usize, usize)]) -> bool {
        if self.num_nodes() == 0 {
            return false
        }
        let blocked: FxHashSet<(usize, usize)> = cut.iter().map(|edge| normalized(*edge)).collect();
        self.reachable_avoiding(0, &blocked).len() != self.num_nodes()
    }

}

impl UGraph {

    /// Reads a DIMACS `.col` input and creates a `UGraph`.
    /// Expects a `p edge <n> <m>` line followed by `m` lines `e <src> <trg>`
    /// with 1-based node ids. Lines starting with `c` are ignored.
    pub fn read_col<R: BufRead>(col: R) -> Result<Self, ImportError> {
        let (lines, _): (Vec<_>, Vec<_>) = col.lines()
            .partition(|l| {
                if let Ok(line) = l {
                    // ignore empty lines and comment lines
                    !line.starts_with('c') && !line.is_empty()
                } else {
                    true
                }
            });
        let mut lines = lines.into_iter();
        // p edge <n> <m>
        let (n, m) = {
            let line = lines.next().ok_or_else(|| ImportError::Malformed("missing problem line".to_owned()))??;
            let mut s = line.split_whitespace();
            if let Some("p") = s.next() {} else { return Err(ImportError::Malformed(line.clone())); }
            if let Some("edge") = s.next() {} else { return Err(ImportError::Malformed(line.clone())); }
            let n: usize = s.next().ok_or_else(|| ImportError::Malformed(line.clone()))?.parse()?;
            let m: usize = s.next().ok_or_else(|| ImportError::Malformed(line.clone()))?.parse()?;
            if s.next().is_some() { return Err(ImportError::Malformed(line.clone())); }
            (n, m)
        };
        let mut edges = Vec::with_capacity(m);
        for line in lines {
            // e <src> <trg>
            let line = line?;
            let mut s = line.split_whitespace();
            if let Some("e") = s.next() {} else { return Err(ImportError::Malformed(line.clone())); }
            let src = s.next().ok_or_else(|| ImportError::Malformed(line.clone()))?.parse::<usize>()?;
            let trg = s.next().ok_or_else(|| ImportError::Malformed(line.clone()))?.parse::<usize>()?;
            if s.next().is_some() { return Err(ImportError::Malformed(line.clone())); }
            if src < 1 || trg < 1 {
                return Err(ImportError::Malformed(line.clone()));
            }
            edges.push((src - 1, trg - 1));
        }
        if edges.len() != m {
            return Err(ImportError::Malformed(format!("expected {} edges, found {}", m, edges.len())));
        }
        UGraph::new(n, &edges)
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn read_col_test() {
        let col = Cursor::new("c two triangles\np edge 7 6\ne 1 2\ne 1 3\ne 2 3\ne 4 5\ne 4 6\ne 5 6\n");
        let graph = UGraph::read_col(col);
        assert!(graph.is_ok());
        let graph = graph.unwrap();
        assert_eq!(graph.num_nodes(), 7);
        assert_eq!(graph.num_edges(), 6);
        assert_eq!(graph.degree(0), 2);
        assert_eq!(graph.degree(6), 0);
        assert_eq!(graph.max_degree(), 2);
        assert!(graph.edge_exists((0, 1)));
        assert!(!graph.edge_exists((0, 3)));
    }

    #[test]
    fn read_col_rejects_malformed_test() {
        assert!(UGraph::read_col(Cursor::new("p edge 3 1\n")).is_err());
        assert!(UGraph::read_col(Cursor::new("p edge 3 1\ne 1 1\n")).is_err());
        assert!(UGraph::read_col(Cursor::new("p edge 3 1\ne 1 4\n")).is_err());
        assert!(UGraph::read_col(Cursor::new("e 1 2\n")).is_err());
    }

    #[test]
    fn connectivity_test() {
        let col = Cursor::new("p edge 7 6\ne 1 2\ne 1 3\ne 2 3\ne 4 5\ne 4 6\ne 5 6\n");
        let graph = UGraph::read_col(col).unwrap();
        assert!(graph.disconnected());
        assert_eq!(graph.reachable(0).len(), 3);
        let col = Cursor::new("p edge 3 2\ne 1 2\ne 2 3\n");
        let path = UGraph::read_col(col).unwrap();
        assert!(!path.disconnected());
        assert!(path.disconnects(&[(1, 2)]));
        assert!(!path.disconnects(&[]));
    }

    #[test]
    fn complement_test() {
        let col = Cursor::new("p edge 4 3\ne 1 2\ne 2 3\ne 3 4\n");
        let graph = UGraph::read_col(col).unwrap();
        let co = graph.complement();
        assert_eq!(co.num_edges(), 3);
        assert!(co.edge_exists((0, 2)));
        assert!(co.edge_exists((0, 3)));
        assert!(co.edge_exists((1, 3)));
        assert!(!co.edge_exists((0, 1)));
    }

    #[test]
    fn proper_coloring_test() {
        let col = Cursor::new("p edge 3 3\ne 1 2\ne 1 3\ne 2 3\n");
        let triangle = UGraph::read_col(col).unwrap();
        let good: Coloring = vec![(0, 1), (1, 2), (2, 3)].into_iter().collect();
        let bad: Coloring = vec![(0, 1), (1, 1), (2, 2)].into_iter().collect();
        let partial: Coloring = vec![(0, 1), (1, 2)].into_iter().collect();
        assert!(triangle.is_proper_coloring(&good));
        assert!(!triangle.is_proper_coloring(&bad));
        assert!(!triangle.is_proper_coloring(&partial));
    }

    #[test]
    fn proper_edge_coloring_test() {
        let col = Cursor::new("p edge 3 2\ne 1 2\ne 2 3\n");
        let path = UGraph::read_col(col).unwrap();
        let good: EdgeColoring = vec![((0, 1), 1), ((1, 2), 2)].into_iter().collect();
        let bad: EdgeColoring = vec![((0, 1), 1), ((1, 2), 1)].into_iter().collect();
        assert!(path.is_proper_edge_coloring(&good));
        assert!(!path.is_proper_edge_coloring(&bad));
    }

    #[test]
    fn proper_set_coloring_test() {
        let col = Cursor::new("p edge 2 1\ne 1 2\n");
        let edge = UGraph::read_col(col).unwrap();
        let good: SetColoring = vec![(0, vec![1, 2]), (1, vec![3, 4])].into_iter().collect();
        let overlap: SetColoring = vec![(0, vec![1, 2]), (1, vec![2, 3])].into_iter().collect();
        let short: SetColoring = vec![(0, vec![1]), (1, vec![2, 3])].into_iter().collect();
        assert!(edge.is_proper_set_coloring(&good, 2));
        assert!(!edge.is_proper_set_coloring(&overlap, 2));
        assert!(!edge.is_proper_set_coloring(&short, 2));
    }

}
