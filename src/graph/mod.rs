use std::collections::BTreeSet;

use log::warn;
use petgraph::stable_graph::{NodeIndex, StableUnGraph};
use petgraph::visit::{Dfs, EdgeRef};

use crate::error::{CombsolError, GraphError};
use crate::graph_error;

pub mod edge_list;
pub mod generators;

/// An undirected simple graph on the vertices `0..n`.
///
/// Edges can be deleted but never added after construction. Deleting edges keeps every vertex id
/// and the relative order of the surviving edges, so [Graph::edges] always enumerates edges in
/// the order they were created.
#[derive(Clone, Debug)]
pub struct Graph {
    inner: StableUnGraph<(), ()>,
}

impl Graph {
    /// Create a graph with `n` vertices and no edges.
    pub fn new(n: usize) -> Self {
        Self::with_capacity(n, 0)
    }

    fn with_capacity(n: usize, nedges: usize) -> Self {
        let mut inner = StableUnGraph::with_capacity(n, nedges);
        for _ in 0..n {
            inner.add_node(());
        }
        Self { inner }
    }

    // caller guarantees distinct, in-range ids and no existing edge
    fn add_edge_unchecked(&mut self, a: usize, b: usize) {
        self.inner.add_edge(NodeIndex::new(a), NodeIndex::new(b), ());
    }

    /// Create a graph with `n` vertices from a list of edges.
    ///
    /// Duplicated edges (in either orientation) are skipped with a warning, self loops and
    /// out-of-range vertex ids are errors.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Result<Self, CombsolError> {
        let mut graph = Self::with_capacity(n, edges.len());
        for &(a, b) in edges {
            let ia = graph.node(a)?;
            let ib = graph.node(b)?;
            if a == b {
                return Err(graph_error!(SelfLoop { vertex: a }));
            }
            if graph.inner.find_edge(ia, ib).is_some() {
                warn!("skipping duplicate edge ({a}, {b})");
                continue;
            }
            graph.inner.add_edge(ia, ib, ());
        }
        Ok(graph)
    }

    pub fn vertex_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// The surviving edges as `(min, max)` pairs, in creation order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.inner.edge_indices().filter_map(move |e| {
            self.inner
                .edge_endpoints(e)
                .map(|(a, b)| ordered(a.index(), b.index()))
        })
    }

    pub fn degree(&self, v: usize) -> Result<usize, CombsolError> {
        let ix = self.node(v)?;
        Ok(self.inner.edges(ix).count())
    }

    /// The first vertex (lowest id) attaining the maximum degree, together with that degree.
    /// Returns `None` for a graph without vertices.
    pub fn max_degree(&self) -> Option<(usize, usize)> {
        let mut best: Option<(usize, usize)> = None;
        for ix in self.inner.node_indices() {
            let degree = self.inner.edges(ix).count();
            match best {
                Some((_, d)) if d >= degree => {}
                _ => best = Some((ix.index(), degree)),
            }
        }
        best
    }

    /// The vertices adjacent to `v`, in ascending order.
    pub fn neighbors(&self, v: usize) -> Result<BTreeSet<usize>, CombsolError> {
        let ix = self.node(v)?;
        Ok(self.inner.neighbors(ix).map(|n| n.index()).collect())
    }

    /// The closed neighbourhood of `v`, i.e. its neighbors and `v` itself.
    pub fn closed_neighbors(&self, v: usize) -> Result<BTreeSet<usize>, CombsolError> {
        let mut ret = self.neighbors(v)?;
        ret.insert(v);
        Ok(ret)
    }

    /// Remove the given edges, returning how many were present. Edges that are already absent
    /// are ignored.
    pub fn delete_edges(&mut self, edges: &[(usize, usize)]) -> Result<usize, CombsolError> {
        let mut removed = 0;
        for &(a, b) in edges {
            let ia = self.node(a)?;
            let ib = self.node(b)?;
            if let Some(e) = self.inner.find_edge(ia, ib) {
                self.inner.remove_edge(e);
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Remove every edge incident to `v` and return the removed edges. `v` stays in the graph.
    pub fn delete_incident_edges(&mut self, v: usize) -> Result<Vec<(usize, usize)>, CombsolError> {
        let ix = self.node(v)?;
        let incident = self.inner.edges(ix).map(|e| e.id()).collect::<Vec<_>>();
        let mut removed = Vec::with_capacity(incident.len());
        for e in incident {
            if let Some((a, b)) = self.inner.edge_endpoints(e) {
                removed.push(ordered(a.index(), b.index()));
            }
            self.inner.remove_edge(e);
        }
        Ok(removed)
    }

    /// Depth-first visiting order of the component containing `start`, beginning with `start`.
    pub fn dfs(&self, start: usize) -> Result<Vec<usize>, CombsolError> {
        let ix = self.node(start)?;
        let mut dfs = Dfs::new(&self.inner, ix);
        let mut order = Vec::new();
        while let Some(nx) = dfs.next(&self.inner) {
            order.push(nx.index());
        }
        Ok(order)
    }

    /// Returns true if every vertex is in `set` or adjacent to a vertex in `set`. Out-of-range ids
    /// in `set` make the answer false.
    pub fn is_dominating_set(&self, set: &[usize]) -> bool {
        let n = self.vertex_count();
        let mut covered = vec![false; n];
        for &v in set {
            if v >= n {
                return false;
            }
            covered[v] = true;
            for u in self.inner.neighbors(NodeIndex::new(v)) {
                covered[u.index()] = true;
            }
        }
        covered.into_iter().all(|c| c)
    }

    fn node(&self, v: usize) -> Result<NodeIndex, CombsolError> {
        if v < self.vertex_count() {
            Ok(NodeIndex::new(v))
        } else {
            Err(graph_error!(InvalidVertex {
                vertex: v,
                vertex_count: self.vertex_count()
            }))
        }
    }
}

fn ordered(a: usize, b: usize) -> (usize, usize) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::Graph;
    use crate::error::{CombsolError, GraphError};

    fn four_cycle() -> Graph {
        Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap()
    }

    #[test]
    fn edges_are_normalised_and_keep_creation_order() {
        let g = four_cycle();
        assert_eq!(g.edges().collect::<Vec<_>>(), vec![(0, 1), (1, 2), (2, 3), (0, 3)]);
        assert_eq!(g.edge_count(), 4);
        assert_eq!(g.vertex_count(), 4);
    }

    #[test]
    fn degrees_and_neighbors() {
        let g = Graph::from_edges(5, &[(0, 1), (0, 2), (0, 3), (3, 4)]).unwrap();
        assert_eq!(g.degree(0).unwrap(), 3);
        assert_eq!(g.degree(4).unwrap(), 1);
        assert_eq!(g.neighbors(0).unwrap().into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(
            g.closed_neighbors(3).unwrap().into_iter().collect::<Vec<_>>(),
            vec![0, 3, 4]
        );
        assert_eq!(g.max_degree(), Some((0, 3)));
    }

    #[test]
    fn max_degree_ties_pick_lowest_id() {
        assert_eq!(four_cycle().max_degree(), Some((0, 2)));
        assert_eq!(Graph::new(3).max_degree(), Some((0, 0)));
        assert_eq!(Graph::new(0).max_degree(), None);
    }

    #[test]
    fn invalid_vertices_are_rejected() {
        let g = four_cycle();
        match g.degree(4) {
            Err(CombsolError::GraphError(e)) => assert_eq!(
                e,
                GraphError::InvalidVertex {
                    vertex: 4,
                    vertex_count: 4
                }
            ),
            other => panic!("unexpected {other:?}"),
        }
        assert!(g.neighbors(9).is_err());
        assert!(g.dfs(4).is_err());
        assert!(Graph::from_edges(2, &[(0, 2)]).is_err());
        assert!(matches!(
            Graph::from_edges(2, &[(1, 1)]),
            Err(CombsolError::GraphError(GraphError::SelfLoop { vertex: 1 }))
        ));
    }

    #[test]
    fn duplicate_edges_are_skipped() {
        let g = Graph::from_edges(3, &[(0, 1), (1, 0), (1, 2)]).unwrap();
        assert_eq!(g.edges().collect::<Vec<_>>(), vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn deleting_edges_keeps_vertices_and_order() {
        let mut g = four_cycle();
        assert_eq!(g.delete_edges(&[(2, 1), (2, 1)]).unwrap(), 1);
        assert_eq!(g.edges().collect::<Vec<_>>(), vec![(0, 1), (2, 3), (0, 3)]);
        let removed = g.delete_incident_edges(0).unwrap();
        assert_eq!(removed.len(), 2);
        assert!(removed.contains(&(0, 1)) && removed.contains(&(0, 3)));
        assert_eq!(g.edges().collect::<Vec<_>>(), vec![(2, 3)]);
        assert_eq!(g.vertex_count(), 4);
        assert_eq!(g.degree(0).unwrap(), 0);
        assert!(g.delete_incident_edges(0).unwrap().is_empty());
    }

    #[test]
    fn dfs_covers_the_component_of_start() {
        let g = Graph::from_edges(6, &[(0, 1), (1, 2), (3, 4)]).unwrap();
        let order = g.dfs(1).unwrap();
        assert_eq!(order[0], 1);
        let mut sorted = order.clone();
        sorted.sort();
        assert_eq!(sorted, vec![0, 1, 2]);
        assert_eq!(g.dfs(1).unwrap(), order);
        assert_eq!(g.dfs(5).unwrap(), vec![5]);
    }

    #[test]
    fn dfs_from_the_end_of_a_path_walks_it_in_order() {
        let g = Graph::from_edges(5, &[(3, 4), (0, 1), (2, 3), (1, 2)]).unwrap();
        assert_eq!(g.dfs(0).unwrap(), vec![0, 1, 2, 3, 4]);
        assert_eq!(g.dfs(4).unwrap(), vec![4, 3, 2, 1, 0]);
    }

    #[test]
    fn dominating_set_certificate() {
        let g = four_cycle();
        assert!(g.is_dominating_set(&[0, 2]));
        assert!(g.is_dominating_set(&[0, 1]));
        assert!(!g.is_dominating_set(&[0]));
        assert!(!g.is_dominating_set(&[0, 7]));
        assert!(Graph::new(0).is_dominating_set(&[]));
    }
}
