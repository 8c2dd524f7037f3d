use log::info;
use serde::Serialize;

use crate::{error::CombsolError, graph::Graph};

pub mod config;
pub mod dfs_guided;
pub mod greedy;

pub use config::{DfsGuidedConfig, GreedyConfig};
pub use dfs_guided::DfsGuidedSolver;
pub use greedy::GreedySolver;

/// A set of vertex ids that remembers insertion order. Inserting a member again is a no-op.
#[derive(Clone, Debug, Default)]
pub struct VertexSet {
    order: Vec<usize>,
    members: Vec<bool>,
}

impl VertexSet {
    pub fn new(n: usize) -> Self {
        Self {
            order: Vec::new(),
            members: vec![false; n],
        }
    }

    /// Returns true if `v` was not already a member. Ids outside `0..n` are never members and
    /// inserting one does nothing.
    pub fn insert(&mut self, v: usize) -> bool {
        match self.members.get_mut(v) {
            Some(member) if !*member => {
                *member = true;
                self.order.push(v);
                true
            }
            _ => false,
        }
    }

    pub fn contains(&self, v: usize) -> bool {
        self.members.get(v).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Members in insertion order.
    pub fn as_slice(&self) -> &[usize] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.order.iter().copied()
    }
}

/// The evolving sets of a dominating set run. `dominating` is always a subset of `dominated`.
#[derive(Clone, Debug, Default)]
pub struct DominatingSetState {
    pub dominating: VertexSet,
    pub dominated: VertexSet,
}

impl DominatingSetState {
    pub fn new(n: usize) -> Self {
        Self {
            dominating: VertexSet::new(n),
            dominated: VertexSet::new(n),
        }
    }

    /// Make `v` a dominator covering itself and `covered`. Returns true if `v` is a new dominator.
    pub fn select(&mut self, v: usize, covered: impl IntoIterator<Item = usize>) -> bool {
        let is_new = self.dominating.insert(v);
        self.dominated.insert(v);
        for u in covered {
            self.dominated.insert(u);
        }
        is_new
    }
}

/// Why a run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Termination {
    /// Every vertex is dominated.
    Covered,
    /// The iteration cap was hit; the sets may not cover the graph.
    IterationCap,
    /// The graph has no vertices.
    EmptyGraph,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DominatingSetStopReason {
    /// A vertex was added to the dominating set.
    Selected(usize),
    /// No reachable vertex covered anything new, the next traversal starts from this vertex.
    Reseeded(usize),
    Finished(Termination),
}

#[derive(Clone, Debug, Serialize, Default)]
pub struct DominatingSetStatistics {
    pub number_of_iterations: usize,
    pub number_of_selections: usize,
    pub number_of_edges_deleted: usize,
    pub number_of_reseeds: usize,
}

#[derive(Clone, Debug)]
pub struct DominatingSetSolution {
    pub dominating: Vec<usize>,
    pub dominated: Vec<usize>,
    pub termination: Termination,
    pub statistics: DominatingSetStatistics,
}

impl DominatingSetSolution {
    /// False if the run was cut short by its iteration cap.
    pub fn is_complete(&self) -> bool {
        self.termination != Termination::IterationCap
    }
}

/// A stepping dominating set heuristic.
///
/// Each call to [DominatingSetMethod::step] performs one iteration of the heuristic, so the sets can
/// be inspected (or rendered) between iterations using [DominatingSetMethod::state]. Once the run is
/// finished, further calls keep returning the same [DominatingSetStopReason::Finished] value.
pub trait DominatingSetMethod {
    /// The input graph, as it was when the solver was created.
    fn graph(&self) -> &Graph;

    fn state(&self) -> &DominatingSetState;

    fn step(&mut self) -> Result<DominatingSetStopReason, CombsolError>;

    fn get_statistics(&self) -> &DominatingSetStatistics;

    /// Step until the run is finished and return the final sets.
    fn solve(&mut self) -> Result<DominatingSetSolution, CombsolError> {
        loop {
            if let DominatingSetStopReason::Finished(termination) = self.step()? {
                let state = self.state();
                info!(
                    "dominating set of {} vertices found for {} vertices ({:?})",
                    state.dominating.len(),
                    self.graph().vertex_count(),
                    termination
                );
                return Ok(DominatingSetSolution {
                    dominating: state.dominating.as_slice().to_vec(),
                    dominated: state.dominated.as_slice().to_vec(),
                    termination,
                    statistics: self.get_statistics().clone(),
                });
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DominatingPolicy {
    /// Repeatedly take the highest degree vertex and delete its edges, see [GreedySolver].
    DestructiveGreedy,
    /// Grow the set along depth-first traversals, see [DfsGuidedSolver].
    DfsGuided,
}

/// Run `policy` on `graph` with its default configuration.
pub fn solve_dominating_set(
    graph: &Graph,
    policy: DominatingPolicy,
) -> Result<DominatingSetSolution, CombsolError> {
    match policy {
        DominatingPolicy::DestructiveGreedy => GreedySolver::new(graph).solve(),
        DominatingPolicy::DfsGuided => DfsGuidedSolver::new(graph).solve(),
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn vertex_set_keeps_insertion_order() {
        let mut s = VertexSet::new(5);
        assert!(s.insert(3));
        assert!(s.insert(1));
        assert!(!s.insert(3));
        assert_eq!(s.as_slice(), &[3, 1]);
        assert!(s.contains(1));
        assert!(!s.contains(0));
        assert!(!s.contains(99));
        assert!(!s.insert(5));
        assert!(!s.insert(99));
        assert!(!s.contains(5));
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn select_keeps_dominating_inside_dominated() {
        let mut state = DominatingSetState::new(4);
        assert!(state.select(2, [1, 3]));
        assert!(!state.select(2, [0]));
        assert_eq!(state.dominating.as_slice(), &[2]);
        assert_eq!(state.dominated.as_slice(), &[2, 1, 3, 0]);
    }

    fn check_solution(graph: &Graph, solution: &DominatingSetSolution) {
        // dominated is covered by the closed neighbourhoods of dominating
        let mut covered = vec![false; graph.vertex_count()];
        for &v in &solution.dominating {
            for u in graph.closed_neighbors(v).unwrap() {
                covered[u] = true;
            }
        }
        for &v in &solution.dominated {
            assert!(covered[v], "vertex {v} is dominated but not covered");
        }
        for &v in &solution.dominating {
            assert!(solution.dominated.contains(&v));
        }
        if solution.is_complete() {
            assert_eq!(solution.dominated.len(), graph.vertex_count());
            assert!(graph.is_dominating_set(&solution.dominating));
        }
    }

    #[test]
    fn both_policies_cover_random_geometric_graphs() {
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let graph = Graph::random_geometric(30, 0.3, &mut rng);
            for policy in [DominatingPolicy::DestructiveGreedy, DominatingPolicy::DfsGuided] {
                let solution = solve_dominating_set(&graph, policy).unwrap();
                assert_eq!(solution.termination, Termination::Covered);
                check_solution(&graph, &solution);
            }
        }
    }

    #[test]
    fn runs_are_deterministic() {
        let graph = Graph::random_geometric(40, 0.25, &mut StdRng::seed_from_u64(7));
        for policy in [DominatingPolicy::DestructiveGreedy, DominatingPolicy::DfsGuided] {
            let first = solve_dominating_set(&graph, policy).unwrap();
            let second = solve_dominating_set(&graph, policy).unwrap();
            assert_eq!(first.dominating, second.dominating);
            assert_eq!(first.dominated, second.dominated);
        }
    }

    #[test]
    fn tiny_graphs() {
        for policy in [DominatingPolicy::DestructiveGreedy, DominatingPolicy::DfsGuided] {
            let empty = solve_dominating_set(&Graph::new(0), policy).unwrap();
            assert!(empty.dominating.is_empty());
            assert_eq!(empty.termination, Termination::EmptyGraph);
            assert!(empty.is_complete());

            let single = solve_dominating_set(&Graph::new(1), policy).unwrap();
            assert_eq!(single.dominating, vec![0]);
            assert_eq!(single.termination, Termination::Covered);
        }
    }
}
