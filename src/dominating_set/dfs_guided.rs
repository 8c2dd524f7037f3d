use log::debug;

use super::{
    config::DfsGuidedConfig, DominatingSetMethod, DominatingSetState, DominatingSetStatistics,
    DominatingSetStopReason, Termination,
};
use crate::error::CombsolError;
use crate::graph::Graph;
use crate::other_error;

/// Non-destructive dominating set heuristic guided by depth-first traversals.
///
/// The first step preprocesses the graph: isolated vertices dominate themselves, the unique
/// neighbour of each pendant vertex is selected unless it is already dominated, and finally the
/// vertex of maximum degree is selected as the seed.
///
/// Every following step is one round: a depth-first traversal starting from the previously
/// selected vertex visits the vertices not yet in the dominating set, and the one whose closed
/// neighbourhood contains the most undominated vertices is selected (the earliest visited wins
/// ties). If the traversal finds nothing new to cover, the round restarts the traversal from the
/// lowest undominated vertex instead. Runs stop once all vertices are dominated or after
/// `maximum_iterations` rounds.
pub struct DfsGuidedSolver<'a> {
    graph: &'a Graph,
    state: DominatingSetState,
    statistics: DominatingSetStatistics,
    config: DfsGuidedConfig,
    previous: Option<usize>,
    termination: Option<Termination>,
}

impl<'a> DfsGuidedSolver<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Self::new_with_config(graph, DfsGuidedConfig::default())
    }

    pub fn new_with_config(graph: &'a Graph, config: DfsGuidedConfig) -> Self {
        Self {
            graph,
            state: DominatingSetState::new(graph.vertex_count()),
            statistics: DominatingSetStatistics::default(),
            config,
            previous: None,
            termination: None,
        }
    }

    fn finish(&mut self, termination: Termination) -> DominatingSetStopReason {
        self.termination = Some(termination);
        DominatingSetStopReason::Finished(termination)
    }

    fn select(&mut self, v: usize, covered: impl IntoIterator<Item = usize>) {
        if self.state.select(v, covered) {
            self.statistics.number_of_selections += 1;
        }
    }

    /// Handle isolated and pendant vertices, then select and return the seed.
    fn preprocess(&mut self) -> Result<usize, CombsolError> {
        let graph = self.graph;
        for v in 0..graph.vertex_count() {
            match graph.degree(v)? {
                0 => self.select(v, std::iter::empty()),
                1 => {
                    let neighbors = graph.neighbors(v)?;
                    let u = *neighbors
                        .first()
                        .ok_or_else(|| other_error!("pendant vertex without neighbour"))?;
                    if !self.state.dominated.contains(u) {
                        self.select(u, graph.closed_neighbors(u)?);
                    }
                }
                _ => {}
            }
        }
        let (seed, _) = graph
            .max_degree()
            .ok_or_else(|| other_error!("graph has no vertices"))?;
        self.select(seed, graph.neighbors(seed)?);
        debug!(
            "dfs-guided preprocessing: seed {seed}, dominating {:?}, {} of {} dominated",
            self.state.dominating.as_slice(),
            self.state.dominated.len(),
            graph.vertex_count()
        );
        Ok(seed)
    }
}

impl DominatingSetMethod for DfsGuidedSolver<'_> {
    fn graph(&self) -> &Graph {
        self.graph
    }

    fn state(&self) -> &DominatingSetState {
        &self.state
    }

    fn get_statistics(&self) -> &DominatingSetStatistics {
        &self.statistics
    }

    fn step(&mut self) -> Result<DominatingSetStopReason, CombsolError> {
        if let Some(termination) = self.termination {
            return Ok(DominatingSetStopReason::Finished(termination));
        }
        let n = self.graph.vertex_count();
        if n == 0 {
            return Ok(self.finish(Termination::EmptyGraph));
        }
        let Some(previous) = self.previous else {
            let seed = self.preprocess()?;
            self.previous = Some(seed);
            return Ok(DominatingSetStopReason::Selected(seed));
        };
        if self.state.dominated.len() == n {
            return Ok(self.finish(Termination::Covered));
        }
        if self.statistics.number_of_iterations >= self.config.maximum_iterations {
            return Ok(self.finish(Termination::IterationCap));
        }
        self.statistics.number_of_iterations += 1;

        let mut best: Option<(usize, Vec<usize>)> = None;
        for v in self.graph.dfs(previous)? {
            if self.state.dominating.contains(v) {
                continue;
            }
            let candidate = self
                .graph
                .closed_neighbors(v)?
                .into_iter()
                .filter(|&u| !self.state.dominated.contains(u))
                .collect::<Vec<_>>();
            let best_len = best.as_ref().map_or(0, |(_, c)| c.len());
            if candidate.len() > best_len {
                best = Some((v, candidate));
            }
        }

        match best {
            Some((v, candidate)) => {
                let ncovered = candidate.len();
                self.select(v, candidate);
                self.previous = Some(v);
                debug!(
                    "dfs-guided round {}: selected {v} covering {ncovered} new, {} of {n} dominated",
                    self.statistics.number_of_iterations,
                    self.state.dominated.len()
                );
                Ok(DominatingSetStopReason::Selected(v))
            }
            None => {
                let restart = (0..n)
                    .find(|&u| !self.state.dominated.contains(u))
                    .ok_or_else(|| other_error!("no undominated vertex to restart from"))?;
                self.statistics.number_of_reseeds += 1;
                self.previous = Some(restart);
                debug!(
                    "dfs-guided round {}: component of {previous} is covered, restarting from {restart}",
                    self.statistics.number_of_iterations
                );
                Ok(DominatingSetStopReason::Reseeded(restart))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_triangles() -> Graph {
        let edges = [(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)];
        Graph::from_edges(6, &edges).unwrap()
    }

    #[test]
    fn path_is_solved_by_preprocessing() {
        let graph = Graph::from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4)]).unwrap();
        let mut solver = DfsGuidedSolver::new(&graph);
        assert_eq!(solver.step().unwrap(), DominatingSetStopReason::Selected(1));
        assert_eq!(solver.state().dominating.as_slice(), &[1, 3]);
        assert_eq!(solver.state().dominated.len(), 5);
        assert_eq!(
            solver.step().unwrap(),
            DominatingSetStopReason::Finished(Termination::Covered)
        );
    }

    #[test]
    fn pendants_sharing_a_dominated_neighbour_are_skipped() {
        let graph = Graph::from_edges(6, &[(0, 1), (0, 2), (0, 3), (0, 4), (0, 5)]).unwrap();
        let solution = DfsGuidedSolver::new(&graph).solve().unwrap();
        assert_eq!(solution.dominating, vec![0]);
        assert_eq!(solution.dominated, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn isolated_vertices_are_selected_first() {
        let graph = Graph::from_edges(4, &[(1, 2), (2, 3), (3, 1)]).unwrap();
        let solution = DfsGuidedSolver::new(&graph).solve().unwrap();
        assert_eq!(solution.dominating, vec![0, 1]);
        assert_eq!(solution.termination, Termination::Covered);
    }

    #[test]
    fn rounds_pick_the_largest_new_coverage() {
        // seed 0 (degree 4) covers {0, 1, 2, 3, 4}; only 5 then covers three new vertices
        let graph = Graph::from_edges(
            8,
            &[
                (0, 1),
                (0, 2),
                (0, 3),
                (0, 4),
                (1, 2),
                (4, 5),
                (5, 6),
                (5, 7),
                (6, 1),
                (7, 3),
            ],
        )
        .unwrap();
        let mut solver = DfsGuidedSolver::new(&graph);
        assert_eq!(solver.step().unwrap(), DominatingSetStopReason::Selected(0));
        assert_eq!(solver.state().dominated.len(), 5);
        assert_eq!(solver.step().unwrap(), DominatingSetStopReason::Selected(5));
        assert_eq!(
            solver.step().unwrap(),
            DominatingSetStopReason::Finished(Termination::Covered)
        );
        assert_eq!(solver.state().dominating.as_slice(), &[0, 5]);
        assert!(graph.is_dominating_set(solver.state().dominating.as_slice()));
    }

    #[test]
    fn equal_coverage_keeps_the_earliest_visited() {
        // preprocessing selects 1 and 5, leaving only 3 undominated; 2, 3 and 4 each cover it
        // and the traversal from 1 reaches them in that order
        let edges = [(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 6)];
        let graph = Graph::from_edges(7, &edges).unwrap();
        let order = graph.dfs(1).unwrap();
        let position = |v| order.iter().position(|&u| u == v).unwrap();
        assert!(position(2) < position(3) && position(3) < position(4));

        let mut solver = DfsGuidedSolver::new(&graph);
        assert_eq!(solver.step().unwrap(), DominatingSetStopReason::Selected(1));
        assert_eq!(solver.state().dominating.as_slice(), &[1, 5]);
        assert!(!solver.state().dominated.contains(3));
        assert_eq!(solver.step().unwrap(), DominatingSetStopReason::Selected(2));
        assert_eq!(
            solver.step().unwrap(),
            DominatingSetStopReason::Finished(Termination::Covered)
        );
        assert_eq!(solver.state().dominating.as_slice(), &[1, 5, 2]);
    }

    #[test]
    fn covered_component_restarts_the_traversal() {
        let graph = two_triangles();
        let mut solver = DfsGuidedSolver::new(&graph);
        assert_eq!(solver.step().unwrap(), DominatingSetStopReason::Selected(0));
        assert_eq!(solver.step().unwrap(), DominatingSetStopReason::Reseeded(3));
        assert_eq!(solver.step().unwrap(), DominatingSetStopReason::Selected(3));
        assert_eq!(
            solver.step().unwrap(),
            DominatingSetStopReason::Finished(Termination::Covered)
        );
        insta::assert_yaml_snapshot!(solver.get_statistics(), @r###"
        number_of_iterations: 2
        number_of_selections: 2
        number_of_edges_deleted: 0
        number_of_reseeds: 1
        "###);
    }

    #[test]
    fn iteration_cap_returns_partial_sets() {
        let graph = two_triangles();
        let config = DfsGuidedConfig {
            maximum_iterations: 1,
        };
        let solution = DfsGuidedSolver::new_with_config(&graph, config)
            .solve()
            .unwrap();
        assert_eq!(solution.termination, Termination::IterationCap);
        assert_eq!(solution.dominating, vec![0]);
        assert_eq!(solution.dominated, vec![0, 1, 2]);
    }
}
