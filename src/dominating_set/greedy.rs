use log::debug;

use super::{
    config::GreedyConfig, DominatingSetMethod, DominatingSetState, DominatingSetStatistics,
    DominatingSetStopReason, Termination,
};
use crate::error::CombsolError;
use crate::graph::Graph;
use crate::other_error;

/// Destructive greedy dominating set heuristic.
///
/// Each step takes the vertex of maximum degree in a working copy of the graph (the lowest id on
/// ties), adds it to the dominating set together with its current neighbours to the dominated set,
/// and deletes all of its edges from the working copy. The run ends once the working copy has no
/// edges left, at which point vertices that were isolated in the input graph are added as their own
/// dominators, or once `maximum_iterations` vertices have been selected.
///
/// The input graph is never modified, so it can be used to check the result
/// (see [Graph::is_dominating_set]); the mutated copy is available from [GreedySolver::working_graph].
pub struct GreedySolver<'a> {
    graph: &'a Graph,
    working: Graph,
    state: DominatingSetState,
    statistics: DominatingSetStatistics,
    config: GreedyConfig,
    termination: Option<Termination>,
}

impl<'a> GreedySolver<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Self::new_with_config(graph, GreedyConfig::default())
    }

    pub fn new_with_config(graph: &'a Graph, config: GreedyConfig) -> Self {
        Self {
            graph,
            working: graph.clone(),
            state: DominatingSetState::new(graph.vertex_count()),
            statistics: DominatingSetStatistics::default(),
            config,
            termination: None,
        }
    }

    /// The graph with the edges of every selected vertex removed.
    pub fn working_graph(&self) -> &Graph {
        &self.working
    }

    fn finish(&mut self, termination: Termination) -> DominatingSetStopReason {
        self.termination = Some(termination);
        DominatingSetStopReason::Finished(termination)
    }
}

impl DominatingSetMethod for GreedySolver<'_> {
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
        if self.working.edge_count() == 0 {
            // only vertices isolated in the input graph can be left undominated here
            for v in 0..n {
                if !self.state.dominated.contains(v) && self.state.select(v, std::iter::empty()) {
                    self.statistics.number_of_selections += 1;
                }
            }
            return Ok(self.finish(Termination::Covered));
        }
        if self.statistics.number_of_iterations >= self.config.maximum_iterations {
            return Ok(self.finish(Termination::IterationCap));
        }

        let (v, degree) = self
            .working
            .max_degree()
            .ok_or_else(|| other_error!("working graph has no vertices"))?;
        let neighbors = self.working.neighbors(v)?;
        if self.state.select(v, neighbors) {
            self.statistics.number_of_selections += 1;
        }
        let removed = self.working.delete_incident_edges(v)?;
        self.statistics.number_of_edges_deleted += removed.len();
        self.statistics.number_of_iterations += 1;
        debug!(
            "greedy step {}: selected {v} (degree {degree}), {} edges left, dominating {:?}",
            self.statistics.number_of_iterations,
            self.working.edge_count(),
            self.state.dominating.as_slice()
        );
        Ok(DominatingSetStopReason::Selected(v))
    }
}
