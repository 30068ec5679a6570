//! Degree-preserving edge swaps.
//!
//! Two edges `(a, b)` and `(c, d)` with four distinct endpoints are rewired either in parallel,
//! `(a, c)` and `(b, d)`, or crossed, `(a, d)` and `(b, c)`. Every vertex keeps its degree. The
//! step keeps histograms of end-to-end distances and incident-edge cosines in sync with the
//! graph by applying only the samples the swap changes: the two edge distances, and the cosines
//! between each swapped edge and the other edges at its four endpoints.

use super::{UpdateStep, UpdateStepWithHistograms};
use crate::error::{Error, Result};
use crate::graph::geometry::distance;
use crate::graph::{EdgeId, EdgeKey, SpatialEdge, SpatialGraph};
use crate::histogram::Histogram;
use crate::properties::{
    compute_angles, compute_cosines, compute_end_to_end_distances, cosines_against,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwapEdgesOptions {
    /// Seed of the step's random source. The same seed and graph replay the same swaps.
    pub random_seed: u64,
    /// Random draws tried by [`SwapEdges::select_two_valid_edges`] before giving up.
    pub max_select_attempts: usize,
}

impl Default for SwapEdgesOptions {
    fn default() -> Self {
        Self {
            random_seed: 0,
            max_select_attempts: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    /// Nothing pending.
    Idle,
    /// Histograms reflect the proposed swap; the graph is untouched.
    Performed,
    /// The proposed swap has been written to the graph.
    Applied,
}

/// A pair of edges valid for swapping and the rewiring chosen for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapProposal {
    pub selected_edges: (EdgeId, EdgeId),
    pub selected_keys: (EdgeKey, EdgeKey),
    pub new_edges: (EdgeKey, EdgeKey),
    pub is_swap_parallel: bool,
}

/// Everything recorded by the last [`SwapEdges::perform`], enough to undo it.
#[derive(Debug, Clone, Default)]
pub struct SwapTransaction {
    pub proposal: Option<SwapProposal>,
    pub old_distances: Vec<f64>,
    pub new_distances: Vec<f64>,
    pub old_cosines: Vec<f64>,
    pub new_cosines: Vec<f64>,
    /// Ids the new edges received in the graph once applied: those of the selected edges.
    pub new_edge_ids: Option<(EdgeId, EdgeId)>,
    removed: Vec<(EdgeId, EdgeKey, SpatialEdge)>,
}

impl SwapTransaction {
    fn clear(&mut self) {
        self.proposal = None;
        self.old_distances.clear();
        self.new_distances.clear();
        self.old_cosines.clear();
        self.new_cosines.clear();
        self.new_edge_ids = None;
        self.removed.clear();
    }
}

/// Straight-line distance between the endpoints of `key`, NaN if one is missing. NaN samples are
/// ignored by histograms.
fn key_distance(g: &SpatialGraph, key: EdgeKey) -> f64 {
    match (g.position(key.source), g.position(key.target)) {
        (Some(a), Some(b)) => distance(&a, &b),
        _ => f64::NAN,
    }
}

/// Endpoints of the two edges replacing `k1 = (a, b)` and `k2 = (c, d)`.
pub fn new_edge_keys(is_swap_parallel: bool, k1: EdgeKey, k2: EdgeKey) -> (EdgeKey, EdgeKey) {
    if is_swap_parallel {
        (
            EdgeKey::new(k1.source, k2.source),
            EdgeKey::new(k1.target, k2.target),
        )
    } else {
        (
            EdgeKey::new(k1.source, k2.target),
            EdgeKey::new(k1.target, k2.source),
        )
    }
}

#[derive(Debug, Clone)]
pub struct SwapEdges {
    graph: SpatialGraph,
    histo_distances: Histogram,
    histo_cosines: Histogram,
    options: SwapEdgesOptions,
    rng: StdRng,
    state: StepState,
    transaction: SwapTransaction,
}

impl SwapEdges {
    /// Takes ownership of `graph` and builds its distance and cosine histograms with the bin
    /// layouts of `distance_layout` and `cosine_layout` (usually the target histograms).
    pub fn new(
        graph: SpatialGraph,
        distance_layout: &Histogram,
        cosine_layout: &Histogram,
        options: SwapEdgesOptions,
    ) -> Self {
        let distances = compute_end_to_end_distances(&graph);
        let cosines = compute_cosines(&compute_angles(&graph, true));
        Self {
            histo_distances: Histogram::with_layout_of(distance_layout, &distances),
            histo_cosines: Histogram::with_layout_of(cosine_layout, &cosines),
            rng: StdRng::seed_from_u64(options.random_seed),
            graph,
            options,
            state: StepState::Idle,
            transaction: SwapTransaction::default(),
        }
    }

    pub fn graph(&self) -> &SpatialGraph {
        &self.graph
    }

    pub fn into_graph(self) -> SpatialGraph {
        self.graph
    }

    pub fn options(&self) -> &SwapEdgesOptions {
        &self.options
    }

    pub fn state(&self) -> StepState {
        self.state
    }

    pub fn transaction(&self) -> &SwapTransaction {
        &self.transaction
    }

    /// Draws pairs of distinct, non-loop edges until one can be rewired.
    ///
    /// A pair qualifies when the edges share no endpoint and at least one rewiring creates no
    /// duplicate of an existing edge; the parallel rewiring wins when both qualify. Fails with
    /// [`Error::NoSwappableEdges`] after `max_select_attempts` draws.
    pub fn select_two_valid_edges(&mut self) -> Result<SwapProposal> {
        let attempts = self.options.max_select_attempts.max(1);
        let candidates: Vec<(EdgeId, EdgeKey)> = self
            .graph
            .edges()
            .filter(|(_, key, _)| !key.is_loop())
            .map(|(id, key, _)| (id, key))
            .collect();
        if candidates.len() < 2 {
            return Err(Error::NoSwappableEdges { attempts: 0 });
        }

        for _ in 0..attempts {
            let i = self.rng.gen_range(0..candidates.len());
            let mut j = self.rng.gen_range(0..candidates.len() - 1);
            if j >= i {
                j += 1;
            }
            let (e1, k1) = candidates[i];
            let (e2, k2) = candidates[j];
            if k1.shares_endpoint(&k2) {
                continue;
            }
            for is_swap_parallel in [true, false] {
                let new_edges = new_edge_keys(is_swap_parallel, k1, k2);
                if self.is_novel(new_edges.0) && self.is_novel(new_edges.1) {
                    return Ok(SwapProposal {
                        selected_edges: (e1, e2),
                        selected_keys: (k1, k2),
                        new_edges,
                        is_swap_parallel,
                    });
                }
            }
        }

        Err(Error::NoSwappableEdges { attempts })
    }

    fn is_novel(&self, key: EdgeKey) -> bool {
        !self.graph.has_edge_between(key.source, key.target)
    }

    fn record_samples(&mut self, p: &SwapProposal) {
        let (e1, e2) = p.selected_edges;
        let (k1, k2) = p.selected_keys;
        let (n1, n2) = p.new_edges;
        let g = &self.graph;
        let t = &mut self.transaction;

        for key in [k1, k2] {
            t.old_distances.push(key_distance(g, key));
        }
        for key in [n1, n2] {
            t.new_distances.push(key_distance(g, key));
        }

        for (key, e) in [(k1, e1), (k2, e2)] {
            cosines_against(g, key.source, key.target, e, &mut t.old_cosines);
            cosines_against(g, key.target, key.source, e, &mut t.old_cosines);
        }
        // At each endpoint the new edge replaces the selected edge that touched it.
        let replaced = |v| if k1.touches(v) { e1 } else { e2 };
        for key in [n1, n2] {
            cosines_against(g, key.source, key.target, replaced(key.source), &mut t.new_cosines);
            cosines_against(g, key.target, key.source, replaced(key.target), &mut t.new_cosines);
        }
    }

    fn apply_samples(&mut self) {
        let t = &self.transaction;
        for &x in &t.old_distances {
            self.histo_distances.unfill(x);
        }
        for &x in &t.new_distances {
            self.histo_distances.fill(x);
        }
        for &x in &t.old_cosines {
            self.histo_cosines.unfill(x);
        }
        for &x in &t.new_cosines {
            self.histo_cosines.fill(x);
        }
    }

    fn revert_samples(&mut self) {
        let t = &self.transaction;
        for &x in &t.new_distances {
            self.histo_distances.unfill(x);
        }
        for &x in &t.old_distances {
            self.histo_distances.fill(x);
        }
        for &x in &t.new_cosines {
            self.histo_cosines.unfill(x);
        }
        for &x in &t.old_cosines {
            self.histo_cosines.fill(x);
        }
    }

    fn revert_graph(&mut self) -> Result<()> {
        if let Some((n1, n2)) = self.transaction.new_edge_ids.take() {
            self.graph.remove_edge(n1);
            self.graph.remove_edge(n2);
        }
        for (id, key, edge) in self.transaction.removed.drain(..) {
            self.graph.restore_edge(id, key, edge)?;
        }
        Ok(())
    }
}

impl UpdateStep for SwapEdges {
    /// Selects a swap and updates the histograms as if it were applied. The graph itself is only
    /// touched by [`UpdateStep::update_graph`]. An applied previous swap is committed; one that
    /// was only performed is discarded first, so the histograms keep describing the graph.
    fn perform(&mut self) -> Result<()> {
        if self.state == StepState::Performed {
            self.revert_samples();
        }
        self.transaction.clear();
        self.state = StepState::Idle;

        let proposal = self.select_two_valid_edges()?;
        self.record_samples(&proposal);
        self.transaction.proposal = Some(proposal);
        self.apply_samples();
        self.state = StepState::Performed;

        tracing::trace!(
            e1 = %proposal.selected_edges.0,
            e2 = %proposal.selected_edges.1,
            parallel = proposal.is_swap_parallel,
            "proposed edge swap"
        );
        Ok(())
    }

    /// Restores the histograms, and the graph when the swap was already applied.
    fn undo(&mut self) -> Result<()> {
        match self.state {
            StepState::Idle => return Err(Error::NothingToUndo),
            StepState::Applied => self.revert_graph()?,
            StepState::Performed => {}
        }
        self.revert_samples();
        self.state = StepState::Idle;
        Ok(())
    }

    fn update_graph(&mut self) -> Result<()> {
        let (StepState::Performed, Some(p)) = (self.state, self.transaction.proposal) else {
            return Err(Error::UpdateBeforePerform);
        };
        let (e1, e2) = p.selected_edges;
        for e in [e1, e2] {
            if let Some((key, edge)) = self.graph.remove_edge(e) {
                self.transaction.removed.push((e, key, edge));
            }
        }
        // The new edges take over the vacated ids, so the slot table never grows.
        let (n1, n2) = p.new_edges;
        self.graph
            .add_edge_at(e1, n1.source, n1.target, SpatialEdge::default())?;
        self.graph
            .add_edge_at(e2, n2.source, n2.target, SpatialEdge::default())?;
        self.transaction.new_edge_ids = Some((e1, e2));
        self.state = StepState::Applied;
        Ok(())
    }
}

impl UpdateStepWithHistograms for SwapEdges {
    fn histo_distances(&self) -> &Histogram {
        &self.histo_distances
    }

    fn histo_cosines(&self) -> &Histogram {
        &self.histo_cosines
    }
}
