//! Statistical rewiring towards target histograms.
//!
//! An [`UpdateStep`] proposes a change, reflects it in its histograms, and either writes it to
//! the graph or rolls it back. [`run`] drives a step greedily: a proposal is kept when it does
//! not move the step's histograms further from the targets.

pub mod swap_edges;

pub use swap_edges::{StepState, SwapEdges, SwapEdgesOptions, SwapProposal, SwapTransaction};

use crate::error::Result;
use crate::histogram::Histogram;
use serde::{Deserialize, Serialize};

/// A reversible, two-phase change to a graph.
///
/// `perform` computes the change and its statistical effect without touching the graph;
/// `update_graph` applies it; `undo` reverts whatever the last `perform` did.
pub trait UpdateStep {
    fn perform(&mut self) -> Result<()>;
    fn undo(&mut self) -> Result<()>;
    fn update_graph(&mut self) -> Result<()>;
}

/// An update step that tracks distance and cosine histograms of its graph.
pub trait UpdateStepWithHistograms: UpdateStep {
    fn histo_distances(&self) -> &Histogram;
    fn histo_cosines(&self) -> &Histogram;
}

/// Histograms a generation run steers towards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Targets {
    pub distances: Histogram,
    pub cosines: Histogram,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    pub iterations: usize,
    pub distance_weight: f64,
    pub cosine_weight: f64,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            iterations: 1000,
            distance_weight: 1.0,
            cosine_weight: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GenerateSummary {
    pub accepted: usize,
    pub rejected: usize,
    pub initial_score: f64,
    pub final_score: f64,
}

/// Weighted sum of the L1 distances between the step's histograms and the targets.
pub fn score<S>(step: &S, targets: &Targets, options: &GenerateOptions) -> Result<f64>
where
    S: UpdateStepWithHistograms + ?Sized,
{
    let d = step.histo_distances().l1_distance(&targets.distances)?;
    let c = step.histo_cosines().l1_distance(&targets.cosines)?;
    Ok(options.distance_weight * d + options.cosine_weight * c)
}

/// Greedy rewiring: keeps a proposal whenever the score does not increase.
pub fn run<S>(step: &mut S, targets: &Targets, options: &GenerateOptions) -> Result<GenerateSummary>
where
    S: UpdateStepWithHistograms + ?Sized,
{
    run_with_policy(step, targets, options, |before, after| after <= before)
}

/// Runs `options.iterations` proposals, asking `accept(current_score, proposed_score)` whether
/// to apply each one.
///
/// Errors from the step abort the run, including
/// [`Error::NoSwappableEdges`](crate::Error::NoSwappableEdges); the graph is left with every
/// proposal accepted so far.
pub fn run_with_policy<S, F>(
    step: &mut S,
    targets: &Targets,
    options: &GenerateOptions,
    mut accept: F,
) -> Result<GenerateSummary>
where
    S: UpdateStepWithHistograms + ?Sized,
    F: FnMut(f64, f64) -> bool,
{
    let initial_score = score(step, targets, options)?;
    let mut summary = GenerateSummary {
        initial_score,
        final_score: initial_score,
        ..Default::default()
    };

    for iteration in 0..options.iterations {
        step.perform()?;
        let proposed = score(step, targets, options)?;
        if accept(summary.final_score, proposed) {
            step.update_graph()?;
            summary.final_score = proposed;
            summary.accepted += 1;
            tracing::trace!(iteration, score = proposed, "accepted proposal");
        } else {
            step.undo()?;
            summary.rejected += 1;
            tracing::trace!(iteration, score = proposed, "rejected proposal");
        }
    }

    tracing::debug!(
        iterations = options.iterations,
        accepted = summary.accepted,
        rejected = summary.rejected,
        initial_score = summary.initial_score,
        final_score = summary.final_score,
        "generation finished"
    );
    Ok(summary)
}
