//! Repeated random trials for one or more neighbor counts, averaged per metric.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use crate::error::Result;
use crate::record::RecordSet;
use crate::trial::{TrialRunner, TrialStatistics, DEFAULT_TRAIN_RATIO};

pub const DEFAULT_TRIALS: usize = 100;

#[derive(Debug, Clone)]
pub struct ExperimentConfig {
    /// Number of random splits per k
    pub trials: usize,
    /// Fraction of records used for training in each split
    pub train_ratio: f64,
    /// Seed for reproducible runs; entropy-seeded when absent
    pub seed: Option<u64>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            train_ratio: DEFAULT_TRAIN_RATIO,
            seed: None,
        }
    }
}

impl ExperimentConfig {
    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }
}

/// Anything that can produce one trial's statistics.
pub trait Evaluate {
    fn evaluate(&mut self, rng: &mut dyn rand::RngCore) -> Result<TrialStatistics>;
}

impl Evaluate for TrialRunner<'_> {
    fn evaluate(&mut self, rng: &mut dyn rand::RngCore) -> Result<TrialStatistics> {
        self.run(rng)
    }
}

/// Mean and population standard deviation over the trials where a metric was
/// defined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSummary {
    pub mean: f64,
    pub std_dev: f64,
    pub defined_trials: usize,
}

impl MetricSummary {
    fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;

        Some(Self {
            mean,
            std_dev: variance.sqrt(),
            defined_trials: values.len(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentSummary {
    pub trials: usize,
    pub accuracy: Option<MetricSummary>,
    pub unanimity_rate: Option<MetricSummary>,
    pub accuracy_given_unanimous: Option<MetricSummary>,
    pub accuracy_given_not_unanimous: Option<MetricSummary>,
}

impl ExperimentSummary {
    pub fn from_trials(results: &[TrialStatistics]) -> Self {
        let accuracy: Vec<f64> = results.iter().map(|r| r.accuracy).collect();
        let unanimity: Vec<f64> = results.iter().map(|r| r.unanimity_rate).collect();
        let given_unanimous: Vec<f64> = results
            .iter()
            .filter_map(|r| r.accuracy_given_unanimous)
            .collect();
        let given_not_unanimous: Vec<f64> = results
            .iter()
            .filter_map(|r| r.accuracy_given_not_unanimous)
            .collect();

        Self {
            trials: results.len(),
            accuracy: MetricSummary::from_values(&accuracy),
            unanimity_rate: MetricSummary::from_values(&unanimity),
            accuracy_given_unanimous: MetricSummary::from_values(&given_unanimous),
            accuracy_given_not_unanimous: MetricSummary::from_values(&given_not_unanimous),
        }
    }

    pub fn mean_accuracy(&self) -> Option<f64> {
        self.accuracy.map(|m| m.mean)
    }

    pub fn mean_unanimity_rate(&self) -> Option<f64> {
        self.unanimity_rate.map(|m| m.mean)
    }
}

/// Runs `trials` evaluations and averages each metric independently.
pub fn aggregate<E: Evaluate + ?Sized, G: Rng>(
    evaluator: &mut E,
    trials: usize,
    rng: &mut G,
) -> Result<ExperimentSummary> {
    let mut results = Vec::with_capacity(trials);
    for _ in 0..trials {
        results.push(evaluator.evaluate(rng)?);
    }

    Ok(ExperimentSummary::from_trials(&results))
}

pub fn run(records: &RecordSet, k: usize, config: &ExperimentConfig) -> Result<ExperimentSummary> {
    let mut runner = TrialRunner::new(records, k, config.train_ratio)?;
    let mut rng = config.rng();

    let summary = aggregate(&mut runner, config.trials, &mut rng)?;

    if summary.accuracy_given_unanimous.is_none() {
        warn!(k, "neighbors were never unanimous; conditional accuracy undefined");
    }
    if summary.accuracy_given_not_unanimous.is_none() {
        warn!(k, "neighbors were always unanimous; conditional accuracy undefined");
    }

    info!(
        k,
        trials = summary.trials,
        accuracy = summary.mean_accuracy(),
        unanimity = summary.mean_unanimity_rate(),
        "experiment finished"
    );

    Ok(summary)
}

/// Runs the experiment once per k, in the order given.
pub fn sweep(
    records: &RecordSet,
    ks: &[usize],
    config: &ExperimentConfig,
) -> Result<Vec<(usize, ExperimentSummary)>> {
    ks.iter()
        .map(|&k| Ok((k, run(records, k, config)?)))
        .collect()
}
