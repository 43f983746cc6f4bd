use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::classifier::KNearestNeighbors;
use crate::error::{KnnError, Result};
use crate::record::{Record, RecordSet};

pub const DEFAULT_TRAIN_RATIO: f64 = 0.8;

/// Number of training records for a set of `len` records, fractions truncated.
pub fn train_size(len: usize, train_ratio: f64) -> usize {
    #[allow(clippy::cast_possible_truncation)]
    #[allow(clippy::cast_sign_loss)]
    let size = (len as f64 * train_ratio) as usize;

    size.min(len)
}

/// One random train/test partition. Both halves borrow from the shared set.
#[derive(Debug)]
pub struct Split<'a> {
    pub training: Vec<&'a Record>,
    pub testing: Vec<&'a Record>,
}

pub fn shuffle_split<'a, G: Rng + ?Sized>(
    records: &'a [Record],
    train_ratio: f64,
    rng: &mut G,
) -> Split<'a> {
    let mut order: Vec<&Record> = records.iter().collect();
    order.shuffle(rng);

    let testing = order.split_off(train_size(records.len(), train_ratio));

    Split {
        training: order,
        testing,
    }
}

/// Raw counters gathered while classifying one test set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrialCounts {
    pub tested: usize,
    pub correct: usize,
    pub unanimous: usize,
    pub unanimous_correct: usize,
    pub not_unanimous_correct: usize,
}

impl TrialCounts {
    pub fn not_unanimous(&self) -> usize {
        self.tested - self.unanimous
    }

    /// `None` when nothing was tested.
    pub fn statistics(&self) -> Option<TrialStatistics> {
        Some(TrialStatistics {
            accuracy: percentage(self.correct, self.tested)?,
            unanimity_rate: percentage(self.unanimous, self.tested)?,
            accuracy_given_unanimous: percentage(self.unanimous_correct, self.unanimous),
            accuracy_given_not_unanimous: percentage(
                self.not_unanimous_correct,
                self.not_unanimous(),
            ),
        })
    }
}

fn percentage(part: usize, whole: usize) -> Option<f64> {
    (whole > 0).then(|| part as f64 / whole as f64 * 100.0)
}

/// Per-trial percentages. The conditional accuracies are `None` when no test
/// record fell into that bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialStatistics {
    pub accuracy: f64,
    pub unanimity_rate: f64,
    pub accuracy_given_unanimous: Option<f64>,
    pub accuracy_given_not_unanimous: Option<f64>,
}

pub struct TrialRunner<'a> {
    records: &'a RecordSet,
    model: KNearestNeighbors,
    train_ratio: f64,
}

impl<'a> TrialRunner<'a> {
    pub fn new(records: &'a RecordSet, k: usize, train_ratio: f64) -> Result<Self> {
        if !(train_ratio > 0.0 && train_ratio < 1.0) {
            return Err(KnnError::InvalidTrainRatio(train_ratio));
        }

        let len = records.len();
        let training = train_size(len, train_ratio);
        if len < 2 || training == 0 || training == len {
            return Err(KnnError::DatasetTooSmall { len });
        }

        let model = KNearestNeighbors::new(k)?;
        if k > training {
            return Err(KnnError::RankOutOfRange {
                rank: k,
                available: training,
            });
        }

        Ok(Self {
            records,
            model,
            train_ratio,
        })
    }

    pub fn k(&self) -> usize {
        self.model.k()
    }

    /// Shuffles a private ordering of the records, splits it and classifies
    /// every test record against the training half.
    pub fn tally<G: Rng + ?Sized>(&self, rng: &mut G) -> Result<TrialCounts> {
        let split = shuffle_split(self.records.records(), self.train_ratio, rng);

        self.score(&split)
    }

    /// Classifies every test record of `split` against its training half.
    pub fn score(&self, split: &Split<'_>) -> Result<TrialCounts> {
        let mut counts = TrialCounts::default();

        for record in &split.testing {
            let vote = self.model.vote(record, &split.training)?;
            let correct = vote.prediction() == record.diagnosis();
            let unanimous = vote.is_unanimous();

            counts.tested += 1;
            if unanimous {
                counts.unanimous += 1;
            }
            if correct {
                counts.correct += 1;
                if unanimous {
                    counts.unanimous_correct += 1;
                } else {
                    counts.not_unanimous_correct += 1;
                }
            }
        }

        debug!(
            k = self.model.k(),
            training = split.training.len(),
            tested = counts.tested,
            correct = counts.correct,
            unanimous = counts.unanimous,
            "trial finished"
        );

        Ok(counts)
    }

    pub fn run<G: Rng + ?Sized>(&self, rng: &mut G) -> Result<TrialStatistics> {
        self.tally(rng)?
            .statistics()
            .ok_or(KnnError::DatasetTooSmall {
                len: self.records.len(),
            })
    }
}
