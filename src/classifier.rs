use std::borrow::Borrow;

use crate::error::{KnnError, Result};
use crate::neighbors;
use crate::record::{Diagnosis, Record};

/// Tally of the k nearest neighbors' diagnoses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vote {
    pub malignant: usize,
    pub benign: usize,
}

impl Vote {
    /// Malignant only on a strict majority; ties go to benign.
    pub fn prediction(&self) -> Diagnosis {
        if self.malignant > self.benign {
            Diagnosis::Malignant
        } else {
            Diagnosis::Benign
        }
    }

    pub fn is_unanimous(&self) -> bool {
        self.malignant == 0 || self.benign == 0
    }

    fn record(&mut self, diagnosis: Diagnosis) {
        match diagnosis {
            Diagnosis::Malignant => self.malignant += 1,
            Diagnosis::Benign => self.benign += 1,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct KNearestNeighbors {
    k: usize,
}

impl KNearestNeighbors {
    pub fn new(k: usize) -> Result<Self> {
        if k == 0 {
            return Err(KnnError::ZeroNeighbors);
        }

        Ok(Self { k })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn vote<R: Borrow<Record>>(&self, query: &Record, training: &[R]) -> Result<Vote> {
        if self.k > training.len() {
            return Err(KnnError::RankOutOfRange {
                rank: self.k,
                available: training.len(),
            });
        }

        let ranked = neighbors::rank(query, training)?;
        let mut vote = Vote {
            malignant: 0,
            benign: 0,
        };

        for neighbor in &ranked[..self.k] {
            vote.record(neighbor.diagnosis);
        }

        Ok(vote)
    }

    pub fn predict<R: Borrow<Record>>(&self, query: &Record, training: &[R]) -> Result<Diagnosis> {
        Ok(self.vote(query, training)?.prediction())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(id: i64, diagnosis: Diagnosis, x: f64, y: f64) -> Record {
        Record::new(id, diagnosis, vec![x, y])
    }

    fn clusters() -> Vec<Record> {
        let mut records = Vec::new();
        for i in 0..5 {
            let offset = i as f64 * 0.1;
            records.push(point(i, Diagnosis::Malignant, offset, -offset));
            records.push(point(i + 5, Diagnosis::Benign, 10.0 + offset, 10.0 - offset));
        }
        records
    }

    #[test]
    fn zero_k_rejected() {
        assert!(matches!(
            KNearestNeighbors::new(0),
            Err(KnnError::ZeroNeighbors)
        ));
    }

    #[test]
    fn majority_of_three_near_malignant_cluster() {
        let model = KNearestNeighbors::new(3).unwrap();
        let query = point(99, Diagnosis::Malignant, 0.1, 0.1);

        let vote = model.vote(&query, &clusters()).unwrap();

        assert_eq!(vote.prediction(), Diagnosis::Malignant);
        assert!(vote.is_unanimous());
        assert_eq!(vote.malignant, 3);
    }

    #[test]
    fn exact_match_wins_for_one_neighbor() {
        let training = vec![
            point(1, Diagnosis::Malignant, 0.0, 0.0),
            point(2, Diagnosis::Benign, 5.0, 5.0),
        ];
        let model = KNearestNeighbors::new(1).unwrap();
        let query = point(3, Diagnosis::Benign, 0.0, 0.0);

        assert_eq!(
            model.predict(&query, &training).unwrap(),
            Diagnosis::Malignant
        );
    }

    #[test]
    fn one_neighbor_matches_nearest() {
        let training = clusters();
        let model = KNearestNeighbors::new(1).unwrap();

        for (x, y) in [(0.0, 0.0), (3.0, 4.0), (6.0, 5.5), (12.0, 9.0)] {
            let query = point(-1, Diagnosis::Benign, x, y);
            assert_eq!(
                model.predict(&query, &training).unwrap(),
                neighbors::nth_nearest(1, &query, &training).unwrap()
            );
        }
    }

    #[test]
    fn even_tie_defaults_to_benign() {
        let training = vec![
            point(1, Diagnosis::Malignant, 1.0, 0.0),
            point(2, Diagnosis::Benign, 0.0, 2.0),
        ];
        let model = KNearestNeighbors::new(2).unwrap();
        let query = point(3, Diagnosis::Malignant, 0.0, 0.0);

        let vote = model.vote(&query, &training).unwrap();

        assert_eq!(vote, Vote { malignant: 1, benign: 1 });
        assert_eq!(vote.prediction(), Diagnosis::Benign);
        assert!(!vote.is_unanimous());
    }

    #[test]
    fn k_larger_than_training_set() {
        let training = vec![point(1, Diagnosis::Malignant, 0.0, 0.0)];
        let model = KNearestNeighbors::new(3).unwrap();
        let query = point(2, Diagnosis::Malignant, 0.0, 0.0);

        assert!(matches!(
            model.vote(&query, &training),
            Err(KnnError::RankOutOfRange {
                rank: 3,
                available: 1
            })
        ));
    }

    #[test]
    fn repeated_votes_are_identical() {
        let training = clusters();
        let model = KNearestNeighbors::new(5).unwrap();
        let query = point(0, Diagnosis::Benign, 4.0, 6.0);

        let first = model.vote(&query, &training).unwrap();
        let second = model.vote(&query, &training).unwrap();

        assert_eq!(first, second);
    }
}
