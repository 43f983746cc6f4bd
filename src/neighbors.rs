use std::borrow::Borrow;

use crate::distance;
use crate::error::{KnnError, Result};
use crate::record::{Diagnosis, Neighbor, Record};

/// Projects every training record onto its distance from `query`, nearest first.
///
/// Records at equal distance keep their training order.
pub fn rank<R: Borrow<Record>>(query: &Record, training: &[R]) -> Result<Vec<Neighbor>> {
    let mut neighbors = training
        .iter()
        .map(|candidate| {
            let candidate = candidate.borrow();

            Ok(Neighbor {
                id: candidate.id(),
                diagnosis: candidate.diagnosis(),
                distance: distance::between(query, candidate)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    neighbors.sort_by(|a, b| a.distance.total_cmp(&b.distance));

    Ok(neighbors)
}

/// Diagnosis of the `rank`-th nearest training record, 1-indexed.
pub fn nth_nearest<R: Borrow<Record>>(
    rank: usize,
    query: &Record,
    training: &[R],
) -> Result<Diagnosis> {
    if rank == 0 || rank > training.len() {
        return Err(KnnError::RankOutOfRange {
            rank,
            available: training.len(),
        });
    }

    let ranked = self::rank(query, training)?;

    Ok(ranked[rank - 1].diagnosis)
}
