use ndarray::{Array1, ArrayView1};

use crate::error::{KnnError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Diagnosis {
    Malignant,
    Benign,
}

impl Diagnosis {
    pub fn from_token(token: &str) -> Result<Self> {
        match token.trim() {
            "M" => Ok(Diagnosis::Malignant),
            "B" => Ok(Diagnosis::Benign),
            val => Err(KnnError::UnknownDiagnosis(val.to_owned())),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Diagnosis::Malignant => Diagnosis::Benign,
            Diagnosis::Benign => Diagnosis::Malignant,
        }
    }
}

/// A labeled tumor measurement. Never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    id: i64,
    diagnosis: Diagnosis,
    features: Array1<f64>,
}

impl Record {
    pub fn new(id: i64, diagnosis: Diagnosis, features: impl Into<Array1<f64>>) -> Self {
        Self {
            id,
            diagnosis,
            features: features.into(),
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn diagnosis(&self) -> Diagnosis {
        self.diagnosis
    }

    pub fn features(&self) -> ArrayView1<'_, f64> {
        self.features.view()
    }

    pub fn arity(&self) -> usize {
        self.features.len()
    }
}

/// A training record projected onto its distance from some query.
///
/// Only lives for the duration of a single ranking; it is joined back to its
/// source [`Record`] by `id`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub id: i64,
    pub diagnosis: Diagnosis,
    pub distance: f64,
}

/// Non-empty set of records sharing one feature arity.
#[derive(Debug, Clone)]
pub struct RecordSet {
    records: Vec<Record>,
    arity: usize,
}

impl RecordSet {
    pub fn new(records: Vec<Record>) -> Result<Self> {
        let arity = records.first().ok_or(KnnError::EmptyRecordSet)?.arity();

        if let Some(bad) = records.iter().find(|record| record.arity() != arity) {
            return Err(KnnError::ArityMismatch {
                id: bad.id(),
                expected: arity,
                got: bad.arity(),
            });
        }

        Ok(Self { records, arity })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn count(&self, diagnosis: Diagnosis) -> usize {
        self.records
            .iter()
            .filter(|record| record.diagnosis() == diagnosis)
            .count()
    }
}
