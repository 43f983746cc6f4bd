use thiserror::Error;

pub type Result<T> = std::result::Result<T, KnnError>;

#[derive(Error, Debug)]
pub enum KnnError {
    #[error("record set is empty")]
    EmptyRecordSet,

    #[error("record {id} has {got} features, expected {expected}")]
    ArityMismatch { id: i64, expected: usize, got: usize },

    #[error("cannot compare feature vectors of length {left} and {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("neighbor rank {rank} out of range for {available} training records")]
    RankOutOfRange { rank: usize, available: usize },

    #[error("k must be positive")]
    ZeroNeighbors,

    #[error("need at least 2 records to split, got {len}")]
    DatasetTooSmall { len: usize },

    #[error("train ratio {0} must lie strictly between 0 and 1")]
    InvalidTrainRatio(f64),

    #[error("unexpected diagnosis {0:?}")]
    UnknownDiagnosis(String),

    #[error("line {line}: cannot parse field {field} ({value:?})")]
    InvalidField {
        line: u64,
        field: usize,
        value: String,
    },

    #[error("line {line}: expected at least {expected} fields, got {got}")]
    MissingFields { line: u64, expected: usize, got: usize },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("plotting failed: {0}")]
    Plot(String),
}
