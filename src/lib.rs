pub mod classifier;
pub mod distance;
pub mod error;
pub mod experiment;
pub mod logging;
pub mod neighbors;
pub mod parse;
pub mod plot;
pub mod record;
pub mod report;
pub mod trial;

pub use error::{KnnError, Result};
pub use record::{Diagnosis, Neighbor, Record, RecordSet};
