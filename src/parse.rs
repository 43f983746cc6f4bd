use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{KnnError, Result};
use crate::record::{Diagnosis, Record, RecordSet};

/// Field count in the Wisconsin diagnostic data: 30 measurements per tumor.
pub const DIMENSIONS: usize = 30;

const ID_FIELD_INDEX: usize = 0;
const DIAGNOSIS_FIELD_INDEX: usize = 1;

pub fn parse(file_path: impl AsRef<Path>, has_headers: bool) -> Result<RecordSet> {
    let file = File::open(file_path)?;

    parse_reader(BufReader::new(file), has_headers)
}

pub fn parse_reader<R: Read>(reader: R, has_headers: bool) -> Result<RecordSet> {
    let mut reader = ReaderBuilder::new()
        .has_headers(has_headers)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in reader.records() {
        records.push(to_record(&result?)?);
    }

    RecordSet::new(records)
}

fn to_record(row: &StringRecord) -> Result<Record> {
    let line = row.position().map_or(0, csv::Position::line);

    if row.len() <= DIAGNOSIS_FIELD_INDEX {
        return Err(KnnError::MissingFields {
            line,
            expected: DIAGNOSIS_FIELD_INDEX + 1,
            got: row.len(),
        });
    }

    let id_str = &row[ID_FIELD_INDEX];
    let id = id_str.parse::<i64>().map_err(|_| KnnError::InvalidField {
        line,
        field: ID_FIELD_INDEX,
        value: id_str.to_owned(),
    })?;

    let diagnosis = Diagnosis::from_token(&row[DIAGNOSIS_FIELD_INDEX])?;

    let features = row
        .iter()
        .enumerate()
        .skip(DIAGNOSIS_FIELD_INDEX + 1)
        .map(|(index, value)| {
            value.parse::<f64>().map_err(|_| KnnError::InvalidField {
                line,
                field: index,
                value: value.to_owned(),
            })
        })
        .collect::<Result<Vec<f64>>>()?;

    Ok(Record::new(id, diagnosis, features))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_headerless_rows() {
        let data = "842302,M,17.99,10.38\n8510426,B,13.54,14.36\n";

        let set = parse_reader(data.as_bytes(), false).unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.arity(), 2);
        let first = &set.records()[0];
        assert_eq!(first.id(), 842_302);
        assert_eq!(first.diagnosis(), Diagnosis::Malignant);
        assert_eq!(first.features().to_vec(), vec![17.99, 10.38]);
        assert_eq!(set.records()[1].diagnosis(), Diagnosis::Benign);
    }

    #[test]
    fn skips_header_when_asked() {
        let data = "id,diagnosis,radius\n1,B,2.5\n";

        let set = parse_reader(data.as_bytes(), true).unwrap();

        assert_eq!(set.len(), 1);
        assert_eq!(set.records()[0].features().to_vec(), vec![2.5]);
    }

    #[test]
    fn unknown_label_is_an_error() {
        let data = "1,X,2.5\n";

        assert!(matches!(
            parse_reader(data.as_bytes(), false),
            Err(KnnError::UnknownDiagnosis(token)) if token == "X"
        ));
    }

    #[test]
    fn bad_feature_reports_position() {
        let data = "1,M,2.5\n2,B,oops\n";

        assert!(matches!(
            parse_reader(data.as_bytes(), false),
            Err(KnnError::InvalidField { line: 2, field: 2, value }) if value == "oops"
        ));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let data = "1,M,2.5,1.0\n2,B,3.0\n";

        assert!(matches!(
            parse_reader(data.as_bytes(), false),
            Err(KnnError::ArityMismatch { id: 2, expected: 2, got: 1 })
        ));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            parse_reader("".as_bytes(), false),
            Err(KnnError::EmptyRecordSet)
        ));
    }

    #[test]
    fn reads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "5,M,{}", vec!["1.0"; DIMENSIONS].join(",")).unwrap();
        writeln!(file, "6,B,{}", vec!["2.0"; DIMENSIONS].join(",")).unwrap();

        let set = parse(file.path(), false).unwrap();

        assert_eq!(set.arity(), DIMENSIONS);
        assert_eq!(set.count(Diagnosis::Malignant), 1);
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            parse("does/not/exist.csv", false),
            Err(KnnError::Io(_))
        ));
    }
}
