//! Batch mapping of a whole source export and hand-off to a [`RecordSink`].

use crate::error::{GenerateError, PersistError, chain};
use crate::mapper::map_descriptor;
use crate::schema::DatasetRecord;
use crate::sink::RecordSink;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Maps every descriptor, preserving input order. The first malformed
/// descriptor aborts the batch.
pub fn map_all(descriptors: &[Value]) -> Result<Vec<DatasetRecord>, GenerateError> {
    let records = descriptors
        .iter()
        .enumerate()
        .map(|(index, descriptor)| -> Result<DatasetRecord, GenerateError> {
            let record = map_descriptor(descriptor)
                .map_err(|source| GenerateError::MalformedRecord { index, source })?;
            debug!(index, iri = %record.iri, "mapped descriptor");
            Ok(record)
        })
        .collect::<Result<Vec<_>, _>>()?;
    info!(count = records.len(), "mapped source descriptors");
    Ok(records)
}

pub fn render(record: &DatasetRecord, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(record)
    } else {
        serde_json::to_string(record)
    }
}

#[derive(Debug)]
pub struct RecordFailure {
    /// Position of the record in the batch.
    pub index: usize,
    pub iri: String,
    pub error: PersistError,
}

#[derive(Debug, Default)]
pub struct PersistReport {
    /// Set when the sink could not be prepared; nothing was written then.
    pub setup: Option<PersistError>,
    pub written: Vec<String>,
    pub failures: Vec<RecordFailure>,
}

impl PersistReport {
    /// True only when every record of the batch reached the sink.
    pub fn is_complete(&self) -> bool {
        self.setup.is_none() && self.failures.is_empty()
    }
}

/// Hands every record with an identifier to `sink`. Failures are collected
/// per record; records already accepted stay where they are.
pub fn persist_all(records: &[DatasetRecord], sink: &mut dyn RecordSink, pretty: bool) -> PersistReport {
    let mut report = PersistReport::default();
    if let Err(err) = sink.prepare() {
        warn!(error = %chain(&err), "destination could not be prepared");
        report.setup = Some(err);
        return report;
    }

    for (index, record) in records.iter().enumerate() {
        match persist_one(record, sink, pretty) {
            Ok(()) => report.written.push(record.iri.clone()),
            Err(error) => {
                warn!(index, iri = %record.iri, error = %chain(&error), "record not persisted");
                report.failures.push(RecordFailure {
                    index,
                    iri: record.iri.clone(),
                    error,
                });
            }
        }
    }

    info!(
        written = report.written.len(),
        failed = report.failures.len(),
        "persisted records"
    );
    report
}

fn persist_one(record: &DatasetRecord, sink: &mut dyn RecordSink, pretty: bool) -> Result<(), PersistError> {
    if record.iri.is_empty() {
        return Err(PersistError::MissingIdentifier);
    }
    let body = render(record, pretty)?;
    sink.accept(&record.iri, &body)
}
