use crate::error::PersistError;

/// Destination for serialized dataset records.
pub trait RecordSink {
    /// Called once before the first record of a batch is accepted.
    fn prepare(&mut self) -> Result<(), PersistError>;

    /// Stores one serialized record under its identifier.
    fn accept(&mut self, iri: &str, body: &str) -> Result<(), PersistError>;
}

/// Keeps accepted records in memory, in acceptance order.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub records: Vec<(String, String)>,
}

impl RecordSink for MemorySink {
    fn prepare(&mut self) -> Result<(), PersistError> {
        self.records.clear();
        Ok(())
    }

    fn accept(&mut self, iri: &str, body: &str) -> Result<(), PersistError> {
        self.records.push((iri.to_string(), body.to_string()));
        Ok(())
    }
}
