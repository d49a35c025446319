//! Maps an open-data portal export onto per-dataset records of the Czech
//! OFN catalog vocabulary.

pub mod batch;
pub mod config;
pub mod error;
pub mod mapper;
pub mod operation;
pub mod schema;
pub mod sink;
pub mod source;

pub use batch::{PersistReport, RecordFailure, map_all, persist_all, render};
pub use config::GeneratorConfig;
pub use error::{ConfigError, GenerateError, MappingError, PersistError, UnknownOperation, chain};
pub use mapper::map_descriptor;
pub use operation::Operation;
pub use schema::{DatasetRecord, DistributionRecord, UsageTerms};
pub use sink::{MemorySink, RecordSink};
pub use source::load_descriptors;
