//! Filesystem destination for generated catalog records.

pub mod output_dir;

pub use output_dir::OutputDir;
