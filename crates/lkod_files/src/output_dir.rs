use lkod_core::{PersistError, RecordSink};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// Folder holding one `<iri>.json` file per generated record.
///
/// The folder is owned by the generator: preparing it for a new batch deletes
/// every regular file already inside.
#[derive(Debug, Clone)]
pub struct OutputDir {
    root: PathBuf,
}

impl OutputDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn ensure(&self) -> Result<(), PersistError> {
        if self.root.is_dir() {
            return Ok(());
        }
        create_private_dir(&self.root).map_err(|source| PersistError::Destination {
            path: self.root.clone(),
            source,
        })
    }

    /// Removes regular files left by a previous run. Subfolders are kept.
    pub fn purge(&self) -> Result<usize, PersistError> {
        if !self.root.exists() {
            return Ok(0);
        }
        let destination = |source: std::io::Error| PersistError::Destination {
            path: self.root.clone(),
            source,
        };

        let mut removed = 0;
        for entry in fs::read_dir(&self.root).map_err(destination)? {
            let path = entry.map_err(destination)?.path();
            if path.is_file() {
                fs::remove_file(&path).map_err(|source| PersistError::Write {
                    path: path.clone(),
                    source,
                })?;
                removed += 1;
            }
        }
        debug!(dir = %self.root.display(), removed, "purged previous output");
        Ok(removed)
    }

    /// The identifier is used as the file stem verbatim.
    pub fn record_path(&self, iri: &str) -> PathBuf {
        self.root.join(format!("{iri}.json"))
    }

    /// Writes one record, refusing to replace an existing file.
    pub fn write_record(&self, iri: &str, body: &str) -> Result<PathBuf, PersistError> {
        if iri.is_empty() {
            return Err(PersistError::MissingIdentifier);
        }
        let path = self.record_path(iri);
        if !is_plain_name(iri) {
            warn!(
                iri,
                path = %path.display(),
                "identifier is not a plain file name, record lands outside the purged folder"
            );
        }
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|source| match source.kind() {
                ErrorKind::AlreadyExists => PersistError::AlreadyExists(path.clone()),
                _ => PersistError::Write {
                    path: path.clone(),
                    source,
                },
            })?;
        file.write_all(body.as_bytes())
            .map_err(|source| PersistError::Write {
                path: path.clone(),
                source,
            })?;
        debug!(path = %path.display(), "wrote record");
        Ok(path)
    }
}

impl RecordSink for OutputDir {
    fn prepare(&mut self) -> Result<(), PersistError> {
        self.purge()?;
        self.ensure()
    }

    fn accept(&mut self, iri: &str, body: &str) -> Result<(), PersistError> {
        self.write_record(iri, body).map(|_| ())
    }
}

/// True when `iri` names a single file directly inside the output folder.
fn is_plain_name(iri: &str) -> bool {
    let mut components = Path::new(iri).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

#[cfg(unix)]
fn create_private_dir(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().recursive(true).mode(0o700).create(path)
}

#[cfg(not(unix))]
fn create_private_dir(path: &Path) -> std::io::Result<()> {
    fs::create_dir_all(path)
}
